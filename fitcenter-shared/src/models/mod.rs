/// Database models for the fitness center
///
/// # Models
///
/// - `member`: fitness-center clients
/// - `workout_session`: recorded exercise sessions, each owned by one member
///
/// Rows are read and written through [`crate::db::store::Store`]; the
/// `New*` inputs carry the column length limits and check them before a
/// write is attempted.

pub mod member;
pub mod workout_session;

pub use member::{Member, NewMember};
pub use workout_session::{NewWorkoutSession, WorkoutSession};

use validator::{Validate, ValidationErrors};

/// Runs `validator` rules on `input` and reports the first failing field
///
/// Fields are inspected in `order` so the reported message is stable.
pub(crate) fn check_limits<T: Validate>(input: &T, order: &[&str]) -> Result<(), String> {
    match input.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(first_message(&errors, order)),
    }
}

fn first_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    order
        .iter()
        .filter_map(|field| {
            field_errors
                .iter()
                .find(|(name, _)| {
                    let name: &str = name.as_ref();
                    name == *field
                })
                .map(|(_, errs)| *errs)
        })
        .flat_map(|errs| errs.iter())
        .chain(field_errors.values().flat_map(|errs| errs.iter()))
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Validation failed".to_string())
}
