/// Storage access layer
///
/// Handlers talk to storage only through the [`Store`] trait, which is
/// injected into the application state. Two implementations exist:
///
/// - [`PgStore`]: PostgreSQL via sqlx, used in production
/// - [`MemoryStore`]: in-process maps with the same constraints, used by
///   tests and for running the server without a database
///
/// Failures come back as a typed [`StoreError`] so callers can tell a
/// constraint violation from an unreachable database.
///
/// # Example
///
/// ```
/// use fitcenter_shared::db::store::{MemoryStore, Store};
/// use fitcenter_shared::models::NewMember;
///
/// # async fn example() -> Result<(), fitcenter_shared::db::store::StoreError> {
/// let store = MemoryStore::new();
/// let member = store
///     .create_member(NewMember {
///         name: "Alice".to_string(),
///         email: "alice@example.com".to_string(),
///         phone: "5551234567".to_string(),
///     })
///     .await?;
///
/// assert_eq!(store.find_member(member.id).await?, Some(member));
/// # Ok(())
/// # }
/// ```

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::{Member, NewMember, NewWorkoutSession, WorkoutSession};
use async_trait::async_trait;

/// Result alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure, classified by cause
///
/// The display text is the underlying database message so it can be passed
/// on to API clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write (e.g. duplicate email)
    #[error("{message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    /// A row referenced a parent that does not exist
    #[error("{message}")]
    ForeignKeyViolation {
        constraint: Option<String>,
        message: String,
    },

    /// A CHECK or NOT NULL constraint rejected the write
    #[error("{message}")]
    CheckViolation {
        constraint: Option<String>,
        message: String,
    },

    /// The database could not be reached (pool closed, timeout, I/O)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Anything else reported by the driver
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Whether the failure came from a schema constraint rather than the
    /// connection
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::UniqueViolation { .. }
                | StoreError::ForeignKeyViolation { .. }
                | StoreError::CheckViolation { .. }
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().map(str::to_string);
                let message = db_err.message().to_string();

                match db_err.kind() {
                    ErrorKind::UniqueViolation => StoreError::UniqueViolation { constraint, message },
                    ErrorKind::ForeignKeyViolation => {
                        StoreError::ForeignKeyViolation { constraint, message }
                    }
                    ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                        StoreError::CheckViolation { constraint, message }
                    }
                    _ => StoreError::Other(message),
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Other(err.to_string()),
        }
    }
}

/// Persistence operations needed by the HTTP handlers
///
/// Every method is a single atomic read or write. Listing methods return rows
/// in ascending id order.
#[async_trait]
pub trait Store: Send + Sync {
    /// Confirms the backing storage is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Inserts a member and returns it with its generated id
    async fn create_member(&self, input: NewMember) -> StoreResult<Member>;

    /// Returns every member
    async fn list_members(&self) -> StoreResult<Vec<Member>>;

    /// Looks a member up by primary key
    async fn find_member(&self, id: i64) -> StoreResult<Option<Member>>;

    /// Overwrites name, email and phone; `None` if the member does not exist
    async fn update_member(&self, id: i64, input: NewMember) -> StoreResult<Option<Member>>;

    /// Deletes a member and its workout sessions; false if it did not exist
    async fn delete_member(&self, id: i64) -> StoreResult<bool>;

    /// Inserts a workout session for an existing member
    async fn create_workout(&self, input: NewWorkoutSession) -> StoreResult<WorkoutSession>;

    /// Returns every workout session
    async fn list_workouts(&self) -> StoreResult<Vec<WorkoutSession>>;

    /// Returns the sessions owned by `member_id`
    async fn list_workouts_for_member(&self, member_id: i64) -> StoreResult<Vec<WorkoutSession>>;
}
