/// Member model
///
/// A member is a fitness-center client. Email addresses are unique across
/// all members; the storage layer enforces this.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE member (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(100) NOT NULL UNIQUE,
///     phone VARCHAR(20) NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```
/// use fitcenter_shared::models::member::NewMember;
///
/// let input = NewMember {
///     name: "Alice".to_string(),
///     email: "alice@example.com".to_string(),
///     phone: "5551234567".to_string(),
/// };
/// assert!(input.check_limits().is_ok());
/// ```

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored member row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    /// Primary key assigned by storage
    pub id: i64,

    /// Display name
    pub name: String,

    /// Contact email, unique across members
    pub email: String,

    /// Contact phone number (digits only)
    pub phone: String,
}

/// Input for creating or replacing a member
///
/// Used for both inserts and full updates: a PUT overwrites all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewMember {
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: String,

    #[validate(length(max = 100, message = "Email must be at most 100 characters."))]
    pub email: String,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters."))]
    pub phone: String,
}

impl NewMember {
    /// Checks the column length limits
    ///
    /// Format rules (email pattern, phone digits) are checked earlier by the
    /// handlers through [`crate::validation`]; this only guards the column
    /// widths.
    pub fn check_limits(&self) -> Result<(), String> {
        super::check_limits(self, &["name", "email", "phone"])
    }

    /// Builds the stored row for `id`
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}
