/// Input validation helpers
///
/// Pure functions used by the HTTP handlers before anything touches storage.
/// They operate on raw JSON values so that presence and type rules can be
/// checked before a request body is turned into a typed model.
///
/// # Example
///
/// ```
/// use fitcenter_shared::validation::{validate_email, validate_required_fields};
/// use serde_json::json;
///
/// let body = json!({ "name": "Alice", "email": "" });
/// let err = validate_required_fields(&body, &["name", "email", "phone"]).unwrap_err();
/// assert_eq!(err, "Missing required fields: email, phone");
///
/// assert!(validate_email("alice@example.com"));
/// ```

use chrono::NaiveDateTime;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Wire format for workout dates (`YYYY-MM-DD HH:MM:SS`)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

/// Digit layout `parse_from_str` is held to; chrono alone tolerates a
/// signed year and missing or leading whitespace
const DATE_SHAPE_PATTERN: &str = r"^\d{4}-\d{1,2}-\d{1,2}\s+\d{1,2}:\d{1,2}:\d{1,2}$";

const PHONE_MIN_LEN: usize = 7;
const PHONE_MAX_LEN: usize = 15;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn date_shape_regex() -> &'static Regex {
    static DATE_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_SHAPE_REGEX
        .get_or_init(|| Regex::new(DATE_SHAPE_PATTERN).expect("date shape pattern compiles"))
}

/// Checks that every field in `fields` is present and truthy
///
/// A field counts as missing when it is absent from the object or holds a
/// falsy value: `null`, `false`, `0`, an empty string, an empty array or an
/// empty object. A body that is not a JSON object is missing every field.
///
/// # Errors
///
/// Returns `Missing required fields: a, b` naming the missing fields in the
/// order they were requested.
pub fn validate_required_fields(data: &Value, fields: &[&str]) -> Result<(), String> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| data.get(*field).map_or(true, is_falsy))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Returns true if `email` looks like `local@domain.tld`
///
/// Only the shape is checked; there is no DNS or deliverability lookup.
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Returns true if `phone` is 7 to 15 ASCII digits
pub fn validate_phone(phone: &str) -> bool {
    (PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&phone.len())
        && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp
///
/// Returns `None` instead of an error so callers can map the failure to
/// their own message.
pub fn validate_date(date: &str) -> Option<NaiveDateTime> {
    if !date_shape_regex().is_match(date) {
        return None;
    }
    NaiveDateTime::parse_from_str(date, DATE_FORMAT).ok()
}

/// Returns true if `value` is a JSON integer greater than zero
///
/// Numeric strings, floats (even `5.0`) and booleans are rejected.
pub fn validate_positive_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i > 0
            } else {
                // Integers above i64::MAX are still positive integers
                n.is_u64()
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_required_fields_all_present() {
        let body = json!({ "name": "Alice", "email": "a@b.com", "phone": "5551234" });
        assert!(validate_required_fields(&body, &["name", "email", "phone"]).is_ok());
    }

    #[test]
    fn test_required_fields_absent_and_falsy() {
        let body = json!({ "name": "", "phone": null, "member_id": 0 });
        let err = validate_required_fields(&body, &["name", "email", "phone", "member_id"])
            .unwrap_err();
        assert_eq!(err, "Missing required fields: name, email, phone, member_id");
    }

    #[test]
    fn test_required_fields_other_falsy_values() {
        let body = json!({ "a": false, "b": [], "c": {}, "d": 0.0, "e": true, "f": [1] });
        let err = validate_required_fields(&body, &["a", "b", "c", "d", "e", "f"]).unwrap_err();
        assert_eq!(err, "Missing required fields: a, b, c, d");
    }

    #[test]
    fn test_required_fields_non_object_body() {
        let err = validate_required_fields(&json!([1, 2]), &["name"]).unwrap_err();
        assert_eq!(err, "Missing required fields: name");

        let err = validate_required_fields(&Value::Null, &["name", "email"]).unwrap_err();
        assert_eq!(err, "Missing required fields: name, email");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last+tag@mail-server.co.uk"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("@b.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1234567"));
        assert!(validate_phone("123456789012345"));
        assert!(!validate_phone("123456"));
        assert!(!validate_phone("12345678901234567"));
        assert!(!validate_phone("12a4567"));
        assert!(!validate_phone("+1234567"));
        assert!(!validate_phone(""));
    }

    #[test]
    fn test_validate_date() {
        let parsed = validate_date("2024-01-15 10:30:00").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 15);
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.minute(), 30);

        assert!(validate_date("2024-13-01 10:30:00").is_none());
        assert!(validate_date("2024-02-30 10:30:00").is_none());
        assert!(validate_date("2024-01-15").is_none());
        assert!(validate_date("2024-01-15T10:30:00").is_none());
        assert!(validate_date("").is_none());
    }

    #[test]
    fn test_validate_date_rejects_loose_layouts() {
        assert!(validate_date("2024-06-0109:00:00").is_none());
        assert!(validate_date(" 2024-06-01 09:00:00").is_none());
        assert!(validate_date("2024-06-01 09:00:00 ").is_none());
        assert!(validate_date("+2024-06-01 09:00:00").is_none());
        assert!(validate_date("-2024-06-01 09:00:00").is_none());
        assert!(validate_date("12024-06-01 09:00:00").is_none());

        assert!(validate_date("2024-6-1 9:00:00").is_some());
    }

    #[test]
    fn test_validate_positive_integer() {
        assert!(validate_positive_integer(&json!(5)));
        assert!(validate_positive_integer(&json!(u64::MAX)));
        assert!(!validate_positive_integer(&json!(0)));
        assert!(!validate_positive_integer(&json!(-3)));
        assert!(!validate_positive_integer(&json!("5")));
        assert!(!validate_positive_integer(&json!(5.0)));
        assert!(!validate_positive_integer(&json!(true)));
        assert!(!validate_positive_integer(&Value::Null));
    }
}
