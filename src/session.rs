//! Session Lookup
//!
//! Reads the signed-in user from browser local storage. Done once at app
//! start; controllers receive the user through context, never ad hoc.

use crate::models::User;

/// Local storage key holding the session blob
pub const USER_KEY: &str = "user";

/// Parses the session blob (`{"type": ..., "email": ...}`)
pub fn parse_user(raw: &str) -> Option<User> {
    serde_json::from_str(raw).ok()
}

/// Reads the current user from `localStorage["user"]`
pub fn current_user() -> Option<User> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(USER_KEY).ok()??;
    parse_user(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_session_blob() {
        let user = parse_user(r#"{"type": "Employee", "email": "a@a"}"#).unwrap();
        assert_eq!(user.user_type, "Employee");
        assert_eq!(user.email, "a@a");
    }

    #[test]
    fn email_is_optional_in_the_blob() {
        let user = parse_user(r#"{"type": "Employee"}"#).unwrap();
        assert_eq!(user.user_type, "Employee");
        assert!(user.email.is_empty());
    }

    #[test]
    fn malformed_blob_yields_no_user() {
        assert!(parse_user("not json").is_none());
        assert!(parse_user("").is_none());
    }
}
