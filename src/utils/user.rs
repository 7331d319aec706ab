//! User id validation helper.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// User ids are plain identifiers: letters, digits, '.', '_' and '-'.
/// Rejected before any mutation touches the database.
pub fn validate_user_id(user: &str) -> AppResult<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").unwrap());

    if re.is_match(user) {
        Ok(())
    } else {
        Err(AppError::InvalidUser(user.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_user_id("mrossi").is_ok());
        assert!(validate_user_id("m.rossi-01").is_ok());
    }

    #[test]
    fn rejects_empty_and_spaced() {
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("m rossi").is_err());
        assert!(validate_user_id("-leading").is_err());
    }
}
