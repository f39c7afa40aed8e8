//! Shared utilities for identifier validation.
//!
//! Used by the dispatcher before accepting a `SET_ID` and by the
//! user-id store when loading a persisted identifier at boot.

use crate::config::MAX_USER_ID_LEN;

/// Returns `true` if `s` contains no control characters (C0, DEL or C1).
pub(crate) fn has_no_control_chars(s: &str) -> bool {
    !s.chars().any(char::is_control)
}

/// A storable user identifier: 1 to [`MAX_USER_ID_LEN`] bytes of UTF-8
/// without control characters.
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_USER_ID_LEN && has_no_control_chars(id)
}
