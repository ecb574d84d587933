//! Well-known supplier role names.
//!
//! A supplier profile carries at most one of these. The document summarizer
//! reports free-form role guesses which are mapped back onto this list.

use crate::error::CoreError;

/// Roles a supplier can offer, in display order.
pub const KNOWN_ROLES: &[&str] = &[
    "Accountant",
    "Babysitter",
    "Carpenter",
    "Cleaner",
    "Driver",
    "Electrician",
    "Gardener",
    "Graphic Designer",
    "Handyman",
    "Mover",
    "Painter",
    "Pet Sitter",
    "Photographer",
    "Plumber",
    "Software Developer",
    "Tutor",
];

/// Return the known role whose name equals `detected`, ignoring case.
///
/// Surrounding whitespace is not trimmed; the match is exact apart from case.
pub fn match_known_role(detected: &str) -> Option<&'static str> {
    KNOWN_ROLES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(detected))
}

/// Map the first detected role onto a known role.
///
/// Only the first entry is considered. Returns `None` when the list is empty
/// or its first entry matches nothing.
pub fn role_from_detected(detected_roles: &[String]) -> Option<&'static str> {
    detected_roles.first().and_then(|r| match_known_role(r))
}

/// Validate a role selection. The empty string means "unset" and is accepted.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if role.is_empty() || KNOWN_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown role '{role}'. Must be one of: {KNOWN_ROLES:?}"
        )))
    }
}
