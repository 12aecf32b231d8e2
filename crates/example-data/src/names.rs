//! Display name rules and email derivation for generated accounts.
//!
//! Display names follow the backend's `DisplayName` rules: 3 to 32 characters
//! drawn from ASCII letters, digits, spaces and underscores, not blank.

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

const EMAIL_DOMAIN: &str = "example.org";

/// Whether `name` would be accepted as a backend display name.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_display_name;
///
/// assert!(is_valid_display_name("Ada Lovelace"));
/// assert!(!is_valid_display_name("O'Brien"));
/// assert!(!is_valid_display_name("   "));
/// ```
#[must_use]
pub fn is_valid_display_name(name: &str) -> bool {
    let length = name.chars().count();
    (DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&length)
        && !name.trim().is_empty()
        && name.chars().all(is_display_name_char)
}

const fn is_display_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '_'
}

/// Replace disallowed characters with underscores and cap the length.
pub(crate) fn sanitise_display_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if is_display_name_char(c) { c } else { '_' })
        .take(DISPLAY_NAME_MAX)
        .collect()
}

/// Build a unique address from a display name and the user's ordinal.
///
/// `"Ada Lovelace"`, 3 becomes `ada.lovelace.3@example.org`.
pub(crate) fn derive_email(display_name: &str, ordinal: usize) -> String {
    let local: Vec<String> = display_name
        .split([' ', '_'])
        .map(|part| {
            part.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect();
    let stem = if local.is_empty() {
        "volunteer".to_owned()
    } else {
        local.join(".")
    };
    format!("{stem}.{ordinal}@{EMAIL_DOMAIN}")
}
