//! Form input checks shared by the auth pages.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trimmed, lower-cased e-mail address.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Normalize and minimally check an e-mail address.
///
/// # Errors
///
/// Returns the message to show next to the field.
pub fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err("Enter your email address.");
    }
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'));
    if !valid || email.chars().any(char::is_whitespace) {
        return Err("Enter a valid email address.");
    }
    Ok(email)
}

/// # Errors
///
/// Returns the message to show next to the field.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}
