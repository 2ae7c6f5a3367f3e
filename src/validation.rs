//! Pure validation helpers for the auth forms
//!
//! No I/O, fully deterministic. The strength scorer feeds the password meter
//! on the register screen.

use crate::constants::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};

/// Checks the basic shape of an email address: a local part, exactly one `@`,
/// a domain containing a dot, and no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Why a password fails the strict policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    TooShort,
    TooLong,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSymbol,
}

impl PasswordIssue {
    /// User-facing message for this issue
    pub fn message(&self) -> &'static str {
        match self {
            PasswordIssue::TooShort => "Password must be at least 8 characters",
            PasswordIssue::TooLong => "Password is too long",
            PasswordIssue::MissingUppercase => "Password must contain an uppercase letter",
            PasswordIssue::MissingLowercase => "Password must contain a lowercase letter",
            PasswordIssue::MissingDigit => "Password must contain a digit",
            PasswordIssue::MissingSymbol => "Password must contain a symbol",
        }
    }
}

/// Checks a password against the strict policy: length bounds plus one of
/// each character class.
pub fn validate_password(password: &str) -> Result<(), PasswordIssue> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(PasswordIssue::TooShort);
    }
    if len > PASSWORD_MAX_LEN {
        return Err(PasswordIssue::TooLong);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(PasswordIssue::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(is_symbol) {
        return Err(PasswordIssue::MissingSymbol);
    }
    Ok(())
}

/// Confirm-password equality check
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

/// Heuristic password strength: one point per satisfied rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0 to 5 satisfied rules
    pub score: u8,
}

impl PasswordStrength {
    /// Qualitative label for the meter
    pub fn label(&self) -> &'static str {
        match self.score {
            0 | 1 => "Very weak",
            2 => "Weak",
            3 => "Fair",
            4 => "Good",
            _ => "Strong",
        }
    }

    /// Meter color as a hex string
    pub fn color(&self) -> &'static str {
        match self.score {
            0 | 1 => "#ef4444",
            2 => "#f97316",
            3 => "#eab308",
            4 => "#84cc16",
            _ => "#22c55e",
        }
    }
}

/// Scores a password by counting satisfied rules: length of at least 8,
/// uppercase, lowercase, digit and symbol presence.
pub fn password_strength(password: &str) -> PasswordStrength {
    let rules = [
        password.chars().count() >= PASSWORD_MIN_LEN,
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(is_symbol),
    ];

    PasswordStrength {
        score: rules.iter().filter(|satisfied| **satisfied).count() as u8,
    }
}
