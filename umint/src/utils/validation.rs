//! Validation of user input before it reaches a session action.
//!
//! The API layer sends whatever it is given; these checks belong to the
//! surface collecting the input.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// `Err` carrying the message, for `?` in command handlers.
    pub fn into_result(self) -> Result<(), String> {
        match self.error {
            Some(error) if !self.is_valid => Err(error),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return ValidationResult::err("Invalid email format");
    };

    if domain.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    if local.is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if domain.is_empty() || !domain.contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate username
pub fn validate_username(username: &str) -> ValidationResult {
    if username.is_empty() {
        return ValidationResult::err("Username is required");
    }

    if username.chars().count() < 3 {
        return ValidationResult::err("Username must be at least 3 characters");
    }

    if username.chars().count() > 20 {
        return ValidationResult::err("Username must be less than 20 characters");
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return ValidationResult::err("Username can only contain letters, numbers, _ and -");
    }

    ValidationResult::ok()
}

/// Login only needs a password to be present; strength is the backend's concern.
pub fn validate_login_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    ValidationResult::ok()
}

/// Validate a new account password
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < 8 {
        return ValidationResult::err("Password must be at least 8 characters");
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_numeric());

    if !has_letter || !has_digit {
        return ValidationResult::err("Password must contain letters and numbers");
    }

    ValidationResult::ok()
}

/// Verification codes are short strings of digits
pub fn validate_verification_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if code.is_empty() {
        return ValidationResult::err("Verification code is required");
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return ValidationResult::err("Verification code must contain only digits");
    }

    ValidationResult::ok()
}
