use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters long");
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> Result<(), &'static str> {
    if full_name.trim().is_empty() {
        return Err("Full name must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("teacher@example.com").is_ok());
        assert!(validate_email("first.last+tag@school.edu.cn").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("teacher").is_err());
        assert!(validate_email("teacher@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("teacher@example").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("student123").is_ok());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Ada").is_ok());
        assert!(validate_full_name("   ").is_err());
    }
}
