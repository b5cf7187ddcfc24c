use once_cell::sync::Lazy;
use regex::Regex;

// Deliberately permissive; only the overall shape is checked.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([0-9]{2}\)\s[0-9]{4,5}-[0-9]{4}$").expect("valid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Accepts exactly the shapes produced by the phone mask:
/// `(DD) DDDD-DDDD` and `(DD) DDDDD-DDDD`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("cliente.fiel@hortifruti.com.br"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("(11) 2345-6789"));
        assert!(is_valid_phone("(11) 98765-4321"));
        assert!(!is_valid_phone("11 98765-4321"));
        assert!(!is_valid_phone("(11) 987-4321"));
        assert!(!is_valid_phone("(11) 98765-4321 "));
    }

    #[test]
    fn test_is_valid_phone_rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode \d but not phone digits
        assert!(!is_valid_phone("(١١) 2345-6789"));
    }
}
