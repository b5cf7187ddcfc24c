use crate::domain::model::NodeId;
use crate::domain::ports::Document;

/// Formats the digits of `raw` as a Brazilian phone number.
///
/// Up to ten digits: exactly ten become `(DD) DDDD-DDDD`, fewer are returned
/// stripped but unformatted. Eleven or more: the first eleven become
/// `(DD) DDDDD-DDDD` and any surplus digits trail the formatted number.
pub fn mask_phone_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..10]),
        n if n > 10 => format!(
            "({}) {}-{}{}",
            &digits[..2],
            &digits[2..7],
            &digits[7..11],
            &digits[11..]
        ),
        _ => digits,
    }
}

/// Rewrites the value of the `input` field with its masked form.
pub fn mask_phone(doc: &dyn Document, input: NodeId) {
    let current = doc.value(input);
    let masked = mask_phone_digits(&current);
    if masked != current {
        doc.set_value(input, &masked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDocument;
    use crate::core::validators::is_valid_phone;

    #[test]
    fn test_mask_ten_digits() {
        assert_eq!(mask_phone_digits("1123456789"), "(11) 2345-6789");
        assert_eq!(mask_phone_digits("11 2345.6789"), "(11) 2345-6789");
    }

    #[test]
    fn test_mask_eleven_digits() {
        assert_eq!(mask_phone_digits("11987654321"), "(11) 98765-4321");
        assert_eq!(mask_phone_digits("+(11) 9 8765 4321"), "(11) 98765-4321");
    }

    #[test]
    fn test_short_input_stays_partial() {
        assert_eq!(mask_phone_digits("(11) 98"), "1198");
        assert_eq!(mask_phone_digits(""), "");
        assert_eq!(mask_phone_digits("abc"), "");
    }

    #[test]
    fn test_surplus_digits_trail_the_mask() {
        assert_eq!(mask_phone_digits("119876543210"), "(11) 98765-43210");
        assert!(!is_valid_phone(&mask_phone_digits("119876543210")));
    }

    #[test]
    fn test_masked_output_validates_and_is_stable() {
        for raw in ["1123456789", "11987654321", "(21) 3333-4444", "21 99999 0000"] {
            let once = mask_phone_digits(raw);
            assert!(is_valid_phone(&once), "{} -> {}", raw, once);
            assert_eq!(mask_phone_digits(&once), once);
        }
    }

    #[test]
    fn test_mask_phone_writes_back_into_field() {
        let doc = MemoryDocument::new();
        let field = doc.element(doc.body(), "input", &[("type", "tel"), ("value", "31987654321")]);

        mask_phone(&doc, field);

        assert_eq!(doc.value(field), "(31) 98765-4321");
    }
}
