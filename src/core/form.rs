use crate::core::query::{select_all, Selector};
use crate::domain::ports::Document;

pub const INVALID_CLASS: &str = "is-invalid";

/// Checks every `required` field of the form with id `form_id`.
///
/// Blank (after trimming) fields get the `is-invalid` class, filled ones lose
/// it. Returns true only when the form exists and no required field is blank.
/// The result is advisory; callers decide whether to block submission.
pub fn validate_form(doc: &dyn Document, form_id: &str) -> bool {
    let Some(form) = doc.element_by_id(form_id) else {
        tracing::debug!("Form '{}' not found, nothing to validate", form_id);
        return false;
    };

    let mut is_valid = true;
    for field in select_all(doc, form, &[Selector::any().attr("required")]) {
        if doc.value(field).trim().is_empty() {
            doc.add_class(field, INVALID_CLASS);
            is_valid = false;
        } else {
            doc.remove_class(field, INVALID_CLASS);
        }
    }

    tracing::debug!("Form '{}' validated: {}", form_id, is_valid);
    is_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDocument;

    #[test]
    fn test_missing_form_is_a_failure() {
        let doc = MemoryDocument::new();
        assert!(!validate_form(&doc, "nope"));
    }

    #[test]
    fn test_form_without_required_fields_passes() {
        let doc = MemoryDocument::new();
        let form = doc.element(doc.body(), "form", &[("id", "newsletter")]);
        doc.element(form, "input", &[("name", "nickname")]);

        assert!(validate_form(&doc, "newsletter"));
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let doc = MemoryDocument::new();
        let form = doc.element(doc.body(), "form", &[("id", "order")]);
        let notes = doc.element(form, "textarea", &[("required", ""), ("value", " \t\n ")]);

        assert!(!validate_form(&doc, "order"));
        assert!(doc.has_class(notes, INVALID_CLASS));
    }
}
