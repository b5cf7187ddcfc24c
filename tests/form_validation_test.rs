use storefront_ui::{
    is_valid_email, is_valid_phone, mask_phone, mask_phone_digits, validate_form, Document,
    MemoryDocument,
};

#[test]
fn test_one_blank_required_field_fails_and_is_marked() {
    let doc = MemoryDocument::new();
    let form = doc.element(doc.body(), "form", &[("id", "entrega")]);
    let name = doc.element(form, "input", &[("required", ""), ("value", "Maria")]);
    let address = doc.element(form, "input", &[("required", ""), ("value", "")]);

    assert!(!validate_form(&doc, "entrega"));
    assert!(doc.has_class(address, "is-invalid"));
    assert!(!doc.has_class(name, "is-invalid"));
}

#[test]
fn test_filling_fields_clears_invalid_markers() {
    let doc = MemoryDocument::new();
    let form = doc.element(doc.body(), "form", &[("id", "entrega")]);
    let address = doc.element(form, "input", &[("required", ""), ("value", "   ")]);
    let phone = doc.element(form, "input", &[("required", ""), ("type", "tel")]);

    assert!(!validate_form(&doc, "entrega"));
    assert!(doc.has_class(address, "is-invalid"));
    assert!(doc.has_class(phone, "is-invalid"));

    doc.set_value(address, "Rua das Flores, 12");
    doc.set_value(phone, "21987654321");
    mask_phone(&doc, phone);

    assert!(validate_form(&doc, "entrega"));
    assert!(!doc.has_class(address, "is-invalid"));
    assert!(!doc.has_class(phone, "is-invalid"));
    assert!(is_valid_phone(&doc.value(phone)));
}

#[test]
fn test_required_fields_outside_the_form_are_ignored() {
    let doc = MemoryDocument::new();
    doc.element(doc.body(), "input", &[("required", "")]);
    let form = doc.element(doc.body(), "form", &[("id", "busca")]);
    doc.element(form, "input", &[("required", ""), ("value", "maçã")]);

    assert!(validate_form(&doc, "busca"));
}

#[test]
fn test_every_ten_and_eleven_digit_number_masks_to_a_valid_phone() {
    let ten_digit = ["1133334444", "2125550000", "9930001234"];
    let eleven_digit = ["11999998888", "21912345678", "85988887777"];

    for raw in ten_digit {
        let masked = mask_phone_digits(raw);
        assert_eq!(masked.len(), "(DD) DDDD-DDDD".len());
        assert!(is_valid_phone(&masked), "{}", masked);
    }
    for raw in eleven_digit {
        let masked = mask_phone_digits(raw);
        assert_eq!(masked.len(), "(DD) DDDDD-DDDD".len());
        assert!(is_valid_phone(&masked), "{}", masked);
    }
}

#[test]
fn test_email_examples() {
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("a@b"));
}
