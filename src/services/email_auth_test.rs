use super::*;

// =============================================================================
// EmailAddress
// =============================================================================

#[test]
fn email_parse_lowercases_and_trims() {
    let email = EmailAddress::parse("  Ada@Example.COM  ").unwrap();
    assert_eq!(email.as_str(), "ada@example.com");
}

#[test]
fn email_parse_rejects_missing_at() {
    assert!(EmailAddress::parse("not-an-email").is_none());
}

#[test]
fn email_parse_rejects_empty_parts() {
    assert!(EmailAddress::parse("@example.com").is_none());
    assert!(EmailAddress::parse("ada@").is_none());
    assert!(EmailAddress::parse("").is_none());
}

#[test]
fn email_parse_rejects_double_at() {
    assert!(EmailAddress::parse("a@b@c").is_none());
}

#[test]
fn suggested_display_name_is_the_local_part() {
    let email = EmailAddress::parse("ada@example.com").unwrap();
    assert_eq!(email.suggested_display_name(), "ada");
}

// =============================================================================
// AccessCode
// =============================================================================

#[test]
fn code_parse_uppercases_and_trims() {
    let code = AccessCode::parse(" abc234 ").unwrap();
    assert_eq!(code.as_str(), "ABC234");
}

#[test]
fn code_parse_rejects_wrong_length() {
    assert!(AccessCode::parse("ABC23").is_none());
    assert!(AccessCode::parse("ABC2345").is_none());
}

#[test]
fn code_parse_rejects_ambiguous_chars() {
    // 0, 1, I and O are not in the alphabet.
    assert!(AccessCode::parse("ABC120").is_none());
    assert!(AccessCode::parse("ABCIO2").is_none());
}

#[test]
fn generated_code_is_parseable() {
    let code = AccessCode::generate();
    assert_eq!(code.as_str().len(), AccessCode::LEN);
    assert_eq!(AccessCode::parse(code.as_str()), Some(code));
}

#[test]
fn digest_is_sha256_hex() {
    let digest = AccessCode::parse("ABC234").unwrap().digest();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn digest_is_deterministic_and_code_sensitive() {
    let a = AccessCode::parse("ABC234").unwrap();
    let b = AccessCode::parse("ABC235").unwrap();
    assert_eq!(a.digest(), a.digest());
    assert_ne!(a.digest(), b.digest());
}

// =============================================================================
// template
// =============================================================================

#[test]
fn template_substitutes_email_and_code() {
    let html = render_email_auth_template("ada@example.com", "ABC234");
    assert!(html.contains("ada@example.com"));
    assert!(html.contains("ABC234"));
    assert!(!html.contains("{{EMAIL}}"));
    assert!(!html.contains("{{CODE}}"));
}
