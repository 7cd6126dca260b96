use rstest::rstest;
use xmlcleaner::{remove_xml_comments, Document, Error, ErrorKind};

#[test]
fn test_parse_invalid_close_tag() {
    let err = Document::parse(r#"<doc></a></doc>"#).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidCloseTag { ref expected, ref found } if expected == "doc" && found == "a"
    ));
}

#[test]
fn test_parse_invalid_close_tag_prefix() {
    let xml = r#"<doc xmlns:a="http://example.com"></a:doc></doc>"#;
    let err = Document::parse(xml).unwrap_err();
    assert!(matches!(err, Error::InvalidCloseTag { .. }));
}

#[test]
fn test_unknown_prefix() {
    let err = Document::parse(r#"<doc><a:p/></doc>"#).unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(ref prefix) if prefix == "a"));
}

#[test]
fn test_unknown_attribute_prefix() {
    let err = Document::parse(r#"<doc a:attr="1"/>"#).unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(ref prefix) if prefix == "a"));
}

#[test]
fn test_prefix_out_of_scope() {
    let xml = r#"<doc><a xmlns:x="urn:x"/><x:b/></doc>"#;
    let err = Document::parse(xml).unwrap_err();
    assert!(matches!(err, Error::UnknownPrefix(_)));
}

#[test]
fn test_unclosed_tag() {
    let err = Document::parse("<doc><a>").unwrap_err();
    assert!(matches!(err, Error::UnclosedTag(ref name) if name == "a"));
}

#[test]
fn test_no_document_element() {
    let err = Document::parse("<!--only a comment-->").unwrap_err();
    assert!(matches!(err, Error::NoDocumentElement));
}

#[test]
fn test_duplicate_attribute() {
    let err = Document::parse(r#"<doc a="1" a="2"/>"#).unwrap_err();
    assert!(matches!(err, Error::DuplicateAttribute(ref name) if name == "a"));
}

#[test]
fn test_duplicate_declaration() {
    let err = Document::parse(r#"<doc xmlns:x="urn:x" xmlns:x="urn:y"/>"#).unwrap_err();
    assert!(matches!(err, Error::DuplicateAttribute(ref name) if name == "xmlns:x"));
}

#[test]
fn test_empty_namespace() {
    let err = Document::parse(r#"<doc xmlns:x=""/>"#).unwrap_err();
    assert!(matches!(err, Error::EmptyNamespace(ref prefix) if prefix == "x"));
}

#[test]
fn test_invalid_entity() {
    let err = Document::parse("<doc>&nbsp;</doc>").unwrap_err();
    assert!(matches!(err, Error::InvalidEntity(_)));
}

#[rstest]
#[case("")]
#[case("<doc>")]
#[case("<doc></other>")]
#[case("<doc attr=unquoted/>")]
#[case("<doc>&amp</doc>")]
#[case("<doc><x:a/></doc>")]
#[case("not xml at all")]
fn test_malformed_kind(#[case] xml: &str) {
    let err = remove_xml_comments(xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_error_display() {
    let err = Document::parse("<doc><a>").unwrap_err();
    assert_eq!(err.to_string(), "unclosed tag: <a>");
}
