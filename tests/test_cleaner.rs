use rstest::rstest;
use xmlcleaner::{
    apply, remove_attributes_by_prefix, remove_elements_by_prefix, remove_unused_namespaces,
    remove_xml_comments, CharacterEncoding, Document, Error, ErrorKind, MatchPredicate,
    NamespaceIndex, Tidy, TidyConfig, Transform, XmlCleaner,
};

const SCENARIO: &str = r#"<a xmlns:x="urn:x"><x:b/><!--c--><d x:attr="1"/></a>"#;

#[test]
fn test_scenario_stateless() {
    let xml = remove_xml_comments(SCENARIO).unwrap();
    assert_eq!(xml, r#"<a xmlns:x="urn:x"><x:b/><d x:attr="1"/></a>"#);
    let xml = remove_elements_by_prefix("x", &xml).unwrap();
    assert_eq!(xml, r#"<a xmlns:x="urn:x"><d x:attr="1"/></a>"#);
    let xml = remove_attributes_by_prefix("x", &xml).unwrap();
    assert_eq!(xml, r#"<a xmlns:x="urn:x"><d/></a>"#);
    let xml = remove_unused_namespaces(&xml).unwrap();
    assert_eq!(xml, "<a><d/></a>");
}

#[test]
fn test_scenario_chained() {
    let mut cleaner = XmlCleaner::new();
    cleaner
        .set_xml(SCENARIO)
        .remove_xml_comments()
        .unwrap()
        .remove_elements_by_prefix("x")
        .unwrap()
        .remove_attributes_by_prefix("x")
        .unwrap()
        .remove_unused_namespaces()
        .unwrap();
    assert_eq!(cleaner.xml().unwrap(), "<a><d/></a>");
}

#[rstest]
#[case("comments")]
#[case("elements")]
#[case("attributes")]
#[case("namespaces")]
fn test_modes_equivalent(#[case] operation: &str) {
    let xml = r#"<?xml version="1.0"?><root xmlns:x="urn:x" xmlns:y="urn:y"><!--note--><x:a y:q="1">text</x:a><b x:r="2"/></root>"#;
    let stateless = match operation {
        "comments" => remove_xml_comments(xml),
        "elements" => remove_elements_by_prefix("x", xml),
        "attributes" => remove_attributes_by_prefix("x", xml),
        _ => remove_unused_namespaces(xml),
    }
    .unwrap();

    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(xml);
    match operation {
        "comments" => cleaner.remove_xml_comments(),
        "elements" => cleaner.remove_elements_by_prefix("x"),
        "attributes" => cleaner.remove_attributes_by_prefix("x"),
        _ => cleaner.remove_unused_namespaces(),
    }
    .unwrap();
    assert_eq!(cleaner.xml().unwrap(), stateless);
}

#[test]
fn test_stateless_leaves_state_untouched() {
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml("<kept/>");
    let result = xmlcleaner::cleaner::remove_xml_comments("<a><!--c--></a>").unwrap();
    assert_eq!(result, "<a/>");
    assert_eq!(cleaner.xml().unwrap(), "<kept/>");
}

#[test]
fn test_empty_prefix_rejected_stateless() {
    let err = remove_elements_by_prefix("", SCENARIO).unwrap_err();
    assert!(matches!(err, Error::EmptyPrefix));
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
    let err = remove_attributes_by_prefix("", SCENARIO).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
}

#[test]
fn test_empty_prefix_rejected_stateful() {
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(SCENARIO);
    let err = cleaner.remove_elements_by_prefix("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
    let err = cleaner.remove_attributes_by_prefix("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
    assert_eq!(cleaner.xml().unwrap(), SCENARIO);
}

#[test]
fn test_empty_prefix_checked_before_document() {
    let mut cleaner = XmlCleaner::new();
    assert!(matches!(
        cleaner.remove_elements_by_prefix(""),
        Err(Error::EmptyPrefix)
    ));
}

#[test]
fn test_no_xml_set() {
    let mut cleaner = XmlCleaner::new();
    let err = cleaner.remove_xml_comments().unwrap_err();
    assert!(matches!(err, Error::NoXml));
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
    assert!(matches!(cleaner.xml(), Err(Error::NoXml)));
    assert!(matches!(cleaner.tidy_xml(), Err(Error::NoXml)));
}

#[test]
fn test_empty_xml_set() {
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml("");
    assert!(matches!(cleaner.remove_unused_namespaces(), Err(Error::NoXml)));
}

#[test]
fn test_failed_operation_keeps_document() {
    let malformed = "<a><b></a>";
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(malformed);
    let err = cleaner.remove_xml_comments().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert_eq!(cleaner.xml().unwrap(), malformed);
}

#[test]
fn test_document_element_removal_keeps_document() {
    let xml = r#"<x:a xmlns:x="urn:x"><b/></x:a>"#;
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(xml);
    let err = cleaner.remove_elements_by_prefix("x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransformError);
    assert_eq!(cleaner.xml().unwrap(), xml);
}

#[test]
fn test_prefix_not_in_document() {
    let xml = r#"<a xmlns:x="urn:x"><x:b/></a>"#;
    assert_eq!(remove_elements_by_prefix("y", xml).unwrap(), xml);
}

#[test]
fn test_prefix_only_in_text() {
    // y: occurs, but y is never declared, so nothing can match
    let xml = "<a>y:b</a>";
    assert_eq!(remove_elements_by_prefix("y", xml).unwrap(), xml);
}

#[test]
fn test_prefix_shortcut_still_parses() {
    let err = remove_elements_by_prefix("y", "<a>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_prefix_shortcut_normalizes_like_transform() {
    let xml = r#"<a><b></b></a>"#;
    assert_eq!(remove_elements_by_prefix("y", xml).unwrap(), "<a><b/></a>");
}

#[test]
fn test_attributes_keep_other_attributes() {
    let xml = r#"<a xmlns:x="urn:x"><d one="1" x:two="2" three="3">text</d></a>"#;
    assert_eq!(
        remove_attributes_by_prefix("x", xml).unwrap(),
        r#"<a xmlns:x="urn:x"><d one="1" three="3">text</d></a>"#
    );
}

#[test]
fn test_elements_matched_by_default_namespace() {
    let xml = r#"<a xmlns:x="urn:x"><x:b/><c xmlns="urn:x"><d/></c><e/></a>"#;
    assert_eq!(
        remove_elements_by_prefix("x", xml).unwrap(),
        r#"<a xmlns:x="urn:x"><e/></a>"#
    );
}

#[rstest]
#[case(r#"<a xmlns:x="urn:x"><b xmlns="urn:x"/><c/></a>"#, r#"<a xmlns:x="urn:x"><c/></a>"#)]
#[case(r#"<a xmlns:x="urn:x" xmlns:z="urn:x"><z:b/><c/></a>"#, r#"<a xmlns:x="urn:x" xmlns:z="urn:x"><c/></a>"#)]
fn test_elements_matched_without_prefix_text(#[case] xml: &str, #[case] expected: &str) {
    let index = NamespaceIndex::from_document(&Document::parse(xml).unwrap());
    let transform =
        Transform::build(&MatchPredicate::ElementByPrefix("x".to_string()), &index).unwrap();
    let full = apply(&transform, xml).unwrap();
    assert_eq!(full, expected);
    assert_eq!(remove_elements_by_prefix("x", xml).unwrap(), full);

    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(xml).remove_elements_by_prefix("x").unwrap();
    assert_eq!(cleaner.xml().unwrap(), expected);
}

#[test]
fn test_attributes_matched_without_prefix_text() {
    let xml = r#"<a xmlns:x="urn:x" xmlns:z="urn:x"><d z:q="1" r="2"/></a>"#;
    assert_eq!(
        remove_attributes_by_prefix("x", xml).unwrap(),
        r#"<a xmlns:x="urn:x" xmlns:z="urn:x"><d r="2"/></a>"#
    );
}

#[test]
fn test_default_namespace() {
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(r#"<a xmlns="urn:default"/>"#);
    assert_eq!(cleaner.default_namespace().unwrap(), "urn:default");
    cleaner.set_xml("<a/>");
    let err = cleaner.default_namespace().unwrap_err();
    assert!(matches!(err, Error::NoDefaultNamespace));
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
}

#[test]
fn test_root_element_name() {
    assert_eq!(
        xmlcleaner::root_element_name(r#"<svg:svg xmlns:svg="urn:svg"><g/></svg:svg>"#).unwrap(),
        "svg"
    );
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml("<?xml version=\"1.0\"?><!--c--><doc/>");
    assert_eq!(cleaner.root_element_name().unwrap(), "doc");
}

#[test]
fn test_xml_namespaces_sorted() {
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml(r#"<a xmlns:q="urn:q" xmlns:p="urn:p"/>"#);
    assert_eq!(
        cleaner.xml_namespaces().unwrap().sorted(),
        vec![
            ("p".to_string(), "urn:p".to_string()),
            ("q".to_string(), "urn:q".to_string())
        ]
    );
}

#[test]
fn test_character_encoding() {
    let mut cleaner = XmlCleaner::new();
    assert_eq!(cleaner.character_encoding(), CharacterEncoding::Utf8);
    cleaner.set_character_encoding("latin1").unwrap();
    assert_eq!(cleaner.character_encoding(), CharacterEncoding::Latin1);
    let err = cleaner.set_character_encoding("ebcdic").unwrap_err();
    assert!(matches!(err, Error::UnknownEncoding(_)));
    assert_eq!(err.kind(), ErrorKind::DomainViolation);
    assert_eq!(cleaner.character_encoding(), CharacterEncoding::Latin1);
}

#[test]
fn test_set_xml_bytes() {
    let mut cleaner = XmlCleaner::new();
    cleaner
        .set_xml_bytes(b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><a>caf\xe9<!--x--></a>")
        .unwrap()
        .remove_xml_comments()
        .unwrap();
    assert_eq!(
        cleaner.xml().unwrap(),
        "<?xml version=\"1.0\" encoding=\"iso-8859-1\"?>\n<a>caf\u{e9}</a>"
    );
}

#[test]
fn test_tidy_is_terminal() {
    let mut cleaner = XmlCleaner::new();
    cleaner
        .set_xml("<a><!--c--><b><c/></b></a>")
        .remove_xml_comments()
        .unwrap();
    let tidy = cleaner.tidy_xml().unwrap();
    assert_eq!(tidy, "<a>\n    <b>\n        <c/>\n    </b>\n</a>\n");
    assert_eq!(cleaner.xml().unwrap(), "<a><b><c/></b></a>");
}

#[test]
fn test_tidy_config() {
    let mut config = TidyConfig::default();
    config.set("indent-spaces", 1i64);
    let mut cleaner = XmlCleaner::new();
    cleaner.set_xml("<a><b/></a>").set_tidy_config(config);
    assert_eq!(cleaner.tidy_xml().unwrap(), "<a>\n <b/>\n</a>\n");

    let mut config = TidyConfig::default();
    config.set("indent", false);
    assert_eq!(
        xmlcleaner::tidy_xml("<a><b/></a>", &config, CharacterEncoding::Utf8).unwrap(),
        "<a><b/></a>"
    );
}

struct Shouting;

impl Tidy for Shouting {
    fn repair(
        &self,
        xml: &str,
        _config: &TidyConfig,
        encoding: CharacterEncoding,
    ) -> xmlcleaner::Result<String> {
        if encoding == CharacterEncoding::Raw {
            return Err(Error::TidyFailed("raw not supported".to_string()));
        }
        Ok(xml.to_uppercase())
    }
}

#[test]
fn test_custom_tidy() {
    let mut cleaner = XmlCleaner::with_tidy(Shouting);
    cleaner.set_xml("<a/>");
    assert_eq!(cleaner.tidy_xml().unwrap(), "<A/>");
    cleaner.set_character_encoding("raw").unwrap();
    let err = cleaner.tidy_xml().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransformError);
}

#[test]
fn test_crlf_line_endings_normalized() {
    let xml = "<a>\r\n<b t=\"1\r\n2\"/><!--c-->\r\n</a>";
    assert_eq!(
        remove_xml_comments(xml).unwrap(),
        "<a>\n<b t=\"1 2\"/>\n</a>"
    );
}

#[test]
fn test_carriage_return_reference_kept() {
    let xml = "<a t=\"x&#13;y\">one&#13;\r\ntwo\rthree</a>";
    assert_eq!(
        remove_unused_namespaces(xml).unwrap(),
        "<a t=\"x&#13;y\">one&#13;\ntwo\nthree</a>"
    );
}
