use csvjson::HeaderError;
use csvjson::decode::row::resolve_header;

#[test]
fn bare_string_header() {
    let names = resolve_header(r#""id","name","address","regular""#).unwrap();
    assert_eq!(names, vec!["id", "name", "address", "regular"]);
}

#[test]
fn descriptor_header_resolves_same_names() {
    let line = r#"{"field":"id","type":"int"},{"field":"name","type":"string"}"#;
    let names = resolve_header(line).unwrap();
    assert_eq!(names, resolve_header(r#""id","name""#).unwrap());
}

#[test]
fn descriptor_extra_keys_are_ignored() {
    let line = r#"{"field":"id","type":"int","nullable":false,"width":8}"#;
    assert_eq!(resolve_header(line).unwrap(), vec!["id"]);
}

#[test]
fn mixed_header_entries_are_rejected() {
    let err = resolve_header(r#""index","value1",2"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "all terms in the header should be strings or json-objects"
    );

    // A mix of descriptors and bare strings is just as invalid.
    let err = resolve_header(r#"{"field":"id"},"name""#).unwrap_err();
    assert!(matches!(err, HeaderError::Invalid(_)));
}

#[test]
fn descriptor_without_field_is_rejected() {
    let err = resolve_header(r#"{"type":"int"}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "header descriptor is missing a \"field\" name"
    );
}

#[test]
fn descriptor_with_non_string_field_is_rejected() {
    let err = resolve_header(r#"{"field":7}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "header descriptor \"field\" must be a string"
    );
}

#[test]
fn header_that_does_not_tokenize_surfaces_the_scan_error() {
    let err = resolve_header(r#""id",oops"#).unwrap_err();
    assert!(matches!(err, HeaderError::Scan(_)));
}
