use csvjson::{Entry, Error, Options, ScanErrorKind, Value};
use serde_json::json;

fn headerless() -> Options {
    Options {
        header: false,
        ..Options::default()
    }
}

fn with_containers(mut options: Options) -> Options {
    options.containers = true;
    options
}

fn to_json(entries: Vec<Entry>) -> serde_json::Value {
    serde_json::Value::Array(entries.into_iter().map(Into::into).collect())
}

#[test]
fn regular_csv_without_header() {
    let csv = r#"1,"John","12 Totem Rd. Aspen",true
2,"Bob",null,false
3,"Sue","Bigsby, 345 Carnival, WA 23009",false
"#;
    let entries = csvjson::decode_from_str(csv, &headerless()).unwrap();
    assert_eq!(
        to_json(entries),
        json!([
            [1, "John", "12 Totem Rd. Aspen", true],
            [2, "Bob", null, false],
            [3, "Sue", "Bigsby, 345 Carnival, WA 23009", false],
        ])
    );
}

#[test]
fn csv_with_headers_row() {
    let csv = r#""id","name","address","regular"
1,"John","12 Totem Rd. Aspen",true
2,"Bob",null,false
3,"Sue","Bigsby, 345 Carnival, WA 23009",false
"#;
    let entries = csvjson::decode_from_str(csv, &Options::default()).unwrap();
    assert_eq!(
        to_json(entries),
        json!([
            {"id": 1, "name": "John", "address": "12 Totem Rd. Aspen", "regular": true},
            {"id": 2, "name": "Bob", "address": null, "regular": false},
            {"id": 3, "name": "Sue", "address": "Bigsby, 345 Carnival, WA 23009", "regular": false},
        ])
    );
}

#[test]
fn csv_with_data_containing_quotes_and_commas() {
    let csv = "\"id\",\"name\",\"address\"\n\
               1,\"John\",\"12 Totem Rd., Aspen\"\n\
               2,\"Sue\",\"\\\"Bigsby\\\", 345 Carnival, WA 23009\"\n";
    let entries = csvjson::decode_from_str(csv, &Options::default()).unwrap();
    assert_eq!(
        to_json(entries),
        json!([
            {"id": 1, "name": "John", "address": "12 Totem Rd., Aspen"},
            {"id": 2, "name": "Sue", "address": "\"Bigsby\", 345 Carnival, WA 23009"},
        ])
    );
}

#[test]
fn csv_with_complex_headers() {
    let csv = r#"{"field":"id","type":"int"},{"field":"name","type":"string"},{"field":"regular","type":"boolean"}
1,"John",true
2,"Bob",false
"#;
    let entries = csvjson::decode_from_str(csv, &Options::default()).unwrap();
    assert_eq!(
        to_json(entries),
        json!([
            {"id": 1, "name": "John", "regular": true},
            {"id": 2, "name": "Bob", "regular": false},
        ])
    );
}

#[test]
fn csv_with_array_data_requires_containers() {
    let csv = r#"1,"directions",["north","south","east","west"]
2,"colors",["red","green","blue"]
4,"spells",[]
"#;
    let err = csvjson::decode_from_str(csv, &headerless()).unwrap_err();
    match err {
        Error::Scan { line, kind, .. } => {
            assert_eq!(line, 1);
            assert!(kind.to_string().starts_with("array values not allowed"));
        }
        other => panic!("expected scan error, got {other:?}"),
    }

    let entries = csvjson::decode_from_str(csv, &with_containers(headerless())).unwrap();
    assert_eq!(
        to_json(entries),
        json!([
            [1, "directions", ["north", "south", "east", "west"]],
            [2, "colors", ["red", "green", "blue"]],
            [4, "spells", []],
        ])
    );
}

#[test]
fn csv_with_all_kinds_of_data() {
    let csv = "\"index\",\"value1\",\"value2\"\n\
               \"number\",1,2\n\
               \"boolean\",false,true\n\
               \"null\",null,\"non null\"\n\
               \"array of numbers\",[1],[1,2]\n\
               \"simple object\",{\"a\": 1},{\"a\":1, \"b\":2}\n\
               \"array with mixed objects\",[1,null,\"ball\"],[2,{\"a\": 10, \"b\": 20},\"cube\"]\n\
               \"string with quotes\",\"a\\\"b\",\"alert(\\\"Hi!\\\")\"\n\
               \"string with bell&newlines\",\"bell is \\u0007\",\"multi\\nline\\ntext\"\n";

    let err = csvjson::decode_from_str(csv, &Options::default()).unwrap_err();
    assert!(matches!(err, Error::Scan { line: 5, .. }));

    let entries =
        csvjson::decode_from_str(csv, &with_containers(Options::default())).unwrap();
    assert_eq!(
        to_json(entries),
        json!([
            {"index": "number", "value1": 1, "value2": 2},
            {"index": "boolean", "value1": false, "value2": true},
            {"index": "null", "value1": null, "value2": "non null"},
            {"index": "array of numbers", "value1": [1], "value2": [1, 2]},
            {"index": "simple object", "value1": {"a": 1}, "value2": {"a": 1, "b": 2}},
            {"index": "array with mixed objects",
             "value1": [1, null, "ball"],
             "value2": [2, {"a": 10, "b": 20}, "cube"]},
            {"index": "string with quotes", "value1": "a\"b", "value2": "alert(\"Hi!\")"},
            {"index": "string with bell&newlines",
             "value1": "bell is \u{0007}",
             "value2": "multi\nline\ntext"},
        ])
    );
}

#[test]
fn incorrect_header_is_fatal_before_any_row() {
    let csv = "\"index\",\"value1\",2\n\"number\",1,2\n";
    let mut doc = csvjson::documents(csv.as_bytes(), &Options::default());
    let err = doc.next().unwrap().unwrap_err();
    match err {
        Error::Header { line, message } => {
            assert_eq!(line, 1);
            assert_eq!(
                message,
                "all terms in the header should be strings or json-objects"
            );
        }
        other => panic!("expected header error, got {other:?}"),
    }
    assert!(doc.next().is_none());
}

#[test]
fn row_arity_mismatch_stops_iteration() {
    let csv = "\"index\",\"value1\",\"value2\"\n\"number\",1\n\"later\",2,3\n";
    let mut doc = csvjson::documents(csv.as_bytes(), &Options::default());
    let err = doc.next().unwrap().unwrap_err();
    match err {
        Error::Arity {
            line,
            expected,
            found,
        } => {
            assert_eq!((line, expected, found), (2, 3, 2));
        }
        other => panic!("expected arity error, got {other:?}"),
    }
    // The document is invalid; nothing after the bad row is produced.
    assert!(doc.next().is_none());
}

#[test]
fn headerless_first_row_fixes_arity_and_is_yielded_once() {
    let csv = "1,2,3\n4,5\n";
    let mut doc = csvjson::documents(csv.as_bytes(), &headerless());
    let first = doc.next().unwrap().unwrap();
    assert_eq!(
        first,
        Entry::Row(vec![Value::from(1u64), Value::from(2u64), Value::from(3u64)])
    );
    let err = doc.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        Error::Arity {
            line: 2,
            expected: 3,
            found: 2
        }
    ));
    assert!(doc.next().is_none());
}

#[test]
fn blank_line_terminates_the_document() {
    let csv = "1,2\n3,4\n   \n5,6\n";
    let entries = csvjson::decode_from_str(csv, &headerless()).unwrap();
    assert_eq!(to_json(entries), json!([[1, 2], [3, 4]]));
}

#[test]
fn empty_input_is_an_empty_document() {
    assert!(csvjson::decode_from_str("", &Options::default())
        .unwrap()
        .is_empty());
    assert!(csvjson::decode_from_str("\n", &Options::default())
        .unwrap()
        .is_empty());
    assert!(csvjson::decode_from_str("", &headerless()).unwrap().is_empty());
}

#[test]
fn duplicate_header_names_overwrite_in_record_order() {
    let csv = "\"a\",\"b\",\"a\"\n1,2,3\n";
    let entries = csvjson::decode_from_str(csv, &Options::default()).unwrap();
    assert_eq!(
        entries[0],
        Entry::Record(vec![
            ("a".to_string(), Value::from(3u64)),
            ("b".to_string(), Value::from(2u64)),
        ])
    );
}

#[test]
fn entries_are_produced_before_later_lines_are_scanned() {
    // The second line is malformed; pulling only the first entry must succeed.
    let csv = "1,2\n((((\n";
    let mut doc = csvjson::documents(csv.as_bytes(), &headerless());
    let first = doc.next().unwrap().unwrap();
    assert_eq!(first.as_row().unwrap().len(), 2);
    let err = doc.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        Error::Scan {
            line: 2,
            kind: ScanErrorKind::UnexpectedToken,
            ..
        }
    ));
}

#[test]
fn decode_from_reader_matches_decode_from_str() {
    let csv = "\"id\"\n1\n2\n";
    let from_reader = csvjson::decode_from_reader(csv.as_bytes(), &Options::default()).unwrap();
    let from_str = csvjson::decode_from_str(csv, &Options::default()).unwrap();
    assert_eq!(from_reader, from_str);
}
