use jtdiff::{parse_file, parse_json, parse_toml, parse_yaml, ParseError};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_parse_json_values() {
    assert_eq!(parse_json("null").unwrap(), json!(null));
    assert_eq!(parse_json("[1, 2.5, \"x\"]").unwrap(), json!([1, 2.5, "x"]));
    assert_eq!(
        parse_json(r#"{"user": {"name": "Bob"}}"#).unwrap(),
        json!({"user": {"name": "Bob"}})
    );
}

#[test]
fn test_parse_json_invalid() {
    assert!(parse_json("{invalid json}").is_err());
    assert!(parse_json("[1, 2,]").is_err());
    assert!(parse_json("").is_err());
}

#[test]
fn test_parse_yaml_matches_json() {
    let yaml = "user:\n  name: Bob\n  scores:\n    - 10\n    - 2.5\n";
    assert_eq!(
        parse_yaml(yaml).unwrap(),
        json!({"user": {"name": "Bob", "scores": [10, 2.5]}})
    );
}

#[test]
fn test_parse_yaml_invalid() {
    assert!(parse_yaml("key: value: invalid").is_err());
    assert!(parse_yaml("[1, 2,").is_err());
}

#[test]
fn test_parse_toml_datetime_as_string() {
    let value = parse_toml("released = 1979-05-27\nflags = [true, false]\n").unwrap();
    assert_eq!(value, json!({"released": "1979-05-27", "flags": [true, false]}));
}

#[test]
fn test_parse_file_by_extension() {
    let json_file = temp_file(".json", r#"{"key": "value"}"#);
    let yaml_file = temp_file(".yml", "key: value\n");
    let toml_file = temp_file(".toml", "key = \"value\"\n");

    for file in [&json_file, &yaml_file, &toml_file] {
        assert_eq!(parse_file(file.path()).unwrap(), json!({"key": "value"}));
    }
}

#[test]
fn test_parse_file_errors() {
    assert!(matches!(
        parse_file(Path::new("/nonexistent/file.json")),
        Err(ParseError::FileNotFound { .. })
    ));

    let bad_json = temp_file(".json", "{");
    assert!(matches!(
        parse_file(bad_json.path()),
        Err(ParseError::JsonError { .. })
    ));

    let bad_toml = temp_file(".toml", "key = ");
    assert!(matches!(
        parse_file(bad_toml.path()),
        Err(ParseError::TomlError { .. })
    ));

    let unknown = temp_file(".txt", "key: [unclosed");
    assert!(matches!(
        parse_file(unknown.path()),
        Err(ParseError::JsonError { .. })
    ));

    let no_extension = temp_file("", "");
    assert!(matches!(
        parse_file(no_extension.path()),
        Err(ParseError::JsonError { .. })
    ));
}
