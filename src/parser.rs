//! Document loading for the diff pipeline.
//!
//! Every supported format is decoded into a `serde_json::Value`, which is the
//! value model the tree builder consumes. JSON is the primary format; YAML and
//! TOML documents are accepted too and normalized into the same model.
//!
//! # Examples
//!
//! ```no_run
//! use jtdiff::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let old = parse_file(Path::new("old.json"))?;
//! let new = parse_file(Path::new("new.json"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads and decodes a document from disk.
///
/// The format is detected by extension (`.json`, `.yaml`, `.yml`, `.toml`).
/// Files with any other extension, or none, are decoded as JSON.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the path does not exist
/// - `ParseError::ReadError` if the file cannot be read
/// - `ParseError::JsonError`, `YamlError` or `TomlError` if decoding fails
///   (an empty file is a decode failure)
pub fn parse_file(path: &Path) -> Result<Value, ParseError> {
    let path_str = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(path_str));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(&path_str, e))?;
    debug!(path = %path_str, bytes = content.len(), "read document");

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            parse_yaml(&content).map_err(|e| ParseError::yaml_error(path_str, e))
        }
        Some("toml") => parse_toml(&content).map_err(|e| ParseError::toml_error(path_str, e)),
        _ => parse_json(&content).map_err(|e| ParseError::json_error(path_str, e)),
    }
}

/// Decodes a JSON string. Object entries keep their document order.
///
/// ```
/// use jtdiff::parser::parse_json;
///
/// let value = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(value["age"], 30);
/// ```
pub fn parse_json(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(content)
}

/// Decodes a YAML string. Non-string mapping keys become strings, and
/// `.nan`/`.inf` floats become their YAML text.
pub fn parse_yaml(content: &str) -> Result<Value, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_json(value))
}

/// Decodes a TOML string. Datetimes and non-finite floats become strings.
pub fn parse_toml(content: &str) -> Result<Value, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(toml_to_json(toml::Value::Table(table)))
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(n.to_string()))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let object: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_json(v))
                })
                .collect();
            Value::Object(object)
        }
        // Tags are dropped; the tagged value is kept.
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_json_keeps_order() {
        let value = parse_json(r#"{"b": 1, "a": 2}"#).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_yaml_non_string_keys() {
        let value = parse_yaml("1: first\ntrue: yes").unwrap();
        assert_eq!(value, json!({"1": "first", "true": "yes"}));
    }

    #[test]
    fn test_parse_toml() {
        let value = parse_toml("name = \"app\"\n[server]\nport = 8080\n").unwrap();
        assert_eq!(value, json!({"name": "app", "server": {"port": 8080}}));
    }

    #[test]
    fn test_parse_file_json() {
        let file = temp_file(".json", r#"{"key": "value"}"#);
        assert_eq!(parse_file(file.path()).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_parse_file_empty_json_is_decode_error() {
        let file = temp_file(".json", "");
        let err = parse_file(file.path()).unwrap_err();
        assert!(matches!(err, ParseError::JsonError { .. }));
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_parse_file_not_found() {
        let err = parse_file(Path::new("/nonexistent/file.json")).unwrap_err();
        assert!(matches!(err, ParseError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_file_unknown_extension_is_json() {
        let file = temp_file(".txt", r#"{"key": "value"}"#);
        assert_eq!(parse_file(file.path()).unwrap(), json!({"key": "value"}));
    }

    #[test]
    fn test_parse_file_unknown_extension_decode_errors() {
        for (suffix, content) in [
            ("", ""),
            (".txt", "   \n"),
            ("", r#"{"a": 1,}"#),
            (".txt", "not json at all"),
        ] {
            let file = temp_file(suffix, content);
            let err = parse_file(file.path()).unwrap_err();
            assert!(
                matches!(err, ParseError::JsonError { .. }),
                "{:?} with suffix {:?} gave {:?}",
                content,
                suffix,
                err
            );
        }
    }

    #[test]
    fn test_non_finite_floats_keep_their_text() {
        assert_eq!(
            parse_yaml("a: .nan\nb: .inf\n").unwrap(),
            json!({"a": ".nan", "b": ".inf"})
        );
        assert_eq!(
            parse_toml("a = nan\nb = inf\n").unwrap(),
            json!({"a": "NaN", "b": "inf"})
        );
    }
}
