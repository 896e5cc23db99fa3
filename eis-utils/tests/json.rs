use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use eis_utils::{dejsonify, jsonify, jsonify_pretty, load_json_arg, read_json_arg};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Report {
    zeta: u32,
    alpha: Vec<u32>,
    nested: Nested,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Nested {
    b: bool,
    a: String,
}

#[test]
fn test_jsonify_sorts_keys() {
    let report = Report {
        zeta: 1,
        alpha: vec![3, 2],
        nested: Nested {
            b: true,
            a: "x".to_string(),
        },
    };
    assert_eq!(
        jsonify(&report).unwrap(),
        r#"{"alpha":[3,2],"nested":{"a":"x","b":true},"zeta":1}"#
    );
}

#[test]
fn test_jsonify_sorts_objects_inside_arrays() {
    let value = json!([{"b": 1, "a": 2}]);
    assert_eq!(jsonify(&value).unwrap(), r#"[{"a":2,"b":1}]"#);
}

#[test]
fn test_jsonify_pretty_parses_back() {
    let value = json!({"k": 6, "labels": [1, 2, 3]});
    let text = jsonify_pretty(&value).unwrap();
    assert!(text.contains('\n'));
    assert_eq!(dejsonify::<serde_json::Value>(&text).unwrap(), value);
}

#[test]
fn test_load_json_arg_literal() {
    let nested: Nested = load_json_arg(r#"{"a":"y","b":false}"#).unwrap();
    assert_eq!(
        nested,
        Nested {
            a: "y".to_string(),
            b: false
        }
    );
    assert!(load_json_arg::<Nested>("{not json").is_err());
}

#[test]
fn test_load_json_arg_file() {
    let path = std::env::temp_dir().join("eis_utils_load_json_arg.json");
    fs::write(&path, r#"{"a":"file","b":true}"#).unwrap();
    let arg = path.to_string_lossy().to_string();
    let nested: Nested = load_json_arg(&arg).unwrap();
    assert_eq!(nested.a, "file");
    fs::remove_file(&path).unwrap();

    assert!(read_json_arg("/definitely/not/here.json").is_err());
}
