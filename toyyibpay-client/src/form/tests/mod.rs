use serde::Serialize;

use super::*;

mod proptest_fields;

#[derive(Serialize)]
struct Sample {
    #[serde(rename = "codeName")]
    code: String,
    #[serde(rename = "amountSen")]
    amount: u64,
    #[serde(rename = "flag", skip_serializing_if = "is_zero")]
    flag: u32,
    #[serde(rename = "note", skip_serializing_if = "String::is_empty")]
    note: String,
    #[serde(rename = "always")]
    always: String,
    #[serde(rename = "maybe")]
    maybe: Option<String>,
}

fn sample() -> Sample {
    Sample {
        code: "ABC123".to_owned(),
        amount: 1000,
        flag: 0,
        note: String::new(),
        always: String::new(),
        maybe: None,
    }
}

#[test]
fn test_encode_uses_wire_names() {
    let fields = encode(&sample()).unwrap();
    assert_eq!(fields.get("codeName").map(String::as_str), Some("ABC123"));
    assert!(!fields.contains_key("code"));
}

#[test]
fn test_encode_integers_as_decimal() {
    let fields = encode(&Sample { amount: 1_234_567, ..sample() }).unwrap();
    assert_eq!(fields.get("amountSen").map(String::as_str), Some("1234567"));
}

#[test]
fn test_encode_omits_empty_marked_fields() {
    let fields = encode(&sample()).unwrap();
    assert!(!fields.contains_key("flag"));
    assert!(!fields.contains_key("note"));
    assert_eq!(fields.get("always").map(String::as_str), Some(""));
}

#[test]
fn test_encode_keeps_set_marked_fields() {
    let fields = encode(&Sample { flag: 2, note: "hi".to_owned(), ..sample() }).unwrap();
    assert_eq!(fields.get("flag").map(String::as_str), Some("2"));
    assert_eq!(fields.get("note").map(String::as_str), Some("hi"));
}

#[test]
fn test_encode_drops_null_members() {
    let fields = encode(&sample()).unwrap();
    assert!(!fields.contains_key("maybe"));

    let fields = encode(&Sample { maybe: Some("x".to_owned()), ..sample() }).unwrap();
    assert_eq!(fields.get("maybe").map(String::as_str), Some("x"));
}

#[test]
fn test_encode_rejects_non_object() {
    let result = encode(&"just a string");
    assert!(matches!(result, Err(ToyyibPayError::InvalidInput(_))));
}

#[test]
fn test_encode_rejects_nested_values() {
    #[derive(Serialize)]
    struct Nested {
        items: Vec<u32>,
    }

    let result = encode(&Nested { items: vec![1, 2] });
    assert!(matches!(result, Err(ToyyibPayError::InvalidInput(msg)) if msg.contains("items")));
}

#[test]
fn test_encode_accepts_maps() {
    let mut map = std::collections::HashMap::new();
    map.insert("billCode", "xyz789");

    let fields = encode(&map).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("billCode").map(String::as_str), Some("xyz789"));
}

#[test]
fn test_is_zero() {
    assert!(is_zero(&0));
    assert!(!is_zero(&1));
}
