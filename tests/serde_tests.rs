//! Serde projection of documents: nodes serialize as structs, properties as
//! maps, and values natively where JSON can hold them, canonical text
//! otherwise.

use serde_json::json;
use stanza::from_str;

#[test]
fn test_document_serializes_as_node_sequence() {
    let doc = from_str("server 8080 host=localhost { tls True }").unwrap();
    let serialized = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        serialized,
        json!([{
            "name": "server",
            "value": 8080,
            "properties": { "host": "localhost" },
            "nodes": [{
                "name": "tls",
                "value": true,
                "properties": {},
                "nodes": []
            }]
        }])
    );
}

#[test]
fn test_values_without_native_json_form_use_canonical_text() {
    let doc = from_str(
        "a (datetime)2023-04-05T06:07:08+02:00\n\
         b (duration)6.02:11:23.548\n\
         c (binary)00ff\n\
         d (d128)1.50",
    )
    .unwrap();
    let serialized = serde_json::to_value(&doc).unwrap();
    assert_eq!(serialized[0]["value"], json!("2023-04-05T06:07:08+02:00"));
    assert_eq!(serialized[1]["value"], json!("6.02:11:23.548"));
    assert_eq!(serialized[2]["value"], json!("00ff"));
    assert_eq!(serialized[3]["value"], json!("1.50"));
}

#[test]
fn test_valueless_node_serializes_null_value() {
    let doc = from_str("marker").unwrap();
    let serialized = serde_json::to_value(&doc).unwrap();
    assert_eq!(serialized[0]["value"], serde_json::Value::Null);
}

#[test]
fn test_property_map_serializes_in_key_order() {
    let doc = from_str("n zeta=1 Alpha=2 mid=3").unwrap();
    let text = serde_json::to_string(&doc).unwrap();
    let alpha = text.find("Alpha").unwrap();
    let mid = text.find("mid").unwrap();
    let zeta = text.find("zeta").unwrap();
    assert!(alpha < mid && mid < zeta);
}
