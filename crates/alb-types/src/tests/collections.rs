use serde_json::json;

use super::fixture;
use crate::{
    Collection, DecodeError, EncodeError, Pool, VirtualService, codec::decode_collection_value,
    decode_collection, encode_collection,
};

#[test]
fn single_page_without_cursor() {
    let body = json!({
        "count": 2,
        "results": [{"name": "a"}, {"name": "b"}]
    });
    let page: Collection<Pool> = decode_collection_value(body).unwrap();
    assert_eq!(page.count, 2);
    assert_eq!(page.len(), 2);
    assert_eq!(page.next, None);
    assert!(!page.has_more());
    let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn partial_page_keeps_opaque_cursor() {
    let bytes = br#"{
        "count": 5,
        "next": "https://ctl/api/pool?page=2&page_size=2",
        "results": [{"name": "a"}, {"name": "b"}]
    }"#;
    let page: Collection<Pool> = decode_collection(bytes).unwrap();
    assert_eq!(page.count, 5);
    assert!(page.has_more());
    assert_eq!(page.next.as_deref(), Some("https://ctl/api/pool?page=2&page_size=2"));

    let wire = encode_collection(&page).unwrap();
    assert_eq!(wire["next"], "https://ctl/api/pool?page=2&page_size=2");
    assert_eq!(wire["count"], 5);
}

#[test]
fn empty_page_is_valid() {
    let page: Collection<Pool> = decode_collection_value(json!({"count": 0, "results": []})).unwrap();
    assert!(page.is_empty());
    assert_eq!(encode_collection(&page).unwrap(), json!({"count": 0, "results": []}));
}

#[test]
fn more_results_than_count_is_inconsistent() {
    let err = decode_collection_value::<Pool>(json!({
        "count": 1,
        "results": [{"name": "a"}, {"name": "b"}]
    }))
    .unwrap_err();
    assert!(matches!(err, DecodeError::InconsistentCount { count: 1, results: 2, .. }));

    let bad = Collection {
        count: 0,
        next: None,
        results: vec![Pool::new("a")],
    };
    assert!(matches!(
        encode_collection(&bad),
        Err(EncodeError::InconsistentCount { count: 0, results: 1, .. })
    ));
}

#[test]
fn envelope_fields_are_checked() {
    let err = decode_collection_value::<Pool>(json!({"results": []})).unwrap_err();
    assert_eq!(err.field(), Some("count"));

    let err = decode_collection_value::<Pool>(json!({"count": 0})).unwrap_err();
    assert_eq!(err.field(), Some("results"));

    let err = decode_collection_value::<Pool>(json!({"count": "2", "results": []})).unwrap_err();
    assert!(matches!(err, DecodeError::TypeMismatch { expected: "integer", found: "string", .. }));

    let err = decode_collection_value::<Pool>(json!({"count": 1, "next": 2, "results": []})).unwrap_err();
    assert_eq!(err.field(), Some("next"));
}

#[test]
fn item_errors_point_into_results() {
    let err = decode_collection_value::<Pool>(json!({
        "count": 2,
        "results": [{"name": "a"}, {"servers": []}]
    }))
    .unwrap_err();
    assert_eq!(err.field(), Some("results[1].name"));
}

#[test]
fn complete_collection_encodes_without_next() {
    let vs: VirtualService = crate::decode_value(fixture("virtualservice")).unwrap();
    let page = Collection::complete(vec![vs]);
    let wire = encode_collection(&page).unwrap();
    assert_eq!(wire["count"], 1);
    assert!(wire.get("next").is_none());
    assert_eq!(wire["results"][0], fixture("virtualservice"));
}
