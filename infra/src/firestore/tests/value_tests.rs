use serde_json::json;

use ps_core::domain::entities::profile::Profile;

use crate::firestore::value::{decode_value, encode_value, from_document, to_document};
use crate::InfrastructureError;

fn sample_profile() -> Profile {
    Profile {
        student_id: "24X1234".to_string(),
        faculty: "Engineering".to_string(),
        last_name: "山田".to_string(),
        first_name: "太郎".to_string(),
        nickname: "taro".to_string(),
        self_introduction: "".to_string(),
    }
}

#[test]
fn test_encode_scalars() {
    assert_eq!(encode_value(&json!(null)), json!({"nullValue": null}));
    assert_eq!(encode_value(&json!(true)), json!({"booleanValue": true}));
    assert_eq!(encode_value(&json!(42)), json!({"integerValue": "42"}));
    assert_eq!(encode_value(&json!(1.5)), json!({"doubleValue": 1.5}));
    assert_eq!(encode_value(&json!("abc")), json!({"stringValue": "abc"}));
}

#[test]
fn test_encode_nested() {
    let encoded = encode_value(&json!({"tags": ["a", 1], "meta": {"ok": false}}));
    assert_eq!(
        encoded,
        json!({
            "mapValue": {"fields": {
                "tags": {"arrayValue": {"values": [{"stringValue": "a"}, {"integerValue": "1"}]}},
                "meta": {"mapValue": {"fields": {"ok": {"booleanValue": false}}}}
            }}
        })
    );
}

#[test]
fn test_decode_values() {
    assert_eq!(decode_value(&json!({"integerValue": "-7"})).unwrap(), json!(-7));
    assert_eq!(decode_value(&json!({"doubleValue": 2.25})).unwrap(), json!(2.25));
    assert_eq!(
        decode_value(&json!({"timestampValue": "2024-01-01T00:00:00Z"})).unwrap(),
        json!("2024-01-01T00:00:00Z")
    );
    assert_eq!(decode_value(&json!({"arrayValue": {}})).unwrap(), json!([]));
    assert_eq!(decode_value(&json!({"mapValue": {}})).unwrap(), json!({}));
}

#[test]
fn test_decode_rejects_bad_shapes() {
    let cases = [
        json!("bare string"),
        json!({}),
        json!({"stringValue": "a", "integerValue": "1"}),
        json!({"integerValue": "not a number"}),
        json!({"booleanValue": "yes"}),
        json!({"mysteryValue": 1}),
    ];

    for case in cases {
        assert!(
            matches!(decode_value(&case), Err(InfrastructureError::Codec(_))),
            "{} should not decode",
            case
        );
    }
}

#[test]
fn test_profile_document_shape() {
    let document = to_document(&sample_profile()).unwrap();
    assert_eq!(document["fields"]["student_id"], json!({"stringValue": "24X1234"}));
    assert_eq!(document["fields"]["self_introduction"], json!({"stringValue": ""}));
    assert_eq!(document["fields"].as_object().unwrap().len(), 6);
}

#[test]
fn test_profile_from_firestore_document() {
    let document = json!({
        "name": "projects/p/databases/(default)/documents/profiles/default",
        "fields": {
            "student_id": {"stringValue": "24X1234"},
            "faculty": {"stringValue": "Engineering"},
            "last_name": {"stringValue": "山田"},
            "first_name": {"stringValue": "太郎"},
            "nickname": {"stringValue": "taro"},
            "self_introduction": {"stringValue": ""}
        },
        "createTime": "2024-01-01T00:00:00Z",
        "updateTime": "2024-01-01T00:00:00Z"
    });

    let profile: Profile = from_document(&document).unwrap();
    assert_eq!(profile, sample_profile());
}

#[test]
fn test_document_without_fields_reads_empty_profile() {
    let document = json!({"name": "projects/p/databases/(default)/documents/profiles/default"});
    let profile: Profile = from_document(&document).unwrap();
    assert_eq!(profile, Profile::default());
}

#[test]
fn test_document_with_wrong_field_type_rejected() {
    let document = json!({"fields": {"student_id": {"integerValue": "12"}}});
    let result: Result<Profile, _> = from_document(&document);
    assert!(matches!(result, Err(InfrastructureError::Codec(_))));
}
