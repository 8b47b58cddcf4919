//! Proptest strategies for placement inputs

use proptest::prelude::*;
use serde_json::{json, Value};

/// Placement ids the way the engine formats them
pub fn placement_id_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,47}"
}

pub fn region_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("us-east-1".to_string()),
        Just("us-west-2".to_string()),
        Just("eu-west-1".to_string()),
        Just("ap-northeast-1".to_string()),
        "[a-z]{2}-[a-z]{4,9}-[1-9]",
    ]
}

pub fn source_type_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("PlacementSubmitted".to_string()),
        Just("PlacementFulfilled".to_string()),
        Just("PlacementTimedOut".to_string()),
        Just("PlacementCancelled".to_string()),
        Just("PlacementFailed".to_string()),
        "[A-Za-z]{1,24}",
    ])
}

/// Arbitrary JSON values, including nested ones
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-zA-Z]{1,12}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Well-formed envelopes that always carry a placement id
pub fn valid_notification_strategy() -> impl Strategy<Value = (String, String)> {
    (
        placement_id_strategy(),
        prop::option::of(region_strategy()),
        source_type_strategy(),
    )
        .prop_map(|(placement_id, region, source_type)| {
            let mut detail = json!({ "placementId": placement_id });
            if let Some(source_type) = source_type {
                detail["type"] = json!(source_type);
            }
            let mut envelope = json!({ "detail": detail });
            if let Some(region) = region {
                envelope["region"] = json!(region);
            }
            (placement_id, envelope.to_string())
        })
}
