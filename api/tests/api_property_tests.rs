// Property-based tests for the trending data served by the API

use common::errors::DataFileError;
use common::storage::DataFile;
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Arbitrary JSON trees. Numbers cover floats and integers too wide for any
/// native type, which must come back digit for digit.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
            .prop_map(Value::from),
        "-?[1-9][0-9]{20,40}(e[+-]?[1-9][0-9]{2})?"
            .prop_map(|text| serde_json::from_str::<Value>(&text).unwrap()),
        "[a-zA-Z0-9 _\\-/é★]{0,16}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,10}", inner, 0..8)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn load_blocking(file: &DataFile) -> Result<Value, DataFileError> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(file.load())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever valid JSON the workload leaves behind is what readers get
    #[test]
    fn property_valid_json_is_served_unchanged(value in arb_json()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_trending_repos.json");
        std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();

        let loaded = load_blocking(&DataFile::new(&path)).unwrap();
        prop_assert_eq!(loaded, value);
    }

    /// A file cut short mid-write is never mistaken for valid data
    #[test]
    fn property_truncated_json_is_rejected(
        value in prop::collection::vec(arb_json(), 1..6).prop_map(Value::Array),
        cut in 1usize..1000,
    ) {
        let encoded = serde_json::to_vec(&value).unwrap();
        let cut = cut % encoded.len();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_trending_repos.json");
        std::fs::write(&path, &encoded[..cut]).unwrap();

        let result = load_blocking(&DataFile::new(&path));
        prop_assert!(
            matches!(result, Err(DataFileError::InvalidJson { .. })),
            "expected invalid JSON for {} of {} bytes",
            cut,
            encoded.len()
        );
    }
}
