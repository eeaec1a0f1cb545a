use proptest::prelude::*;
use rd_json::lexer::{scan, Token};
use rd_json::{parse, JsonValue};

/// Minimal JSON writer used to feed generated trees back through the scanner. Each token is
/// preceded by the next entry from `gaps`.
fn write_value(value: &JsonValue, gaps: &mut impl Iterator<Item = String>, out: &mut String) {
    match value {
        JsonValue::Object(pairs) => {
            push_token(gaps, out, "{");
            for (index, (key, value)) in pairs.iter().enumerate() {
                if index > 0 {
                    push_token(gaps, out, ",");
                }
                push_token(gaps, out, &format!("\"{}\"", key));
                push_token(gaps, out, ":");
                write_value(value, gaps, out);
            }
            push_token(gaps, out, "}");
        }
        JsonValue::Array(values) => {
            push_token(gaps, out, "[");
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    push_token(gaps, out, ",");
                }
                write_value(value, gaps, out);
            }
            push_token(gaps, out, "]");
        }
        JsonValue::String(value) => push_token(gaps, out, &format!("\"{}\"", value)),
        JsonValue::Number(value) => push_token(gaps, out, &value.to_string()),
        JsonValue::Boolean(value) => push_token(gaps, out, &value.to_string()),
        JsonValue::Null => push_token(gaps, out, "null"),
    }
}

fn push_token(gaps: &mut impl Iterator<Item = String>, out: &mut String, text: &str) {
    out.push_str(&gaps.next().unwrap_or_default());
    out.push_str(text);
}

fn minimal(value: &JsonValue) -> String {
    let mut out = String::new();
    write_value(value, &mut std::iter::empty(), &mut out);
    out
}

fn string_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _{}:,\\[\\]-]{0,8}"
}

fn value_strategy() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Boolean),
        (-1_000_000i64..1_000_000).prop_map(|n| JsonValue::Number(n as f64 / 100.0)),
        string_strategy().prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(JsonValue::Array),
            prop::collection::btree_map(string_strategy(), inner, 0..6)
                .prop_map(|pairs| JsonValue::Object(pairs.into_iter().collect())),
        ]
    })
}

fn gap_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ \t\n\r\u{8}]{0,3}", 0..64)
}

fn token_kinds(text: &str) -> Vec<Token> {
    scan(text)
        .unwrap()
        .into_iter()
        .map(|packed| packed.0)
        .collect()
}

proptest! {
    /// Serialising a tree and reading it back produces the same tree
    #[test]
    fn should_round_trip_value_trees(value in value_strategy()) {
        let text = minimal(&value);
        let tokens = scan(&text).unwrap();
        let (parsed, remainder) = parse(&tokens, false).unwrap();
        prop_assert!(remainder.is_empty());
        prop_assert_eq!(parsed, value);
    }

    /// Whitespace between tokens never changes the token sequence
    #[test]
    fn should_ignore_whitespace_runs(value in value_strategy(), gaps in gap_strategy()) {
        let compact = minimal(&value);
        let mut padded = String::new();
        write_value(&value, &mut gaps.into_iter().cycle(), &mut padded);
        prop_assert_eq!(token_kinds(&compact), token_kinds(&padded));
    }

    /// Array roots are always accepted in root array mode
    #[test]
    fn should_accept_array_roots(values in prop::collection::vec(value_strategy(), 0..4)) {
        let value = JsonValue::Array(values);
        let tokens = scan(&minimal(&value)).unwrap();
        let (parsed, _) = parse(&tokens, true).unwrap();
        prop_assert_eq!(parsed, value);
    }
}
