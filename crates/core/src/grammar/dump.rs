use crate::TokenizeResult;

/// Serialize a tokenizer result to a pretty-printed JSON string.
pub fn to_pretty_json(result: &TokenizeResult) -> String {
    serde_json::to_string_pretty(result).expect("TokenizeResult serialization cannot fail")
}
