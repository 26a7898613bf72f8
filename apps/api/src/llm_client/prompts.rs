// Shared prompt fragments and the Gemini response schema helpers.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

use serde_json::{json, Value};

/// Builds a Gemini `OBJECT` schema where every listed property is required.
/// `properties` is a list of `(name, gemini_type)` pairs, e.g. `("reasoning", "STRING")`.
pub fn required_object_schema(properties: &[(&str, &str)]) -> Value {
    let props: serde_json::Map<String, Value> = properties
        .iter()
        .map(|(name, ty)| (name.to_string(), json!({ "type": ty })))
        .collect();
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": props,
        "required": required,
    })
}
