use serde_json::Value;
use tracing::debug;

/// Interpret raw allowance input.
///
/// Accepts a non-negative whole number or a string holding one. Anything
/// else (null, empty, negative, fractional, non-numeric, out of range) is
/// invalid and yields None, which the engine replaces with the default.
pub fn parse_allowance_input(input: &Value) -> Option<u32> {
    let parsed = match input {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };

    if parsed.is_none() {
        debug!("Invalid allowance input {}, falling back to default", input);
    }
    parsed
}
