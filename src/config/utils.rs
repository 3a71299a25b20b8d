/// Parse a boolean setting, supporting multiple formats
///
/// Accepts: "true", "false", "1", "0", "yes", "no" (case insensitive).
/// `name` is only used in the error message.
pub fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!(
            "Invalid boolean for {name}: '{value}' (expected true/false, 1/0 or yes/no)"
        )),
    }
}
