//! Argument parsing and output helpers for the CLI.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::NaiveDate;
use holded_core::{Error, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Exit code for a previewed destructive action that was not confirmed.
pub const EXIT_PREVIEW: i32 = 2;

/// Parse a `--date` argument: `YYYY-MM-DD` (interpreted as UTC midnight)
/// or a raw Unix timestamp in seconds.
pub fn parse_date_arg(date: &str) -> Result<i64> {
    if !date.is_empty() && date.bytes().all(|b| b.is_ascii_digit()) {
        return date
            .parse::<i64>()
            .map_err(|_| Error::InvalidInput(format!("Invalid --date \"{date}\"")));
    }

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        Error::InvalidInput(format!(
            "Invalid --date \"{date}\". Use YYYY-MM-DD or a Unix timestamp."
        ))
    })?;

    let midnight = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::InvalidInput(format!("Invalid date: {date}")))?;

    Ok(midnight.and_utc().timestamp())
}

/// Parse a `--json` argument into an open JSON object.
pub fn parse_json_object(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::InvalidInput(
            "--json must contain a JSON object".to_string(),
        )),
        Err(err) => Err(Error::InvalidInput(format!("Invalid --json: {err}"))),
    }
}

/// Print a value as pretty JSON on standard output.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("{{\"error\":\"SERIALIZE_ERROR\",\"message\":\"{err}\"}}"),
    }
}

/// Wrap raw bytes for text-safe JSON output.
#[must_use]
pub fn binary_payload(bytes: &[u8]) -> Value {
    json!({
        "bytes": bytes.len(),
        "base64": BASE64.encode(bytes),
    })
}

/// Preview a destructive action and exit unless `--confirm` was supplied.
pub fn require_confirm(confirm: bool, action: &str, details: Value) {
    if confirm {
        return;
    }

    let mut preview = Map::new();
    preview.insert("preview".to_string(), Value::Bool(true));
    preview.insert("action".to_string(), Value::String(action.to_string()));
    if let Value::Object(details) = details {
        preview.extend(details);
    }
    preview.insert(
        "message".to_string(),
        Value::String("Pass --confirm to execute this action.".to_string()),
    );

    print_json(&Value::Object(preview));
    std::process::exit(EXIT_PREVIEW);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_arg_accepts_unix_timestamp() {
        assert_eq!(parse_date_arg("1772233200").unwrap(), 1_772_233_200);
    }

    #[test]
    fn date_arg_accepts_iso_date_as_utc_midnight() {
        // 2026-02-28T00:00:00Z
        assert_eq!(parse_date_arg("2026-02-28").unwrap(), 1_772_236_800);
    }

    #[test]
    fn date_arg_rejects_garbage() {
        for input in ["", "yesterday", "2026-13-01", "2026/02/28"] {
            let err = parse_date_arg(input).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "accepted {input:?}");
        }
    }

    #[test]
    fn json_arg_requires_an_object() {
        assert!(parse_json_object("{\"a\": 1}").is_ok());
        assert!(matches!(
            parse_json_object("[1, 2]"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            parse_json_object("{oops"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn binary_payload_is_base64_encoded() {
        let payload = binary_payload(b"abc");
        assert_eq!(payload["bytes"], 3);
        assert_eq!(payload["base64"], "YWJj");
    }
}
