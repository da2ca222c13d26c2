//! Serde helpers for durations written as humantime strings (`"10m"`) or
//! numbers of seconds.

use humantime::parse_duration;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    from_value(value).map_err(Error::custom)
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => from_value(value).map(Some).map_err(Error::custom),
    }
}

fn from_value(value: Value) -> Result<Duration, String> {
    match value {
        Value::String(s) => parse_duration(&s).map_err(|e| e.to_string()),
        Value::Number(n) => {
            if let Some(secs) = n.as_u64() {
                Ok(Duration::from_secs(secs))
            } else {
                n.as_f64()
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                    .ok_or_else(|| format!("invalid duration: {}", n))
            }
        }
        _ => Err("expected a string or number for duration".to_string()),
    }
}
