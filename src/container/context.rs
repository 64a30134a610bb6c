//! `container::context` reads and writes the context JSON block: `dt`, `t0`,
//! and `unit`. `t0` is a tagged value (string or number, Design Note §9) and is
//! never interpreted — it passes through `serde_json::Value` untouched.

use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::timeseries::TimeOrigin;

pub fn write(dt: f64, t0: &TimeOrigin, unit: &str) -> Vec<u8> {
    let mut map = Map::new();
    map.insert("dt".to_string(), Value::from(dt));
    map.insert(
        "t0".to_string(),
        match t0 {
            TimeOrigin::Text(s) => Value::String(s.clone()),
            TimeOrigin::Number(n) => Value::from(*n),
        },
    );
    map.insert("unit".to_string(), Value::String(unit.to_string()));
    // A context block built from a validated TimeSeries always serializes;
    // an allocation failure here would already have aborted the process.
    serde_json::to_vec(&Value::Object(map)).expect("context map always serializes")
}

pub fn read(bytes: &[u8]) -> Result<(f64, TimeOrigin, String), CodecError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| CodecError::MalformedContext("context block is not valid UTF-8".into()))?;
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CodecError::MalformedContext(format!("invalid JSON: {}", e)))?;

    let map = value
        .as_object()
        .ok_or_else(|| CodecError::MalformedContext("context must be a JSON object".into()))?;

    const EXPECTED_KEYS: [&str; 3] = ["dt", "t0", "unit"];
    if map.len() != EXPECTED_KEYS.len() || !EXPECTED_KEYS.iter().all(|k| map.contains_key(*k)) {
        return Err(CodecError::MalformedContext(
            "context must contain exactly dt, t0, unit".into(),
        ));
    }

    let dt = map
        .get("dt")
        .and_then(Value::as_f64)
        .ok_or_else(|| CodecError::MalformedContext("dt must be a number".into()))?;
    if !(dt > 0.0) {
        return Err(CodecError::MalformedContext("dt must be > 0".into()));
    }

    let t0_value = map.get("t0").unwrap();
    let t0 = if let Some(s) = t0_value.as_str() {
        TimeOrigin::Text(s.to_string())
    } else if let Some(n) = t0_value.as_f64() {
        TimeOrigin::Number(n)
    } else {
        return Err(CodecError::MalformedContext(
            "t0 must be a string or number".into(),
        ));
    };

    let unit = map
        .get("unit")
        .and_then(Value::as_str)
        .ok_or_else(|| CodecError::MalformedContext("unit must be a string".into()))?
        .to_string();

    Ok((dt, t0, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_text_t0() {
        let bytes = write(0.5, &TimeOrigin::Text("2024-01-01T00:00:00Z".into()), "degC");
        let (dt, t0, unit) = read(&bytes).unwrap();
        assert_eq!(dt, 0.5);
        assert_eq!(t0, TimeOrigin::Text("2024-01-01T00:00:00Z".into()));
        assert_eq!(unit, "degC");
    }

    #[test]
    fn round_trips_numeric_t0() {
        let bytes = write(1.0, &TimeOrigin::Number(0.0), "step");
        let (_, t0, _) = read(&bytes).unwrap();
        assert_eq!(t0, TimeOrigin::Number(0.0));
    }

    #[test]
    fn rejects_extra_keys() {
        let bytes = br#"{"dt":1.0,"t0":0,"unit":"step","extra":true}"#;
        assert!(matches!(read(bytes), Err(CodecError::MalformedContext(_))));
    }

    #[test]
    fn rejects_missing_keys() {
        let bytes = br#"{"dt":1.0,"unit":"step"}"#;
        assert!(matches!(read(bytes), Err(CodecError::MalformedContext(_))));
    }

    #[test]
    fn rejects_non_utf8() {
        let bytes = [0xffu8, 0xfe, 0xfd];
        assert!(matches!(read(&bytes), Err(CodecError::MalformedContext(_))));
    }

    #[test]
    fn rejects_non_positive_dt() {
        let bytes = br#"{"dt":0,"t0":0,"unit":"step"}"#;
        assert!(matches!(read(bytes), Err(CodecError::MalformedContext(_))));
    }
}
