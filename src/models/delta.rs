//! Validated in/out count contributions.

use crate::errors::{AppError, AppResult};
use serde_json::Value;

/// A partial update: how many people entered and/or left since the last
/// report. Zero is treated the same as "not supplied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountDelta {
    in_count: Option<i64>,
    out_count: Option<i64>,
}

impl CountDelta {
    pub fn new(in_count: Option<i64>, out_count: Option<i64>) -> AppResult<Self> {
        let in_count = check_count(in_count, "inCount")?;
        let out_count = check_count(out_count, "outCount")?;

        if in_count.is_none() && out_count.is_none() {
            return Err(AppError::invalid("pass at least one inCount or outCount"));
        }

        Ok(Self {
            in_count,
            out_count,
        })
    }

    /// Build a delta from loosely typed request fields. Numbers and numeric
    /// strings are accepted; `null` and missing fields count as absent.
    pub fn from_json(in_count: Option<&Value>, out_count: Option<&Value>) -> AppResult<Self> {
        let in_count = json_count(in_count, "inCount")?;
        let out_count = json_count(out_count, "outCount")?;
        Self::new(in_count, out_count)
    }

    pub fn in_count(&self) -> Option<i64> {
        self.in_count
    }

    pub fn out_count(&self) -> Option<i64> {
        self.out_count
    }

    pub fn in_or_zero(&self) -> i64 {
        self.in_count.unwrap_or(0)
    }

    pub fn out_or_zero(&self) -> i64 {
        self.out_count.unwrap_or(0)
    }
}

fn invalid_count(field: &str) -> AppError {
    AppError::invalid(format!("passed {field} is invalid"))
}

fn check_count(value: Option<i64>, field: &str) -> AppResult<Option<i64>> {
    match value {
        None | Some(0) => Ok(None),
        Some(v) if v < 0 => Err(invalid_count(field)),
        Some(v) => Ok(Some(v)),
    }
}

fn json_count(value: Option<&Value>, field: &str) -> AppResult<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_integer(v).map(Some).ok_or_else(|| invalid_count(field)),
    }
}

/// Integral floats that fit in an `i64`. `i64::MAX as f64` rounds up to
/// 2^63, hence the strict upper bound.
fn integral_f64(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// Integer out of a JSON number or a numeric string (`5`, `"5"`, `5.0`,
/// `"5.0"`). Fractions, out-of-range values, booleans and anything else
/// yield `None`.
pub fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn at_least_one_count_is_required() {
        let err = CountDelta::new(None, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        // zeros are not a contribution
        assert!(CountDelta::new(Some(0), Some(0)).is_err());
        assert_eq!(
            CountDelta::new(Some(0), Some(2)).unwrap(),
            CountDelta::new(None, Some(2)).unwrap()
        );
    }

    #[test]
    fn negative_counts_are_rejected() {
        let err = CountDelta::new(Some(-1), None).unwrap_err();
        assert_eq!(err.to_string(), "passed inCount is invalid");
        let err = CountDelta::new(Some(1), Some(-4)).unwrap_err();
        assert_eq!(err.to_string(), "passed outCount is invalid");
    }

    #[test]
    fn json_accepts_numbers_and_numeric_strings() {
        let d = CountDelta::from_json(Some(&json!(3)), Some(&json!("2"))).unwrap();
        assert_eq!((d.in_count(), d.out_count()), (Some(3), Some(2)));

        let d = CountDelta::from_json(Some(&json!(4.0)), None).unwrap();
        assert_eq!(d.in_or_zero(), 4);
        assert_eq!(d.out_or_zero(), 0);
    }

    #[test]
    fn json_rejects_non_numeric_values() {
        for bad in [json!("abc"), json!(true), json!(1.5), json!([1])] {
            let err = CountDelta::from_json(Some(&bad), None).unwrap_err();
            assert_eq!(err.to_string(), "passed inCount is invalid");
        }
        let err = CountDelta::from_json(Some(&json!(null)), None).unwrap_err();
        assert_eq!(err.to_string(), "pass at least one inCount or outCount");
    }

    #[test]
    fn json_rejects_counts_beyond_i64() {
        for huge in [json!(1e300), json!(1e20), json!(-1e19), json!("1e300")] {
            let err = CountDelta::from_json(Some(&huge), None).unwrap_err();
            assert_eq!(err.to_string(), "passed inCount is invalid");
        }
        assert_eq!(parse_integer(&json!(1e18)), Some(1_000_000_000_000_000_000));
    }

    #[test]
    fn integral_strings_match_integral_numbers() {
        assert_eq!(parse_integer(&json!("5.0")), Some(5));
        assert_eq!(parse_integer(&json!(5.0)), Some(5));
        assert_eq!(parse_integer(&json!(" 7 ")), Some(7));
        assert_eq!(parse_integer(&json!("5.5")), None);
        assert_eq!(parse_integer(&json!("NaN")), None);
        assert_eq!(parse_integer(&json!("inf")), None);
    }
}
