//! Value checks shared across node constructors
//!
//! Constructors call these before any field is set, so a node either becomes
//! fully valid or is never created. Hydration reuses the same checks when it
//! reads attribute values out of serialized data.

use serde_json::Value as Json;

use crate::error::{AstError, Result};

/// Accepts only finite numbers; NaN and the infinities are rejected.
pub fn check_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AstError::invalid("a finite number", value))
    }
}

/// Accepts a non-empty segment list in which every segment is non-empty.
pub fn check_segments(segments: &[String]) -> Result<()> {
    if segments.is_empty() || segments.iter().any(String::is_empty) {
        return Err(AstError::invalid(
            "a non-empty list of non-empty path segments",
            format!("{segments:?}"),
        ));
    }
    Ok(())
}

/// Reads a string out of serialized data.
pub fn expect_str(value: &Json) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| AstError::invalid("a string", value))
}

/// Reads a finite number out of serialized data.
pub fn expect_f64(value: &Json) -> Result<f64> {
    let number = value
        .as_f64()
        .ok_or_else(|| AstError::invalid("a number", value))?;
    check_finite(number)
}

/// Reads an array out of serialized data.
pub fn expect_array(value: &Json) -> Result<&Vec<Json>> {
    value
        .as_array()
        .ok_or_else(|| AstError::invalid("a list", value))
}

/// Reads a named attribute out of a serialized node record.
pub fn expect_attr<'a>(data: &'a Json, name: &str) -> Result<&'a Json> {
    data.get(name)
        .ok_or_else(|| AstError::invalid(format!("attribute '{name}'"), data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_finite() {
        assert_eq!(check_finite(0.0), Ok(0.0));
        assert_eq!(check_finite(-3.25), Ok(-3.25));
        assert!(check_finite(f64::NAN).is_err());
        assert!(check_finite(f64::INFINITY).is_err());
        assert!(check_finite(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_check_segments() {
        let valid = vec!["a".to_string(), "b".to_string()];
        assert!(check_segments(&valid).is_ok());
        assert!(check_segments(&[]).is_err());
        let holed = vec!["a".to_string(), String::new()];
        assert!(check_segments(&holed).is_err());
    }

    #[test]
    fn test_expect_str() {
        assert_eq!(expect_str(&json!("hello")), Ok("hello"));
        assert!(expect_str(&json!(42)).is_err());
        assert!(expect_str(&json!(null)).is_err());
    }

    #[test]
    fn test_expect_f64() {
        assert_eq!(expect_f64(&json!(42.0)), Ok(42.0));
        assert_eq!(expect_f64(&json!(42)), Ok(42.0));
        assert!(expect_f64(&json!("42")).is_err());
        assert!(expect_f64(&json!(true)).is_err());
    }

    #[test]
    fn test_expect_attr() {
        let data = json!({ "tag": "number", "value": 1.0 });
        assert!(expect_attr(&data, "value").is_ok());
        assert!(expect_attr(&data, "missing").is_err());
        assert!(expect_attr(&json!(42), "value").is_err());
    }
}
