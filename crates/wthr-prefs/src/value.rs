use serde::{Deserialize, Serialize};

/// A scalar preference value.
///
/// Persisted as plain JSON (`true`, `15`, `"dark"`), so the variant is
/// recovered from the JSON type on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PrefValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<u32> for PrefValue {
    fn from(value: u32) -> Self {
        PrefValue::Int(i64::from(value))
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Text(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Text(value.to_string())
    }
}

/// Rust types that can be read back out of a [`PrefValue`].
pub trait PrefScalar: Into<PrefValue> + Sized {
    /// `None` when the stored value has a different type.
    fn from_pref(value: &PrefValue) -> Option<Self>;
}

impl PrefScalar for bool {
    fn from_pref(value: &PrefValue) -> Option<Self> {
        value.as_bool()
    }
}

impl PrefScalar for i64 {
    fn from_pref(value: &PrefValue) -> Option<Self> {
        value.as_int()
    }
}

impl PrefScalar for u32 {
    fn from_pref(value: &PrefValue) -> Option<Self> {
        value.as_int().and_then(|i| u32::try_from(i).ok())
    }
}

impl PrefScalar for String {
    fn from_pref(value: &PrefValue) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_json_shape() {
        assert_eq!(serde_json::to_string(&PrefValue::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&PrefValue::Int(15)).unwrap(), "15");
        assert_eq!(serde_json::to_string(&PrefValue::from("dark")).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_decode_recovers_variant() {
        let v: PrefValue = serde_json::from_str("false").unwrap();
        assert_eq!(v, PrefValue::Bool(false));
        let v: PrefValue = serde_json::from_str("30").unwrap();
        assert_eq!(v, PrefValue::Int(30));
        let v: PrefValue = serde_json::from_str("\"sr\"").unwrap();
        assert_eq!(v, PrefValue::Text("sr".into()));
    }

    #[test]
    fn test_decode_rejects_non_scalars() {
        assert!(serde_json::from_str::<PrefValue>("[1, 2]").is_err());
        assert!(serde_json::from_str::<PrefValue>("1.5").is_err());
    }

    #[test]
    fn test_scalar_type_mismatch() {
        assert_eq!(bool::from_pref(&PrefValue::Int(1)), None);
        assert_eq!(u32::from_pref(&PrefValue::Int(-5)), None);
        assert_eq!(u32::from_pref(&PrefValue::Int(60)), Some(60));
        assert_eq!(String::from_pref(&PrefValue::Bool(true)), None);
    }
}
