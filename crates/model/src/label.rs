//! Class labels as stored by a trained classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A class label.
///
/// Trained models don't agree on label types: some use `0`/`1`, some export
/// floats, some use human-readable strings. Deserialization is untagged so a
/// JSON `1` becomes `Int(1)`, `1.0` becomes `Float(1.0)` and `"Bestseller"`
/// becomes `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ClassLabel {
    /// True when the label is numerically equal to 1.
    pub fn is_one(&self) -> bool {
        match self {
            ClassLabel::Int(v) => *v == 1,
            ClassLabel::Float(v) => *v == 1.0,
            ClassLabel::Text(_) => false,
        }
    }

    /// The label text, if the label is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ClassLabel::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Int(v) => write!(f, "{}", v),
            ClassLabel::Float(v) => write!(f, "{}", v),
            ClassLabel::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ClassLabel {
    fn from(v: i64) -> Self {
        ClassLabel::Int(v)
    }
}

impl From<&str> for ClassLabel {
    fn from(s: &str) -> Self {
        ClassLabel::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialization() {
        let labels: Vec<ClassLabel> = serde_json::from_str(r#"[0, 1.0, "Bestseller"]"#).unwrap();
        assert_eq!(labels[0], ClassLabel::Int(0));
        assert_eq!(labels[1], ClassLabel::Float(1.0));
        assert_eq!(labels[2], ClassLabel::Text("Bestseller".to_string()));
    }

    #[test]
    fn test_is_one() {
        assert!(ClassLabel::Int(1).is_one());
        assert!(ClassLabel::Float(1.0).is_one());
        assert!(!ClassLabel::Int(0).is_one());
        assert!(!ClassLabel::Text("1".to_string()).is_one());
    }
}
