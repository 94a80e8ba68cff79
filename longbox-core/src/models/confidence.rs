use serde::{Deserialize, Serialize};
use std::fmt;

/// Match confidence clamped to [0.0, 1.0].
/// 1.0 means an exact or structural match; fuzzy tiers score lower.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a new Confidence, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Confidence of an exact or structural match.
    pub fn exact() -> Self {
        Self(1.0)
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this is an exact/structural match score.
    pub fn is_exact(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(Confidence::new(1.5).value(), 1.0);
        assert_eq!(Confidence::new(-0.5).value(), 0.0);
    }

    #[test]
    fn exact_is_exact() {
        assert!(Confidence::exact().is_exact());
        assert!(!Confidence::new(0.9).is_exact());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Confidence::new(0.85)).unwrap();
        assert_eq!(json, "0.85");
    }
}
