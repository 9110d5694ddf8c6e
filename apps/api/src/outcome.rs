//! Degraded-mode results.
//!
//! Collaborator failures (embedding provider, document parser) never abort the
//! pipeline. They produce a fallback value wrapped in `Outcome::Degraded` so the
//! caller can see, log, and persist the fact that the value is a placeholder.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The collaborator produced the value.
    Fresh { value: T },
    /// The collaborator failed; `value` is the documented fallback.
    Degraded { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn fresh(value: T) -> Self {
        Outcome::Fresh { value }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Outcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Fresh { value } | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Fresh { value } | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Fresh { .. } => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_has_no_reason() {
        let outcome = Outcome::fresh(3);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.reason(), None);
        assert_eq!(*outcome.value(), 3);
    }

    #[test]
    fn test_degraded_keeps_value_and_reason() {
        let outcome = Outcome::degraded(String::new(), "pdf parse failed");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason(), Some("pdf parse failed"));
        assert_eq!(outcome.into_value(), "");
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::degraded(1, "timeout")).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["reason"], "timeout");
        assert_eq!(json["value"], 1);
    }
}
