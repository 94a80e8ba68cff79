//! Caller-supplied deadline threaded through to the store boundary.

use std::time::{Duration, Instant};

use crate::errors::{EngineError, EngineResult};

/// A point in time after which an engine operation must abort with
/// [`EngineError::Timeout`] instead of returning a partial result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline: the operation runs to completion.
    pub fn none() -> Self {
        Self(None)
    }

    /// Deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self(Some(Instant::now() + timeout))
    }

    /// Deadline at an absolute instant.
    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|t| Instant::now() >= t)
    }

    /// Fail with [`EngineError::Timeout`] if the deadline has passed.
    pub fn check(&self) -> EngineResult<()> {
        if self.expired() {
            Err(EngineError::Timeout)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_deadline_never_expires() {
        assert!(!Deadline::none().expired());
        assert!(Deadline::none().check().is_ok());
    }

    #[test]
    fn past_deadline_is_expired() {
        let d = Deadline::at(Instant::now() - Duration::from_millis(1));
        assert!(d.expired());
        assert!(matches!(d.check(), Err(EngineError::Timeout)));
    }

    #[test]
    fn future_deadline_is_live() {
        let d = Deadline::after(Duration::from_secs(60));
        assert!(!d.expired());
    }
}
