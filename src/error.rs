//! Error types for the trendkit library.
//!
//! ## Key Components
//!
//! - [`ClickError`]: Returned by the write path when a click cannot be
//!   recorded (invalid item id, or a click counter at its ceiling).
//! - [`ConfigError`]: Returned when tracker configuration parameters are
//!   invalid (e.g. zero K).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (audit-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use trendkit::error::ConfigError;
//! use trendkit::tracker::TopKTracker;
//!
//! // Fallible constructor for user-configurable parameters
//! let tracker: Result<TopKTracker<u64>, ConfigError> = TopKTracker::try_new(10);
//! assert!(tracker.is_ok());
//!
//! // Invalid K is caught without panicking
//! let bad = TopKTracker::<u64>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ClickError
// ---------------------------------------------------------------------------

/// What went wrong while recording a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickErrorKind {
    /// The item id was rejected at the API boundary (e.g. an empty string).
    /// Shared state is untouched.
    InvalidId,
    /// The item's click counter is at `u64::MAX` and cannot take another
    /// click. Counts never wrap; the tracker reports instead.
    CounterOverflow,
}

/// Error returned by `record_click` when a click cannot be recorded.
///
/// Recording fails for exactly two reasons, distinguished by
/// [`ClickErrorKind`]: the id failed boundary validation, or the item's
/// counter would overflow. In both cases the tracker's state is exactly what
/// it was before the call.
///
/// # Example
///
/// ```
/// use trendkit::error::ClickErrorKind;
/// use trendkit::tracker::TopKTracker;
///
/// let mut tracker: TopKTracker<String> = TopKTracker::new(10);
/// let err = tracker.record_click(String::new()).unwrap_err();
/// assert_eq!(err.kind(), ClickErrorKind::InvalidId);
/// assert!(!err.is_fatal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickError {
    kind: ClickErrorKind,
    message: String,
}

impl ClickError {
    /// Creates a [`ClickErrorKind::InvalidId`] error with the given description.
    #[inline]
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self {
            kind: ClickErrorKind::InvalidId,
            message: msg.into(),
        }
    }

    /// Creates a [`ClickErrorKind::CounterOverflow`] error with the given description.
    #[inline]
    pub fn counter_overflow(msg: impl Into<String>) -> Self {
        Self {
            kind: ClickErrorKind::CounterOverflow,
            message: msg.into(),
        }
    }

    /// Returns which failure this is.
    #[inline]
    pub fn kind(&self) -> ClickErrorKind {
        self.kind
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for failures that indicate a broken counting invariant
    /// rather than bad input. Overflow is fatal; an invalid id is not.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ClickErrorKind::CounterOverflow)
    }
}

impl fmt::Display for ClickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ClickError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when tracker configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`TopKTracker::try_new`](crate::tracker::TopKTracker::try_new)
/// and builder `try_build()` methods. Carries a human-readable description of
/// which parameter failed validation.
///
/// # Example
///
/// ```
/// use trendkit::tracker::TopKTracker;
///
/// let err = TopKTracker::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("k"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal tracker invariants are violated.
///
/// Produced by audit methods such as
/// [`TopKTracker::check_invariants`](crate::tracker::TopKTracker::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ClickError ---------------------------------------------------------

    #[test]
    fn click_invalid_id_kind_and_message() {
        let err = ClickError::invalid_id("item id must be non-empty");
        assert_eq!(err.kind(), ClickErrorKind::InvalidId);
        assert_eq!(err.message(), "item id must be non-empty");
        assert!(!err.is_fatal());
    }

    #[test]
    fn click_overflow_is_fatal() {
        let err = ClickError::counter_overflow("click counter exhausted");
        assert_eq!(err.kind(), ClickErrorKind::CounterOverflow);
        assert!(err.is_fatal());
    }

    #[test]
    fn click_display_shows_message() {
        let err = ClickError::invalid_id("empty id");
        assert_eq!(err.to_string(), "empty id");
    }

    #[test]
    fn click_clone_and_eq() {
        let a = ClickError::counter_overflow("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn click_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ClickError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("k must be > 0");
        assert_eq!(err.to_string(), "k must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad k");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad k"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index size exceeds k");
        assert_eq!(err.to_string(), "index size exceeds k");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
