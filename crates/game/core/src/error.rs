//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`ValidationError`, `TargetError`, `BudgetError`, ...)
//! live next to the code that raises them. Every one of them implements
//! [`GameError`] so callers can classify a rejection without matching on
//! concrete variants.
//!
//! # Design Principles
//!
//! - **No partial mutation**: an error always means the state is untouched
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: `error_code()` strings are safe to log and assert on

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the command may succeed later (e.g. next turn, after regen)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the engine cannot proceed (e.g. a required oracle is missing)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with an alternative command.
    ///
    /// Examples: ability on cooldown, not enough energy, movement exhausted
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: creature not found, target out of range
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: a log entry that does not apply to the state it was recorded against
    Internal,

    /// Fatal error - the engine cannot continue.
    ///
    /// Examples: missing required oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
