//! Error types shared by the Strata crates.
//!
//! Every validation failure in the definition and derivative layers is
//! reported through [`StrataError`], so that callers can tell a bad input
//! apart from a missing fixing or a date ordering problem.

use thiserror::Error;

use crate::types::Date;

/// Result alias for the core crate.
pub type StrataResult<T> = Result<T, StrataError>;

/// Input, date and fixing failures of the core and instrument layers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrataError {
    /// A required input is missing or empty.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the offending argument.
        reason: String,
    },

    /// Parallel arrays disagree in length or shape.
    #[error("Inconsistent data length for {field}: expected {expected}, got {actual}")]
    InconsistentDataLength {
        /// Name of the field whose length is wrong.
        field: String,
        /// Expected length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// The valuation date is after a date that must not be in the past.
    #[error("Valuation date {valuation} is after {what} {date}")]
    PastDate {
        /// The valuation date.
        valuation: Date,
        /// Which date was passed (e.g. "payment date").
        what: String,
        /// The date that was passed.
        date: Date,
    },

    /// Two dates or times are in the wrong order.
    #[error("Invalid date order: {reason}")]
    InvalidDateOrder {
        /// Description of the ordering violation.
        reason: String,
    },

    /// A historical fixing required for valuation is not in the series.
    #[error("Missing fixing for {index} on {date}")]
    MissingFixing {
        /// Index or series name.
        index: String,
        /// The fixing date with no entry.
        date: Date,
    },

    /// A date that does not exist or does not parse.
    #[error("not a valid date: {message}")]
    InvalidDate {
        /// The offending input.
        message: String,
    },

    /// Unknown or unusable day count.
    #[error("day count: {reason}")]
    DayCountError {
        /// What went wrong.
        reason: String,
    },
}

impl StrataError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an inconsistent data length error.
    #[must_use]
    pub fn inconsistent_length(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::InconsistentDataLength {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a past date error.
    #[must_use]
    pub fn past_date(valuation: Date, what: impl Into<String>, date: Date) -> Self {
        Self::PastDate {
            valuation,
            what: what.into(),
            date,
        }
    }

    /// Creates an invalid date order error.
    #[must_use]
    pub fn invalid_date_order(reason: impl Into<String>) -> Self {
        Self::InvalidDateOrder {
            reason: reason.into(),
        }
    }

    /// Creates a missing fixing error.
    #[must_use]
    pub fn missing_fixing(index: impl Into<String>, date: Date) -> Self {
        Self::MissingFixing {
            index: index.into(),
            date,
        }
    }

    /// [`StrataError::InvalidDate`].
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
