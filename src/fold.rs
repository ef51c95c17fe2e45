//! Error Fold
//!
//! A two-sided accumulator for validation outcomes: either nothing went
//! wrong, or a human-readable report of what did. Results are combined
//! under AND ([`ErrorFold::conjoin`]) and OR ([`ErrorFold::disjoin`]).

use serde::{Deserialize, Serialize};

use crate::error::LawViolation;

/// Seed for OR-folds, so that an empty disjunction fails.
pub const NO_ALTERNATIVE_HELD: &str = "No alternative held";

const EMPTY_FAILURE: &str = "Unspecified failure";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorFold {
    Success,
    Failure(String),
}

impl ErrorFold {
    pub fn success() -> Self {
        ErrorFold::Success
    }

    /// A failure carrying `message`. The payload is never empty.
    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        let trimmed = message.trim_end();
        if trimmed.trim_start().is_empty() {
            ErrorFold::Failure(EMPTY_FAILURE.to_string())
        } else {
            ErrorFold::Failure(trimmed.to_string())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ErrorFold::Success)
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorFold::Success => None,
            ErrorFold::Failure(message) => Some(message),
        }
    }

    /// Joins two reports: the later one first, a blank line, then the
    /// earlier one, with trailing whitespace removed.
    pub fn append_text(earlier: &str, later: &str) -> String {
        format!("{}\n\n{}", later, earlier).trim_end().to_string()
    }

    /// AND: fails if either side fails.
    pub fn conjoin(self, other: ErrorFold) -> ErrorFold {
        match (self, other) {
            (ErrorFold::Success, ErrorFold::Success) => ErrorFold::Success,
            (ErrorFold::Failure(a), ErrorFold::Success) => ErrorFold::Failure(a),
            (ErrorFold::Success, ErrorFold::Failure(b)) => ErrorFold::Failure(b),
            (ErrorFold::Failure(a), ErrorFold::Failure(b)) => {
                ErrorFold::Failure(Self::append_text(&a, &b))
            }
        }
    }

    /// OR: succeeds if either side succeeds.
    pub fn disjoin(self, other: ErrorFold) -> ErrorFold {
        match (self, other) {
            (ErrorFold::Failure(a), ErrorFold::Failure(b)) => {
                ErrorFold::Failure(Self::append_text(&a, &b))
            }
            _ => ErrorFold::Success,
        }
    }

    /// AND-fold seeded with success; an empty list succeeds.
    pub fn fold_conjoin<I>(results: I) -> ErrorFold
    where
        I: IntoIterator<Item = ErrorFold>,
    {
        results
            .into_iter()
            .fold(ErrorFold::Success, |acc, next| acc.conjoin(next))
    }

    /// OR-fold seeded with a failure; an empty list fails.
    pub fn fold_disjoin<I>(results: I) -> ErrorFold
    where
        I: IntoIterator<Item = ErrorFold>,
    {
        results
            .into_iter()
            .fold(ErrorFold::fail(NO_ALTERNATIVE_HELD), |acc, next| {
                acc.disjoin(next)
            })
    }

    /// Wraps a failure under `header`; successes pass through.
    pub fn with_header(self, header: impl Into<String>) -> ErrorFold {
        match self {
            ErrorFold::Success => ErrorFold::Success,
            failure => failure.conjoin(ErrorFold::fail(header)),
        }
    }

    pub fn into_result(self) -> Result<(), LawViolation> {
        match self {
            ErrorFold::Success => Ok(()),
            ErrorFold::Failure(report) => Err(LawViolation { report }),
        }
    }
}

impl Default for ErrorFold {
    fn default() -> Self {
        ErrorFold::Success
    }
}

impl From<Result<(), String>> for ErrorFold {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => ErrorFold::Success,
            Err(message) => ErrorFold::fail(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_works_as_expected() {
        let error = ErrorFold::fail("1");
        let not_error = ErrorFold::success();

        assert_eq!(
            error.clone().conjoin(error.clone()).message(),
            Some(ErrorFold::append_text("1", "1").as_str())
        );
        assert_eq!(error.clone().conjoin(not_error.clone()), error);
        assert_eq!(not_error.clone().conjoin(error.clone()), error);
        assert!(not_error.clone().conjoin(not_error).is_success());
    }

    #[test]
    fn test_or_works_as_expected() {
        let error = ErrorFold::fail("2");
        let not_error = ErrorFold::success();

        assert_eq!(
            error.clone().disjoin(error.clone()).message(),
            Some("2\n\n2")
        );
        assert!(error.clone().disjoin(not_error.clone()).is_success());
        assert!(not_error.clone().disjoin(error).is_success());
        assert!(not_error.clone().disjoin(not_error).is_success());
    }

    #[test]
    fn test_error_flags_follow_boolean_logic() {
        let cases = [ErrorFold::success(), ErrorFold::fail("x")];
        for a in &cases {
            for b in &cases {
                assert_eq!(
                    a.clone().conjoin(b.clone()).is_error(),
                    a.is_error() || b.is_error()
                );
                assert_eq!(
                    a.clone().disjoin(b.clone()).is_error(),
                    a.is_error() && b.is_error()
                );
            }
        }
    }

    #[test]
    fn test_later_message_comes_first() {
        let folded = ErrorFold::fail("first").conjoin(ErrorFold::fail("second  \n"));
        assert_eq!(folded.message(), Some("second\n\nfirst"));
    }

    #[test]
    fn test_empty_folds() {
        assert!(ErrorFold::fold_conjoin(Vec::new()).is_success());

        let none = ErrorFold::fold_disjoin(Vec::new());
        assert_eq!(none.message(), Some(NO_ALTERNATIVE_HELD));
    }

    #[test]
    fn test_fold_conjoin_collects_every_failure() {
        let folded = ErrorFold::fold_conjoin(vec![
            ErrorFold::fail("a"),
            ErrorFold::success(),
            ErrorFold::fail("b"),
        ]);
        assert_eq!(folded.message(), Some("b\n\na"));
    }

    #[test]
    fn test_fold_disjoin_single_success_wins() {
        let folded = ErrorFold::fold_disjoin(vec![ErrorFold::fail("a"), ErrorFold::success()]);
        assert!(folded.is_success());
    }

    #[test]
    fn test_fail_never_empty() {
        assert_eq!(ErrorFold::fail("   ").message(), Some(EMPTY_FAILURE));
    }

    #[test]
    fn test_header_wraps_failures_only() {
        assert!(ErrorFold::success().with_header("All constraint failed:").is_success());
        let wrapped = ErrorFold::fail("inner").with_header("All constraint failed:");
        assert_eq!(wrapped.message(), Some("All constraint failed:\n\ninner"));
    }

    #[test]
    fn test_into_result() {
        assert!(ErrorFold::success().into_result().is_ok());
        let err = ErrorFold::fail("broken").into_result().unwrap_err();
        assert_eq!(err.report, "broken");
    }
}
