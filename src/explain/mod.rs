//! Natural-language explanations of settled bets.
//!
//! Explanation is a caller-side capability: it runs after a
//! [`SettlementResult`] already exists and its failure never touches that
//! result. The settlement engine has no knowledge of this module.

pub mod prompt;
pub mod rules;

use crate::core::bet::BetRequest;
use crate::core::outcome::SettlementResult;
use log::warn;
use thiserror::Error;

pub use prompt::build_prompt;
pub use rules::RuleExplainer;

/// Errors an explainer can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExplainError {
    /// The backing service cannot be used at all, e.g. a missing or
    /// rejected credential. Retrying will not help.
    #[error("explanation unavailable: {0}")]
    Unavailable(String),
    /// The request failed in a way that may succeed on retry.
    #[error("explanation fetch failed: {0}")]
    Transient(String),
}

impl ExplainError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExplainError::Transient(_))
    }
}

/// Something that can turn a settled bet into a rationale.
///
/// Implementations backed by an external text service should build their
/// request with [`build_prompt`] and map credential problems to
/// [`ExplainError::Unavailable`] and everything else to
/// [`ExplainError::Transient`].
pub trait Explainer {
    fn explain(
        &self,
        request: &BetRequest,
        result: &SettlementResult,
    ) -> Result<String, ExplainError>;

    /// Identifier for logs.
    fn name(&self) -> &str;
}

/// A settlement paired with the outcome of explaining it.
#[derive(Debug, Clone)]
pub struct ExplainedSettlement {
    pub result: SettlementResult,
    pub explanation: Result<String, ExplainError>,
}

impl ExplainedSettlement {
    pub fn explanation_text(&self) -> Option<&str> {
        self.explanation.as_deref().ok()
    }
}

/// Ask `explainer` for a rationale, keeping `result` whatever happens.
pub fn explain_settlement(
    explainer: &dyn Explainer,
    request: &BetRequest,
    result: SettlementResult,
) -> ExplainedSettlement {
    let explanation = explainer.explain(request, &result);
    if let Err(e) = &explanation {
        warn!("{} could not explain {}: {}", explainer.name(), request, e);
    }
    ExplainedSettlement {
        result,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bet::Score;
    use crate::core::handicap::{HandicapLine, HandicapType, Selection};
    use crate::settlement::engine::settle;
    use rust_decimal_macros::dec;

    struct FailingExplainer(ExplainError);

    impl Explainer for FailingExplainer {
        fn explain(&self, _: &BetRequest, _: &SettlementResult) -> Result<String, ExplainError> {
            Err(self.0.clone())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn request() -> BetRequest {
        BetRequest::new(
            HandicapType::Asian,
            Score::new(1, 0),
            HandicapLine::new(dec!(-0.75)),
            Selection::Home,
        )
    }

    #[test]
    fn test_failure_keeps_result() {
        let req = request();
        let result = settle(&req);
        let explainer = FailingExplainer(ExplainError::Unavailable("no API key".into()));

        let explained = explain_settlement(&explainer, &req, result.clone());
        assert_eq!(explained.result, result);
        assert!(explained.explanation_text().is_none());
        assert!(!explained.explanation.unwrap_err().is_retryable());
    }

    #[test]
    fn test_transient_is_retryable() {
        assert!(ExplainError::Transient("timeout".into()).is_retryable());
    }

    #[test]
    fn test_rule_explainer_succeeds() {
        let req = request();
        let explained = explain_settlement(&RuleExplainer, &req, settle(&req));
        assert!(explained.explanation_text().unwrap().contains("split"));
    }
}
