use crate::core::bet::BetRequest;
use crate::core::handicap::{HandicapType, Selection};
use crate::core::outcome::{PartOutcome, SettlementResult};
use crate::explain::{ExplainError, Explainer};
use rust_decimal::Decimal;

/// Offline explainer that states the settlement rule that applied.
///
/// Never fails, so it doubles as the fallback when an external service
/// is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExplainer;

impl RuleExplainer {
    fn european(request: &BetRequest, result: &SettlementResult) -> String {
        let adjusted = request.score.goal_difference() + request.line.value();
        let winner = if adjusted > Decimal::ZERO {
            Selection::Home
        } else if adjusted.is_zero() {
            Selection::Draw
        } else {
            Selection::Away
        };
        format!(
            "European {} at {}: adjusted goal difference {} names {} ({}) as the 3-way winner. \
             {} ({}) is settled {}, returning {:.2}.",
            request.line.european_label(),
            request.score,
            adjusted.normalize(),
            winner,
            winner.european_code(),
            request.selection,
            request.selection.european_code(),
            result.status(),
            result.payout()
        )
    }

    fn asian(request: &BetRequest, result: &SettlementResult) -> String {
        let rule = match result.parts() {
            Some(parts) => {
                let halves: Vec<String> = parts
                    .iter()
                    .map(|part| {
                        format!(
                            "Half on {} is a {}{}.",
                            part.line.asian_label(),
                            part.outcome,
                            Self::part_return(part.outcome, part.payout)
                        )
                    })
                    .collect();
                format!(
                    "Quarter line: the stake is split into two halves of {:.2}. {}",
                    request.stake / Decimal::TWO,
                    halves.join(" ")
                )
            }
            None => {
                let adjusted = request.score.goal_difference() + request.line.value();
                format!(
                    "Home goal difference with the line is {}.",
                    adjusted.normalize()
                )
            }
        };
        format!(
            "Asian {} on {} at {}. {} Settled {}: payout {:.2}, net {:.2}.",
            request.line.asian_label(),
            request.selection,
            request.score,
            rule,
            result.status(),
            result.payout(),
            result.net_profit()
        )
    }

    fn part_return(outcome: PartOutcome, payout: Decimal) -> String {
        match outcome {
            PartOutcome::Loss => String::new(),
            PartOutcome::Push => format!(" (stake {:.2} returned)", payout),
            PartOutcome::Win => format!(" (returns {:.2})", payout),
        }
    }
}

impl Explainer for RuleExplainer {
    fn explain(
        &self,
        request: &BetRequest,
        result: &SettlementResult,
    ) -> Result<String, ExplainError> {
        Ok(match request.handicap_type {
            HandicapType::European => Self::european(request, result),
            HandicapType::Asian => Self::asian(request, result),
        })
    }

    fn name(&self) -> &str {
        "rules"
    }
}
