use crate::core::handicap::{HandicapLine, Selection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Overall classification of a settled bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    Win,
    HalfWin,
    Push,
    HalfLoss,
    Loss,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Win => "WIN",
            SettlementStatus::HalfWin => "HALF WIN",
            SettlementStatus::Push => "PUSH",
            SettlementStatus::HalfLoss => "HALF LOSS",
            SettlementStatus::Loss => "LOSS",
        }
    }

    /// The status the opposite side of a 2-way market receives.
    pub fn mirrored(&self) -> Self {
        match self {
            SettlementStatus::Win => SettlementStatus::Loss,
            SettlementStatus::HalfWin => SettlementStatus::HalfLoss,
            SettlementStatus::Push => SettlementStatus::Push,
            SettlementStatus::HalfLoss => SettlementStatus::HalfWin,
            SettlementStatus::Loss => SettlementStatus::Win,
        }
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<PartOutcome> for SettlementStatus {
    fn from(outcome: PartOutcome) -> Self {
        match outcome {
            PartOutcome::Win => SettlementStatus::Win,
            PartOutcome::Push => SettlementStatus::Push,
            PartOutcome::Loss => SettlementStatus::Loss,
        }
    }
}

/// Outcome of a single whole or half line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOutcome {
    Win,
    Push,
    Loss,
}

impl PartOutcome {
    /// Classify a handicap-adjusted goal difference from the home side.
    pub fn from_adjusted_difference(adjusted: Decimal) -> Self {
        if adjusted > Decimal::ZERO {
            PartOutcome::Win
        } else if adjusted < Decimal::ZERO {
            PartOutcome::Loss
        } else {
            PartOutcome::Push
        }
    }

    pub fn inverted(&self) -> Self {
        match self {
            PartOutcome::Win => PartOutcome::Loss,
            PartOutcome::Push => PartOutcome::Push,
            PartOutcome::Loss => PartOutcome::Win,
        }
    }

    /// Re-express a home-relative outcome from the side the bet backs.
    ///
    /// The away side wins exactly when the home side loses on the same
    /// line; a push is a push for both. Only `Home` keeps the home-relative
    /// outcome; `Draw` has no 2-way meaning and is settled like `Away`.
    pub fn for_selection(&self, selection: Selection) -> Self {
        match selection {
            Selection::Home => *self,
            Selection::Away | Selection::Draw => self.inverted(),
        }
    }

    /// Fraction of decimal odds paid back on a stake: odds, 1 or 0.
    pub fn multiplier(&self, odds: Decimal) -> Decimal {
        match self {
            PartOutcome::Win => odds,
            PartOutcome::Push => Decimal::ONE,
            PartOutcome::Loss => Decimal::ZERO,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOutcome::Win => "WIN",
            PartOutcome::Push => "PUSH",
            PartOutcome::Loss => "LOSS",
        }
    }
}

impl fmt::Display for PartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One half of a quarter-line bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartResult {
    pub line: HandicapLine,
    /// Outcome from the bettor's own selection.
    pub outcome: PartOutcome,
    pub payout: Decimal,
}

/// A deserialized result that the engine could not have produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("payout must not be negative, got {0}")]
    NegativePayout(Decimal),
    #[error("split payouts {first} + {second} do not sum to payout {payout}")]
    PartsMismatch {
        first: Decimal,
        second: Decimal,
        payout: Decimal,
    },
}

/// Outcome of settling a [`BetRequest`](crate::core::bet::BetRequest).
///
/// Results are only produced by the settlement engine and are not
/// modified afterwards. `net_profit` is always exactly `payout - stake`.
/// Deserialization checks the payout against its parts; the stake is not
/// stored, so `net_profit` is taken as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSettlementResult")]
pub struct SettlementResult {
    status: SettlementStatus,
    payout: Decimal,
    net_profit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parts: Option<[PartResult; 2]>,
}

#[derive(Deserialize)]
struct RawSettlementResult {
    status: SettlementStatus,
    payout: Decimal,
    net_profit: Decimal,
    #[serde(default)]
    parts: Option<[PartResult; 2]>,
}

impl TryFrom<RawSettlementResult> for SettlementResult {
    type Error = ResultError;

    fn try_from(raw: RawSettlementResult) -> Result<Self, Self::Error> {
        if raw.payout < Decimal::ZERO {
            return Err(ResultError::NegativePayout(raw.payout));
        }
        if let Some([first, second]) = &raw.parts {
            if first.payout.checked_add(second.payout) != Some(raw.payout) {
                return Err(ResultError::PartsMismatch {
                    first: first.payout,
                    second: second.payout,
                    payout: raw.payout,
                });
            }
        }
        Ok(Self {
            status: raw.status,
            payout: raw.payout,
            net_profit: raw.net_profit,
            parts: raw.parts,
        })
    }
}

impl SettlementResult {
    pub(crate) fn single(status: SettlementStatus, payout: Decimal, stake: Decimal) -> Self {
        Self {
            status,
            payout,
            net_profit: payout - stake,
            parts: None,
        }
    }

    pub(crate) fn split(
        status: SettlementStatus,
        parts: [PartResult; 2],
        stake: Decimal,
    ) -> Self {
        let payout = parts[0].payout + parts[1].payout;
        Self {
            status,
            payout,
            net_profit: payout - stake,
            parts: Some(parts),
        }
    }

    // --- Accessors ---

    pub fn status(&self) -> SettlementStatus {
        self.status
    }

    /// Total amount returned to the bettor, stake included.
    pub fn payout(&self) -> Decimal {
        self.payout
    }

    pub fn net_profit(&self) -> Decimal {
        self.net_profit
    }

    /// Per-line breakdown, present only for quarter lines.
    pub fn parts(&self) -> Option<&[PartResult; 2]> {
        self.parts.as_ref()
    }

    pub fn is_split(&self) -> bool {
        self.parts.is_some()
    }

    /// The stake the result was settled against.
    pub fn stake(&self) -> Decimal {
        self.payout - self.net_profit
    }

    /// True when the bettor receives back more than they staked.
    pub fn is_profitable(&self) -> bool {
        self.net_profit > Decimal::ZERO
    }

    /// Net profit as a percentage of stake.
    pub fn roi_percent(&self) -> f64 {
        let stake = self.stake();
        if stake == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.net_profit * Decimal::from(100) / stake;
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

impl fmt::Display for SettlementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement ===")?;
        writeln!(f, "Status:      {}", self.status)?;
        writeln!(f, "Payout:      {:.2}", self.payout)?;
        writeln!(f, "Net Profit:  {:.2}", self.net_profit)?;
        if let Some(parts) = &self.parts {
            writeln!(f, "\n--- Split ---")?;
            for part in parts {
                writeln!(
                    f,
                    "  {:>6}  {:<5} {:.2}",
                    part.line.asian_label(),
                    part.outcome,
                    part.payout
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outcome_from_adjusted_difference() {
        assert_eq!(PartOutcome::from_adjusted_difference(dec!(0.5)), PartOutcome::Win);
        assert_eq!(PartOutcome::from_adjusted_difference(dec!(0)), PartOutcome::Push);
        assert_eq!(PartOutcome::from_adjusted_difference(dec!(-1)), PartOutcome::Loss);
    }

    #[test]
    fn test_for_selection_keeps_only_home() {
        assert_eq!(PartOutcome::Win.for_selection(Selection::Home), PartOutcome::Win);
        assert_eq!(PartOutcome::Win.for_selection(Selection::Away), PartOutcome::Loss);
        assert_eq!(PartOutcome::Loss.for_selection(Selection::Away), PartOutcome::Win);
        assert_eq!(PartOutcome::Push.for_selection(Selection::Away), PartOutcome::Push);
        assert_eq!(PartOutcome::Win.for_selection(Selection::Draw), PartOutcome::Loss);
        assert_eq!(PartOutcome::Push.for_selection(Selection::Draw), PartOutcome::Push);
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(PartOutcome::Win.multiplier(dec!(1.9)), dec!(1.9));
        assert_eq!(PartOutcome::Push.multiplier(dec!(1.9)), Decimal::ONE);
        assert_eq!(PartOutcome::Loss.multiplier(dec!(1.9)), Decimal::ZERO);
    }

    #[test]
    fn test_status_labels_and_mirror() {
        assert_eq!(SettlementStatus::HalfWin.to_string(), "HALF WIN");
        assert_eq!(SettlementStatus::HalfWin.mirrored(), SettlementStatus::HalfLoss);
        assert_eq!(SettlementStatus::Push.mirrored(), SettlementStatus::Push);
    }

    #[test]
    fn test_result_profit_and_stake() {
        let result = SettlementResult::single(SettlementStatus::Win, dec!(195), dec!(100));
        assert_eq!(result.net_profit(), dec!(95));
        assert_eq!(result.stake(), dec!(100));
        assert!(result.is_profitable());
        assert_relative_eq!(result.roi_percent(), 95.0);
    }

    #[test]
    fn test_split_result_sums_parts() {
        let parts = [
            PartResult {
                line: HandicapLine::new(dec!(-0.5)),
                outcome: PartOutcome::Loss,
                payout: Decimal::ZERO,
            },
            PartResult {
                line: HandicapLine::LEVEL,
                outcome: PartOutcome::Push,
                payout: dec!(50),
            },
        ];
        let result = SettlementResult::split(SettlementStatus::HalfLoss, parts, dec!(100));
        assert_eq!(result.payout(), dec!(50));
        assert_eq!(result.net_profit(), dec!(-50));
        assert_relative_eq!(result.roi_percent(), -50.0);
    }

    #[test]
    fn test_zero_stake_roi() {
        let result = SettlementResult::single(SettlementStatus::Loss, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(result.roi_percent(), 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let result = SettlementResult::single(SettlementStatus::HalfWin, dec!(150), dec!(100));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "HALF_WIN");
        assert_eq!(json["net_profit"], "50");
        assert!(json.get("parts").is_none());
    }

    #[test]
    fn test_deserialize_checks_payout() {
        let json = r#"{"status": "WIN", "payout": "-5", "net_profit": "-105"}"#;
        assert!(serde_json::from_str::<SettlementResult>(json).is_err());

        let json = r#"{
            "status": "HALF_LOSS",
            "payout": "80",
            "net_profit": "-20",
            "parts": [
                { "line": "-0.5", "outcome": "LOSS", "payout": "0" },
                { "line": "0", "outcome": "PUSH", "payout": "50" }
            ]
        }"#;
        let err = serde_json::from_str::<SettlementResult>(json).unwrap_err();
        assert!(err.to_string().contains("do not sum to payout 80"));

        let fixed = json.replace(r#""payout": "80""#, r#""payout": "50""#);
        let result: SettlementResult = serde_json::from_str(&fixed).unwrap();
        assert_eq!(result.payout(), dec!(50));
        assert_eq!(result.stake(), dec!(100));
    }
}
