use crate::core::handicap::{HandicapLine, HandicapType, LineError, Selection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stake used when a caller does not supply one.
pub const DEFAULT_STAKE: Decimal = dec!(100);

/// Decimal odds used when a caller does not supply them.
pub const DEFAULT_ODDS: Decimal = dec!(1.95);

/// Final (or current) scoreline of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Home goals minus away goals.
    pub fn goal_difference(&self) -> Decimal {
        Decimal::from(self.home) - Decimal::from(self.away)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Contract violations a caller can check for before settling.
///
/// The settlement engine never returns these; it settles whatever it is
/// given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BetError {
    #[error("Draw is not a selection in the Asian handicap market")]
    DrawOnAsianLine,
    #[error(transparent)]
    InvalidLine(#[from] LineError),
    #[error("odds must be positive, got {0}")]
    NonPositiveOdds(Decimal),
    #[error("stake must not be negative, got {0}")]
    NegativeStake(Decimal),
    #[error("stake {stake} at odds {odds} is too large to settle")]
    AmountOutOfRange { stake: Decimal, odds: Decimal },
}

/// A single handicap bet to be settled.
///
/// # Examples
///
/// ```
/// use handicap_engine::core::bet::{BetRequest, Score};
/// use handicap_engine::core::handicap::{HandicapLine, HandicapType, Selection};
/// use rust_decimal_macros::dec;
///
/// let bet = BetRequest::new(
///     HandicapType::Asian,
///     Score::new(2, 0),
///     HandicapLine::new(dec!(-0.5)),
///     Selection::Home,
/// )
/// .with_odds(dec!(1.95))
/// .with_stake(dec!(100));
///
/// assert!(bet.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetRequest {
    pub handicap_type: HandicapType,
    pub score: Score,
    pub line: HandicapLine,
    pub selection: Selection,
    #[serde(default = "default_odds")]
    pub odds: Decimal,
    #[serde(default = "default_stake")]
    pub stake: Decimal,
}

fn default_odds() -> Decimal {
    DEFAULT_ODDS
}

fn default_stake() -> Decimal {
    DEFAULT_STAKE
}

impl BetRequest {
    /// Create a request with the default odds and stake.
    pub fn new(
        handicap_type: HandicapType,
        score: Score,
        line: HandicapLine,
        selection: Selection,
    ) -> Self {
        Self {
            handicap_type,
            score,
            line,
            selection,
            odds: DEFAULT_ODDS,
            stake: DEFAULT_STAKE,
        }
    }

    pub fn with_odds(mut self, odds: Decimal) -> Self {
        self.odds = odds;
        self
    }

    pub fn with_stake(mut self, stake: Decimal) -> Self {
        self.stake = stake;
        self
    }

    /// Same bet, other side of the market.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Check the request is inside the settlement contract.
    pub fn validate(&self) -> Result<(), BetError> {
        if self.handicap_type == HandicapType::Asian && self.selection == Selection::Draw {
            return Err(BetError::DrawOnAsianLine);
        }
        self.line.check_for(self.handicap_type)?;
        if self.odds <= Decimal::ZERO {
            return Err(BetError::NonPositiveOdds(self.odds));
        }
        if self.stake < Decimal::ZERO {
            return Err(BetError::NegativeStake(self.stake));
        }
        // The largest payout a bet can produce is stake × odds.
        if self.stake.checked_mul(self.odds).is_none() {
            return Err(BetError::AmountOutOfRange {
                stake: self.stake,
                odds: self.odds,
            });
        }
        Ok(())
    }
}

impl fmt::Display for BetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {} for {} (score {})",
            self.handicap_type,
            self.selection,
            self.line.label_for(self.handicap_type),
            self.odds,
            self.stake,
            self.score
        )
    }
}
