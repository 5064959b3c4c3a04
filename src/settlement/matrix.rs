use crate::core::bet::{BetRequest, Score};
use crate::core::handicap::{ladder_for, HandicapLine, HandicapType, Selection};
use crate::core::outcome::SettlementResult;
use crate::settlement::engine::SettlementEngine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement of every selection on one line of the ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub line: HandicapLine,
    pub home: SettlementResult,
    /// Only populated for the European 3-way market.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw: Option<SettlementResult>,
    pub away: SettlementResult,
}

/// Settlement of a whole line ladder at a fixed scoreline.
///
/// This is the "what if" view of a match: for the current score, how does
/// each side of each offered line settle.
///
/// # Examples
///
/// ```
/// use handicap_engine::core::bet::Score;
/// use handicap_engine::core::handicap::HandicapType;
/// use handicap_engine::settlement::matrix::SettlementMatrix;
/// use rust_decimal_macros::dec;
///
/// let matrix = SettlementMatrix::build(HandicapType::Asian, Score::new(1, 0), dec!(1.95), dec!(100));
/// assert_eq!(matrix.rows().len(), 33);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementMatrix {
    handicap_type: HandicapType,
    score: Score,
    odds: Decimal,
    stake: Decimal,
    rows: Vec<MatrixRow>,
}

impl SettlementMatrix {
    /// Settle every ladder line for every selection of `handicap_type`.
    pub fn build(
        handicap_type: HandicapType,
        score: Score,
        odds: Decimal,
        stake: Decimal,
    ) -> Self {
        let rows = ladder_for(handicap_type)
            .into_iter()
            .map(|line| {
                let base = BetRequest::new(handicap_type, score, line, Selection::Home)
                    .with_odds(odds)
                    .with_stake(stake);
                let draw = match handicap_type {
                    HandicapType::European => Some(SettlementEngine::settle(
                        &base.clone().with_selection(Selection::Draw),
                    )),
                    HandicapType::Asian => None,
                };
                MatrixRow {
                    line,
                    home: SettlementEngine::settle(&base),
                    draw,
                    away: SettlementEngine::settle(&base.with_selection(Selection::Away)),
                }
            })
            .collect();

        Self {
            handicap_type,
            score,
            odds,
            stake,
            rows,
        }
    }

    pub fn handicap_type(&self) -> HandicapType {
        self.handicap_type
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn row(&self, line: HandicapLine) -> Option<&MatrixRow> {
        self.rows.iter().find(|r| r.line == line)
    }

    /// Lines on which the home side at least half wins.
    pub fn home_winning_lines(&self) -> Vec<HandicapLine> {
        self.rows
            .iter()
            .filter(|r| r.home.is_profitable())
            .map(|r| r.line)
            .collect()
    }
}

impl std::fmt::Display for SettlementMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "=== {} Handicap Matrix (score {}, odds {}, stake {}) ===",
            self.handicap_type, self.score, self.odds, self.stake
        )?;
        for row in &self.rows {
            let label = row.line.label_for(self.handicap_type);
            match &row.draw {
                Some(draw) => writeln!(
                    f,
                    "{:>7}  {} {:<5} {:>9.2} | {} {:<5} {:>9.2} | {} {:<5} {:>9.2}",
                    label,
                    Selection::Home.european_code(),
                    row.home.status(),
                    row.home.payout(),
                    Selection::Draw.european_code(),
                    draw.status(),
                    draw.payout(),
                    Selection::Away.european_code(),
                    row.away.status(),
                    row.away.payout(),
                )?,
                None => {
                    writeln!(
                        f,
                        "{:>7}  Home {:<9} {:>9.2} | Away {:<9} {:>9.2}",
                        label,
                        row.home.status(),
                        row.home.payout(),
                        row.away.status(),
                        row.away.payout(),
                    )?;
                    if let Some((lower, upper)) = row.line.split() {
                        writeln!(f, "         split {} & {}", lower, upper)?;
                    }
                }
            }
        }
        Ok(())
    }
}
