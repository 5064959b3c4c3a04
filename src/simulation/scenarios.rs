//! Random bet generation for benchmarks and smoke tests.
//!
//! Every generated request is inside the settlement contract: lines come
//! from the offered ladders and `Draw` is only picked for European bets.

use crate::core::bet::{BetRequest, Score, DEFAULT_STAKE};
use crate::core::handicap::{ladder_for, HandicapType};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating random bets.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of bets to generate.
    pub count: usize,
    /// Highest goal count per side.
    pub max_goals: u32,
    /// Conventions to draw from.
    pub handicap_types: Vec<HandicapType>,
    /// Lowest decimal odds.
    pub min_odds: Decimal,
    /// Highest decimal odds.
    pub max_odds: Decimal,
    /// Stake for every bet.
    pub stake: Decimal,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            count: 100,
            max_goals: 5,
            handicap_types: vec![HandicapType::Asian, HandicapType::European],
            min_odds: dec!(1.20),
            max_odds: dec!(5.00),
            stake: DEFAULT_STAKE,
        }
    }
}

/// Generate random contract-valid bets.
pub fn generate_random_bets(config: &ScenarioConfig) -> Vec<BetRequest> {
    let mut rng = rand::thread_rng();
    if config.handicap_types.is_empty() {
        return Vec::new();
    }

    // Odds are drawn in hundredths between min and max.
    let min_cents = (config.min_odds * Decimal::ONE_HUNDRED).round();
    let max_cents = (config.max_odds * Decimal::ONE_HUNDRED).round();
    let min_cents: i64 = min_cents.to_string().parse().unwrap_or(120);
    let max_cents: i64 = max_cents.to_string().parse().unwrap_or(500).max(min_cents);

    (0..config.count)
        .filter_map(|_| {
            let handicap_type = *config.handicap_types.choose(&mut rng)?;
            let line = *ladder_for(handicap_type).choose(&mut rng)?;
            let selection = *handicap_type.selections().choose(&mut rng)?;
            let score = Score::new(
                rng.gen_range(0..=config.max_goals),
                rng.gen_range(0..=config.max_goals),
            );
            let odds = Decimal::new(rng.gen_range(min_cents..=max_cents), 2);
            Some(
                BetRequest::new(handicap_type, score, line, selection)
                    .with_odds(odds)
                    .with_stake(config.stake),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::engine::SettlementEngine;

    #[test]
    fn test_random_bets_are_valid() {
        let config = ScenarioConfig {
            count: 200,
            ..Default::default()
        };
        let bets = generate_random_bets(&config);
        assert_eq!(bets.len(), 200);
        for bet in &bets {
            assert!(bet.validate().is_ok(), "{}", bet);
            assert!(bet.odds >= config.min_odds && bet.odds <= config.max_odds);
        }
    }

    #[test]
    fn test_random_bets_settle() {
        let config = ScenarioConfig {
            count: 500,
            handicap_types: vec![HandicapType::Asian],
            ..Default::default()
        };
        for bet in generate_random_bets(&config) {
            let result = SettlementEngine::settle(&bet);
            assert_eq!(result.net_profit(), result.payout() - bet.stake);
            assert_eq!(result.is_split(), bet.line.is_quarter());
        }
    }

    #[test]
    fn test_no_types_generates_nothing() {
        let config = ScenarioConfig {
            handicap_types: Vec::new(),
            ..Default::default()
        };
        assert!(generate_random_bets(&config).is_empty());
    }
}
