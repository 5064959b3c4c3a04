use crate::core::bet::BetRequest;
use crate::core::handicap::{HandicapLine, HandicapType, Selection};
use crate::core::outcome::{PartOutcome, PartResult, SettlementResult, SettlementStatus};
use log::{debug, trace};
use rust_decimal::Decimal;

/// The handicap settlement engine.
///
/// Settlement is a pure function of the request: no state is kept
/// between calls, nothing is validated, and nothing can fail for a
/// request inside the contract described on
/// [`BetRequest::validate`](crate::core::bet::BetRequest::validate).
pub struct SettlementEngine;

impl SettlementEngine {
    /// Settle a single bet.
    ///
    /// # Examples
    ///
    /// ```
    /// use handicap_engine::prelude::*;
    /// use rust_decimal_macros::dec;
    ///
    /// let bet = BetRequest::new(
    ///     HandicapType::Asian,
    ///     Score::new(0, 0),
    ///     HandicapLine::new(dec!(-0.25)),
    ///     Selection::Home,
    /// )
    /// .with_odds(dec!(2.00))
    /// .with_stake(dec!(100));
    ///
    /// let result = SettlementEngine::settle(&bet);
    /// assert_eq!(result.status(), SettlementStatus::HalfLoss);
    /// assert_eq!(result.payout(), dec!(50));
    /// ```
    pub fn settle(request: &BetRequest) -> SettlementResult {
        let result = match request.handicap_type {
            HandicapType::European => Self::settle_european(request),
            HandicapType::Asian => Self::settle_asian(request),
        };
        debug!(
            "settled {}: {} payout={} net={}",
            request,
            result.status(),
            result.payout(),
            result.net_profit()
        );
        result
    }

    /// 3-way settlement: the adjusted score names exactly one winner.
    ///
    /// A level adjusted score is a Draw win, not a push.
    pub fn settle_european(request: &BetRequest) -> SettlementResult {
        let adjusted = request.score.goal_difference() + request.line.value();
        let winner = if adjusted > Decimal::ZERO {
            Selection::Home
        } else if adjusted == Decimal::ZERO {
            Selection::Draw
        } else {
            Selection::Away
        };

        if request.selection == winner {
            SettlementResult::single(
                SettlementStatus::Win,
                request.stake * request.odds,
                request.stake,
            )
        } else {
            SettlementResult::single(SettlementStatus::Loss, Decimal::ZERO, request.stake)
        }
    }

    /// 2-way settlement, splitting quarter lines into two half-stakes.
    pub fn settle_asian(request: &BetRequest) -> SettlementResult {
        match request.line.split() {
            Some((lower, upper)) => {
                let half_stake = request.stake / Decimal::TWO;
                let first = Self::evaluate_part(request, lower, half_stake);
                let second = Self::evaluate_part(request, upper, half_stake);
                let status = combine_parts(first.outcome, second.outcome);
                SettlementResult::split(status, [first, second], request.stake)
            }
            None => {
                let part = Self::evaluate_part(request, request.line, request.stake);
                SettlementResult::single(part.outcome.into(), part.payout, request.stake)
            }
        }
    }

    /// Settle `part_stake` on one whole or half line.
    ///
    /// The line is applied to the home goal difference, then the outcome is
    /// mapped onto the bettor's selection before the payout multiplier is
    /// applied.
    pub fn evaluate_part(
        request: &BetRequest,
        line: HandicapLine,
        part_stake: Decimal,
    ) -> PartResult {
        let adjusted = request.score.goal_difference() + line.value();
        let home_outcome = PartOutcome::from_adjusted_difference(adjusted);
        let outcome = home_outcome.for_selection(request.selection);
        let payout = part_stake * outcome.multiplier(request.odds);
        trace!(
            "line {} adj={} home={} {}={} payout={}",
            line,
            adjusted,
            home_outcome,
            request.selection,
            outcome,
            payout
        );
        PartResult {
            line,
            outcome,
            payout,
        }
    }
}

/// Settle a single bet. Shorthand for [`SettlementEngine::settle`].
pub fn settle(request: &BetRequest) -> SettlementResult {
    SettlementEngine::settle(request)
}

/// Combine the two halves of a quarter-line bet into one status.
///
/// # Panics
///
/// Panics if one half wins while the other loses. The halves sit a half
/// goal apart, so the adjusted differences cannot straddle zero without
/// one of them being exactly zero.
pub fn combine_parts(first: PartOutcome, second: PartOutcome) -> SettlementStatus {
    use PartOutcome::{Loss, Push, Win};

    match (first, second) {
        (Win, Win) => SettlementStatus::Win,
        (Loss, Loss) => SettlementStatus::Loss,
        (Push, Push) => SettlementStatus::Push,
        (Win, Push) | (Push, Win) => SettlementStatus::HalfWin,
        (Loss, Push) | (Push, Loss) => SettlementStatus::HalfLoss,
        (Win, Loss) | (Loss, Win) => unreachable!(
            "quarter-line halves settled {} and {}; adjacent half lines cannot win and lose together",
            first, second
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bet::Score;
    use rust_decimal_macros::dec;

    fn bet(
        handicap_type: HandicapType,
        home: u32,
        away: u32,
        line: Decimal,
        selection: Selection,
        odds: Decimal,
        stake: Decimal,
    ) -> BetRequest {
        BetRequest::new(
            handicap_type,
            Score::new(home, away),
            HandicapLine::new(line),
            selection,
        )
        .with_odds(odds)
        .with_stake(stake)
    }

    #[test]
    fn test_european_level_score_pays_draw() {
        let req = bet(HandicapType::European, 1, 1, dec!(0), Selection::Draw, dec!(3.00), dec!(100));
        let result = SettlementEngine::settle(&req);
        assert_eq!(result.status(), SettlementStatus::Win);
        assert_eq!(result.payout(), dec!(300));
        assert_eq!(result.net_profit(), dec!(200));
        assert!(result.parts().is_none());
    }

    #[test]
    fn test_european_level_score_loses_home() {
        let req = bet(HandicapType::European, 1, 1, dec!(0), Selection::Home, dec!(1.90), dec!(50));
        let result = SettlementEngine::settle(&req);
        assert_eq!(result.status(), SettlementStatus::Loss);
        assert_eq!(result.payout(), Decimal::ZERO);
        assert_eq!(result.net_profit(), dec!(-50));
    }

    #[test]
    fn test_european_handicap_turns_win_into_draw() {
        // 2-1 with home giving a goal: adjusted 0, the draw wins.
        let home = bet(HandicapType::European, 2, 1, dec!(-1), Selection::Home, dec!(2.1), dec!(10));
        let draw = home.clone().with_selection(Selection::Draw);
        let away = home.clone().with_selection(Selection::Away);
        assert_eq!(settle(&home).status(), SettlementStatus::Loss);
        assert_eq!(settle(&draw).status(), SettlementStatus::Win);
        assert_eq!(settle(&away).status(), SettlementStatus::Loss);
    }

    #[test]
    fn test_asian_half_line_win() {
        let req = bet(HandicapType::Asian, 2, 0, dec!(-0.5), Selection::Home, dec!(1.95), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::Win);
        assert_eq!(result.payout(), dec!(195));
        assert_eq!(result.net_profit(), dec!(95));
        assert!(!result.is_split());
    }

    #[test]
    fn test_asian_whole_line_push() {
        let req = bet(HandicapType::Asian, 1, 0, dec!(-1), Selection::Home, dec!(1.95), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::Push);
        assert_eq!(result.payout(), dec!(100));
        assert_eq!(result.net_profit(), Decimal::ZERO);
    }

    #[test]
    fn test_asian_away_is_inverted() {
        let req = bet(HandicapType::Asian, 1, 0, dec!(-0.5), Selection::Away, dec!(1.95), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::Loss);
        assert_eq!(result.payout(), Decimal::ZERO);
        assert_eq!(result.net_profit(), dec!(-100));
    }

    #[test]
    fn test_asian_draw_settles_like_away() {
        let req = bet(HandicapType::Asian, 1, 0, dec!(-0.5), Selection::Draw, dec!(2), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::Loss);
        assert_eq!(result.payout(), Decimal::ZERO);
        assert_eq!(result.net_profit(), dec!(-100));
        assert_eq!(result, settle(&req.with_selection(Selection::Away)));
    }

    #[test]
    fn test_asian_quarter_both_halves_win() {
        let req = bet(HandicapType::Asian, 1, 0, dec!(-0.25), Selection::Home, dec!(2.00), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::Win);
        assert_eq!(result.payout(), dec!(200));

        let parts = result.parts().unwrap();
        assert_eq!(parts[0].line.value(), dec!(-0.5));
        assert_eq!(parts[1].line.value(), dec!(0));
        assert_eq!(parts[0].payout, dec!(100));
        assert_eq!(parts[1].payout, dec!(100));
    }

    #[test]
    fn test_asian_quarter_half_loss() {
        let req = bet(HandicapType::Asian, 0, 0, dec!(-0.25), Selection::Home, dec!(2.00), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::HalfLoss);
        assert_eq!(result.payout(), dec!(50));
        assert_eq!(result.net_profit(), dec!(-50));

        let parts = result.parts().unwrap();
        assert_eq!(parts[0].outcome, PartOutcome::Loss);
        assert_eq!(parts[1].outcome, PartOutcome::Push);
    }

    #[test]
    fn test_asian_quarter_half_win_for_away() {
        // 0-0, away receiving +0.25: half on 0 pushes, half on +0.5 wins.
        let req = bet(HandicapType::Asian, 0, 0, dec!(-0.25), Selection::Away, dec!(1.90), dec!(100));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::HalfWin);
        assert_eq!(result.payout(), dec!(145));
        assert_eq!(result.net_profit(), dec!(45));

        let parts = result.parts().unwrap();
        assert_eq!(parts[0].outcome, PartOutcome::Win);
        assert_eq!(parts[1].outcome, PartOutcome::Push);
    }

    #[test]
    fn test_asian_three_quarter_line() {
        // 2-1 on -0.75: -0.5 wins, -1 pushes.
        let req = bet(HandicapType::Asian, 2, 1, dec!(-0.75), Selection::Home, dec!(1.80), dec!(200));
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::HalfWin);
        assert_eq!(result.payout(), dec!(280));
        assert_eq!(result.net_profit(), dec!(80));
    }

    #[test]
    fn test_zero_stake() {
        let req = bet(HandicapType::Asian, 0, 0, dec!(0.25), Selection::Home, dec!(1.95), Decimal::ZERO);
        let result = settle(&req);
        assert_eq!(result.status(), SettlementStatus::HalfWin);
        assert_eq!(result.payout(), Decimal::ZERO);
        assert_eq!(result.net_profit(), Decimal::ZERO);
    }

    #[test]
    fn test_combine_table() {
        use PartOutcome::*;
        assert_eq!(combine_parts(Win, Win), SettlementStatus::Win);
        assert_eq!(combine_parts(Loss, Loss), SettlementStatus::Loss);
        assert_eq!(combine_parts(Push, Push), SettlementStatus::Push);
        assert_eq!(combine_parts(Win, Push), SettlementStatus::HalfWin);
        assert_eq!(combine_parts(Push, Win), SettlementStatus::HalfWin);
        assert_eq!(combine_parts(Loss, Push), SettlementStatus::HalfLoss);
        assert_eq!(combine_parts(Push, Loss), SettlementStatus::HalfLoss);
    }

    #[test]
    #[should_panic(expected = "cannot win and lose together")]
    fn test_combine_rejects_win_and_loss() {
        combine_parts(PartOutcome::Win, PartOutcome::Loss);
    }
}
