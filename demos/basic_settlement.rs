//! Basic European and Asian settlement example.
//!
//! Settles the same match under both conventions and shows how the
//! handicap line changes who gets paid.

use handicap_engine::explain::{Explainer, RuleExplainer};
use handicap_engine::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  handicap-engine: Basic Settlement Example   ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let score = Score::new(1, 1);

    // --- Scenario 1: European 3-way ---
    println!("━━━ Scenario 1: European (0:0) at 1-1 ━━━\n");

    for (selection, odds) in [
        (Selection::Home, dec!(2.10)),
        (Selection::Draw, dec!(3.00)),
        (Selection::Away, dec!(3.40)),
    ] {
        let bet = BetRequest::new(HandicapType::European, score, HandicapLine::LEVEL, selection)
            .with_odds(odds)
            .with_stake(dec!(100));
        let result = settle(&bet);
        println!(
            "  {:<3} @ {:<5} {:<5} payout {:>8.2}  net {:>8.2}",
            selection.european_code(),
            odds,
            result.status(),
            result.payout(),
            result.net_profit()
        );
    }
    println!();

    // --- Scenario 2: Asian 2-way ---
    println!("━━━ Scenario 2: Asian lines at 1-1 ━━━\n");

    for line in [dec!(-0.5), dec!(0), dec!(0.5)] {
        let bet = BetRequest::new(HandicapType::Asian, score, HandicapLine::new(line), Selection::Home)
            .with_odds(dec!(1.95))
            .with_stake(dec!(100));
        let result = settle(&bet);
        println!(
            "  Home {:>6}  {:<5} payout {:>8.2}",
            bet.line,
            result.status(),
            result.payout()
        );
    }
    println!();

    // --- Scenario 3: Explanation ---
    println!("━━━ Scenario 3: Rule explanation ━━━\n");

    let bet = BetRequest::new(
        HandicapType::European,
        Score::new(2, 1),
        HandicapLine::new(dec!(-1)),
        Selection::Draw,
    )
    .with_odds(dec!(3.60));
    let result = settle(&bet);
    match RuleExplainer.explain(&bet, &result) {
        Ok(text) => println!("  {}", text),
        Err(e) => println!("  (no explanation: {})", e),
    }
}
