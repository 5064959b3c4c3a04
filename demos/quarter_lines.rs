//! Quarter-line settlement example.
//!
//! Walks a goalless draw across the quarter lines around level and
//! prints how the stake is split and settled on each half.

use handicap_engine::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  handicap-engine: Quarter Lines Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let score = Score::new(0, 0);

    for line in [dec!(-0.75), dec!(-0.25), dec!(0.25), dec!(0.75)] {
        let bet = BetRequest::new(HandicapType::Asian, score, HandicapLine::new(line), Selection::Home)
            .with_odds(dec!(2.00))
            .with_stake(dec!(100));
        let result = settle(&bet);

        println!("━━━ Home {} at {} ━━━", bet.line, score);
        println!("{}", result);
    }

    // The full ladder at this score
    let matrix = SettlementMatrix::build(HandicapType::Asian, score, dec!(1.95), dec!(100));
    println!("{}", matrix);
}
