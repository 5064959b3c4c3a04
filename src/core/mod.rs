//! Foundational types: handicap lines, bet requests and settlement outcomes.

pub mod bet;
pub mod handicap;
pub mod outcome;
