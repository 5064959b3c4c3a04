//! # handicap-engine
//!
//! Settlement engine for European and Asian handicap bets.
//!
//! Given a scoreline, a handicap line, a selection, decimal odds and a
//! stake, the engine classifies the bet (win, half win, push, half loss,
//! loss) and computes the payout, splitting quarter lines into two
//! half-stakes on the adjacent lines.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: handicap lines, bet requests, outcomes
//! - **settlement** — The settlement engine and the line-ladder matrix
//! - **explain** — Explainer capability, prompt building, offline rule text
//! - **history** — Caller-owned, capped log of settled bets
//! - **simulation** — Random bet generation

pub mod core;
pub mod explain;
pub mod history;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::bet::{BetRequest, Score};
    pub use crate::core::handicap::{HandicapLine, HandicapType, LineKind, Selection};
    pub use crate::core::outcome::{PartOutcome, PartResult, SettlementResult, SettlementStatus};
    pub use crate::settlement::engine::{settle, SettlementEngine};
    pub use crate::settlement::matrix::SettlementMatrix;
}
