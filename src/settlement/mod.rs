//! Bet settlement: the engine and the line-ladder matrix built on it.

pub mod engine;
pub mod matrix;
