//! Scenario generation for exercising the engine at volume.

pub mod scenarios;
