//! combat_sim - Duel simulations over combat_core

pub mod cli;
pub mod simulation;

pub use simulation::DuelSimulation;
