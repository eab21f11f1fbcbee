//! End-to-end scenarios and simulation properties

pub mod simulation;
