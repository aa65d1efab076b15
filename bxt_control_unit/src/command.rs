//! Operator command intake.

pub mod queue;
