//! CLI subcommand implementations

pub mod health;
pub mod inspect;
pub mod predict;
