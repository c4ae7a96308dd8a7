// crates/veris-cli/src/commands/mod.rs

pub mod claim;
pub mod export;
pub mod get;
pub mod map;
pub mod query;
pub mod stats;
