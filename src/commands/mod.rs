//! CLI command implementations

pub mod range;
pub mod run;
