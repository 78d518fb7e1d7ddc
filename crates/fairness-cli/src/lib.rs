//! Library components of the `fairness-audit` command line tool.

pub mod config;
pub mod logging;
pub mod report;
