//! Screen view models: the state behind each page and the snapshots it
//! renders from.

pub mod admin;
pub mod browse;
pub mod detail;
