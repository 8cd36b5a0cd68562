//! Belaymatch server
//!
//! HTTP API for matching climbers with belayers. Users own at most one
//! climber profile and one belayer profile; every list endpoint accepts
//! comma-separated filter values (OR within a field, AND across fields).

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod utils;
