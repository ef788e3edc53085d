//! Heuristic SQL query advice: a small library of regex-driven scans over
//! raw query text, plus the HTTP service and CLI that surface them.
//!
//! There is no parser and no cost model. Every verdict is a textual pattern
//! match returning fixed advice strings scaled by match counts.

#![warn(missing_docs)]

pub mod analysis;
pub mod error;
pub mod model;
pub mod server;
