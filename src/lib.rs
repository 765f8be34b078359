//! Shared plumbing for the daily solvers: command line and input handling,
//! logging setup, and a small 2-D grid.

pub mod grid;
pub mod support;

pub use support::Result;
