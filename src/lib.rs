//! Turns Tower of Hanoi benchmark results (move counts and run times per
//! disk count) into PNG charts.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod render;
