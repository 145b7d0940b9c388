//! # Microscope Bench
//!
//! Benchmarking utilities for Microscope performance testing.

pub mod corpus;
