//! Core allocation engine
//!
//! The engine is synchronous and single-threaded: one [`arena::Arena`] owns
//! the segment table, and every operation runs to completion before
//! returning. Front-ends (shell, benchmark runner) only call the public
//! operations exposed here.

pub mod arena;
pub mod error;
pub mod harness;
pub mod render;
pub mod segment;
pub mod stats;
pub mod strategy;
