//! Core modules: the path store, the resolver and everything they need.
//!
//! Matching and scoring are pure; only the store and the terminal picker do
//! I/O.

pub mod actions;
pub mod config;
pub mod error;
pub mod guess;
pub mod resolver;
pub mod selector;
pub mod shell;
pub mod similarity;
pub mod store;
pub mod tui;
