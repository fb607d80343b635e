//! `opsdesk` CLI library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod app;
pub mod args;
pub mod commands;
