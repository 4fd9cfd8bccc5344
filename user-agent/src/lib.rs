// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point.  Re-export everything for both `main.rs` and
// integration tests.

pub mod cli;
pub mod comms;
pub mod config;
pub mod logging;
