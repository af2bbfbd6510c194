//! Shared model for the transfer wizard.
//!
//! Everything in this crate is free of I/O so that both the browser frontend and
//! the native host can use it, and so that the wizard can be exercised in plain
//! `cargo test` runs.

pub mod config;
pub mod error;
pub mod load;
pub mod model;
pub mod requests;
pub mod responses;
pub mod wizard;
