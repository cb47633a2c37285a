//! Composer versions from git references
//!
//! - [`version`]: Tag/branch to Composer version derivation and normalization
//! - [`sync`]: Batch derivation over the references of a repository
//! - [`manifest`]: composer.json stamping
//! - [`config`]: Configuration file and data directory
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod logging;
pub mod manifest;
pub mod sync;
pub mod version;
