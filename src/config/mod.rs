//! Configuration management for loom
//!
//! loom reads a single optional TOML file describing where Klang releases are
//! published and how long network operations may take. See [`global`] for the
//! file format and lookup order.

pub mod global;

pub use global::{GlobalConfig, NetworkConfig, ReleaseConfig, ReleaseSelection};
