// crates/apiforge-config/src/lib.rs
// ============================================================================
// Module: Config Library
// Description: Canonical config model, validation, and example rendering.
// Purpose: Single source of truth for apiforge.toml semantics.
// Dependencies: apiforge-sdk-gen, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `apiforge-config` defines the `apiforge.toml` model. Loading is strict and
//! fail-closed: size, encoding, and path limits are enforced before parsing,
//! and every section is validated after. A missing default file is the one
//! lenient case and yields the built-in defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
