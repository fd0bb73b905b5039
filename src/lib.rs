//! # poker_profile_gen
//!
//! Generates OpenHoldem bot profiles: plain-text rule documents, one per
//! street, built from a flat mapping of strategy dials.
//!
//! ## How it works
//!
//! 1. Build a [`Settings`] mapping, either in code or from a JSON file. Any
//!    key left out resolves to its documented default.
//! 2. Call [`generate_street`] (or one of the per-street shortcuts) to render
//!    one street's document, or [`generate_full_profile`] for all four.
//! 3. Each percentage dial becomes a `handrank169` threshold (see
//!    [`threshold`]) embedded in `WHEN <condition> <action> FORCE` rules,
//!    grouped into `##name##` blocks that always end in `WHEN Others`.
//!
//! Generation is pure: the same settings always produce byte-identical text.
//! A value of the wrong kind fails with [`ProfileError::InvalidValue`] naming
//! the offending key.
//!
//! ## Quick start
//!
//! ```rust
//! use poker_profile_gen::{generate_flop, generate_full_profile, Settings};
//!
//! let settings = Settings::new().with("aggression", 60).with("ip_cbet_freq", 75);
//!
//! let flop = generate_flop(&settings).unwrap();
//! assert!(flop.contains("##f$flop##"));
//!
//! let profile = generate_full_profile(&settings).unwrap();
//! assert!(profile.starts_with("//****"));
//! ```

pub mod cli;
pub mod error;
pub mod profile_engine;

pub use error::{ProfileError, Result};
pub use profile_engine::{
    build_street, generate_flop, generate_full_profile, generate_preflop, generate_river,
    generate_street, generate_turn, scale_threshold, threshold, Settings, Street,
};

#[cfg(test)]
mod tests;
