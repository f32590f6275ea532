#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic lookup tables shared by the county-rank toolchain.
//!
//! Upstream datasets disagree on how they spell a state: some use the
//! full name ("New York"), others the two-letter postal abbreviation
//! ("NY"). Canonical county identifiers always use the abbreviation.

pub mod states;

pub use states::abbr_for_name;
