//! Composer version derivation engine
//!
//! Maps git tag and branch names to Composer version strings and their
//! normalized, sortable form.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Derive    │────▶│ Normalizer  │────▶│   Branch    │
//! │ (tag/branch)│     │  (grammar)  │     │ (wildcards) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Stability  │     │    Alias    │
//!                     │ (modifiers) │     │  (prefix)   │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`derive`]: Display and normalized version of a tag or branch
//! - [`normalizer`]: The Composer version grammar
//! - [`branch`]: Branch name normalization and wildcard expansion
//! - [`stability`]: Stability modifier parsing and shorthand expansion
//! - [`alias`]: Numeric prefix of dev branch aliases
//! - [`patterns`]: Compiled grammar patterns and sentinel values
//! - [`error`]: Error type for unrecognized versions

pub mod alias;
pub mod branch;
pub mod derive;
pub mod error;
pub mod normalizer;
pub mod patterns;
pub mod stability;

pub use alias::parse_numeric_alias_prefix;
pub use branch::normalize_branch;
pub use derive::{DeriveOptions, DerivedVersion, derive_version};
pub use error::{AliasHint, VersionError};
pub use normalizer::normalise_version;
pub use patterns::{MASTER_ALIAS, WILDCARD_NUMERAL};
pub use stability::{Modifier, expand_stability};
