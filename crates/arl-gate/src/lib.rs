//! Argument and authorization gate for the Asset Registry Ledger.
//!
//! Every registry operation passes its flat string arguments through the
//! gate before touching the ledger. The gate checks the exact argument
//! count, sanitizes each value by its declared class, and decides whether a
//! claimed company may act on an entity.
//!
//! # Quick Start
//!
//! ```rust
//! use arl_gate::{check_args, ArgSpec, GateConfig};
//!
//! const CREATE_OWNER: &[ArgSpec] = &[
//!     ArgSpec::required("id"),
//!     ArgSpec::required("username"),
//!     ArgSpec::required("company"),
//! ];
//!
//! let args = vec!["o1".to_string(), "Bob".to_string(), "acme".to_string()];
//! check_args(CREATE_OWNER, &args, &GateConfig::default()).unwrap();
//! ```
//!
//! # Design Rules
//!
//! 1. The count check runs before any per-argument check.
//! 2. Sanitization never rewrites a value; it accepts or rejects.
//! 3. Authorization rules live behind [`Authority`] so the company-match
//!    rule can be replaced by an identity proof without touching callers.

pub mod args;
pub mod authority;
pub mod config;
pub mod error;

pub use args::{check_args, sanitize, ArgClass, ArgSpec, Presence};
pub use authority::{Action, AllowAll, Authority, CompanyMatch};
pub use config::{GateConfig, ALWAYS_FORBIDDEN};
pub use error::GateError;
