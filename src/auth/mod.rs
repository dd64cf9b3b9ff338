//! Authentication module
//!
//! Builds the `Cookie` header for the market endpoint from a validated
//! `AuthContext`, and persists those cookies between runs.
//!
//! # Overview
//!
//! - `AuthContext` - required session cookies plus optional extensions
//! - `AuthContextBuilder` - validates fields once at construction
//! - `CredentialStore` - JSON file persistence with boolean results

mod store;
mod types;

pub use store::CredentialStore;
pub use types::{env, keys, AuthContext, AuthContextBuilder, MachineAuth};
