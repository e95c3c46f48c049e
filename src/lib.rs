//! # latcrypt
//!
//! A modular lattice-based cryptography library built around ML-KEM
//! (FIPS 203, formerly CRYSTALS-Kyber).
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! latcrypt = "0.1"
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - `latcrypt-api`: Trait definitions, error types, common types
//! - `latcrypt-params`: Parameter sets for the supported schemes
//! - `latcrypt-internal`: Constant-time building blocks
//! - `latcrypt-kem`: The ML-KEM key encapsulation mechanism

#![cfg_attr(not(feature = "std"), no_std)]

pub use latcrypt_api as api;
pub use latcrypt_internal as internal;
pub use latcrypt_kem as kem;
pub use latcrypt_params as params;

/// Common imports for latcrypt users
pub mod prelude {
    pub use latcrypt_api::{Kem, Serialize, SerializeSecret};
    pub use latcrypt_kem::mlkem::{MlKem1024, MlKem512, MlKem768, MlKemAlgorithm};
}
