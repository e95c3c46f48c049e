//! Key Encapsulation Mechanisms for the latcrypt library
//!
//! The only scheme currently implemented is ML-KEM (FIPS 203), the
//! module-lattice KEM standardized by NIST, in its three parameter sets
//! ML-KEM-512, ML-KEM-768 and ML-KEM-1024.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod mlkem;

pub use error::{Error, Result};
