//! Parameter constants for the latcrypt ecosystem
//!
//! All numbers in this crate are fixed by the specifications of the
//! respective schemes; nothing here is tunable at runtime.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod pqc;
