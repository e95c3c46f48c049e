//! Internal support code for the latcrypt ecosystem
//!
//! Nothing in this crate is a stable API; it exists so that the sibling
//! crates can share constant-time helpers without duplicating them.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
