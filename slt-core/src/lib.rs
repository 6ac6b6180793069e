#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the slt-core crate.
//! [slt_core]: https://docs.rs/slt_core/latest/slt_core/index.html
//! [slt_sqlite]: https://docs.rs/slt_sqlite/latest/slt_sqlite/index.html
//! [slt_axum]: https://docs.rs/slt_axum/latest/slt_axum/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the shelf-life tracker.
///
/// This module contains the product entity, the urgency buckets, and the
/// classifier that turns a catalog snapshot into classified records, bucket
/// counts and warning messages.
///
/// Everything in here is pure: no I/O, no clocks, no global state. The
/// reference date is always supplied by the caller.
pub mod models;

/// Interface traits for the shelf-life tracker.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (such as databases or HTTP servers) without specifying implementation details.
pub mod ports;
