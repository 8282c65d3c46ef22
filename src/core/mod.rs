//! Core business logic - framework-agnostic catalog, ledger and session operations.
//!
//! Nothing in here reads stdin or prints; the console layer in `cli` drives
//! these types and turns their errors into messages.

/// Barcoded and loose product price tables
pub mod catalog;
/// Member directory and purchase lists
pub mod ledger;
/// Member purchase session state machine
pub mod session;
/// In-memory shop state and whole-file load/flush
pub mod shop;
/// Printed listings and 1-based positions
pub mod snapshot;
/// Insertion-ordered keyed table
pub mod table;
