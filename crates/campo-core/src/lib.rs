//! # campo-core — Validation Engine for the Campo Registry
//!
//! This crate holds the only real algorithms of the registry: Brazilian
//! taxpayer identifier handling (CPF for individuals, CNPJ for
//! organizations) and the land-area invariant of a farm record. Every other
//! crate in the workspace depends on `campo-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Total boolean surface.** [`validate_individual`],
//!    [`validate_organization`], [`validate_identifier`],
//!    [`format_identifier`] and [`areas_consistent`] never panic and never
//!    return an error. Malformed input is just `false` (or passed through,
//!    for the formatter).
//!
//! 2. **Diagnostics on request.** The `check_*` functions return
//!    [`ValidationError`] describing the first rule that failed. The boolean
//!    functions are defined as `check_*(..).is_ok()`, so both surfaces agree
//!    by construction.
//!
//! 3. **Length is the only discriminator.** [`IdentifierKind`] is decided by
//!    the normalized digit count, before any checksum runs.
//!
//! 4. **Validated newtype at the boundary.** [`TaxId`] can only hold a
//!    checksum-valid identifier in canonical digit form, including when it
//!    arrives through `Deserialize`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `campo-*` crates (this is the leaf of the DAG).
//! - No I/O, no logging, no shared state. Every function is pure.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod area;
pub mod checksum;
pub mod digits;
pub mod error;
pub mod identifier;

// Re-export primary types for ergonomic imports.
pub use area::{areas_consistent, AreaField, AreaTriple};
pub use checksum::{
    check_digit, check_individual, check_organization, validate_individual,
    validate_organization,
};
pub use digits::normalize;
pub use error::ValidationError;
pub use identifier::{
    check_identifier, format_identifier, validate_identifier, IdentifierKind, TaxId,
};
