#![warn(missing_docs)]

//! Verdant Domain Model
//!
//! Entities, status enums, and the error taxonomy shared by the Verdant
//! disclosure tracking engine. Everything here is plain data: workflow
//! enforcement, derivation, and auditing live in the engine crates.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
