//! This module defines the domain data types.

pub use transaction::{NewTransaction, Transaction};

mod transaction;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
