//! Read-only storage access.
//! Used by: state, handlers.

pub mod sqlite;
