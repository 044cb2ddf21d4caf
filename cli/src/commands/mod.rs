//! Command implementations

pub mod launch;
pub mod version;
