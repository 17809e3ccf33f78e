//! Command implementations

pub mod balance;
pub mod config;
pub mod launch;
pub mod terminate;
pub mod version;
