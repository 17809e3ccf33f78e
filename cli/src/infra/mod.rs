//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP calls to the control
//! plane, endpoint probing, signal handling, terminal input, and on-disk
//! configuration and credentials.
//!
//! Imports from `crate::domain` and `crate::application` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod console;
pub mod credentials;
pub mod files;
pub mod probe;
pub mod runpod;
pub mod signals;
