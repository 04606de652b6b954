//! Provides definitions of objects from the IEC 61131-3 declaration
//! elements along with the diagnostics used to report resolution
//! problems.

pub mod common;
pub mod core;
pub mod diagnostic;
pub mod time;
