//! Workspace umbrella crate. Re-exports [`sitescope_core`] so downstream
//! code can depend on a single package.
pub use sitescope_core::*;
