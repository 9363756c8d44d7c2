//! Core infrastructure
//!
//! Pieces every driver path depends on: logging and the restartable delay.

pub mod delay;
pub mod logging;

pub use delay::delay;
