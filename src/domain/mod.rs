//! Domain models for the gateway console

pub mod exception;
pub mod log;

pub use exception::*;
pub use log::*;
