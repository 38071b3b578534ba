//! HTTP middleware for the gateway console
//!
//! This module provides the console's cross-cutting request handling:
//! - the action guard (anonymous marker, model validation, login check)
//! - response compression for successful responses

pub mod compression;
pub mod guard;

pub use compression::Coding;
pub use guard::{guard, guard_form, AllowAnonymous, Verdict};
