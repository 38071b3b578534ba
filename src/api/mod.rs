//! HTTP handlers and shared response types

pub mod exception;
pub mod health;
pub mod home;

use serde::{Deserialize, Serialize};

/// JSON envelope the console UI switches on.
///
/// Both the guard and the login flow answer with this shape; client code
/// reads `success`, not the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub msg: String,
}

impl ActionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            msg: String::new(),
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
        }
    }
}
