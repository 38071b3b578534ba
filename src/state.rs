//! Application state trait for dependency injection
//!
//! Handlers and the guard work against this trait, so the same code serves
//! the production `AppState` and in-memory test states.

use crate::cache::SessionStore;
use crate::config::Config;
use crate::repository::ExceptionRepository;
use crate::views::ViewEngine;

/// Trait for application state that provides access to the console's
/// collaborators.
pub trait AppContext: Clone + Send + Sync + 'static {
    /// The session store type
    type Sessions: SessionStore;
    /// The exception repository type
    type Exceptions: ExceptionRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the session store backing the login check
    fn sessions(&self) -> &Self::Sessions;

    /// Get the exception repository
    fn exceptions(&self) -> &Self::Exceptions;

    /// Get the view engine
    fn views(&self) -> &ViewEngine;

    /// Check if the system is ready (database and cache are healthy)
    /// Returns (db_ok, cache_ok) tuple
    fn check_ready(&self) -> impl std::future::Future<Output = (bool, bool)> + Send;
}
