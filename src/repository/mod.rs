//! Data access layer (Repository pattern)

pub mod exception;
pub mod page;

pub use exception::ExceptionRepository;
pub use page::{Page, PageResult};
