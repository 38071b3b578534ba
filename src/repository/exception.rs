//! Exception log repository

use crate::domain::exception::ExceptionLog;
use crate::error::Result;
use crate::repository::page::{query_page, Page, PageResult};
use async_trait::async_trait;
use sqlx::MySqlPool;

/// Table the gateway writes exception rows into
const TABLE: &str = "api_exception";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExceptionRepository: Send + Sync {
    /// One page of exception rows, optionally filtered by key substring
    async fn page(&self, key: Option<String>, page: Page) -> Result<PageResult<ExceptionLog>>;
}

pub struct ExceptionRepositoryImpl {
    pool: MySqlPool,
}

impl ExceptionRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExceptionRepository for ExceptionRepositoryImpl {
    async fn page(&self, key: Option<String>, page: Page) -> Result<PageResult<ExceptionLog>> {
        query_page(&self.pool, TABLE, key.as_deref(), page).await
    }
}
