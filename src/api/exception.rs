//! Exception log screen handlers

use crate::domain::exception::PageQuery;
use crate::error::Result;
use crate::repository::exception::ExceptionRepository;
use crate::repository::page::Page;
use crate::state::AppContext;
use crate::views;
use axum::{extract::State, response::Html, Form};
use serde_json::json;

/// Render the exception log page shell with a default query
pub async fn index<S: AppContext>(State(state): State<S>) -> Result<Html<String>> {
    let html = state
        .views()
        .render(views::EXCEPTION_INDEX, json!({ "query": PageQuery::default() }))?;
    Ok(Html(html))
}

/// Render one page of exception rows as the list partial
pub async fn list<S: AppContext>(
    State(state): State<S>,
    Form(input): Form<PageQuery>,
) -> Result<Html<String>> {
    let page = Page::new(input.page_size, input.page_id);
    let key = input.key_filter().map(str::to_string);
    let result = state.exceptions().page(key, page).await?;

    let html = state
        .views()
        .render(views::EXCEPTION_LIST, json!({ "page": result }))?;
    Ok(Html(html))
}
