//! Console login and logout handlers
//!
//! The guard redirects unauthenticated requests here. Login answers the
//! same JSON envelope the guard uses, so the login form's client code has
//! one shape to handle.

use crate::api::ActionOutcome;
use crate::cache::SessionStore;
use crate::domain::exception::LoginInput;
use crate::error::Result;
use crate::middleware::guard::{first_error_message, LOGIN_REDIRECT};
use crate::state::AppContext;
use crate::views;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// Query parameters the guard's redirect carries
#[derive(Debug, Default, Deserialize)]
pub struct LoginContext {
    #[serde(default)]
    pub context: Option<String>,
}

/// Render the login page
pub async fn login_page<S: AppContext>(
    State(state): State<S>,
    Query(params): Query<LoginContext>,
) -> Result<Html<String>> {
    let html = state
        .views()
        .render(views::LOGIN, json!({ "context": params.context }))?;
    Ok(Html(html))
}

/// Check credentials and mark the console session
pub async fn login<S: AppContext>(
    State(state): State<S>,
    Form(input): Form<LoginInput>,
) -> Result<Json<ActionOutcome>> {
    if let Err(errors) = input.validate() {
        return Ok(Json(ActionOutcome::fail(first_error_message(&errors))));
    }

    let admin = &state.config().admin;
    if input.user_name != admin.user || input.password != admin.password {
        return Ok(Json(ActionOutcome::fail("invalid user name or password")));
    }

    state
        .sessions()
        .mark_login(&input.user_name, state.config().session.ttl_secs)
        .await?;

    Ok(Json(ActionOutcome::ok()))
}

/// Clear the console session and return to the login page
pub async fn logout<S: AppContext>(State(state): State<S>) -> Result<Redirect> {
    state.sessions().clear_login().await?;
    Ok(Redirect::to(LOGIN_REDIRECT))
}
