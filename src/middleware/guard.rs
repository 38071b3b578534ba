//! Console action guard
//!
//! The explicit two-phase request filter. The request phase runs its checks
//! in a fixed order: routes carrying the [`AllowAnonymous`] marker skip
//! everything; a model that failed binding or validation answers the
//! console's JSON envelope; a missing login marker redirects to the login
//! page. The response phase (compression) runs on every outcome, including
//! short-circuits.

use crate::api::ActionOutcome;
use crate::cache::{keys, SessionStore};
use crate::error::AppError;
use crate::middleware::compression;
use crate::state::AppContext;
use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// Where unauthenticated requests are sent
pub const LOGIN_REDIRECT: &str = "/Home/login?context=default";

/// Forms are small; cap the buffered request body
const FORM_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Route marker that exempts its handlers from the guard's checks
#[derive(Debug, Clone, Copy)]
pub struct AllowAnonymous;

/// Outcome of the guard's request phase
pub enum Verdict {
    /// Hand the request on to the handler
    Continue,
    /// Short-circuit with this response; the handler never runs
    Respond(Response),
}

/// Guard for routes without a bound model: marker check, then login check.
pub async fn guard<S: AppContext>(
    State(state): State<S>,
    request: Request,
    next: Next,
) -> Response {
    let allow_anonymous = request.extensions().get::<AllowAnonymous>().is_some();
    let accept_encoding = accept_encoding(request.headers());

    match before(&state, allow_anonymous, None).await {
        Verdict::Respond(response) => finish(accept_encoding, response).await,
        Verdict::Continue => finish(accept_encoding, next.run(request).await).await,
    }
}

/// Guard for routes that bind a form model of type `T`.
///
/// The body is buffered so the model can be bound twice: once here for
/// validation, and again by the handler's own extractor.
pub async fn guard_form<S, T>(State(state): State<S>, request: Request, next: Next) -> Response
where
    S: AppContext,
    T: DeserializeOwned + Validate + Send + 'static,
{
    let allow_anonymous = request.extensions().get::<AllowAnonymous>().is_some();
    let accept_encoding = accept_encoding(request.headers());

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, FORM_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let response =
                AppError::BadRequest(format!("failed to read request body: {e}")).into_response();
            return finish(accept_encoding, response).await;
        }
    };

    let rebound = Request::from_parts(parts.clone(), Body::from(bytes.clone()));
    let model_error = match Form::<T>::from_request(rebound, &()).await {
        Ok(Form(model)) => model.validate().err().map(|e| first_error_message(&e)),
        Err(rejection) => Some(rejection.body_text()),
    };

    match before(&state, allow_anonymous, model_error).await {
        Verdict::Respond(response) => finish(accept_encoding, response).await,
        Verdict::Continue => {
            let request = Request::from_parts(parts, Body::from(bytes));
            finish(accept_encoding, next.run(request).await).await
        }
    }
}

/// The request phase: marker, then model state, then login marker.
async fn before<S: AppContext>(
    state: &S,
    allow_anonymous: bool,
    model_error: Option<String>,
) -> Verdict {
    if allow_anonymous {
        return Verdict::Continue;
    }

    if let Some(msg) = model_error {
        return Verdict::Respond(Json(ActionOutcome::fail(msg)).into_response());
    }

    match state.sessions().exists(keys::USER_INFO).await {
        Ok(true) => Verdict::Continue,
        Ok(false) => Verdict::Respond(Redirect::to(LOGIN_REDIRECT).into_response()),
        Err(err) => Verdict::Respond(err.into_response()),
    }
}

/// The response phase, applied to handler responses and short-circuits alike.
async fn finish(accept_encoding: Option<String>, response: Response) -> Response {
    match compression::apply(accept_encoding.as_deref(), response).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

fn accept_encoding(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// The single message surfaced for an invalid model: the first failing
/// field's first non-empty error message, falling back to its error code.
/// Only one error reaches the client even when several fields fail; field
/// order is fixed by name so the choice does not depend on map iteration.
pub fn first_error_message(errors: &ValidationErrors) -> String {
    let by_field = errors.field_errors();
    let mut fields: Vec<_> = by_field.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (_, errors) in fields {
        let message = errors.iter().find_map(|error| {
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .filter(|m| !m.is_empty())
        });
        if let Some(message) = message {
            return message;
        }
        if let Some(error) = errors.first() {
            return error.code.to_string();
        }
    }

    "invalid request".to_string()
}
