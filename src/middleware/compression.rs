//! Response compression for successful responses
//!
//! Runs as the guard's response phase. Only 200 responses with a non-empty
//! `Accept-Encoding` are touched: any stale `Content-Encoding` left by an
//! upstream handler is stripped first, then the body is recompressed with
//! gzip when the client accepts it, deflate (zlib-wrapped) otherwise.
//! Responses here are always fully buffered, so the swap happens before any
//! byte reaches the network.

use crate::error::{AppError, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::Write;

/// Content coding applied to a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coding {
    Gzip,
    Deflate,
}

impl Coding {
    fn header_value(self) -> HeaderValue {
        match self {
            Coding::Gzip => HeaderValue::from_static("gzip"),
            Coding::Deflate => HeaderValue::from_static("deflate"),
        }
    }
}

/// Pick the coding for an `Accept-Encoding` value. gzip wins over deflate
/// regardless of listed order; unknown codings get none.
pub fn negotiate(accept_encoding: &str) -> Option<Coding> {
    let lowered = accept_encoding.to_ascii_lowercase();
    if lowered.contains("gzip") {
        Some(Coding::Gzip)
    } else if lowered.contains("deflate") {
        Some(Coding::Deflate)
    } else {
        None
    }
}

fn compress(coding: Coding, bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    match coding {
        Coding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(bytes)?;
            encoder.finish()
        }
        Coding::Deflate => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(bytes)?;
            encoder.finish()
        }
    }
}

/// Apply the response phase to a finished response.
pub async fn apply(accept_encoding: Option<&str>, response: Response) -> Result<Response> {
    if response.status() != StatusCode::OK {
        return Ok(response);
    }

    let accept = match accept_encoding {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(response),
    };

    let (mut parts, body) = response.into_parts();
    parts.headers.remove(header::CONTENT_ENCODING);

    let Some(coding) = negotiate(accept) else {
        return Ok(Response::from_parts(parts, body));
    };

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to buffer response body: {}", e)))?;
    let compressed = compress(coding, &bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to compress response: {}", e)))?;

    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_ENCODING, coding.header_value());

    Ok(Response::from_parts(parts, Body::from(compressed)))
}
