//! Accept-header negotiation.
//!
//! The fallback and 404 responses are HTML documents; they are only offered
//! to clients whose Accept header admits one. No Accept header counts as
//! accepting anything, matching the permissive content-negotiation the
//! build-time ecosystem uses.

use axum::http::{header, HeaderMap};

/// Whether the client indicated it accepts an HTML response.
pub fn accepts_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT) else {
        return true;
    };
    let Ok(accept) = accept.to_str() else {
        return false;
    };

    accept.split(',').any(|range| {
        let media_type = range.split(';').next().unwrap_or("").trim();
        matches!(media_type, "text/html" | "text/*" | "*/*")
    })
}
