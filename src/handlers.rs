//! Demo handlers: path echo and header echo.

use axum::http::{header, StatusCode};
use std::collections::BTreeMap;

use crate::routing::Context;

/// Echo the request path: `URL.Path = "/"`.
pub fn index(ctx: &mut Context) {
    let body = format!("URL.Path = {:?}\n", ctx.path());
    ctx.string(StatusCode::OK, body);
}

/// Echo request headers, one `Header["Name"] = ["v1" "v2"]` line per name.
///
/// `Host` is part of the request line, not a header field here.
pub fn hello(ctx: &mut Context) {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in ctx.headers() {
        if *name == header::HOST {
            continue;
        }
        headers
            .entry(canonical_header_name(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let body: String = headers
        .iter()
        .map(|(name, values)| {
            let quoted: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
            format!("Header[{name:?}] = [{}]\n", quoted.join(" "))
        })
        .collect();
    ctx.string(StatusCode::OK, body);
}

/// Title-case a header name for display: `x-test` becomes `X-Test`.
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
