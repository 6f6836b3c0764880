//! Backend URL derivation for exported documents

use serde_json::Value;

use super::{Dialect, OpenApiDocument};

/// Derive the backend URL an exported API is served from.
///
/// OpenAPI 3 exports carry it in `servers[0]` with a `{basePath}` variable
/// holding the stage; Swagger 2 exports split it over `schemes`, `host` and
/// `basePath`. Returns `None` when the document names no server.
pub fn production_url(doc: &OpenApiDocument) -> Option<String> {
    match doc.dialect() {
        Dialect::OpenApi3 => server_url(doc.raw()),
        Dialect::Swagger2 => host_url(doc.raw()),
    }
}

fn server_url(raw: &Value) -> Option<String> {
    let server = raw.get("servers")?.as_array()?.first()?;
    let mut url = server.get("url")?.as_str()?.to_string();

    if let Some(variables) = server.get("variables").and_then(Value::as_object) {
        for (name, variable) in variables {
            let Some(default) = variable.get("default").and_then(Value::as_str) else {
                continue;
            };
            let placeholder = format!("{{{name}}}");
            let slashed = format!("/{placeholder}");
            // "/{basePath}" with default "/Demo" must not produce "//Demo"
            if default.starts_with('/') && url.contains(&slashed) {
                url = url.replace(&slashed, default);
            } else {
                url = url.replace(&placeholder, default);
            }
        }
    }

    Some(url)
}

fn host_url(raw: &Value) -> Option<String> {
    let host = raw.get("host")?.as_str()?;
    let scheme = raw
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .and_then(Value::as_str)
        .unwrap_or("https");
    let base_path = raw.get("basePath").and_then(Value::as_str).unwrap_or("");

    Some(format!("{scheme}://{host}{base_path}"))
}
