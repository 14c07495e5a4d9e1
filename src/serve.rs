//! Read-only JSON API over the loaded index.
//!
//! Built on `tiny_http`. Requests are answered from the shared
//! [`IndexStore`]; nothing is written back.
//!
//! | Route                        | Response                              |
//! |------------------------------|---------------------------------------|
//! | `GET /api`                   | site metadata and collection sizes    |
//! | `GET /api/tags`              | tag counts, most used first (cached)  |
//! | `GET /api/tags/{tag}`        | posts with that exact tag             |
//! | `GET /api/search?q={query}`  | matching posts                        |
//! | `GET /api/{segment}`         | one collection, newest first          |
//! | `GET /api/{segment}/{slug}`  | post with its newer and older posts   |
//!
//! `{segment}` is `articles`, `til` or `reflections`. Anything else is a 404
//! with a JSON error body.

use crate::{
    config::{BaseConfig, SiteConfig},
    content::PostKind,
    data::{IndexStore, to_json},
    log,
};
use anyhow::{Context, Result, anyhow};
use serde_json::json;
use std::{
    borrow::Cow,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the query server and block until Ctrl+C is received.
pub fn serve_index(config: &SiteConfig, store: IndexStore) -> Result<()> {
    let interface = config.serve.ip()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    if !config.base.title.is_empty() {
        log!("serve"; "{} by {}", config.base.title, config.base.author);
    }
    log!("serve"; "http://{addr}/api");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &config.base, &store) {
            log!("error"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Status code and JSON body for one request.
#[derive(Debug)]
struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str, path: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message, "path": path }).to_string(),
        }
    }
}

fn handle_request(request: Request, site: &BaseConfig, store: &IndexStore) -> Result<()> {
    let response = match request.method() {
        Method::Get | Method::Head => route(store, site, request.url()),
        _ => ApiResponse::error(405, "method not allowed", request.url()),
    };

    let mut reply = Response::from_string(response.body).with_status_code(response.status);
    if let Ok(header) = Header::from_bytes("Content-Type", JSON_CONTENT_TYPE) {
        reply.add_header(header);
    }

    request.respond(reply)?;
    Ok(())
}

/// Resolve a request URL (path plus optional query string) to a response.
fn route(store: &IndexStore, site: &BaseConfig, url: &str) -> ApiResponse {
    let (path, query_string) = url.split_once('?').unwrap_or((url, ""));

    // Decode each segment on its own so an encoded `/` stays inside a tag
    let segments: Vec<Cow<'_, str>> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode)
        .collect();
    let segments: Vec<&str> = segments.iter().map(|segment| &**segment).collect();

    let query = store.query();
    match segments.as_slice() {
        ["api"] => ApiResponse::ok(site_document(site, store)),
        ["api", "tags"] => ApiResponse::ok(store.tags_to_json()),
        ["api", "tags", tag] => ApiResponse::ok(to_json(&query.posts_by_tag(tag), "[]")),
        ["api", "search"] => {
            let needle = query_param(query_string, "q").unwrap_or_default();
            ApiResponse::ok(to_json(&query.search_posts(&needle), "[]"))
        }
        ["api", segment] => match PostKind::from_segment(segment) {
            Some(kind) => ApiResponse::ok(to_json(&query.list(kind), "[]")),
            None => ApiResponse::error(404, "not found", path),
        },
        ["api", segment, slug] => match PostKind::from_segment(segment)
            .and_then(|kind| query.neighbors(kind, slug))
        {
            Some(neighbors) => ApiResponse::ok(to_json(&neighbors, "{}")),
            None => ApiResponse::error(404, "post not found", path),
        },
        _ => ApiResponse::error(404, "not found", path),
    }
}

/// Site metadata with the size of every collection.
fn site_document(site: &BaseConfig, store: &IndexStore) -> String {
    let registry = store.query().registry();
    let posts: serde_json::Map<String, serde_json::Value> = PostKind::UNION_ORDER
        .iter()
        .map(|&kind| (kind.segment().to_owned(), registry.collection(kind).len().into()))
        .collect();

    to_json(
        &json!({
            "title": site.title,
            "description": site.description,
            "author": site.author,
            "url": site.url,
            "language": site.language,
            "posts": posts,
            "misc": registry.misc().len(),
            "tags": store.query().all_tags().len(),
        }),
        "{}",
    )
}

/// Percent-decode, falling back to the raw text on invalid UTF-8.
fn decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// First value of `key` in a form-encoded query string (`+` means space).
fn query_param(query_string: &str, key: &str) -> Option<String> {
    query_string
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(name, _)| decode(name) == key)
        .map(|(_, value)| decode(&value.replace('+', " ")).into_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{ContentRegistry, record},
        query::PostQuery,
    };
    use serde_json::Value;

    fn store() -> IndexStore {
        let registry = ContentRegistry::from_records(
            vec![
                record("1", "2025-01-07T09:00:00", &["spring", "AOP"], "sprout1"),
                record("2", "2025-01-14T09:00:00", &["spring"], "sprout2"),
                record("3", "2025-01-21T09:00:00", &["spring"], "sprout3"),
            ],
            vec![record("1", "2025-03-02T21:00:00", &["rust", "C/C++"], "memory-rust")],
            vec![record("1", "2024-12-31", &["회고"], "2024-retro")],
        )
        .unwrap();
        IndexStore::new(PostQuery::new(registry))
    }

    fn site() -> BaseConfig {
        BaseConfig {
            title: "cassidycodes".into(),
            author: "Cassidy".into(),
            url: Some("https://cassidycodes.vercel.app".into()),
            ..BaseConfig::default()
        }
    }

    fn get(store: &IndexStore, url: &str) -> (u16, Value) {
        let response = route(store, &site(), url);
        (response.status, serde_json::from_str(&response.body).unwrap())
    }

    #[test]
    fn test_route_site_document() {
        let (status, body) = get(&store(), "/api");

        assert_eq!(status, 200);
        assert_eq!(body["title"], "cassidycodes");
        assert_eq!(body["author"], "Cassidy");
        assert_eq!(body["language"], "ko-KR");
        assert_eq!(body["posts"]["articles"], 3);
        assert_eq!(body["posts"]["til"], 1);
        assert_eq!(body["posts"]["reflections"], 1);
        assert_eq!(body["misc"], 0);
        assert_eq!(body["tags"], 5);
    }

    #[test]
    fn test_route_tags() {
        let store = store();
        let (status, body) = get(&store, "/api/tags");

        assert_eq!(status, 200);
        assert_eq!(body[0]["name"], "spring");
        assert_eq!(body[0]["count"], 3);
    }

    #[test]
    fn test_route_tag_percent_decoded() {
        let store = store();

        let (status, body) = get(&store, "/api/tags/%ED%9A%8C%EA%B3%A0");
        assert_eq!(status, 200);
        assert_eq!(body[0]["slug"], "2024-retro");

        let (_, body) = get(&store, "/api/tags/C%2FC%2B%2B");
        assert_eq!(body[0]["slug"], "memory-rust");
    }

    #[test]
    fn test_route_tag_is_case_sensitive() {
        let (status, body) = get(&store(), "/api/tags/aop");
        assert_eq!(status, 200);
        assert_eq!(body, json!([]));
    }

    #[test]
    fn test_route_search() {
        let store = store();

        let (_, body) = get(&store, "/api/search?q=SPRING");
        let slugs: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|post| post["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, ["sprout3", "sprout2", "sprout1"]);

        let (_, body) = get(&store, "/api/search?q=++");
        assert_eq!(body, json!([]));

        let (_, body) = get(&store, "/api/search");
        assert_eq!(body, json!([]));
    }

    #[test]
    fn test_route_list() {
        let (status, body) = get(&store(), "/api/articles/");
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["slug"], "sprout3");
        assert_eq!(body[0]["type"], "article");
    }

    #[test]
    fn test_route_post_with_neighbors() {
        let (status, body) = get(&store(), "/api/articles/sprout2");
        assert_eq!(status, 200);
        assert_eq!(body["post"]["slug"], "sprout2");
        assert_eq!(body["newer"]["slug"], "sprout3");
        assert_eq!(body["older"]["slug"], "sprout1");

        let (_, body) = get(&store(), "/api/til/memory-rust");
        assert_eq!(body["newer"], Value::Null);
        assert_eq!(body["older"], Value::Null);
    }

    #[test]
    fn test_route_not_found() {
        let store = store();

        for url in ["/", "/apis", "/api/projects", "/api/til/missing", "/api/a/b/c"] {
            let (status, body) = get(&store, url);
            assert_eq!(status, 404, "{url}");
            assert!(body["error"].is_string());
        }
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("q=code+rabbit", "q"), Some("code rabbit".into()));
        assert_eq!(query_param("page=2&q=%EB%A6%AC%EB%B7%B0", "q"), Some("리뷰".into()));
        assert_eq!(query_param("q", "q"), Some(String::new()));
        assert_eq!(query_param("", "q"), None);
        assert_eq!(query_param("query=x", "q"), None);
    }

    #[test]
    fn test_try_bind_port_retries() {
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();
        let (first, first_addr) = try_bind_port(localhost, 0, 1).unwrap();
        let taken = first
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(first_addr.port());

        let (_second, addr) = try_bind_port(localhost, taken, 5).unwrap();
        assert_ne!(addr.port(), taken);
    }
}
