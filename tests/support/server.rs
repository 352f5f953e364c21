//! Stub Connect server for CLI tests.
//!
//! Serves the REST routes envop uses from a [`Memory`] store through
//! `tiny_http` on a local port. Every request line is recorded so tests can
//! check what envop sent, or that it sent nothing.

use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use envop::core::domain::ItemCreateParams;
use envop::core::store::{ItemStore, Memory};
use envop::error::{Error, RemoteError};
use envop::Item;
use serde_json::json;
use tiny_http::{Header, Response};

/// A running stub server.
pub struct Server {
    url: String,
    store: Arc<Mutex<Memory>>,
    requests: Arc<Mutex<Vec<String>>>,
}

struct Request {
    method: String,
    path: String,
    query: Option<String>,
    body: String,
}

struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            body: value.to_string(),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "status": status, "message": message }))
    }
}

impl Server {
    /// Start serving `store` on a free local port, accepting `token`.
    pub fn start(store: Memory, token: &str) -> Self {
        let http = tiny_http::Server::http("127.0.0.1:0").expect("failed to bind stub server");
        let addr = http
            .server_addr()
            .to_ip()
            .expect("stub server should listen on tcp");
        let url = format!("http://{}", addr);
        let store = Arc::new(Mutex::new(store));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let bearer = format!("Bearer {}", token);
        let shared_store = Arc::clone(&store);
        let shared_requests = Arc::clone(&requests);
        thread::spawn(move || {
            for request in http.incoming_requests() {
                serve(request, &bearer, &shared_store, &shared_requests);
            }
        });

        Self {
            url,
            store,
            requests,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:40123`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The backing store.
    pub fn store(&self) -> MutexGuard<'_, Memory> {
        self.store.lock().unwrap()
    }

    /// Request lines received so far, e.g. `PUT /v1/vaults/v/items/i`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests with the given method.
    pub fn count(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.starts_with(&format!("{} ", method)))
            .count()
    }
}

fn serve(
    mut incoming: tiny_http::Request,
    bearer: &str,
    store: &Mutex<Memory>,
    requests: &Mutex<Vec<String>>,
) {
    let authorized = incoming
        .headers()
        .iter()
        .any(|h| h.field.equiv("Authorization") && h.value.as_str() == bearer);

    let mut body = String::new();
    if incoming.as_reader().read_to_string(&mut body).is_err() {
        body.clear();
    }

    let (path, query) = match incoming.url().split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (incoming.url().to_string(), None),
    };
    let request = Request {
        method: incoming.method().as_str().to_string(),
        path,
        query,
        body,
    };
    requests
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method, request.path));

    let reply = if authorized {
        route(&request, &store.lock().unwrap())
    } else {
        Reply::error(401, "invalid bearer token")
    };

    let content_type =
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).expect("valid header");
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(content_type);
    let _ = incoming.respond(response);
}

fn route(request: &Request, store: &Memory) -> Reply {
    let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["v1", "vaults"]) => {
            let title = request
                .query
                .as_deref()
                .and_then(filter_title)
                .unwrap_or_default();
            match store.find_vault_by_title(&title) {
                Ok(vault) => Reply::json(200, json!([vault])),
                Err(_) => Reply::json(200, json!([])),
            }
        }
        ("GET", ["v1", "vaults", vault, "items"]) => reply_with(store.list_items(vault)),
        ("GET", ["v1", "vaults", vault, "items", item]) => reply_with(store.get_item(vault, item)),
        ("POST", ["v1", "vaults", _, "items"]) => match serde_json::from_str::<Item>(&request.body) {
            Ok(item) => reply_with(store.create_item(&ItemCreateParams::from(item))),
            Err(e) => Reply::error(400, &e.to_string()),
        },
        ("PUT", ["v1", "vaults", _, "items", _]) => match serde_json::from_str::<Item>(&request.body) {
            Ok(item) => reply_with(store.replace_item(&item)),
            Err(e) => Reply::error(400, &e.to_string()),
        },
        ("DELETE", ["v1", "vaults", vault, "items", item]) => match store.delete_item(vault, item) {
            Ok(()) => Reply {
                status: 204,
                body: String::new(),
            },
            Err(e) => failure(e),
        },
        _ => Reply::error(404, "no such route"),
    }
}

fn reply_with<T: serde::Serialize>(result: envop::Result<T>) -> Reply {
    match result {
        Ok(value) => Reply::json(200, serde_json::to_value(value).unwrap()),
        Err(e) => failure(e),
    }
}

fn failure(e: Error) -> Reply {
    match e {
        Error::NotFound(_) => Reply::error(404, &e.to_string()),
        Error::Remote(RemoteError::Write { status, message, .. }) => Reply::error(status, &message),
        other => Reply::error(500, &other.to_string()),
    }
}

/// Pull the title out of `filter=title eq "<title>"`.
fn filter_title(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes()).find_map(|(key, value)| {
        if key != "filter" {
            return None;
        }
        let title = value.strip_prefix("title eq ")?;
        Some(title.trim_matches('"').to_string())
    })
}
