//! HTTP item store speaking the Connect server REST API.
//!
//! Blocking requests via `ureq`; one round trip per trait call.

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body};
use zeroize::Zeroizing;

use super::ItemStore;
use crate::core::domain::{Item, ItemCreateParams, ItemSummary, Vault};
use crate::error::{NotFoundError, RemoteError, Result};

/// Item store backed by a Connect server.
pub struct Connect {
    agent: Agent,
    host: String,
    token: Zeroizing<String>,
}

impl std::fmt::Debug for Connect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connect")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Request methods that carry a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Post,
    Put,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// Status and body of a finished request.
struct Reply {
    url: String,
    status: u16,
    body: String,
}

impl Reply {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| RemoteError::Decode(format!("{}: {}", self.url, e)).into())
    }

    /// The server's error message, or the raw body if it is not JSON.
    fn message(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| self.body.trim().to_string())
    }

    fn read_error(&self) -> RemoteError {
        RemoteError::Read {
            url: self.url.clone(),
            status: self.status,
            message: self.message(),
        }
    }

    fn write_error(&self, operation: &'static str) -> RemoteError {
        RemoteError::Write {
            operation,
            status: self.status,
            message: self.message(),
        }
    }
}

impl Connect {
    /// Create a client for the server at `host` (e.g. `http://localhost:8080`).
    pub fn new(host: &str, token: Zeroizing<String>) -> Self {
        let config = Agent::config_builder().http_status_as_error(false).build();

        Self {
            agent: config.into(),
            host: host.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Server base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.host, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_str())
    }

    fn finish(url: String, response: std::result::Result<Response<Body>, ureq::Error>) -> Result<Reply> {
        let mut response = response.map_err(|e| RemoteError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RemoteError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        debug!(url = %url, status, "store replied");
        Ok(Reply { url, status, body })
    }

    fn get(&self, path: &str, query: Option<(&str, &str)>) -> Result<Reply> {
        let url = self.url(path);
        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", self.bearer())
            .header("Accept", "application/json");
        if let Some((key, value)) = query {
            request = request.query(key, value);
        }
        Self::finish(url, request.call())
    }

    fn send(&self, method: Method, path: &str, body: &str) -> Result<Reply> {
        let url = self.url(path);
        debug!(method = method.as_str(), url = %url, "sending item");
        let request = match method {
            Method::Post => self.agent.post(&url),
            Method::Put => self.agent.put(&url),
        };
        let response = request
            .header("Authorization", self.bearer())
            .header("Content-Type", "application/json")
            .send(body.as_bytes());
        Self::finish(url, response)
    }
}

impl ItemStore for Connect {
    fn find_vault_by_title(&self, title: &str) -> Result<Vault> {
        let filter = format!("title eq \"{}\"", title);
        let reply = self.get("vaults", Some(("filter", &filter)))?;
        if !reply.is_success() {
            return Err(reply.read_error().into());
        }

        let vaults: Vec<Vault> = reply.decode()?;
        vaults
            .into_iter()
            .find(|v| v.title == title)
            .ok_or_else(|| NotFoundError::Vault(title.to_string()).into())
    }

    fn list_items(&self, vault_id: &str) -> Result<Vec<ItemSummary>> {
        let reply = self.get(&format!("vaults/{}/items", vault_id), None)?;
        match reply.status {
            404 => Err(NotFoundError::Vault(vault_id.to_string()).into()),
            _ if reply.is_success() => reply.decode(),
            _ => Err(reply.read_error().into()),
        }
    }

    fn get_item(&self, vault_id: &str, item_id: &str) -> Result<Item> {
        let reply = self.get(&format!("vaults/{}/items/{}", vault_id, item_id), None)?;
        match reply.status {
            404 => Err(NotFoundError::Item {
                item: item_id.to_string(),
                vault: vault_id.to_string(),
            }
            .into()),
            _ if reply.is_success() => reply.decode(),
            _ => Err(reply.read_error().into()),
        }
    }

    fn create_item(&self, params: &ItemCreateParams) -> Result<Item> {
        let body = serde_json::to_string(params)?;
        let reply = self.send(Method::Post, &format!("vaults/{}/items", params.vault_id), &body)?;
        if !reply.is_success() {
            return Err(reply.write_error("create").into());
        }
        reply.decode()
    }

    fn replace_item(&self, item: &Item) -> Result<Item> {
        let body = serde_json::to_string(item)?;
        let path = format!("vaults/{}/items/{}", item.vault_id, item.id);
        let reply = self.send(Method::Put, &path, &body)?;
        match reply.status {
            404 => Err(NotFoundError::Item {
                item: item.title.clone(),
                vault: item.vault_id.clone(),
            }
            .into()),
            _ if reply.is_success() => reply.decode(),
            _ => Err(reply.write_error("replace").into()),
        }
    }

    fn delete_item(&self, vault_id: &str, item_id: &str) -> Result<()> {
        let url = self.url(&format!("vaults/{}/items/{}", vault_id, item_id));
        let response = self
            .agent
            .delete(&url)
            .header("Authorization", self.bearer())
            .call();
        let reply = Self::finish(url, response)?;

        match reply.status {
            404 => Err(NotFoundError::Item {
                item: item_id.to_string(),
                vault: vault_id.to_string(),
            }
            .into()),
            _ if reply.is_success() => Ok(()),
            _ => Err(reply.write_error("delete").into()),
        }
    }
}
