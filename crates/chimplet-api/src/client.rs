// MailChimp 2.0 HTTP client
//
// Every endpoint is `POST {base}/{section}/{method}.json` with a JSON body
// that carries the API key. Endpoint groups (lists, folders, campaigns, ...)
// are implemented as inherent methods in sibling modules to keep this one
// focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Data center used when the API key carries no `-dc` suffix.
pub const DEFAULT_DATA_CENTER: &str = "us1";

/// Largest page the service returns from a single list call.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Extract the data-center routing suffix from an API key.
///
/// Keys look like `0123456789abcdef-us7`; anything after the first `-`
/// names the data center.
pub fn data_center_from_key(api_key: &str) -> &str {
    match api_key.split_once('-') {
        Some((_, dc)) if !dc.is_empty() => dc,
        _ => DEFAULT_DATA_CENTER,
    }
}

/// Data centers are short alphanumeric labels such as `us7`.
fn is_valid_data_center(dc: &str) -> bool {
    !dc.is_empty() && dc.chars().all(|c| c.is_ascii_alphanumeric())
}

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the MailChimp 2.0 API.
///
/// Holds the API key and injects it into every request body. The base URL
/// always ends with `/2.0/` (or whatever path an endpoint override carries)
/// so endpoint paths join onto it.
#[derive(Debug)]
pub struct ChimpClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
}

impl ChimpClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client routed to the data center named by `data_center`, or
    /// by the API key suffix when `None`.
    pub fn new(
        api_key: SecretString,
        data_center: Option<&str>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let dc = match data_center {
            Some(dc) if is_valid_data_center(dc) => dc.to_owned(),
            Some(dc) => {
                return Err(Error::InvalidRequest {
                    endpoint: "data_center".into(),
                    reason: format!("expected something like 'us7', got '{dc}'"),
                });
            }
            None => {
                let dc = data_center_from_key(api_key.expose_secret());
                if !is_valid_data_center(dc) {
                    return Err(Error::InvalidApiKey {
                        message: "API key has a malformed data center suffix".into(),
                    });
                }
                dc.to_owned()
            }
        };
        let base_url = Url::parse(&format!("https://{dc}.api.mailchimp.com/2.0/"))?;
        let http = transport.build_client()?;

        debug!(data_center = %dc, "built API client");
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Build a client against an explicit base URL (proxies, test servers).
    pub fn with_endpoint(
        base_url: &str,
        api_key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, api_key)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: SecretString,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The base URL every endpoint is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("{endpoint}.json"))?)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Call `endpoint` (e.g. `"lists/list"`) with a JSON object of
    /// parameters. `Null` is treated as an empty object.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Value,
    ) -> Result<T, Error> {
        let mut body = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::InvalidRequest {
                    endpoint: endpoint.to_owned(),
                    reason: format!("parameters must be a JSON object, got {other}"),
                });
            }
        };
        body.insert(
            "apikey".into(),
            Value::String(self.api_key.expose_secret().to_owned()),
        );

        let url = self.url(endpoint)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(&body).send().await?;
        self.handle_response(resp).await
    }

    /// Loosely-typed call used by generic forwarding.
    pub async fn call_raw(&self, endpoint: &str, params: Value) -> Result<Value, Error> {
        self.call(endpoint, params).await
    }

    /// Serialize typed parameters, then [`call`](Self::call).
    pub(crate) async fn send<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<T, Error> {
        let params = serde_json::to_value(params).map_err(|e| Error::InvalidRequest {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        self.call(endpoint, params).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey {
                message: if raw.is_empty() { status.to_string() } else { raw },
            };
        }

        match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) if err.name.is_some() || err.error.is_some() => Error::Api {
                name: err.name.unwrap_or_else(|| "Unknown_Exception".into()),
                message: err.error.unwrap_or_else(|| status.to_string()),
                code: err.code.unwrap_or(-1),
            },
            _ => Error::Api {
                name: "HttpError".into(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: i64::from(status.as_u16()),
            },
        }
    }
}
