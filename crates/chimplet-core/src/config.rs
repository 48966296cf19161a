// ── Runtime connection configuration ──
//
// These types describe *how* to reach the service. They carry credential
// data and connection tuning, but never touch disk. Callers (or
// chimplet-config) build a `FacadeConfig` and hand it in.

use std::path::PathBuf;
use std::time::Duration;

use chimplet_api::transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Additional CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

/// Options applied when a connection is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Request timeout.
    pub timeout: Duration,
    /// Data center override; otherwise taken from the API key suffix.
    pub data_center: Option<String>,
    /// Full base URL override (proxies, test servers). Wins over `data_center`.
    pub endpoint: Option<Url>,
    pub tls: TlsVerification,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            data_center: None,
            endpoint: None,
            tls: TlsVerification::default(),
        }
    }
}

impl ClientOptions {
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

/// Everything needed to open a facade session.
#[derive(Debug, Clone)]
pub struct FacadeConfig {
    pub api_key: SecretString,
    pub options: ClientOptions,
    /// List to select with [`Facade::select_default_list`](crate::Facade::select_default_list).
    pub default_list: Option<String>,
}
