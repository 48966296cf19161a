//! Configuration for chimplet hosts.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `chimplet_core::FacadeConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use chimplet_core::{ClientOptions, CoreError, FacadeConfig, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/api-key`.
const KEYRING_SERVICE: &str = "chimplet";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        CoreError::Config {
            message: err.to_string(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when the host does not name one.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, or the default profile when `None`.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            ssl_verify: default_ssl_verify(),
        }
    }
}

fn default_timeout() -> u64 {
    600
}
fn default_ssl_verify() -> bool {
    true
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API key (plaintext; prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Data center override (e.g. "us6"); otherwise taken from the key.
    pub data_center: Option<String>,

    /// Full API base URL override.
    pub endpoint: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override TLS verification.
    pub ssl_verify: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// List selected when a session opens.
    pub list_id: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "chimplet", "chimplet").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("chimplet");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
///
/// Environment variables are `CHIMPLET_`-prefixed with nested keys split
/// on `__`, e.g. `CHIMPLET_PROFILES__WORK__LIST_ID`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CHIMPLET_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve an API key: profile's env var, then keyring, then plaintext.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store `api_key` in the system keyring for `profile_name`.
pub fn store_api_key(profile_name: &str, api_key: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key"))
        .and_then(|entry| entry.set_password(api_key))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

// ── Translation ─────────────────────────────────────────────────────

/// Build the `ClientOptions` a profile describes.
pub fn profile_to_client_options(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientOptions, ConfigError> {
    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    if let Some(ref dc) = profile.data_center {
        if dc.is_empty() || !dc.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation {
                field: "data_center".into(),
                reason: format!("expected something like 'us6', got '{dc}'"),
            });
        }
    }

    let endpoint = profile
        .endpoint
        .as_deref()
        .map(|raw| {
            Url::parse(raw).map_err(|_| ConfigError::Validation {
                field: "endpoint".into(),
                reason: format!("invalid URL: {raw}"),
            })
        })
        .transpose()?;

    let tls = if profile.ssl_verify.unwrap_or(defaults.ssl_verify) {
        profile
            .ca_cert
            .clone()
            .map_or(TlsVerification::SystemDefaults, TlsVerification::CustomCa)
    } else {
        TlsVerification::DangerAcceptInvalid
    };

    Ok(ClientOptions {
        timeout: Duration::from_secs(timeout),
        data_center: profile.data_center.clone(),
        endpoint,
        tls,
    })
}

/// Build a `FacadeConfig` from a profile.
pub fn profile_to_facade_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<FacadeConfig, ConfigError> {
    let options = profile_to_client_options(profile, defaults)?;
    let api_key = resolve_api_key(profile, profile_name)?;

    Ok(FacadeConfig {
        api_key,
        options,
        default_list: profile.list_id.clone(),
    })
}

/// Resolve the named (or default) profile of `config` into a `FacadeConfig`.
pub fn facade_config(config: &Config, profile: Option<&str>) -> Result<FacadeConfig, ConfigError> {
    let (name, profile) = config.profile(profile)?;
    profile_to_facade_config(profile, name, &config.defaults)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
        default_profile = "work"

        [defaults]
        timeout = 120

        [profiles.work]
        api_key = "plain-us6"
        list_id = "a1b2c3"

        [profiles.staging]
        api_key = "stage-us1"
        endpoint = "http://localhost:8089/2.0/"
        ssl_verify = false
        timeout = 5
    "#;

    // Loading reads CHIMPLET_* variables, so every test that loads runs in
    // a `Jail` to stay isolated from the env-override tests.

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_| {
            let dir = tempfile::tempdir().unwrap();
            let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

            assert_eq!(config.default_profile.as_deref(), Some("default"));
            assert_eq!(config.defaults.timeout, 600);
            assert!(config.defaults.ssl_verify);
            assert!(config.profiles.is_empty());
            Ok(())
        });
    }

    #[test]
    fn profiles_parse_and_translate() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_profiles(&config);
            Ok(())
        });
    }

    fn assert_profiles(config: &Config) {
        let facade = facade_config(config, None).unwrap();
        assert_eq!(facade.api_key.expose_secret(), "plain-us6");
        assert_eq!(facade.default_list.as_deref(), Some("a1b2c3"));
        assert_eq!(facade.options.timeout, Duration::from_secs(120));
        assert_eq!(facade.options.tls, TlsVerification::SystemDefaults);

        let staging = facade_config(config, Some("staging")).unwrap();
        assert_eq!(staging.options.timeout, Duration::from_secs(5));
        assert_eq!(staging.options.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(
            staging.options.endpoint.unwrap().as_str(),
            "http://localhost:8089/2.0/"
        );
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = Config::default();
        let err = facade_config(&config, Some("ghost")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { ref profile } if profile == "ghost"));
    }

    #[test]
    fn env_overrides_nested_keys() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("CHIMPLET_PROFILES__WORK__LIST_ID", "from-env");
            jail.set_env("CHIMPLET_DEFAULTS__TIMEOUT", "30");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            let (_, work) = config.profile(None).unwrap();
            assert_eq!(work.list_id.as_deref(), Some("from-env"));
            assert_eq!(config.defaults.timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn api_key_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("CHIMPLET_TEST_KEY_ENV", "env-us3");

            let profile = Profile {
                api_key: Some("plain-us6".into()),
                api_key_env: Some("CHIMPLET_TEST_KEY_ENV".into()),
                ..Profile::default()
            };
            let key = resolve_api_key(&profile, "chimplet-test-env-profile").unwrap();
            assert_eq!(key.expose_secret(), "env-us3");
            Ok(())
        });
    }

    #[test]
    fn missing_api_key_is_reported() {
        let profile = Profile {
            api_key_env: Some("CHIMPLET_TEST_UNSET_KEY".into()),
            ..Profile::default()
        };
        let err = resolve_api_key(&profile, "chimplet-test-empty-profile").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let defaults = Defaults::default();

        let bad_url = Profile {
            endpoint: Some("not a url".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_options(&bad_url, &defaults),
            Err(ConfigError::Validation { ref field, .. }) if field == "endpoint"
        ));

        let bad_dc = Profile {
            data_center: Some("us-6".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_options(&bad_dc, &defaults),
            Err(ConfigError::Validation { ref field, .. }) if field == "data_center"
        ));

        let zero = Profile {
            timeout: Some(0),
            ..Profile::default()
        };
        assert!(profile_to_client_options(&zero, &defaults).is_err());
    }

    #[test]
    fn ca_cert_used_when_verifying() {
        let profile = Profile {
            ca_cert: Some(PathBuf::from("/etc/chimplet/ca.pem")),
            ..Profile::default()
        };
        let options = profile_to_client_options(&profile, &Defaults::default()).unwrap();
        assert_eq!(
            options.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/chimplet/ca.pem"))
        );
    }

    #[test]
    fn save_then_load() {
        Jail::expect_with(|_| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("config.toml");

            let mut config = Config::default();
            config.profiles.insert(
                "default".into(),
                Profile {
                    api_key: Some("saved-us2".into()),
                    data_center: Some("us2".into()),
                    ..Profile::default()
                },
            );
            save_config_to(&config, &path).unwrap();

            let loaded = load_config_from(&path).unwrap();
            let (name, profile) = loaded.profile(None).unwrap();
            assert_eq!(name, "default");
            assert_eq!(profile.api_key.as_deref(), Some("saved-us2"));
            assert_eq!(profile.data_center.as_deref(), Some("us2"));
            Ok(())
        });
    }

    #[test]
    fn config_errors_become_core_errors() {
        let err: CoreError = ConfigError::NoCredentials {
            profile: "work".into(),
        }
        .into();
        assert_eq!(err.kind(), chimplet_core::ErrorKind::Config);
    }
}
