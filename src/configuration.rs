use std::{
    env, fmt, fs, io,
    ops::Deref,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use tracing::info;

use crate::{
    error::Error,
    handler::live_poller::LiveState,
    provider::{EventSource, Fixture},
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub source: Arc<dyn EventSource>,
    pub fixture: Fixture,
    pub live: Arc<LiveState>,
}

impl State {
    pub fn new(
        config: Config,
        source: Arc<dyn EventSource>,
        fixture: Fixture,
    ) -> State {
        Self {
            config,
            source,
            fixture,
            live: Arc::new(LiveState::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub relays: Vec<String>,
    pub ledger_pubkey: String,
    pub transaction_kind: u32,
    pub query_limit: usize,
    pub timeout: u64,
    pub fixture_path: PathBuf,
    pub live_poll_interval: u64,
    pub enable_live: bool,
}

impl Config {
    /// Build the configuration from a key lookup (the process environment in
    /// production).
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host =
            lookup("SERVER_HOST").unwrap_or_else(|| String::from("127.0.0.1"));
        let port = parse_or(&lookup, "PORT", 3000)?;
        let allowed_origins =
            split_list(&lookup("ALLOWED_ORIGINS").unwrap_or_else(|| String::from("*")));
        let relays = split_list(&lookup("RELAYS").unwrap_or_default());
        let ledger_pubkey = lookup("LEDGER_PUBKEY").unwrap_or_default();
        let transaction_kind = parse_or(&lookup, "TRANSACTION_KIND", 1112)?;
        let query_limit = parse_or(&lookup, "QUERY_LIMIT", 100)?;
        let timeout = parse_or(&lookup, "TIMEOUT", 10)?;
        let live_poll_interval = parse_or(&lookup, "LIVE_POLL_INTERVAL", 5)?;
        let enable_live = parse_or(&lookup, "ENABLE_LIVE", true)?;
        let fixture_path = resolve_path(
            &lookup("FIXTURE_PATH")
                .unwrap_or_else(|| String::from("mock/transactions.json")),
        );

        if live_poll_interval == 0 {
            return Err(Error::ConfigurationError(String::from(
                "LIVE_POLL_INTERVAL must be greater than 0",
            )));
        }

        Ok(Config {
            server_host,
            port,
            allowed_origins,
            relays,
            ledger_pubkey,
            transaction_kind,
            query_limit,
            timeout,
            fixture_path,
            live_poll_interval,
            enable_live,
        })
    }

    /// Relay access needs both the relay list and the ledger author.
    pub fn require_relay_settings(&self) -> Result<(), Error> {
        if self.relays.is_empty() {
            return Err(Error::ConfigurationError(String::from(
                "RELAYS is empty",
            )));
        }
        if self.ledger_pubkey.is_empty() {
            return Err(Error::ConfigurationError(String::from(
                "LEDGER_PUBKEY is empty",
            )));
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| {
            Error::ConfigurationError(format!("{}: {}", key, e))
        }),
        None => Ok(default),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.to_owned())
        .collect()
}

fn resolve_path(value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}

pub fn get_configuration() -> Result<Config, Error> {
    Config::from_lookup(|key| env::var(key).ok())
}

/// Load `KEY=value` lines from `path` into the process environment.
/// Variables already present in the environment are left alone; a missing
/// file is not an error.
pub fn set_configuration(path: &str) -> Result<(), Error> {
    let config_string = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No configuration file at {}, using environment", path);
            return Ok(());
        },
        Err(e) => return Err(e.into()),
    };

    for (key, value) in parse_config_string(&config_string) {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
        }
    }

    Ok(())
}

fn parse_config_string(config: &str) -> Vec<(&str, &str)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_keys_are_missing() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.allowed_origins, vec![String::from("*")]);
        assert!(config.relays.is_empty());
        assert_eq!(config.transaction_kind, 1112);
        assert_eq!(config.query_limit, 100);
        assert_eq!(config.timeout, 10);
        assert_eq!(config.live_poll_interval, 5);
        assert!(config.enable_live);
        assert!(config.fixture_path.ends_with("mock/transactions.json"));
        assert!(config.require_relay_settings().is_err());
    }

    #[test]
    fn reads_lists_and_numbers() {
        let config = Config::from_lookup(lookup(&[
            ("RELAYS", "wss://relay.one, wss://relay.two,,"),
            ("LEDGER_PUBKEY", "ledger"),
            ("PORT", "8080"),
            ("ENABLE_LIVE", "false"),
            ("FIXTURE_PATH", "/tmp/fixture.json"),
        ]))
        .unwrap();

        assert_eq!(
            config.relays,
            vec![String::from("wss://relay.one"), String::from("wss://relay.two")]
        );
        assert_eq!(config.port, 8080);
        assert!(!config.enable_live);
        assert_eq!(config.fixture_path, PathBuf::from("/tmp/fixture.json"));
        assert!(config.require_relay_settings().is_ok());
    }

    #[test]
    fn rejects_invalid_values() {
        let result = Config::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(Error::ConfigurationError(ref msg)) if msg.starts_with("PORT")));

        let result = Config::from_lookup(lookup(&[("LIVE_POLL_INTERVAL", "0")]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn parses_env_file_lines() {
        let parsed = parse_config_string(
            "# relays\nRELAYS=wss://a,wss://b\n\nPORT = 3001\r\nbroken line\n=nokey\n",
        );
        assert_eq!(parsed, vec![("RELAYS", "wss://a,wss://b"), ("PORT", "3001")]);
    }
}
