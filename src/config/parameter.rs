use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{info, warn};

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Default configuration values
const DEFAULTS: &[(&str, &str)] = &[
    // HMAC key for the session credential; must be at least 32 bytes.
    // The baked-in value is for the fixture demo only.
    ("TOKEN_SECRET", "acaiaca-demo-secret-troque-em-producao-0123456789"),
    ("TOKEN_TTL_DAYS", "7"),
    ("SESSION_STORE_PATH", "acaiaca-session.json"),
    ("ENV", "development"),
    ("LOG_LEVEL", "info"),
];

fn load() -> HashMap<String, String> {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment file: {:?}", path),
        Err(_) => warn!("No .env file found, using system environment variables"),
    }

    let mut config = HashMap::new();

    for (key, value) in DEFAULTS {
        config.insert(key.to_string(), value.to_string());
    }

    // Override with environment variables
    for (key, _) in DEFAULTS {
        if let Ok(value) = std::env::var(key) {
            config.insert(key.to_string(), value);
        }
    }

    config
}

/// Force configuration loading up front so boot logs show the source.
/// Getters self-initialize, so calling this is optional.
pub fn init() {
    let _ = CONFIG.get_or_init(load);
    info!("Configuration initialized");
}

pub fn get(parameter: &str) -> String {
    CONFIG
        .get_or_init(load)
        .get(parameter)
        .cloned()
        .unwrap_or_else(|| {
            panic!("Required configuration parameter '{}' is missing", parameter);
        })
}

/// Parameters without a default (e.g. USERS_FIXTURE_PATH) are read from the
/// environment directly.
pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get_or_init(load)
        .get(parameter)
        .cloned()
        .or_else(|| std::env::var(parameter).ok())
}

pub fn get_i64(parameter: &str) -> i64 {
    let value = get(parameter);
    value.parse::<i64>().unwrap_or_else(|_| {
        panic!(
            "Configuration parameter '{}' is not a valid i64: {}",
            parameter, value
        );
    })
}
