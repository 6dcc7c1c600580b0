use std::str::FromStr;

/// A hundred years of audit history.
const MAX_RETENTION_DAYS: i64 = 36_500;

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub seed_demo_data: bool,
    pub notification_scan_secs: u64,
    pub audit_retention_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            seed_demo_data: true,
            notification_scan_secs: 300,
            audit_retention_days: 365,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) then read every setting, falling back to defaults.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Invalid values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            seed_demo_data: parse_or("SEED_DEMO_DATA", &lookup, defaults.seed_demo_data),
            notification_scan_secs: parse_or(
                "NOTIFICATION_SCAN_SECS",
                &lookup,
                defaults.notification_scan_secs,
            )
            .max(1),
            audit_retention_days: in_range_or(
                "AUDIT_RETENTION_DAYS",
                parse_or("AUDIT_RETENTION_DAYS", &lookup, defaults.audit_retention_days),
                MAX_RETENTION_DAYS,
                defaults.audit_retention_days,
            ),
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Invalid value for {key} ({raw:?}), using default {default}");
                default
            }
        },
    }
}

fn in_range_or(key: &str, value: i64, max: i64, default: i64) -> i64 {
    if (1..=max).contains(&value) {
        value
    } else {
        log::warn!("{key} must be between 1 and {max} (got {value}), using default {default}");
        default
    }
}
