//! Process configuration loaded once at start-up via OrthoConfig.
//!
//! Values layer CLI flags over `TRIP_PLANNER_*` environment variables over a
//! config file. A handful of unprefixed variables (`JWT_SECRET`,
//! `DATABASE_URL`, `GOOGLE_PLACES_API_KEY`, `CLIENT_ORIGIN`, `PORT`) are
//! honoured as fallbacks so existing deployments keep working.

use std::net::SocketAddr;

use chrono::Duration;
use mockable::Env;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::places::DEFAULT_PLACES_ENDPOINT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5173";
const DEV_JWT_SECRET: &str = "dev_secret";
/// Shortest signing secret accepted in release builds.
pub const JWT_SECRET_MIN_LEN: usize = 32;
/// Longest bearer token lifetime accepted, in days.
pub const TOKEN_TTL_MAX_DAYS: u32 = 365;

/// Build mode used to decide how strictly secrets are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to development defaults with a warning.
    Debug,
    /// Release builds require explicit, strong secrets.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRIP_PLANNER")]
pub struct AppSettings {
    /// Socket address to listen on, e.g. `0.0.0.0:5000`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Bearer token lifetime in days.
    #[ortho_config(default = 7)]
    pub token_ttl_days: u32,
    /// bcrypt work factor.
    #[ortho_config(default = 10)]
    pub bcrypt_cost: u32,
    /// Google Places API key.
    pub places_api_key: Option<String>,
    /// Override for the Places autocomplete endpoint.
    pub places_endpoint: Option<String>,
    /// Seed the demo account and trip on start-up. Unset means off.
    pub seed_demo: Option<bool>,
    /// Browser origin allowed by CORS.
    pub client_origin: Option<String>,
}

/// Invalid configuration detected at start-up.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid places endpoint '{value}': {source}")]
    PlacesEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl AppSettings {
    /// Fill unset fields from the unprefixed legacy variables.
    #[must_use]
    pub fn with_env_fallbacks<E: Env>(mut self, env: &E) -> Self {
        let fallback = |current: Option<String>, name: &str| {
            current.or_else(|| env.string(name).filter(|value| !value.trim().is_empty()))
        };
        self.database_url = fallback(self.database_url.take(), "DATABASE_URL");
        self.jwt_secret = fallback(self.jwt_secret.take(), "JWT_SECRET");
        self.places_api_key = fallback(self.places_api_key.take(), "GOOGLE_PLACES_API_KEY");
        self.client_origin = fallback(self.client_origin.take(), "CLIENT_ORIGIN");
        if self.bind_addr.is_none() {
            self.bind_addr = env
                .string("PORT")
                .map(|port| format!("0.0.0.0:{}", port.trim()));
        }
        self
    }

    /// Listening address, defaulting to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Places endpoint, defaulting to Google's public API.
    ///
    /// # Errors
    /// Returns [`SettingsError::PlacesEndpoint`] when the override is not a URL.
    pub fn places_endpoint(&self) -> Result<Url, SettingsError> {
        let value = self
            .places_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_PLACES_ENDPOINT);
        Url::parse(value).map_err(|source| SettingsError::PlacesEndpoint {
            value: value.to_owned(),
            source,
        })
    }

    /// Whether the demo account should be seeded.
    pub fn seed_demo(&self) -> bool {
        self.seed_demo.unwrap_or(false)
    }

    pub fn client_origin(&self) -> &str {
        self.client_origin
            .as_deref()
            .unwrap_or(DEFAULT_CLIENT_ORIGIN)
    }
}

/// Validated bearer token configuration.
pub struct TokenSettings {
    /// Raw signing secret, wiped on drop.
    pub secret: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens.
    pub ttl: Duration,
}

/// Token configuration rejected at start-up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenConfigError {
    #[error("JWT secret must be set in release builds")]
    MissingSecret,
    #[error("JWT secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    #[error("token lifetime must be at least one day")]
    ZeroTtl,
    #[error("token lifetime of {days} days exceeds the {max_days} day limit")]
    TtlTooLong { days: u32, max_days: u32 },
}

/// Validate the signing secret and lifetime.
///
/// Debug builds accept a missing or short secret with a warning; release
/// builds require at least [`JWT_SECRET_MIN_LEN`] bytes. The lifetime must
/// lie between one and [`TOKEN_TTL_MAX_DAYS`] days.
///
/// # Examples
/// ```
/// use trip_planner::settings::{AppSettings, BuildMode, token_settings_from};
///
/// let settings = AppSettings {
///     bind_addr: None,
///     database_url: None,
///     jwt_secret: Some("0123456789abcdef0123456789abcdef".to_owned()),
///     token_ttl_days: 7,
///     bcrypt_cost: 10,
///     places_api_key: None,
///     places_endpoint: None,
///     seed_demo: None,
///     client_origin: None,
/// };
/// let tokens = token_settings_from(&settings, BuildMode::Release).unwrap();
/// assert_eq!(tokens.ttl.num_days(), 7);
/// ```
pub fn token_settings_from(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    if settings.token_ttl_days == 0 {
        return Err(TokenConfigError::ZeroTtl);
    }
    if settings.token_ttl_days > TOKEN_TTL_MAX_DAYS {
        return Err(TokenConfigError::TtlTooLong {
            days: settings.token_ttl_days,
            max_days: TOKEN_TTL_MAX_DAYS,
        });
    }
    let ttl = Duration::days(i64::from(settings.token_ttl_days));

    let secret = match (settings.jwt_secret.as_deref(), mode) {
        (Some(secret), BuildMode::Release) if secret.len() < JWT_SECRET_MIN_LEN => {
            return Err(TokenConfigError::SecretTooShort {
                length: secret.len(),
                min_len: JWT_SECRET_MIN_LEN,
            });
        }
        (Some(secret), BuildMode::Debug) if secret.len() < JWT_SECRET_MIN_LEN => {
            warn!(
                length = secret.len(),
                min_len = JWT_SECRET_MIN_LEN,
                "JWT secret shorter than recommended (dev only)"
            );
            secret
        }
        (Some(secret), _) => secret,
        (None, BuildMode::Release) => return Err(TokenConfigError::MissingSecret),
        (None, BuildMode::Debug) => {
            warn!("JWT secret not set; using development secret (dev only)");
            DEV_JWT_SECRET
        }
    };

    Ok(TokenSettings {
        secret: Zeroizing::new(secret.as_bytes().to_vec()),
        ttl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::{fixture, rstest};

    const STRONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[fixture]
    fn settings() -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            jwt_secret: None,
            token_ttl_days: 7,
            bcrypt_cost: 10,
            places_api_key: None,
            places_endpoint: None,
            seed_demo: None,
            client_origin: None,
        }
    }

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .returning(move |name| vars.get(name).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env([
            ("TRIP_PLANNER_BIND_ADDR", None::<String>),
            ("TRIP_PLANNER_DATABASE_URL", None::<String>),
            ("TRIP_PLANNER_JWT_SECRET", None::<String>),
            ("TRIP_PLANNER_TOKEN_TTL_DAYS", None::<String>),
            ("TRIP_PLANNER_BCRYPT_COST", None::<String>),
            ("TRIP_PLANNER_SEED_DEMO", None::<String>),
            ("TRIP_PLANNER_CLIENT_ORIGIN", None::<String>),
        ]);

        let loaded = AppSettings::load_from_iter([OsString::from("trip-planner")])
            .expect("config should load");
        assert_eq!(loaded.token_ttl_days, 7);
        assert_eq!(loaded.bcrypt_cost, 10);
        assert!(!loaded.seed_demo());
        assert!(loaded.database_url.is_none());
        assert_eq!(loaded.client_origin(), "http://localhost:5173");
        assert_eq!(
            loaded.bind_addr().expect("default address"),
            "0.0.0.0:5000".parse::<SocketAddr>().expect("socket address")
        );
    }

    #[rstest]
    fn prefixed_environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TRIP_PLANNER_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            ("TRIP_PLANNER_TOKEN_TTL_DAYS", Some("1".to_owned())),
            ("TRIP_PLANNER_SEED_DEMO", Some("true".to_owned())),
            (
                "TRIP_PLANNER_DATABASE_URL",
                Some("postgres://localhost/trips".to_owned()),
            ),
        ]);

        let loaded = AppSettings::load_from_iter([OsString::from("trip-planner")])
            .expect("config should load");
        assert_eq!(loaded.token_ttl_days, 1);
        assert!(loaded.seed_demo());
        assert_eq!(
            loaded.database_url.as_deref(),
            Some("postgres://localhost/trips")
        );
        assert_eq!(
            loaded.bind_addr().expect("address").port(),
            8080
        );
    }

    #[rstest]
    fn legacy_variables_fill_unset_fields(settings: AppSettings) {
        let env = mock_env(&[
            ("JWT_SECRET", STRONG_SECRET),
            ("GOOGLE_PLACES_API_KEY", "places-key"),
            ("CLIENT_ORIGIN", "https://trips.example.com"),
            ("PORT", "7000"),
        ]);

        let merged = settings.with_env_fallbacks(&env);
        assert_eq!(merged.jwt_secret.as_deref(), Some(STRONG_SECRET));
        assert_eq!(merged.places_api_key.as_deref(), Some("places-key"));
        assert_eq!(merged.client_origin(), "https://trips.example.com");
        assert_eq!(merged.bind_addr().expect("address").port(), 7000);
    }

    #[rstest]
    fn explicit_settings_win_over_legacy_variables(mut settings: AppSettings) {
        settings.jwt_secret = Some("explicit".to_owned());
        settings.bind_addr = Some("127.0.0.1:9000".to_owned());
        let env = mock_env(&[("JWT_SECRET", "legacy"), ("PORT", "7000")]);

        let merged = settings.with_env_fallbacks(&env);
        assert_eq!(merged.jwt_secret.as_deref(), Some("explicit"));
        assert_eq!(merged.bind_addr().expect("address").port(), 9000);
    }

    #[rstest]
    fn blank_legacy_values_are_ignored(settings: AppSettings) {
        let env = mock_env(&[("DATABASE_URL", "  ")]);
        assert!(settings.with_env_fallbacks(&env).database_url.is_none());
    }

    #[rstest]
    #[case(Some("nonsense"))]
    #[case(Some("localhost"))]
    fn malformed_bind_addr_is_reported(mut settings: AppSettings, #[case] value: Option<&str>) {
        settings.bind_addr = value.map(str::to_owned);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn places_endpoint_defaults_to_google(mut settings: AppSettings) {
        assert_eq!(
            settings.places_endpoint().expect("default").as_str(),
            DEFAULT_PLACES_ENDPOINT
        );
        settings.places_endpoint = Some("not a url".to_owned());
        assert!(matches!(
            settings.places_endpoint(),
            Err(SettingsError::PlacesEndpoint { .. })
        ));
    }

    #[rstest]
    fn debug_builds_fall_back_to_dev_secret(settings: AppSettings) {
        let tokens = token_settings_from(&settings, BuildMode::Debug).expect("dev secret");
        assert_eq!(tokens.secret.as_slice(), DEV_JWT_SECRET.as_bytes());
        assert_eq!(tokens.ttl, Duration::days(7));
    }

    #[rstest]
    #[case(None, Err(TokenConfigError::MissingSecret))]
    #[case(
        Some("short"),
        Err(TokenConfigError::SecretTooShort { length: 5, min_len: JWT_SECRET_MIN_LEN })
    )]
    #[case(Some(STRONG_SECRET), Ok(()))]
    fn release_builds_require_a_strong_secret(
        mut settings: AppSettings,
        #[case] secret: Option<&str>,
        #[case] expected: Result<(), TokenConfigError>,
    ) {
        settings.jwt_secret = secret.map(str::to_owned);
        let outcome = token_settings_from(&settings, BuildMode::Release).map(|_| ());
        assert_eq!(outcome, expected);
    }

    #[rstest]
    #[case(0, Err(TokenConfigError::ZeroTtl))]
    #[case(1, Ok(()))]
    #[case(TOKEN_TTL_MAX_DAYS, Ok(()))]
    #[case(
        TOKEN_TTL_MAX_DAYS + 1,
        Err(TokenConfigError::TtlTooLong { days: TOKEN_TTL_MAX_DAYS + 1, max_days: TOKEN_TTL_MAX_DAYS })
    )]
    #[case(
        u32::MAX,
        Err(TokenConfigError::TtlTooLong { days: u32::MAX, max_days: TOKEN_TTL_MAX_DAYS })
    )]
    fn token_lifetime_is_bounded(
        mut settings: AppSettings,
        #[case] days: u32,
        #[case] expected: Result<(), TokenConfigError>,
    ) {
        settings.token_ttl_days = days;
        settings.jwt_secret = Some(STRONG_SECRET.to_owned());
        let outcome = token_settings_from(&settings, BuildMode::Release).map(|_| ());
        assert_eq!(outcome, expected);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(false), false)]
    #[case(Some(true), true)]
    fn demo_seeding_is_off_unless_enabled(
        mut settings: AppSettings,
        #[case] flag: Option<bool>,
        #[case] expected: bool,
    ) {
        settings.seed_demo = flag;
        assert_eq!(settings.seed_demo(), expected);
    }
}
