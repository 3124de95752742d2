use chrono::Duration as ChronoDuration;
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use std::{env, time::Duration};
use thiserror::Error;
use url::Url;

type Result<T> = std::result::Result<T, ConfigError>;

pub const DEFAULT_API_URL: &str = "https://codeforces.com/api/contest.list";
pub const DEFAULT_REGISTRATION_URL_TEMPLATE: &str =
    "https://codeforces.com/contestRegistration/{id}";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 5;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 10;

static DEFAULT_API: Lazy<Url> =
    Lazy::new(|| Url::parse(DEFAULT_API_URL).expect("default API url must be valid"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid url given in {0}")]
    InvalidUrlError(String, #[source] url::ParseError),
    #[error("{0} must be a positive integer but got `{1}`")]
    InvalidNumberError(String, String),
    #[error("{0} must be between {1} and {2} but got `{3}`")]
    OutOfRangeError(String, u64, u64, String),
    #[error("unknown timezone `{0}` (expected IANA name like Asia/Kolkata)")]
    InvalidTimezoneError(String),
    #[error("registration url template must contain `{{id}}` but got `{0}`")]
    InvalidTemplateError(String),
}

/// Settings shared by the fetcher and the formatter.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub api_url: Url,
    pub registration_url_template: String,
    pub fetch_timeout: Duration,
    pub timezone: Tz,
    /// Upper bound of the `list` window. `None` lists every upcoming contest.
    pub list_window: Option<ChronoDuration>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API.clone(),
            registration_url_template: String::from(DEFAULT_REGISTRATION_URL_TEMPLATE),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            timezone: DEFAULT_TIMEZONE,
            list_window: None,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("CODEFORCES_API_URL") {
            config.api_url = Url::parse(&url)
                .map_err(|e| ConfigError::InvalidUrlError(String::from("CODEFORCES_API_URL"), e))?;
        }
        if let Ok(template) = env::var("REGISTRATION_URL_TEMPLATE") {
            config.registration_url_template = template;
        }
        if let Ok(timeout) = env::var("FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = parse_fetch_timeout(&timeout)?;
        }
        if let Ok(name) = env::var("BOT_TIMEZONE") {
            config.timezone = name
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezoneError(name.clone()))?;
        }
        if let Ok(days) = env::var("LIST_WINDOW_DAYS") {
            let days = parse_positive("LIST_WINDOW_DAYS", &days)?;
            config.list_window = Some(ChronoDuration::days(days as i64));
        }

        config.validate()?;
        tracing::debug!("loaded configuration: {:?}", config);

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.registration_url_template.contains("{id}") {
            return Err(ConfigError::InvalidTemplateError(
                self.registration_url_template.clone(),
            ));
        }
        Ok(())
    }

    pub fn registration_url(&self, contest_id: i64) -> String {
        self.registration_url_template
            .replace("{id}", &contest_id.to_string())
    }
}

fn parse_fetch_timeout(raw: &str) -> Result<Duration> {
    let seconds = parse_positive("FETCH_TIMEOUT_SECS", raw)?;
    if !(MIN_FETCH_TIMEOUT_SECS..=MAX_FETCH_TIMEOUT_SECS).contains(&seconds) {
        return Err(ConfigError::OutOfRangeError(
            String::from("FETCH_TIMEOUT_SECS"),
            MIN_FETCH_TIMEOUT_SECS,
            MAX_FETCH_TIMEOUT_SECS,
            String::from(raw),
        ));
    }
    Ok(Duration::from_secs(seconds))
}

fn parse_positive(key: &str, raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumberError(
            String::from(key),
            String::from(raw),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();

        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.timezone, chrono_tz::Asia::Kolkata);
        assert!(config.list_window.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_registration_url() {
        let config = BotConfig::default();
        assert_eq!(
            config.registration_url(1843),
            "https://codeforces.com/contestRegistration/1843"
        );
    }

    #[test]
    fn test_template_without_placeholder() {
        let config = BotConfig {
            registration_url_template: String::from("https://codeforces.com/contests"),
            ..BotConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTemplateError(_))
        ));
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("KEY", "7").unwrap(), 7);
        assert_eq!(parse_positive("KEY", " 10 ").unwrap(), 10);
        assert!(parse_positive("KEY", "0").is_err());
        assert!(parse_positive("KEY", "-1").is_err());
        assert!(parse_positive("KEY", "seven").is_err());
    }

    #[test]
    fn test_parse_fetch_timeout() {
        assert!(matches!(
            parse_fetch_timeout("4"),
            Err(ConfigError::OutOfRangeError(_, 5, 10, _))
        ));
        assert_eq!(parse_fetch_timeout("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_fetch_timeout("10").unwrap(), Duration::from_secs(10));
        assert!(matches!(
            parse_fetch_timeout("11"),
            Err(ConfigError::OutOfRangeError(_, 5, 10, _))
        ));
        assert!(parse_fetch_timeout("3600").is_err());
        assert!(parse_fetch_timeout("1").is_err());
        assert!(matches!(
            parse_fetch_timeout("0"),
            Err(ConfigError::InvalidNumberError(_, _))
        ));
    }
}
