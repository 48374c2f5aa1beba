//! Runtime knobs, read from the page URL (`?seed=42&tick_ms=250`).

use log::LevelFilter;

use crate::clicker::save::STORAGE_KEY;

#[derive(Clone, Debug, PartialEq)]
pub struct ClickerConfig {
    /// Passive income period.
    pub tick_interval_ms: u32,
    /// Periodic save period.
    pub save_interval_ms: u32,
    /// How long "+N Swag" stays on screen.
    pub feedback_ms: u32,
    pub storage_key: String,
    /// Fixed seed for reproducible critical hits. None seeds from the browser.
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for ClickerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            save_interval_ms: 5_000,
            feedback_ms: 500,
            storage_key: STORAGE_KEY.to_string(),
            seed: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl ClickerConfig {
    /// Defaults overridden by whatever `query` (a `location.search` string,
    /// leading `?` optional) sets. Bad values are skipped with a warning.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "seed" => value.parse::<u64>().map(|s| config.seed = Some(s)).is_ok(),
                "tick_ms" => parse_interval(value)
                    .map(|v| config.tick_interval_ms = v)
                    .is_some(),
                "save_ms" => parse_interval(value)
                    .map(|v| config.save_interval_ms = v)
                    .is_some(),
                "feedback_ms" => parse_interval(value)
                    .map(|v| config.feedback_ms = v)
                    .is_some(),
                "log" => value.parse::<LevelFilter>().map(|l| config.log_level = l).is_ok(),
                _ => continue,
            };
            if !applied {
                log::warn!("ignoring bad config value {key}={value:?}");
            }
        }
        config
    }
}

/// Positive milliseconds.
fn parse_interval(value: &str) -> Option<u32> {
    value.parse().ok().filter(|&ms| ms > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClickerConfig::default();
        assert_eq!(config.tick_interval_ms, 1_000);
        assert_eq!(config.save_interval_ms, 5_000);
        assert_eq!(config.feedback_ms, 500);
        assert_eq!(config.storage_key, "yamil-clicker-save");
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn empty_query_is_default() {
        assert_eq!(ClickerConfig::from_query(""), ClickerConfig::default());
        assert_eq!(ClickerConfig::from_query("?"), ClickerConfig::default());
    }

    #[test]
    fn all_keys() {
        let config =
            ClickerConfig::from_query("?seed=42&tick_ms=250&save_ms=1000&feedback_ms=800&log=debug");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.save_interval_ms, 1_000);
        assert_eq!(config.feedback_ms, 800);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = ClickerConfig::from_query("seed=abc&tick_ms=-5&save_ms=&log=loud");
        assert_eq!(config, ClickerConfig::default());
    }

    #[test]
    fn zero_intervals_rejected() {
        let config = ClickerConfig::from_query("tick_ms=0&save_ms=0&feedback_ms=0");
        assert_eq!(config, ClickerConfig::default());
    }

    #[test]
    fn unknown_keys_ignored() {
        let config = ClickerConfig::from_query("?utm_source=x&seed=7&debug");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tick_interval_ms, 1_000);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        assert_eq!(
            ClickerConfig::from_query("log=WARN").log_level,
            LevelFilter::Warn
        );
        assert_eq!(
            ClickerConfig::from_query("log=off").log_level,
            LevelFilter::Off
        );
    }
}
