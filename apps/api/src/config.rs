use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::interview::controller::{InterviewSettings, TerminationPolicy};

const DEFAULT_LLM_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "meta-llama/llama-3-8b-instruct";

/// Application configuration loaded from environment variables.
/// Startup fails if the credential is missing or any value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub interview: InterviewSettings,
    /// When set, flagged answers are followed up only with this probability.
    pub followup_probability: Option<f64>,
    /// Sessions untouched for this long are purged by the background sweep.
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let interview = InterviewSettings {
            max_questions: parse_or(&lookup, "MAX_QUESTIONS", 5)?,
            min_questions: parse_or(&lookup, "MIN_QUESTIONS", 3)?,
            generated_question_cap: parse_or(&lookup, "GENERATED_QUESTION_CAP", 5)?,
            termination_policy: match lookup("TERMINATION_POLICY") {
                Some(raw) => raw
                    .parse::<TerminationPolicy>()
                    .map_err(anyhow::Error::msg)
                    .context("TERMINATION_POLICY must be 'adaptive' or 'fixed'")?,
                None => TerminationPolicy::Adaptive,
            },
        };

        if interview.max_questions == 0 {
            bail!("MAX_QUESTIONS must be at least 1");
        }
        if interview.min_questions > interview.max_questions {
            bail!(
                "MIN_QUESTIONS ({}) cannot exceed MAX_QUESTIONS ({})",
                interview.min_questions,
                interview.max_questions
            );
        }
        if interview.generated_question_cap == 0 {
            bail!("GENERATED_QUESTION_CAP must be at least 1");
        }

        let followup_probability = match lookup("FOLLOWUP_PROBABILITY") {
            Some(raw) => {
                let p = raw
                    .trim()
                    .parse::<f64>()
                    .context("FOLLOWUP_PROBABILITY must be a number")?;
                if !(0.0..=1.0).contains(&p) {
                    bail!("FOLLOWUP_PROBABILITY must be between 0.0 and 1.0, got {p}");
                }
                Some(p)
            }
            None => None,
        };

        let session_idle_ttl =
            Duration::from_secs(parse_or(&lookup, "SESSION_IDLE_TTL_SECS", 3600)?);
        if session_idle_ttl.is_zero() {
            bail!("SESSION_IDLE_TTL_SECS must be at least 1");
        }

        Ok(Config {
            llm_api_key: lookup("LLM_API_KEY")
                .filter(|k| !k.trim().is_empty())
                .context("Required environment variable 'LLM_API_KEY' is not set")?,
            llm_api_url: lookup("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string()),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 20)?),
            interview,
            followup_probability,
            session_idle_ttl,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = load(&[("LLM_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.llm_api_url, DEFAULT_LLM_API_URL);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.llm_timeout, Duration::from_secs(20));
        assert_eq!(config.interview, InterviewSettings::default());
        assert_eq!(config.followup_probability, None);
        assert_eq!(config.session_idle_ttl, Duration::from_secs(3600));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_api_key_fails() {
        assert!(load(&[]).is_err());
        assert!(load(&[("LLM_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = load(&[
            ("LLM_API_KEY", "sk-test"),
            ("MAX_QUESTIONS", "8"),
            ("MIN_QUESTIONS", "4"),
            ("TERMINATION_POLICY", "fixed"),
            ("FOLLOWUP_PROBABILITY", "0.6"),
            ("LLM_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.interview.max_questions, 8);
        assert_eq!(config.interview.min_questions, 4);
        assert_eq!(
            config.interview.termination_policy,
            TerminationPolicy::FixedCount
        );
        assert_eq!(config.followup_probability, Some(0.6));
        assert_eq!(config.llm_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_min_above_max_fails() {
        assert!(load(&[
            ("LLM_API_KEY", "sk-test"),
            ("MAX_QUESTIONS", "2"),
            ("MIN_QUESTIONS", "3"),
        ])
        .is_err());
    }

    #[test]
    fn test_zero_max_fails() {
        assert!(load(&[
            ("LLM_API_KEY", "sk-test"),
            ("MAX_QUESTIONS", "0"),
            ("MIN_QUESTIONS", "0"),
        ])
        .is_err());
    }

    #[test]
    fn test_bad_values_fail() {
        assert!(load(&[("LLM_API_KEY", "k"), ("PORT", "eighty")]).is_err());
        assert!(load(&[("LLM_API_KEY", "k"), ("FOLLOWUP_PROBABILITY", "1.5")]).is_err());
        assert!(load(&[("LLM_API_KEY", "k"), ("TERMINATION_POLICY", "sometimes")]).is_err());
        assert!(load(&[("LLM_API_KEY", "k"), ("SESSION_IDLE_TTL_SECS", "0")]).is_err());
    }
}
