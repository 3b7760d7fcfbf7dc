use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Gemini REST API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model asked to judge the audio.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Upstream client timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Request body limit. Base64 audio is a third larger than the file itself,
/// and Gemini accepts inline payloads up to 20MB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Bundle locations tried, in order, when `FRONTEND_DIST_DIR` is unset.
const DIST_CANDIDATES: &[&str] = &["dist", "frontend/dist", "../dist"];

#[derive(Debug, Clone)]
pub struct ForensicConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub frontend: FrontendConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// `None` when `API_KEY` is unset or empty. Checked per request.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub analysis_model: String,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Explicit bundle directory from `FRONTEND_DIST_DIR`.
    pub dist_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_body_bytes: usize,
}

impl ForensicConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(ForensicConfig {
            common,
            google: GoogleConfig {
                api_key: env::var("API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .map(Secret::new),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            models: ModelConfig {
                analysis_model: get_env("GENAI_MODEL", DEFAULT_MODEL),
            },
            frontend: FrontendConfig {
                dist_dir: env::var("FRONTEND_DIST_DIR")
                    .ok()
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from),
            },
            limits: LimitsConfig {
                max_body_bytes: parse_env("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            },
        })
    }

    /// Directories checked for the frontend bundle, most specific first.
    pub fn dist_candidates(&self) -> Vec<PathBuf> {
        if let Some(dir) = &self.frontend.dist_dir {
            return vec![dir.clone()];
        }

        let mut candidates: Vec<PathBuf> = DIST_CANDIDATES.iter().map(PathBuf::from).collect();
        if let Some(exe_dir) = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        {
            candidates.push(exe_dir.join("dist"));
        }
        candidates
    }
}

impl Default for ForensicConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            google: GoogleConfig {
                api_key: None,
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            models: ModelConfig {
                analysis_model: DEFAULT_MODEL.to_string(),
            },
            frontend: FrontendConfig { dist_dir: None },
            limits: LimitsConfig {
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dist_dir_is_the_only_candidate() {
        let mut config = ForensicConfig::default();
        config.frontend.dist_dir = Some(PathBuf::from("/srv/trace/dist"));

        assert_eq!(
            config.dist_candidates(),
            vec![PathBuf::from("/srv/trace/dist")]
        );
    }

    #[test]
    fn default_candidates_start_with_working_directory() {
        let candidates = ForensicConfig::default().dist_candidates();

        assert_eq!(candidates[0], PathBuf::from("dist"));
        assert_eq!(candidates[1], PathBuf::from("frontend/dist"));
        assert!(candidates.len() >= 3);
    }

    #[test]
    fn default_config_has_no_credential() {
        let config = ForensicConfig::default();
        assert!(config.google.api_key.is_none());
        assert_eq!(config.common.port, 8000);
        assert_eq!(config.models.analysis_model, "gemini-2.0-flash-exp");
    }
}
