use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default platform instance; overridable via config or --domain.
pub(crate) const DEFAULT_DOMAIN: &str = "learn.zone01kisumu.ke";

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigAuditSource {
    Auto,
    Transactions,
    Totals,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) domain: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) top_skills: Option<usize>,
    #[serde(default)]
    pub(crate) progress_limit: Option<usize>,
    #[serde(default)]
    pub(crate) audit_source: Option<ConfigAuditSource>,
}

impl Config {
    pub(crate) fn load() -> Self {
        for path in Self::config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/z01stats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("z01stats").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support etc.)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("z01stats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home dotfile: ~/.z01stats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".z01stats.toml"));
        }

        paths
    }
}
