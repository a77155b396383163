//! Layered configuration loading.
//!
//! Layers are merged in call order, later ones winning key by key. The usual
//! order is the one [`crate::init_with_defaults`] and the CLI use:
//!
//! 1. built-in defaults ([`MedragConfig::default`], knowledge tables included)
//! 2. one configuration file, either given explicitly or the first match of
//!    [`ConfigLoader::search_paths`]
//! 3. `MEDRAG_*` environment variables, nested keys split on `__`
//!
//! Validation runs once, on [`ConfigLoader::extract`].

use super::{
    ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, ENV_SPLIT, Result, models::*, validation,
};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Builds a [`MedragConfig`] from defaults, files and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Start from the built-in defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new().merge(Serialized::defaults(MedragConfig::default())),
            sources: Vec::new(),
        }
    }

    /// Candidate files in search order.
    ///
    /// The working-directory names in [`DEFAULT_CONFIG_FILES`] come first,
    /// then `config.{toml,yaml,yml,json}` in the platform config directory
    /// (`~/.config/medrag` on Linux).
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = DEFAULT_CONFIG_FILES.iter().map(PathBuf::from).collect();
        if let Some(dirs) = directories::ProjectDirs::from("org", "medrag", "medrag") {
            let config_dir = dirs.config_dir();
            paths.extend(
                ["toml", "yaml", "yml", "json"]
                    .iter()
                    .map(|ext| config_dir.join(format!("config.{}", ext))),
            );
        }
        paths
    }

    /// Merge one file, picking the format from its extension.
    ///
    /// A missing file or an unknown extension is an error and leaves the
    /// loader unchanged. Parse errors surface later, from [`extract`](Self::extract).
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let format = FileFormat::of(path).ok_or_else(|| {
            ConfigError::FileLoadError(format!("Unsupported file format: {}", path.display()))
        })?;

        let figment = std::mem::take(&mut self.figment);
        self.figment = match format {
            FileFormat::Toml => figment.merge(Toml::file(path)),
            FileFormat::Yaml => figment.merge(Yaml::file(path)),
            FileFormat::Json => figment.merge(Json::file(path)),
        };
        self.sources.push(path.to_path_buf());
        debug!(path = %path.display(), "Merged configuration file");

        Ok(self)
    }

    /// Merge the first file found in [`search_paths`](Self::search_paths).
    ///
    /// Finding nothing is not an error; the loader keeps its current layers.
    pub fn load_default_files(&mut self) -> &mut Self {
        self.load_first_of(Self::search_paths())
    }

    fn load_first_of(&mut self, candidates: impl IntoIterator<Item = PathBuf>) -> &mut Self {
        for path in candidates {
            if path.is_file() && self.load_file(&path).is_ok() {
                break;
            }
        }
        self
    }

    /// Merge `MEDRAG_*` environment variables (`MEDRAG_MEMORY__SESSION_TTL=10m`).
    pub fn load_env(&mut self) -> &mut Self {
        let figment =
            std::mem::take(&mut self.figment).merge(Env::prefixed(ENV_PREFIX).split(ENV_SPLIT));
        self.figment = figment;
        self
    }

    /// Merge any other figment provider.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Files merged so far, in merge order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Produce the configuration and validate it.
    pub fn extract(&self) -> Result<MedragConfig> {
        let config: MedragConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_search_paths_start_in_working_directory() {
        let paths = ConfigLoader::search_paths();
        assert_eq!(paths[0], PathBuf::from("medrag.toml"));
        assert!(paths.len() >= DEFAULT_CONFIG_FILES.len());
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.toml");
        let second = dir.path().join("b.json");
        std::fs::File::create(&first)
            .unwrap()
            .write_all(b"[memory]\nmax_history = 2\n")
            .unwrap();
        std::fs::File::create(&second)
            .unwrap()
            .write_all(b"{\"memory\": {\"max_history\": 7}}")
            .unwrap();

        let mut loader = ConfigLoader::new();
        loader.load_first_of([dir.path().join("missing.toml"), first.clone(), second]);

        assert_eq!(loader.sources(), &[first]);
        assert_eq!(loader.extract().unwrap().memory.max_history, 2);
    }

    #[test]
    fn test_rejected_file_is_not_a_source() {
        let mut loader = ConfigLoader::new();
        assert!(loader.load_file("/definitely/not/here.yaml").is_err());
        assert!(loader.sources().is_empty());
    }
}
