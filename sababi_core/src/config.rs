use crate::composer::Composer;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Seed value that asks for OS-entropy seeding instead of a fixed seed.
pub const RANDOM_SEED_SENTINEL: i64 = -1;

/// Configuration problems. All of them abort a run before anything is written.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse TOML from config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("No output directory configured")]
    MissingOutDir,

    #[error("Output directory does not exist: {0:?}")]
    OutDirNotFound(PathBuf),

    #[error("Number of instances must be positive")]
    NoInstances,

    #[error("Seed must be non-negative or -1, got {0}")]
    InvalidSeed(i64),

    #[error("Invalid {name} range: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Programs must draw at least one fragment")]
    EmptyProgram,

    #[error("A program may need {required} variable names but max-vars is {available}")]
    NameBudget { required: usize, available: usize },
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ComposerConfig {
    #[serde(default = "default_min_examples")]
    pub min_examples: usize,
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
    #[serde(default = "default_min_dummies")]
    pub min_dummies: usize,
    #[serde(default = "default_max_dummies")]
    pub max_dummies: usize,
    /// Size of the per-program variable pool.
    #[serde(default = "default_max_vars")]
    pub max_vars: usize,
}

fn default_min_examples() -> usize {
    1
}
fn default_max_examples() -> usize {
    2
}
fn default_min_dummies() -> usize {
    1
}
fn default_max_dummies() -> usize {
    2
}
fn default_max_vars() -> usize {
    20
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            min_examples: default_min_examples(),
            max_examples: default_max_examples(),
            min_dummies: default_min_dummies(),
            max_dummies: default_max_dummies(),
            max_vars: default_max_vars(),
        }
    }
}

impl ComposerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, min, max) in [
            ("examples", self.min_examples, self.max_examples),
            ("dummies", self.min_dummies, self.max_dummies),
        ] {
            if min > max {
                return Err(ConfigError::InvertedRange { name, min, max });
            }
        }
        if self.max_examples + self.max_dummies == 0 {
            return Err(ConfigError::EmptyProgram);
        }
        let required = Composer::new(self.clone()).worst_case_names();
        if required >= self.max_vars {
            return Err(ConfigError::NameBudget {
                required,
                available: self.max_vars,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Directory the `.c` files are written to. Must already exist.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default = "default_num_instances")]
    pub num_instances: usize,
    #[serde(default)]
    pub seed: i64,
    #[serde(default)]
    pub metadata_file: Option<PathBuf>,
    /// Render labels as trailing `// <LABEL>` comments.
    #[serde(default = "default_inline_labels")]
    pub inline_labels: bool,
    /// Give up after this many rejected attempts in a row.
    #[serde(default = "default_max_consecutive_rejects")]
    pub max_consecutive_rejects: u64,
}

pub fn default_num_instances() -> usize {
    50
}
fn default_inline_labels() -> bool {
    true
}
pub fn default_max_consecutive_rejects() -> u64 {
    10_000
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            out_dir: None,
            num_instances: default_num_instances(),
            seed: 0,
            metadata_file: None,
            inline_labels: default_inline_labels(),
            max_consecutive_rejects: default_max_consecutive_rejects(),
        }
    }
}

impl GeneratorSettings {
    /// The run's random generator: fixed-seeded, or OS-seeded for the sentinel.
    pub fn build_rng(&self) -> Result<ChaCha8Rng, ConfigError> {
        match self.seed {
            RANDOM_SEED_SENTINEL => Ok(ChaCha8Rng::from_rng(&mut rand::rng())),
            seed if seed >= 0 => Ok(ChaCha8Rng::seed_from_u64(seed as u64)),
            seed => Err(ConfigError::InvalidSeed(seed)),
        }
    }

    pub fn validate(&self) -> Result<&Path, ConfigError> {
        let out_dir = self.out_dir.as_deref().ok_or(ConfigError::MissingOutDir)?;
        if !out_dir.is_dir() {
            return Err(ConfigError::OutDirNotFound(out_dir.to_path_buf()));
        }
        if self.num_instances == 0 {
            return Err(ConfigError::NoInstances);
        }
        if self.seed < RANDOM_SEED_SENTINEL {
            return Err(ConfigError::InvalidSeed(self.seed));
        }
        Ok(out_dir)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SababiConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub composer: ComposerConfig,
}

impl SababiConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.composer.validate()
    }
}
