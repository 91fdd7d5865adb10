use crate::assembler::{Instance, ProgramAssembler, RenderError};
use crate::composer::{ComposeError, Composer};
use crate::config::{ConfigError, SababiConfig};
use crate::label::Label;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of digest bytes used in instance filenames (two hex chars each).
pub const FILENAME_HASH_BYTES: usize = 5;
/// Extension of every generated instance file.
pub const INSTANCE_EXTENSION: &str = "c";

/// Defines errors that can arise while writing a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// An I/O error occurred while writing an instance or the metadata file.
    #[error("Corpus I/O error: {0}")]
    Io(String),

    /// The metadata record could not be encoded.
    #[error("Corpus serialization error: {0}")]
    Serialization(String),

    /// A metadata file could not be decoded.
    #[error("Corpus deserialization error: {0}")]
    Deserialization(String),

    #[error("Output directory does not exist: {0:?}")]
    OutDirNotFound(PathBuf),

    /// Too many attempts in a row produced an already-accepted program.
    #[error(
        "Gave up after {rejects} consecutive duplicate programs with {accepted} of {requested} instances accepted"
    )]
    Exhausted {
        accepted: usize,
        requested: usize,
        rejects: u64,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<std::io::Error> for CorpusError {
    fn from(err: std::io::Error) -> Self {
        CorpusError::Io(err.to_string())
    }
}

/// Short content hash used as an instance's identity and filename stem.
pub fn content_hash(text: &str) -> String {
    md5::compute(text.as_bytes()).0[..FILENAME_HASH_BYTES]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

pub fn instance_filename(text: &str) -> String {
    format!("{}.{INSTANCE_EXTENSION}", content_hash(text))
}

/// The persisted description of a generated corpus.
///
/// `tags` maps every written filename to its label ordinals, line by line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CorpusMetadata {
    pub working_dir: PathBuf,
    pub num_instances: usize,
    pub tags: BTreeMap<String, Vec<Label>>,
}

impl CorpusMetadata {
    pub fn save(&self, path: &Path) -> Result<(), CorpusError> {
        let file = File::create(path).map_err(|e| {
            CorpusError::Io(format!("Failed to create metadata file {:?}: {}", path, e))
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| {
            CorpusError::Serialization(format!(
                "Failed to serialize corpus metadata to {:?}: {}",
                path, e
            ))
        })?;
        writer.flush().map_err(|e| {
            CorpusError::Io(format!("Failed to flush metadata file {:?}: {}", path, e))
        })
    }

    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let file = File::open(path).map_err(|e| {
            CorpusError::Io(format!("Failed to open metadata file {:?}: {}", path, e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CorpusError::Deserialization(format!(
                "Failed to parse metadata file {:?}: {}",
                path, e
            ))
        })
    }
}

/// Destination for accepted instances.
pub trait InstanceSink {
    /// Persists one accepted program.
    ///
    /// # Arguments
    /// * `filename`: The content-derived `<hash>.c` name; never repeats within a run.
    /// * `text`: The rendered program.
    ///
    /// # Returns
    /// `Result<(), CorpusError>`:
    ///   - `Ok(())`: The instance is stored.
    ///   - `Err(CorpusError::Io)`: If the destination could not be written.
    fn store(&mut self, filename: &str, text: &str) -> Result<(), CorpusError>;

    /// Directory recorded as `working_dir` in the metadata.
    fn working_dir(&self) -> PathBuf;
}

/// Writes each instance as its own file in an existing directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Fails if `dir` is missing or not a directory; it is never created here.
    pub fn new(dir: &Path) -> Result<Self, CorpusError> {
        if !dir.is_dir() {
            return Err(CorpusError::OutDirNotFound(dir.to_path_buf()));
        }
        let dir = fs::canonicalize(dir).map_err(|e| {
            CorpusError::Io(format!("Failed to resolve output directory {:?}: {}", dir, e))
        })?;
        Ok(Self { dir })
    }
}

impl InstanceSink for DirectorySink {
    fn store(&mut self, filename: &str, text: &str) -> Result<(), CorpusError> {
        let path = self.dir.join(filename);
        fs::write(&path, text).map_err(|e| {
            CorpusError::Io(format!("Failed to write instance file {:?}: {}", path, e))
        })
    }

    fn working_dir(&self) -> PathBuf {
        self.dir.clone()
    }
}

/// Keeps instances in memory, keyed by filename.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    pub files: BTreeMap<String, String>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InstanceSink for InMemorySink {
    fn store(&mut self, filename: &str, text: &str) -> Result<(), CorpusError> {
        self.files.insert(filename.to_string(), text.to_string());
        Ok(())
    }

    fn working_dir(&self) -> PathBuf {
        PathBuf::new()
    }
}

/// What happened to one generated instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    Accepted(String),
    /// Same text as an accepted instance.
    Duplicate(String),
    /// Different text that maps to an accepted filename. Discarded all the same.
    Collision(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub duplicates: u64,
    pub collisions: u64,
}

/// Generates programs, drops repeats, and stores the rest.
pub struct CorpusWriter<S: InstanceSink> {
    composer: Composer,
    assembler: ProgramAssembler,
    sink: S,
    tags: BTreeMap<String, Vec<Label>>,
    /// Full md5 digest of each accepted text, keyed by filename.
    known_digests: HashMap<String, [u8; 16]>,
    max_consecutive_rejects: u64,
    summary: RunSummary,
}

impl<S: InstanceSink> CorpusWriter<S> {
    pub fn new(composer: Composer, assembler: ProgramAssembler, sink: S) -> Self {
        Self {
            composer,
            assembler,
            sink,
            tags: BTreeMap::new(),
            known_digests: HashMap::new(),
            max_consecutive_rejects: crate::config::default_max_consecutive_rejects(),
            summary: RunSummary::default(),
        }
    }

    pub fn with_max_consecutive_rejects(mut self, limit: u64) -> Self {
        self.max_consecutive_rejects = limit;
        self
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn tags(&self) -> &BTreeMap<String, Vec<Label>> {
        &self.tags
    }

    /// Accepts `instance` unless its filename is already taken.
    pub fn offer(&mut self, instance: Instance) -> Result<Offer, CorpusError> {
        let filename = instance_filename(&instance.text);
        let digest = md5::compute(instance.text.as_bytes()).0;

        if let Some(known) = self.known_digests.get(&filename) {
            if *known == digest {
                self.summary.duplicates += 1;
                debug!(filename = %filename, "Duplicate program discarded");
                return Ok(Offer::Duplicate(filename));
            }
            self.summary.collisions += 1;
            warn!(filename = %filename, "Distinct program hashed to an existing filename, discarded");
            return Ok(Offer::Collision(filename));
        }

        self.sink.store(&filename, &instance.text)?;
        self.known_digests.insert(filename.clone(), digest);
        self.tags.insert(filename.clone(), instance.labels);
        self.summary.accepted += 1;
        debug!(filename = %filename, accepted = self.summary.accepted, "Instance written");
        Ok(Offer::Accepted(filename))
    }

    /// Composes, assembles, and offers one program.
    pub fn generate_one(&mut self, rng: &mut dyn RngCore) -> Result<Offer, CorpusError> {
        let body = self.composer.compose(rng)?;
        let instance = self.assembler.assemble(&body)?;
        self.offer(instance)
    }

    /// Generates until `num_instances` programs have been accepted in total.
    ///
    /// # Arguments
    /// * `num_instances`: Target count of accepted instances, including any
    ///   accepted by earlier calls on this writer.
    /// * `rng`: The run's random number generator.
    ///
    /// # Returns
    /// `Result<RunSummary, CorpusError>`:
    ///   - `Ok(summary)`: Accepted, duplicate and collision counts so far.
    ///   - `Err(CorpusError::Exhausted)`: If `max_consecutive_rejects` attempts in a
    ///     row were rejected before the target was reached.
    ///   - `Err(error)`: If composing, rendering or storing an instance failed.
    pub fn run(&mut self, num_instances: usize, rng: &mut dyn RngCore) -> Result<RunSummary, CorpusError> {
        info!(num_instances, "Generating corpus");
        let mut consecutive_rejects = 0u64;
        while self.summary.accepted < num_instances {
            match self.generate_one(rng)? {
                Offer::Accepted(_) => consecutive_rejects = 0,
                Offer::Duplicate(_) | Offer::Collision(_) => {
                    consecutive_rejects += 1;
                    if consecutive_rejects >= self.max_consecutive_rejects {
                        return Err(CorpusError::Exhausted {
                            accepted: self.summary.accepted,
                            requested: num_instances,
                            rejects: consecutive_rejects,
                        });
                    }
                }
            }
        }
        info!(
            accepted = self.summary.accepted,
            duplicates = self.summary.duplicates,
            collisions = self.summary.collisions,
            "Corpus generated"
        );
        Ok(self.summary)
    }

    pub fn metadata(&self, num_instances: usize) -> CorpusMetadata {
        CorpusMetadata {
            working_dir: self.sink.working_dir(),
            num_instances,
            tags: self.tags.clone(),
        }
    }
}

/// Validates `config`, writes the corpus into its output directory, and saves
/// the metadata record if a path is configured.
pub fn generate_corpus(config: &SababiConfig) -> Result<RunSummary, CorpusError> {
    let settings = &config.generator;
    let out_dir = settings.validate()?;
    config.composer.validate()?;
    let mut rng = settings.build_rng()?;

    let sink = DirectorySink::new(out_dir)?;
    let mut writer = CorpusWriter::new(
        Composer::new(config.composer.clone()),
        ProgramAssembler::new(settings.inline_labels),
        sink,
    )
    .with_max_consecutive_rejects(settings.max_consecutive_rejects);

    let summary = writer.run(settings.num_instances, &mut rng)?;

    if let Some(path) = &settings.metadata_file {
        writer.metadata(settings.num_instances).save(path)?;
        info!(path = ?path, "Metadata written");
    }
    Ok(summary)
}
