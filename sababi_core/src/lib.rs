pub mod annotate;
pub mod assembler;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod corpus;
pub mod fragment;
pub mod generator;
pub mod label;
pub mod pool;
pub mod template;

pub use annotate::{AnnotateError, annotate_corpus, annotate_from_metadata_file};
pub use assembler::{Instance, ProgramAssembler, RenderError};
pub use composer::{ComposeError, ComposedBody, Composer};
pub use config::{ComposerConfig, ConfigError, GeneratorSettings, SababiConfig};
pub use corpus::{
    CorpusError, CorpusMetadata, CorpusWriter, DirectorySink, InMemorySink, InstanceSink, Offer,
    RunSummary, generate_corpus,
};
pub use fragment::{Fragment, LineGroup};
pub use generator::{FragmentGenerator, GenerateError, GeneratorKind, default_generators};
pub use label::Label;
pub use pool::{PoolError, VariablePool};
pub use template::{Bindings, LineTemplate, TemplateError};
