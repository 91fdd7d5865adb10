use crate::assembler::{RenderError, annotate};
use crate::corpus::{CorpusError, CorpusMetadata};
use crate::label::Label;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Failed to load metadata: {0}")]
    Metadata(#[from] CorpusError),

    #[error("Target directory does not exist: {0:?}")]
    TargetNotFound(PathBuf),

    #[error("Failed to read {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {path:?}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("{file}: {source}")]
    Render {
        file: String,
        #[source]
        source: RenderError,
    },
}

/// Drops a trailing ` // <LABEL>` comment if it matches `label`.
fn strip_label<'a>(line: &'a str, label: Label) -> &'a str {
    let suffix = format!("// {label}");
    match line.strip_suffix(suffix.as_str()) {
        Some(code) => code.trim_end(),
        None => line,
    }
}

/// Renders `text` with one ` // <LABEL>` comment per line.
///
/// Lines that already carry their own label are re-aligned rather than
/// annotated twice, so already-labeled corpora pass through unchanged.
pub fn relabel(text: &str, labels: &[Label]) -> Result<String, RenderError> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() != labels.len() {
        return Err(RenderError::LabelCountMismatch {
            lines: lines.len(),
            labels: labels.len(),
        });
    }
    let bare: Vec<&str> = lines
        .iter()
        .zip(labels)
        .map(|(line, label)| strip_label(line, *label))
        .collect();
    annotate(&bare.join("\n"), labels)
}

/// Writes a labeled copy of every file listed in `metadata` into `out_dir`.
///
/// Sources are read from the metadata's `working_dir`. Returns the number of
/// files written.
pub fn annotate_corpus(metadata: &CorpusMetadata, out_dir: &Path) -> Result<usize, AnnotateError> {
    if !out_dir.is_dir() {
        return Err(AnnotateError::TargetNotFound(out_dir.to_path_buf()));
    }
    let mut written = 0;
    for (filename, labels) in &metadata.tags {
        let source = metadata.working_dir.join(filename);
        let text = fs::read_to_string(&source).map_err(|e| AnnotateError::Read {
            path: source.clone(),
            message: e.to_string(),
        })?;
        let annotated = relabel(&text, labels).map_err(|err| AnnotateError::Render {
            file: filename.clone(),
            source: err,
        })?;

        let target = out_dir.join(filename);
        fs::write(&target, annotated).map_err(|e| AnnotateError::Write {
            path: target.clone(),
            message: e.to_string(),
        })?;
        debug!(file = %filename, lines = labels.len(), "Annotated");
        written += 1;
    }
    info!(written, out_dir = ?out_dir, "Annotation finished");
    Ok(written)
}

/// Loads a metadata record and annotates the corpus it describes.
pub fn annotate_from_metadata_file(metadata_file: &Path, out_dir: &Path) -> Result<usize, AnnotateError> {
    let metadata = CorpusMetadata::load(metadata_file)?;
    annotate_corpus(&metadata, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn metadata(dir: &Path, tags: &[(&str, Vec<Label>)]) -> CorpusMetadata {
        CorpusMetadata {
            working_dir: dir.to_path_buf(),
            num_instances: tags.len(),
            tags: tags
                .iter()
                .map(|(name, labels)| (name.to_string(), labels.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn annotates_every_listed_file() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join("a.c"), "int x;\nstrcpy(d, s);\n").unwrap();
        fs::write(source.path().join("b.c"), "}").unwrap();

        let meta = metadata(
            source.path(),
            &[
                ("a.c", vec![Label::Body, Label::StrcpyUnsafe]),
                ("b.c", vec![Label::Other]),
            ],
        );
        let metadata_file = source.path().join("meta.json");
        meta.save(&metadata_file).unwrap();

        let written = annotate_from_metadata_file(&metadata_file, target.path()).unwrap();
        assert_eq!(written, 2);

        let a = fs::read_to_string(target.path().join("a.c")).unwrap();
        assert_eq!(a, "int x;        // BODY\nstrcpy(d, s); // STRCPY_UNSAFE");
        let b = fs::read_to_string(target.path().join("b.c")).unwrap();
        assert_eq!(b, "} // OTHER");
    }

    #[test]
    fn relabel_is_idempotent() {
        let labels = [Label::Other, Label::CondSignalSafe];
        let once = relabel("{\npthread_cond_signal(&c);", &labels).unwrap();
        assert_eq!(once, "{                        // OTHER\npthread_cond_signal(&c); // COND_SIGNAL_SAFE");
        assert_eq!(relabel(&once, &labels).unwrap(), once);
    }

    #[test]
    fn foreign_comments_are_kept() {
        let out = relabel("x = 1; // note", &[Label::Body]).unwrap();
        assert_eq!(out, "x = 1; // note // BODY");
    }

    #[test]
    fn label_count_mismatch_names_the_file() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(source.path().join("a.c"), "int x;\nint y;").unwrap();
        let meta = metadata(source.path(), &[("a.c", vec![Label::Body])]);

        match annotate_corpus(&meta, target.path()) {
            Err(AnnotateError::Render { file, source }) => {
                assert_eq!(file, "a.c");
                assert_eq!(source, RenderError::LabelCountMismatch { lines: 2, labels: 1 });
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn missing_inputs_are_reported() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        let meta = metadata(source.path(), &[]);
        assert!(matches!(
            annotate_corpus(&meta, &source.path().join("absent")),
            Err(AnnotateError::TargetNotFound(_))
        ));

        let meta = metadata(source.path(), &[("gone.c", vec![Label::Body])]);
        assert!(matches!(
            annotate_corpus(&meta, target.path()),
            Err(AnnotateError::Read { .. })
        ));

        assert!(matches!(
            annotate_from_metadata_file(&source.path().join("none.json"), target.path()),
            Err(AnnotateError::Metadata(_))
        ));
    }
}
