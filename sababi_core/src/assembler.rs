use crate::catalog::{BODY_INDENT, FUNCTION_FOOTER, FUNCTION_HEADER};
use crate::composer::ComposedBody;
use crate::label::Label;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// Lines and labels drifted apart somewhere between the generators and the
    /// renderer. Always a bug in label propagation.
    #[error("Rendered program has {lines} lines but {labels} labels")]
    LabelCountMismatch { lines: usize, labels: usize },
}

/// One fully assembled program and its per-line labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub text: String,
    pub labels: Vec<Label>,
}

impl Instance {
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// Wraps an interleaved body in the fixed `main` skeleton.
#[derive(Debug, Clone, Copy)]
pub struct ProgramAssembler {
    inline_labels: bool,
}

impl Default for ProgramAssembler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ProgramAssembler {
    /// `inline_labels` appends ` // <LABEL>` to every rendered line.
    pub fn new(inline_labels: bool) -> Self {
        Self { inline_labels }
    }

    /// Adds the skeleton's labels around the body labels: OTHER for the header,
    /// BODY for `return 0;`, OTHER for the closing brace.
    pub fn full_labels(body_labels: &[Label]) -> Vec<Label> {
        let mut labels = Vec::with_capacity(FUNCTION_HEADER.len() + body_labels.len() + FUNCTION_FOOTER.len());
        labels.extend(FUNCTION_HEADER.iter().map(|_| Label::Other));
        labels.extend_from_slice(body_labels);
        labels.push(Label::Body);
        labels.push(Label::Other);
        labels
    }

    /// Renders the program text. `labels` must cover the whole program, not
    /// just the body.
    pub fn render(&self, body_lines: &[String], labels: &[Label]) -> Result<String, RenderError> {
        let mut lines: Vec<String> = Vec::with_capacity(labels.len());
        lines.extend(FUNCTION_HEADER.iter().map(|l| l.to_string()));
        lines.extend(body_lines.iter().map(|l| format!("{BODY_INDENT}{l}")));
        lines.extend(FUNCTION_FOOTER.iter().map(|l| l.to_string()));

        if lines.len() != labels.len() {
            return Err(RenderError::LabelCountMismatch {
                lines: lines.len(),
                labels: labels.len(),
            });
        }
        let text = lines.join("\n");
        if self.inline_labels {
            annotate(&text, labels)
        } else {
            Ok(text)
        }
    }

    pub fn assemble(&self, body: &ComposedBody) -> Result<Instance, RenderError> {
        let labels = Self::full_labels(&body.labels);
        let text = self.render(&body.lines, &labels)?;
        Ok(Instance { text, labels })
    }
}

/// Pads every line of `text` to the widest line and appends ` // <LABEL>`.
pub fn annotate(text: &str, labels: &[Label]) -> Result<String, RenderError> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() != labels.len() {
        return Err(RenderError::LabelCountMismatch {
            lines: lines.len(),
            labels: labels.len(),
        });
    }
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let annotated: Vec<String> = lines
        .iter()
        .zip(labels)
        .map(|(line, label)| format!("{line:<width$} // {label}"))
        .collect();
    Ok(annotated.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> ComposedBody {
        ComposedBody {
            lines: vec![
                "char *var_1;".to_string(),
                "char var_2[4];".to_string(),
                "strcpy(var_2, var_1);".to_string(),
            ],
            labels: vec![Label::Body, Label::Body, Label::StrcpyUnsafe],
            generators: vec!["strcpy"],
        }
    }

    #[test]
    fn plain_render_wraps_body_in_main() {
        let instance = ProgramAssembler::new(false).assemble(&body()).unwrap();
        let lines: Vec<&str> = instance.text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(instance.labels.len(), 15);
        assert_eq!(instance.line_count(), 15);

        assert_eq!(lines[0], "#include <stdlib.h>");
        assert_eq!(lines[8], "int main()");
        assert_eq!(lines[9], "{");
        assert_eq!(lines[12], "    strcpy(var_2, var_1);");
        assert_eq!(lines[13], "    return 0;");
        assert_eq!(lines[14], "}");

        assert!(instance.labels[..10].iter().all(|l| *l == Label::Other));
        assert_eq!(instance.labels[12], Label::StrcpyUnsafe);
        assert_eq!(instance.labels[13..], [Label::Body, Label::Other]);
    }

    #[test]
    fn inline_labels_are_aligned_comments() {
        let instance = ProgramAssembler::new(true).assemble(&body()).unwrap();
        let lines: Vec<&str> = instance.text.lines().collect();
        assert_eq!(lines.len(), 15);

        let column = lines[0].find(" // ").unwrap();
        for line in &lines {
            assert_eq!(line.find(" // "), Some(column), "misaligned: {line:?}");
        }
        assert!(lines[0].ends_with("// OTHER"));
        assert!(lines[12].starts_with("    strcpy(var_2, var_1);"));
        assert!(lines[12].ends_with("// STRCPY_UNSAFE"));
        assert!(lines[13].ends_with("// BODY"));
    }

    #[test]
    fn mismatched_labels_fail_to_render() {
        let assembler = ProgramAssembler::new(true);
        let mut labels = ProgramAssembler::full_labels(&[Label::Body]);
        labels.push(Label::Body);
        let err = assembler
            .render(&["int var_0;".to_string()], &labels)
            .unwrap_err();
        assert_eq!(err, RenderError::LabelCountMismatch { lines: 13, labels: 14 });

        assert_eq!(
            annotate("a\nb", &[Label::Body]).unwrap_err(),
            RenderError::LabelCountMismatch { lines: 2, labels: 1 }
        );
    }
}
