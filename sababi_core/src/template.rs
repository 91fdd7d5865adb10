use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while binding a [`LineTemplate`].
///
/// Both variants mean the catalog and the generator that uses it disagree; they
/// are never expected from a correct configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Placeholder '${hole}' in template {template:?} has no bound value")]
    Unbound { hole: String, template: &'static str },

    #[error("Template {template:?} has a '$' at byte {offset} that does not start a placeholder")]
    Malformed { template: &'static str, offset: usize },
}

/// One piece of a parsed template: literal text or a named hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Hole(&'a str),
}

/// A single source line with `$name` holes.
///
/// Hole names are runs of ASCII alphanumerics and `_` directly after the `$`, so
/// `$_var` and `$var` are distinct holes and `$var++` is the hole `var` followed
/// by `++`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineTemplate(&'static str);

impl LineTemplate {
    pub const fn new(source: &'static str) -> Self {
        Self(source)
    }

    fn segments(&self) -> Result<Vec<Segment<'static>>, TemplateError> {
        let source = self.0;
        let bytes = source.as_bytes();
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut cursor = 0;

        while cursor < bytes.len() {
            if bytes[cursor] != b'$' {
                cursor += 1;
                continue;
            }
            let name_start = cursor + 1;
            let name_end = bytes[name_start..]
                .iter()
                .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))
                .map_or(bytes.len(), |len| name_start + len);
            if name_end == name_start {
                return Err(TemplateError::Malformed {
                    template: source,
                    offset: cursor,
                });
            }
            if text_start < cursor {
                segments.push(Segment::Text(&source[text_start..cursor]));
            }
            segments.push(Segment::Hole(&source[name_start..name_end]));
            cursor = name_end;
            text_start = name_end;
        }
        if text_start < bytes.len() {
            segments.push(Segment::Text(&source[text_start..]));
        }
        Ok(segments)
    }

    /// Names of every hole this template requires, in first-use order.
    pub fn holes(&self) -> Result<Vec<&'static str>, TemplateError> {
        let mut holes = Vec::new();
        for segment in self.segments()? {
            if let Segment::Hole(name) = segment {
                if !holes.contains(&name) {
                    holes.push(name);
                }
            }
        }
        Ok(holes)
    }

    /// Substitutes every hole from `bindings`. Bindings the template does not
    /// mention are ignored; a hole without a binding is an error.
    pub fn bind(&self, bindings: &Bindings) -> Result<String, TemplateError> {
        let mut line = String::with_capacity(self.0.len() + 16);
        for segment in self.segments()? {
            match segment {
                Segment::Text(text) => line.push_str(text),
                Segment::Hole(name) => {
                    let value = bindings.get(name).ok_or_else(|| TemplateError::Unbound {
                        hole: name.to_string(),
                        template: self.0,
                    })?;
                    line.push_str(value);
                }
            }
        }
        Ok(line)
    }
}

impl fmt::Display for LineTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Values for template holes, keyed by hole name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<&'static str, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hole: &'static str, value: impl fmt::Display) -> Self {
        self.values.insert(hole, value.to_string());
        self
    }

    pub fn get(&self, hole: &str) -> Option<&str> {
        self.values.get(hole).map(String::as_str)
    }
}
