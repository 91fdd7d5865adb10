use crate::label::Label;

/// Lines that must stay contiguous and in order through interleaving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    lines: Vec<(String, Label)>,
}

impl LineGroup {
    /// Builds a group from already-bound lines. Returns `None` for an empty group.
    pub fn new(lines: Vec<(String, Label)>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Self { lines })
        }
    }

    pub fn single(line: String, label: Label) -> Self {
        Self {
            lines: vec![(line, label)],
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|(line, _)| line.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.lines.iter().map(|(_, label)| *label)
    }

    pub fn entries(&self) -> &[(String, Label)] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Output of one generator invocation: an ordered list of [`LineGroup`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    groups: Vec<LineGroup>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// One group per line, the common case for straight-line patterns.
    pub fn from_lines(lines: impl IntoIterator<Item = (String, Label)>) -> Self {
        Self {
            groups: lines
                .into_iter()
                .map(|(line, label)| LineGroup::single(line, label))
                .collect(),
        }
    }

    pub fn push(&mut self, group: LineGroup) {
        self.groups.push(group);
    }

    pub fn push_line(&mut self, line: String, label: Label) {
        self.groups.push(LineGroup::single(line, label));
    }

    pub fn groups(&self) -> &[LineGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.groups.iter().map(LineGroup::len).sum()
    }

    /// All lines in fragment order, ignoring group boundaries.
    pub fn flat_lines(&self) -> Vec<&str> {
        self.groups.iter().flat_map(LineGroup::lines).collect()
    }

    pub fn flat_labels(&self) -> Vec<Label> {
        self.groups.iter().flat_map(LineGroup::labels).collect()
    }
}
