use crate::config::ComposerConfig;
use crate::fragment::Fragment;
use crate::generator::{FragmentGenerator, GenerateError, GeneratorKind, default_generators};
use crate::label::Label;
use crate::pool::VariablePool;
use rand::Rng;
use rand_core::RngCore;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    /// A draw was requested but no generator of the needed kind is registered.
    #[error("No {0:?} generator available to draw from")]
    NoCandidates(GeneratorKind),

    #[error("Invalid {name} range: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Fragment generation failed: {0}")]
    Generate(#[from] GenerateError),
}

/// The interleaved body of one program, before the function skeleton is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedBody {
    pub lines: Vec<String>,
    pub labels: Vec<Label>,
    /// Names of the generators that contributed, in draw order.
    pub generators: Vec<&'static str>,
}

/// Chooses fragment generators for a program and merges their output.
pub struct Composer {
    settings: ComposerConfig,
    exclusive: Vec<Box<dyn FragmentGenerator>>,
    examples: Vec<Box<dyn FragmentGenerator>>,
    dummies: Vec<Box<dyn FragmentGenerator>>,
}

impl Composer {
    /// A composer over the full built-in generator set.
    ///
    /// `settings` is taken as given; `ComposerConfig::validate` checks the name
    /// budget, and inverted draw ranges are reported by `draw_fragments`.
    pub fn new(settings: ComposerConfig) -> Self {
        Self::with_generators(settings, default_generators())
    }

    pub fn with_generators(
        settings: ComposerConfig,
        generators: Vec<Box<dyn FragmentGenerator>>,
    ) -> Self {
        let mut composer = Self {
            settings,
            exclusive: Vec::new(),
            examples: Vec::new(),
            dummies: Vec::new(),
        };
        for generator in generators {
            match generator.kind() {
                GeneratorKind::MutexExclusive => composer.exclusive.push(generator),
                GeneratorKind::Example => composer.examples.push(generator),
                GeneratorKind::Dummy => composer.dummies.push(generator),
            }
        }
        composer
    }

    /// Most names a single program can consume with the configured bounds.
    pub fn worst_case_names(&self) -> usize {
        let most = |set: &[Box<dyn FragmentGenerator>]| {
            set.iter().map(|g| g.names_required()).max().unwrap_or(0)
        };
        let example_draws = self.settings.max_examples;
        let plain = most(&self.examples);
        let with_exclusive = if example_draws > 0 && !self.exclusive.is_empty() {
            most(&self.exclusive) + (example_draws - 1) * plain
        } else {
            0
        };
        let examples = with_exclusive.max(example_draws * plain);
        examples + self.settings.max_dummies * most(&self.dummies)
    }

    /// Draws and runs the example and dummy generators for one program.
    ///
    /// Once a mutex-exclusive generator has been drawn, the remaining example
    /// draws only consider the non-exclusive set.
    ///
    /// # Arguments
    /// * `pool`: The program's variable pool; every generator draws its names here.
    /// * `rng`: The run's random number generator.
    ///
    /// # Returns
    /// `Result<Vec<(&'static str, Fragment)>, ComposeError>`:
    ///   - `Ok(fragments)`: Generator names paired with their fragments, in draw order.
    ///   - `Err(ComposeError::InvertedRange)`: If a min/max bound pair is inverted.
    ///   - `Err(error)`: If a needed generator kind is missing or a generator fails.
    pub fn draw_fragments(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<(&'static str, Fragment)>, ComposeError> {
        for (name, min, max) in [
            ("examples", self.settings.min_examples, self.settings.max_examples),
            ("dummies", self.settings.min_dummies, self.settings.max_dummies),
        ] {
            if min > max {
                return Err(ComposeError::InvertedRange { name, min, max });
            }
        }
        let num_examples = rng.random_range(self.settings.min_examples..=self.settings.max_examples);
        let num_dummies = rng.random_range(self.settings.min_dummies..=self.settings.max_dummies);
        let mut fragments = Vec::with_capacity(num_examples + num_dummies);

        let mut exclusive_chosen = false;
        for _ in 0..num_examples {
            let exclusive_count = if exclusive_chosen { 0 } else { self.exclusive.len() };
            let candidates = exclusive_count + self.examples.len();
            if candidates == 0 {
                return Err(ComposeError::NoCandidates(GeneratorKind::Example));
            }
            let index = rng.random_range(0..candidates);
            let generator = if index < exclusive_count {
                exclusive_chosen = true;
                &self.exclusive[index]
            } else {
                &self.examples[index - exclusive_count]
            };
            fragments.push((generator.name(), generator.generate(pool, rng)?));
        }

        for _ in 0..num_dummies {
            if self.dummies.is_empty() {
                return Err(ComposeError::NoCandidates(GeneratorKind::Dummy));
            }
            let generator = &self.dummies[rng.random_range(0..self.dummies.len())];
            fragments.push((generator.name(), generator.generate(pool, rng)?));
        }
        Ok(fragments)
    }

    /// Generates one program body: a fresh pool, a fresh draw of fragments,
    /// then a random order-preserving merge.
    pub fn compose(&self, rng: &mut dyn RngCore) -> Result<ComposedBody, ComposeError> {
        let mut pool = VariablePool::new(self.settings.max_vars, rng);
        let drawn = self.draw_fragments(&mut pool, rng)?;
        trace!(
            remaining_names = pool.remaining(),
            fragments = drawn.len(),
            "Fragments drawn"
        );

        let (generators, fragments): (Vec<&'static str>, Vec<Fragment>) = drawn.into_iter().unzip();
        let (lines, labels) = interleave(&fragments, rng);
        Ok(ComposedBody {
            lines,
            labels,
            generators,
        })
    }
}

/// Randomly merges fragments at line-group granularity.
///
/// Each fragment keeps a cursor to its next unconsumed group. Every step picks
/// one unfinished fragment uniformly and emits the group under its cursor, so
/// groups stay contiguous and each fragment's group order is preserved.
pub fn interleave(fragments: &[Fragment], rng: &mut dyn RngCore) -> (Vec<String>, Vec<Label>) {
    let total: usize = fragments.iter().map(Fragment::line_count).sum();
    let mut lines = Vec::with_capacity(total);
    let mut labels = Vec::with_capacity(total);

    // (fragment index, next group index)
    let mut cursors: Vec<(usize, usize)> = fragments
        .iter()
        .enumerate()
        .filter(|(_, fragment)| !fragment.is_empty())
        .map(|(index, _)| (index, 0))
        .collect();

    while !cursors.is_empty() {
        let pick = rng.random_range(0..cursors.len());
        let (fragment_index, group_index) = cursors[pick];
        let groups = fragments[fragment_index].groups();
        for (line, label) in groups[group_index].entries() {
            lines.push(line.clone());
            labels.push(*label);
        }
        if group_index + 1 == groups.len() {
            cursors.remove(pick);
        } else {
            cursors[pick].1 = group_index + 1;
        }
    }
    (lines, labels)
}
