use crate::catalog::{self, LOCK_LINE, MAX_INT, SIGNAL_LINE, UNLOCK_LINE};
use crate::fragment::{Fragment, LineGroup};
use crate::label::Label;
use crate::pool::{PoolError, VariablePool};
use crate::template::{Bindings, LineTemplate, TemplateError};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_core::RngCore;
use thiserror::Error;

/// Errors that abort a generator invocation. Both are configuration bugs and
/// are never retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Generator could not draw a variable name: {0}")]
    Pool(#[from] PoolError),

    #[error("Generator could not bind a template: {0}")]
    Template(#[from] TemplateError),
}

/// How the composer treats a generator when choosing fragments for a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Stateful lock/condition patterns; at most one per program.
    MutexExclusive,
    /// Defect patterns that may appear any number of times.
    Example,
    /// Noise that only ever produces BODY lines.
    Dummy,
}

/// A `FragmentGenerator` produces one self-contained pattern instance.
///
/// Every random decision is drawn from `rng` and every identifier from `pool`,
/// so a generator is a pure function of those two inputs.
pub trait FragmentGenerator: Send + Sync {
    /// Short family name, used in logs.
    fn name(&self) -> &'static str;

    fn kind(&self) -> GeneratorKind;

    /// Number of names this generator pops from the pool per invocation.
    fn names_required(&self) -> usize;

    /// Produces one fragment of this generator's pattern.
    ///
    /// # Arguments
    /// * `pool`: The program's variable pool. Exactly `names_required()` names
    ///   are popped from it.
    /// * `rng`: The run's random number generator; it drives every choice of
    ///   skeleton, ordering, branch and integer constant.
    ///
    /// # Returns
    /// `Result<Fragment, GenerateError>`:
    ///   - `Ok(fragment)`: The labeled line groups, in emission order.
    ///   - `Err(error)`: If the pool ran dry or a template hole had no value.
    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError>;
}

fn random_int(rng: &mut dyn RngCore) -> u32 {
    rng.random_range(0..=MAX_INT)
}

fn pick<T: Copy>(items: &[T], rng: &mut dyn RngCore) -> T {
    items[rng.random_range(0..items.len())]
}

/// Binds each line and places it in its own group.
fn bind_lines(
    lines: impl IntoIterator<Item = (LineTemplate, Label)>,
    bindings: &Bindings,
) -> Result<Fragment, GenerateError> {
    let mut fragment = Fragment::new();
    for (template, label) in lines {
        fragment.push_line(template.bind(bindings)?, label);
    }
    Ok(fragment)
}

/// Binds all lines into a single group.
fn bind_group(
    lines: impl IntoIterator<Item = (LineTemplate, Label)>,
    bindings: &Bindings,
) -> Result<Option<LineGroup>, GenerateError> {
    let mut bound = Vec::new();
    for (template, label) in lines {
        bound.push((template.bind(bindings)?, label));
    }
    Ok(LineGroup::new(bound))
}

fn shuffled<const N: usize>(templates: [LineTemplate; N], rng: &mut dyn RngCore) -> [LineTemplate; N] {
    let mut templates = templates;
    templates.shuffle(rng);
    templates
}

fn body(templates: impl IntoIterator<Item = LineTemplate>) -> impl Iterator<Item = (LineTemplate, Label)> {
    templates.into_iter().map(|t| (t, Label::Body))
}

/// Labels a permuted `[lock, mutation, unlock]` critical section.
///
/// Only the arrangement with the mutation enclosed between lock and unlock is
/// safe. Any other arrangement marks every non-lock/unlock line unsafe.
pub fn race_section_labels(section: &[LineTemplate; 3]) -> [Label; 3] {
    if section[0] == LOCK_LINE && section[2] == UNLOCK_LINE {
        return [Label::Body, Label::RaceCondSafe, Label::Body];
    }
    (*section).map(|line| {
        if line == LOCK_LINE || line == UNLOCK_LINE {
            Label::Body
        } else {
            Label::RaceCondUnsafe
        }
    })
}

/// Labels a permuted `[lock, signal, unlock]` sequence. The signal is safe only
/// in catalog order; lock and unlock are always BODY.
pub fn signal_section_labels(section: &[LineTemplate; 3]) -> [Label; 3] {
    let in_order = *section == [LOCK_LINE, SIGNAL_LINE, UNLOCK_LINE];
    (*section).map(|line| match (line == SIGNAL_LINE, in_order) {
        (true, true) => Label::CondSignalSafe,
        (true, false) => Label::CondSignalUnsafe,
        (false, _) => Label::Body,
    })
}

/// Allocate, free, and dereference either before the free (safe) or after it
/// (use-after-free).
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryManagementExample;

impl FragmentGenerator for MemoryManagementExample {
    fn name(&self) -> &'static str {
        "memory-management"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Example
    }

    fn names_required(&self) -> usize {
        1
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new()
            .with("ptr_var", pool.pop()?)
            .with("int_num", random_int(rng));
        let skeleton = pick(&catalog::MEMORY_MANAGEMENT_SKELETONS, rng);

        let mut lines: Vec<(LineTemplate, Label)> = body(skeleton.setup.iter().copied()).collect();
        if rng.random_bool(0.5) {
            lines.push((catalog::PTR_ACCESS_LINE, Label::MemoryManagementSafe));
            lines.push((skeleton.free, Label::Body));
        } else {
            lines.push((skeleton.free, Label::Body));
            lines.push((catalog::PTR_ACCESS_LINE, Label::MemoryManagementUnsafe));
        }
        bind_lines(lines, &bindings)
    }
}

/// Shared counter mutated inside a randomly permuted lock/unlock pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct RaceConditionExample;

impl FragmentGenerator for RaceConditionExample {
    fn name(&self) -> &'static str {
        "race-condition"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::MutexExclusive
    }

    fn names_required(&self) -> usize {
        2
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new()
            .with("int_var", pool.pop()?)
            .with("mutex_var", pool.pop()?)
            .with("init_num", random_int(rng))
            .with("int_num", random_int(rng));

        let mutation = pick(&catalog::VAR_OP_LINES, rng);
        let section = shuffled([LOCK_LINE, mutation, UNLOCK_LINE], rng);
        let labels = race_section_labels(&section);
        let declarations = shuffled(catalog::RACE_COND_DEC_LINES, rng);

        bind_lines(
            body(declarations).chain(section.into_iter().zip(labels)),
            &bindings,
        )
    }
}

/// Lock, mutate, wait on a condition, unlock. The wait is guarded by `while`
/// (safe) or `if` (unsafe).
#[derive(Debug, Default, Clone, Copy)]
pub struct CondWaitExample;

impl FragmentGenerator for CondWaitExample {
    fn name(&self) -> &'static str {
        "cond-wait"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::MutexExclusive
    }

    fn names_required(&self) -> usize {
        4
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new()
            .with("int_var", pool.pop()?)
            .with("ok_var", pool.pop()?)
            .with("mutex_var", pool.pop()?)
            .with("cond_var", pool.pop()?)
            .with("init_num", random_int(rng))
            .with("int_num", random_int(rng));

        let mutation = pick(&catalog::VAR_OP_LINES, rng);
        let (guard, wait_label) = if rng.random_bool(0.5) {
            (catalog::WAIT_WHILE_LINES, Label::CondWaitSafe)
        } else {
            (catalog::WAIT_IF_LINES, Label::CondWaitUnsafe)
        };
        let declarations = shuffled(catalog::COND_WAIT_DEC_LINES, rng);

        let mut fragment = bind_lines(
            body(declarations).chain(body([LOCK_LINE, mutation])),
            &bindings,
        )?;
        let wait_group = bind_group(
            guard.into_iter().zip([Label::Body, wait_label, Label::Body]),
            &bindings,
        )?;
        if let Some(group) = wait_group {
            fragment.push(group);
        }
        fragment.push_line(UNLOCK_LINE.bind(&bindings)?, Label::Body);
        Ok(fragment)
    }
}

/// Signal a condition variable from a randomly permuted lock/unlock pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct CondSignalExample;

impl FragmentGenerator for CondSignalExample {
    fn name(&self) -> &'static str {
        "cond-signal"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::MutexExclusive
    }

    fn names_required(&self) -> usize {
        2
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new()
            .with("mutex_var", pool.pop()?)
            .with("cond_var", pool.pop()?);

        let section = shuffled([LOCK_LINE, SIGNAL_LINE, UNLOCK_LINE], rng);
        let labels = signal_section_labels(&section);
        let declarations = shuffled(catalog::COND_SIGNAL_DEC_LINES, rng);

        bind_lines(
            body(declarations).chain(section.into_iter().zip(labels)),
            &bindings,
        )
    }
}

/// Copy into a fixed-size buffer with `strcpy` (unsafe) or `strncpy` (safe).
#[derive(Debug, Default, Clone, Copy)]
pub struct StrcpyExample;

impl FragmentGenerator for StrcpyExample {
    fn name(&self) -> &'static str {
        "strcpy"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Example
    }

    fn names_required(&self) -> usize {
        2
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new()
            .with("str_var1", pool.pop()?)
            .with("str_var2", pool.pop()?)
            .with("int_num", random_int(rng));

        let declarations = shuffled(catalog::STRCPY_DEC_LINES, rng);
        let copy = if rng.random_bool(0.5) {
            (catalog::STRCPY_UNCHECKED_LINE, Label::StrcpyUnsafe)
        } else {
            (catalog::STRCPY_BOUNDED_LINE, Label::StrcpySafe)
        };
        bind_lines(body(declarations).chain([copy]), &bindings)
    }
}

/// An allocate/free skeleton without any dereference.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryDummy;

impl FragmentGenerator for MemoryDummy {
    fn name(&self) -> &'static str {
        "memory-dummy"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dummy
    }

    fn names_required(&self) -> usize {
        1
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new().with("ptr_var", pool.pop()?);
        let skeleton = pick(&catalog::MEMORY_MANAGEMENT_SKELETONS, rng);
        bind_lines(
            body(skeleton.setup.iter().copied().chain([skeleton.free])),
            &bindings,
        )
    }
}

/// A declaration followed by a for/while/if block that assigns to it.
///
/// The declaration and the block are separate groups so the declaration can be
/// interleaved independently of the block.
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlFlowDummy;

impl FragmentGenerator for ControlFlowDummy {
    fn name(&self) -> &'static str {
        "control-flow-dummy"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dummy
    }

    fn names_required(&self) -> usize {
        2
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        // Two distinct bounds from [0, MAX_INT), lower one first.
        let first = rng.random_range(0..MAX_INT);
        let mut second = rng.random_range(0..MAX_INT - 1);
        if second >= first {
            second += 1;
        }
        let (init_num, int_num) = (first.min(second), first.max(second));

        let bindings = Bindings::new()
            .with("var", pool.pop()?)
            .with("_var", pool.pop()?)
            .with("init_num", init_num)
            .with("int_num", int_num)
            .with("op", pick(&catalog::RELATIONAL_OPS, rng))
            .with("_num", random_int(rng));

        let block = pick(&catalog::CONTROL_FLOW_BLOCKS, rng);

        let mut fragment = bind_lines(body([catalog::CONTROL_FLOW_DEC_LINE]), &bindings)?;
        if let Some(group) = bind_group(body(block.iter().copied()), &bindings)? {
            fragment.push(group);
        }
        Ok(fragment)
    }
}

/// A single `int` declaration.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdinaryDummy;

impl FragmentGenerator for OrdinaryDummy {
    fn name(&self) -> &'static str {
        "ordinary-dummy"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dummy
    }

    fn names_required(&self) -> usize {
        1
    }

    fn generate(
        &self,
        pool: &mut VariablePool,
        rng: &mut dyn RngCore,
    ) -> Result<Fragment, GenerateError> {
        let bindings = Bindings::new()
            .with("var", pool.pop()?)
            .with("init_num", rng.random_range(0..MAX_INT));
        let line = pick(&catalog::ORDINARY_LINES, rng);
        bind_lines(body([line]), &bindings)
    }
}

/// Every generator the composer draws from, in a fixed order.
pub fn default_generators() -> Vec<Box<dyn FragmentGenerator>> {
    vec![
        Box::new(RaceConditionExample),
        Box::new(CondWaitExample),
        Box::new(CondSignalExample),
        Box::new(MemoryManagementExample),
        Box::new(StrcpyExample),
        Box::new(MemoryDummy),
        Box::new(ControlFlowDummy),
        Box::new(OrdinaryDummy),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VAR_OP_LINES;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    const RUNS: u64 = 200;

    fn run(generator: &dyn FragmentGenerator, seed: u64) -> Fragment {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pool = VariablePool::new(20, &mut rng);
        let before = pool.remaining();
        let fragment = generator.generate(&mut pool, &mut rng).unwrap();
        assert_eq!(
            before - pool.remaining(),
            generator.names_required(),
            "{} popped an unexpected number of names",
            generator.name()
        );
        fragment
    }

    fn position(lines: &[&str], prefix: &str) -> Option<usize> {
        lines.iter().position(|l| l.starts_with(prefix))
    }

    #[test]
    fn race_labels_for_enclosed_mutation() {
        let section = [LOCK_LINE, VAR_OP_LINES[0], UNLOCK_LINE];
        assert_eq!(
            race_section_labels(&section),
            [Label::Body, Label::RaceCondSafe, Label::Body]
        );
    }

    #[test]
    fn race_labels_for_mutation_before_lock() {
        let section = [VAR_OP_LINES[4], LOCK_LINE, UNLOCK_LINE];
        assert_eq!(
            race_section_labels(&section),
            [Label::RaceCondUnsafe, Label::Body, Label::Body]
        );
    }

    #[test]
    fn race_labels_for_every_other_permutation_are_unsafe() {
        let m = VAR_OP_LINES[2];
        for section in [
            [LOCK_LINE, UNLOCK_LINE, m],
            [UNLOCK_LINE, m, LOCK_LINE],
            [UNLOCK_LINE, LOCK_LINE, m],
            [m, UNLOCK_LINE, LOCK_LINE],
        ] {
            let labels = race_section_labels(&section);
            for (line, label) in section.iter().zip(labels) {
                let expected = if *line == m {
                    Label::RaceCondUnsafe
                } else {
                    Label::Body
                };
                assert_eq!(label, expected, "section {section:?}");
            }
        }
    }

    #[test]
    fn signal_is_safe_only_in_catalog_order() {
        let permutations = [
            [LOCK_LINE, SIGNAL_LINE, UNLOCK_LINE],
            [LOCK_LINE, UNLOCK_LINE, SIGNAL_LINE],
            [SIGNAL_LINE, LOCK_LINE, UNLOCK_LINE],
            [SIGNAL_LINE, UNLOCK_LINE, LOCK_LINE],
            [UNLOCK_LINE, LOCK_LINE, SIGNAL_LINE],
            [UNLOCK_LINE, SIGNAL_LINE, LOCK_LINE],
        ];
        for (index, section) in permutations.iter().enumerate() {
            let labels = signal_section_labels(section);
            for (line, label) in section.iter().zip(labels) {
                let expected = match (*line == SIGNAL_LINE, index == 0) {
                    (true, true) => Label::CondSignalSafe,
                    (true, false) => Label::CondSignalUnsafe,
                    (false, _) => Label::Body,
                };
                assert_eq!(label, expected, "{section:?}");
            }
        }
    }

    #[test]
    fn signal_fragment_labels_follow_section_order() {
        let mut saw_safe = false;
        let mut saw_unsafe = false;
        for seed in 0..RUNS {
            let fragment = run(&CondSignalExample, seed);
            let lines = fragment.flat_lines();
            let labels = fragment.flat_labels();
            assert_eq!(lines.len(), 5);
            assert!(labels[..2].iter().all(|l| *l == Label::Body));

            let lock = position(&lines, "pthread_mutex_lock").unwrap();
            let signal = position(&lines, "pthread_cond_signal").unwrap();
            let unlock = position(&lines, "pthread_mutex_unlock").unwrap();
            let in_order = (lock, signal, unlock) == (2, 3, 4);
            assert_eq!(labels[lock], Label::Body);
            assert_eq!(labels[unlock], Label::Body);
            let expected = if in_order {
                Label::CondSignalSafe
            } else {
                Label::CondSignalUnsafe
            };
            assert_eq!(labels[signal], expected, "seed {seed}: {lines:?}");
            saw_safe |= in_order;
            saw_unsafe |= !in_order;
        }
        assert!(saw_safe && saw_unsafe);
    }

    #[test]
    fn race_fragment_labels_follow_lock_positions() {
        let mut saw_safe = false;
        let mut saw_unsafe = false;
        for seed in 0..RUNS {
            let fragment = run(&RaceConditionExample, seed);
            let lines = fragment.flat_lines();
            let labels = fragment.flat_labels();
            assert_eq!(lines.len(), 5);
            assert!(labels[..2].iter().all(|l| *l == Label::Body));

            let lock = position(&lines, "pthread_mutex_lock").unwrap();
            let unlock = position(&lines, "pthread_mutex_unlock").unwrap();
            let enclosed = lock == 2 && unlock == 4;
            for (index, label) in labels.iter().enumerate().skip(2) {
                let expected = if index == lock || index == unlock {
                    Label::Body
                } else if enclosed {
                    Label::RaceCondSafe
                } else {
                    Label::RaceCondUnsafe
                };
                assert_eq!(*label, expected, "seed {seed}: {lines:?}");
            }
            saw_safe |= enclosed;
            saw_unsafe |= !enclosed;
        }
        assert!(saw_safe && saw_unsafe);
    }

    #[test]
    fn strcpy_branch_determines_label() {
        let mut counts = [0usize; 2];
        for seed in 0..RUNS {
            let fragment = run(&StrcpyExample, seed);
            let lines = fragment.flat_lines();
            let labels = fragment.flat_labels();
            assert_eq!(lines.len(), 3);
            for (line, label) in lines.iter().zip(&labels) {
                if line.starts_with("strncpy(") {
                    assert_eq!(*label, Label::StrcpySafe);
                    counts[0] += 1;
                } else if line.starts_with("strcpy(") {
                    assert_eq!(*label, Label::StrcpyUnsafe);
                    counts[1] += 1;
                } else {
                    assert_eq!(*label, Label::Body);
                }
            }
        }
        assert_eq!(counts[0] + counts[1], RUNS as usize);
        assert!(counts[0] > 0 && counts[1] > 0);
    }

    #[test]
    fn memory_access_label_depends_on_free_position() {
        for seed in 0..RUNS {
            let fragment = run(&MemoryManagementExample, seed);
            let lines = fragment.flat_lines();
            let labels = fragment.flat_labels();
            let free = position(&lines, "free(").unwrap();
            let access = position(&lines, "*").unwrap();
            let expected = if access < free {
                Label::MemoryManagementSafe
            } else {
                Label::MemoryManagementUnsafe
            };
            assert_eq!(labels[access], expected);
            assert_eq!(
                labels.iter().filter(|l| l.is_defect_site()).count(),
                1,
                "exactly one labeled site per memory fragment"
            );
            if access < free {
                assert_eq!(free, lines.len() - 1, "free stays last in the safe variant");
            } else {
                assert_eq!(access, lines.len() - 1);
            }
        }
    }

    #[test]
    fn cond_wait_guard_is_one_group_before_unlock() {
        for seed in 0..RUNS {
            let fragment = run(&CondWaitExample, seed);
            let groups = fragment.groups();
            assert_eq!(groups.len(), 8);
            assert!(groups[..4].iter().all(|g| g.len() == 1));

            let wait = &groups[6];
            let wait_lines: Vec<&str> = wait.lines().collect();
            let wait_labels: Vec<Label> = wait.labels().collect();
            assert_eq!(wait_lines.len(), 3);
            let expected = if wait_lines[0].starts_with("while(") {
                Label::CondWaitSafe
            } else {
                assert!(wait_lines[0].starts_with("if("));
                Label::CondWaitUnsafe
            };
            assert_eq!(wait_labels, vec![Label::Body, expected, Label::Body]);

            let tail: Vec<&str> = groups[7].lines().collect();
            assert!(tail[0].starts_with("pthread_mutex_unlock"));
            let head: Vec<&str> = groups[4].lines().collect();
            assert!(head[0].starts_with("pthread_mutex_lock"));
        }
    }

    #[test]
    fn dummies_emit_only_body_lines() {
        let dummies: [&dyn FragmentGenerator; 3] = [&MemoryDummy, &ControlFlowDummy, &OrdinaryDummy];
        for generator in dummies {
            assert_eq!(generator.kind(), GeneratorKind::Dummy);
            for seed in 0..50 {
                let fragment = run(generator, seed);
                assert!(fragment.flat_labels().iter().all(|l| *l == Label::Body));
                assert!(fragment.flat_lines().iter().all(|l| !l.contains('$')));
            }
        }
    }

    #[test]
    fn control_flow_dummy_splits_declaration_from_block() {
        for seed in 0..RUNS {
            let fragment = run(&ControlFlowDummy, seed);
            assert_eq!(fragment.len(), 2);
            assert_eq!(fragment.groups()[0].len(), 1);
            let declaration: Vec<&str> = fragment.groups()[0].lines().collect();
            assert!(declaration[0].starts_with("int var_"));

            let block: Vec<&str> = fragment.groups()[1].lines().collect();
            assert!((3..=5).contains(&block.len()));
            assert_eq!(*block.last().unwrap(), "}");
        }
    }

    #[test]
    fn exhausted_pool_is_reported() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pool = VariablePool::new(3, &mut rng);
        let err = CondWaitExample.generate(&mut pool, &mut rng).unwrap_err();
        assert_eq!(err, GenerateError::Pool(PoolError::Exhausted { capacity: 3 }));
    }

    #[test]
    fn default_generators_cover_every_family() {
        let generators = default_generators();
        let count = |kind| generators.iter().filter(|g| g.kind() == kind).count();
        assert_eq!(count(GeneratorKind::MutexExclusive), 3);
        assert_eq!(count(GeneratorKind::Example), 2);
        assert_eq!(count(GeneratorKind::Dummy), 3);
    }
}
