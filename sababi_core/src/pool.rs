use rand::seq::SliceRandom;
use rand_core::RngCore;
use thiserror::Error;

/// Naming scheme for pooled identifiers.
const VAR_PREFIX: &str = "var_";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The pool ran dry. Generators must request fewer names per program than
    /// the pool holds, so this points at misconfigured composer bounds.
    #[error("Variable pool exhausted after handing out {capacity} names")]
    Exhausted { capacity: usize },
}

/// A shuffled, collision-free supply of identifier names for one program.
#[derive(Debug, Clone)]
pub struct VariablePool {
    names: Vec<String>,
    capacity: usize,
}

impl VariablePool {
    /// Creates `var_0 .. var_{max_count-1}` in a random order.
    pub fn new(max_count: usize, rng: &mut dyn RngCore) -> Self {
        let mut names: Vec<String> = (0..max_count).map(|i| format!("{VAR_PREFIX}{i}")).collect();
        names.shuffle(rng);
        Self {
            names,
            capacity: max_count,
        }
    }

    pub fn pop(&mut self) -> Result<String, PoolError> {
        self.names.pop().ok_or(PoolError::Exhausted {
            capacity: self.capacity,
        })
    }

    pub fn remaining(&self) -> usize {
        self.names.len()
    }
}
