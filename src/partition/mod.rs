//! Partitions of the state space into blocks, and the initial partition induced by
//! a list of atomic propositions.

mod initial;
mod proposition;


use crate::BisimulationError;

pub use initial::initial_partition;
pub use proposition::Proposition;

/// An assignment of every state to a block.
///
/// Blocks are numbered `0..num_blocks` and every block is non-empty (the assignment is
/// surjective). A partition is never patched in place by the refinement algorithms:
/// each round produces a fresh [`Partition`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    block_of: Vec<usize>,
    num_blocks: usize,
}

impl Partition {
    /// Create a partition from a state-to-block assignment, validating that every
    /// block index is in `0..num_blocks` and that no block is empty.
    pub fn new(block_of: Vec<usize>, num_blocks: usize) -> Result<Partition, BisimulationError> {
        let partition = Partition {
            block_of,
            num_blocks,
        };
        partition.check_invariants()?;
        Ok(partition)
    }

    /// Create a partition from an assignment that is surjective onto `0..num_blocks`
    /// by construction.
    pub(crate) fn from_assignment(block_of: Vec<usize>, num_blocks: usize) -> Partition {
        debug_assert!(block_of.iter().all(|b| *b < num_blocks));
        Partition {
            block_of,
            num_blocks,
        }
    }

    /// A partition with a single block containing all states (no blocks if `num_states == 0`).
    pub fn trivial(num_states: usize) -> Partition {
        Partition {
            block_of: vec![0; num_states],
            num_blocks: usize::from(num_states > 0),
        }
    }

    /// A partition where every state forms its own block.
    pub fn discrete(num_states: usize) -> Partition {
        Partition {
            block_of: (0..num_states).collect(),
            num_blocks: num_states,
        }
    }

    pub fn num_states(&self) -> usize {
        self.block_of.len()
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// The block of the given `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` is out of range.
    pub fn block_of(&self, state: usize) -> usize {
        self.block_of[state]
    }

    /// The raw state-to-block assignment.
    pub fn assignment(&self) -> &[usize] {
        &self.block_of
    }

    pub fn same_block(&self, left: usize, right: usize) -> bool {
        self.block_of[left] == self.block_of[right]
    }

    /// True if every state is in its own block (nothing can be merged).
    pub fn is_discrete(&self) -> bool {
        self.num_blocks == self.block_of.len()
    }

    /// Members of each block, in increasing state order.
    pub fn blocks(&self) -> Vec<Vec<usize>> {
        let mut blocks = vec![Vec::new(); self.num_blocks];
        for (state, block) in self.block_of.iter().enumerate() {
            blocks[*block].push(state);
        }
        blocks
    }

    /// The first (lowest index) state of every block.
    pub fn representatives(&self) -> Vec<usize> {
        let mut representatives = vec![usize::MAX; self.num_blocks];
        for (state, block) in self.block_of.iter().enumerate() {
            if representatives[*block] == usize::MAX {
                representatives[*block] = state;
            }
        }
        representatives
    }

    /// Renumber blocks in the order of their first state.
    ///
    /// Two partitions describe the same equivalence iff their canonical forms are equal.
    pub fn canonical(&self) -> Partition {
        let mut renaming = vec![usize::MAX; self.num_blocks];
        let mut next = 0;
        let block_of = self
            .block_of
            .iter()
            .map(|block| {
                if renaming[*block] == usize::MAX {
                    renaming[*block] = next;
                    next += 1;
                }
                renaming[*block]
            })
            .collect();
        Partition {
            block_of,
            num_blocks: self.num_blocks,
        }
    }

    /// True if both partitions group the states in the same way (ignoring block numbering).
    pub fn is_equivalent(&self, other: &Partition) -> bool {
        self.num_blocks == other.num_blocks && self.canonical() == other.canonical()
    }

    /// True if every block of `self` is contained in some block of `coarser`.
    pub fn refines(&self, coarser: &Partition) -> bool {
        if self.num_states() != coarser.num_states() {
            return false;
        }
        let mut image = vec![usize::MAX; self.num_blocks];
        for (state, block) in self.block_of.iter().enumerate() {
            let target = coarser.block_of[state];
            if image[*block] == usize::MAX {
                image[*block] = target;
            } else if image[*block] != target {
                return false;
            }
        }
        true
    }

    /// Check that the assignment is in range and surjective.
    pub fn check_invariants(&self) -> Result<(), BisimulationError> {
        let mut seen = vec![false; self.num_blocks];
        for (state, block) in self.block_of.iter().enumerate() {
            let Some(slot) = seen.get_mut(*block) else {
                return Err(BisimulationError::InvariantViolation(format!(
                    "state {state} is assigned to block {block}, but there are only {} blocks",
                    self.num_blocks
                )));
            };
            *slot = true;
        }
        if let Some(empty) = seen.iter().position(|it| !it) {
            return Err(BisimulationError::InvariantViolation(format!(
                "block {empty} of {} is empty",
                self.num_blocks
            )));
        }
        Ok(())
    }
}
