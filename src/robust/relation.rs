use crate::partition::Partition;
use std::collections::{BTreeSet, HashMap};

/// A symmetric, reflexive relation over states, stored as one neighbourhood per state.
///
/// Used for the relation `Q` of confirmed pairs. It only ever grows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    related: Vec<BTreeSet<usize>>,
    num_pairs: usize,
}

impl Relation {
    /// The identity relation over `num_states` states.
    pub fn diagonal(num_states: usize) -> Relation {
        Relation {
            related: (0..num_states).map(|state| BTreeSet::from([state])).collect(),
            num_pairs: num_states,
        }
    }

    pub fn contains(&self, left: usize, right: usize) -> bool {
        self.related[left].contains(&right)
    }

    /// Add the (unordered) pair `{left, right}`. Returns `false` if it was already present.
    pub fn insert(&mut self, left: usize, right: usize) -> bool {
        let added = self.related[left].insert(right);
        self.related[right].insert(left);
        if added {
            self.num_pairs += 1;
        }
        added
    }

    /// Number of unordered pairs in the relation, including the diagonal.
    pub fn num_pairs(&self) -> usize {
        self.num_pairs
    }

    /// All states related to `state` (including `state` itself).
    pub fn neighbourhood(&self, state: usize) -> &BTreeSet<usize> {
        &self.related[state]
    }

    /// True if every related pair lies within one block of `partition`.
    pub fn is_within(&self, partition: &Partition) -> bool {
        self.related.iter().enumerate().all(|(state, others)| {
            others
                .iter()
                .all(|other| partition.same_block(state, *other))
        })
    }

    /// Group states with identical neighbourhoods; blocks are numbered by first occurrence.
    pub fn quotient(&self) -> Partition {
        let mut blocks: HashMap<&BTreeSet<usize>, usize> = HashMap::new();
        let block_of = self
            .related
            .iter()
            .map(|neighbourhood| {
                let next = blocks.len();
                *blocks.entry(neighbourhood).or_insert(next)
            })
            .collect();
        Partition::from_assignment(block_of, blocks.len())
    }
}

/// Number of unordered pairs (including the diagonal) of the equivalence given by `partition`.
pub fn num_equivalent_pairs(partition: &Partition) -> usize {
    let mut sizes = vec![0usize; partition.num_blocks()];
    for block in partition.assignment() {
        sizes[*block] += 1;
    }
    sizes.iter().map(|size| size * (size + 1) / 2).sum()
}
