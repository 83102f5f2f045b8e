//! Signatures (liftings) of states with respect to a partition.
//!
//! The signature of a state maps every *splitter* block to the total probability of moving
//! into that block. Blocks that are not splitters are left out entirely, since they cannot
//! distinguish states of the current round.

use crate::BisimulationError;
use crate::chain::MarkovChain;
use crate::partition::Partition;
use crate::value::ValueAlgebra;
use std::collections::BTreeMap;

/// The lifting of a state's outgoing distribution onto (splitter) blocks.
#[derive(Clone, Debug)]
pub enum Signature<V> {
    /// The state has no transition into any splitter block.
    Empty,
    /// Non-empty mapping from block index to accumulated probability.
    Lifted(BTreeMap<usize, V>),
}

impl<V: ValueAlgebra> Signature<V> {
    /// Lift the outgoing transitions of `state`, keeping only blocks for which
    /// `is_splitter(block)` holds. Transitions with a zero value are not part of the lifting.
    pub fn of_state<C, F>(chain: &C, state: usize, partition: &Partition, is_splitter: F) -> Self
    where
        C: MarkovChain<Value = V>,
        F: Fn(usize) -> bool,
    {
        let mut lifting: BTreeMap<usize, V> = BTreeMap::new();
        for (target, value) in chain.transitions(state) {
            if value.is_zero() {
                continue;
            }
            let block = partition.block_of(target);
            if !is_splitter(block) {
                continue;
            }
            match lifting.get_mut(&block) {
                Some(total) => *total = total.add(value),
                None => {
                    lifting.insert(block, value.clone());
                }
            }
        }
        if lifting.is_empty() {
            Signature::Empty
        } else {
            Signature::Lifted(lifting)
        }
    }

    /// The full lifting of `state` onto all blocks of `partition`.
    pub fn full(chain: &impl MarkovChain<Value = V>, state: usize, partition: &Partition) -> Self {
        Signature::of_state(chain, state, partition, |_| true)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Signature::Empty)
    }

    /// The probability of moving into `block`, or zero if `block` is not part of the lifting.
    ///
    /// Querying the [`Signature::Empty`] signature is a logic error of the caller and fails
    /// with [`BisimulationError::InvariantViolation`].
    pub fn probability(&self, block: usize) -> Result<V, BisimulationError> {
        match self {
            Signature::Empty => Err(BisimulationError::InvariantViolation(format!(
                "probability of block {block} requested from an empty signature"
            ))),
            Signature::Lifted(lifting) => Ok(lifting.get(&block).cloned().unwrap_or_else(V::zero)),
        }
    }

    /// Iterate over `(block, probability)` pairs in increasing block order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &V)> {
        let lifting = match self {
            Signature::Empty => None,
            Signature::Lifted(lifting) => Some(lifting),
        };
        lifting
            .into_iter()
            .flat_map(|it| it.iter().map(|(block, value)| (*block, value)))
    }

    /// Signature equality: identical key sets and pairwise [`ValueAlgebra::approx_eq`] values.
    ///
    /// The empty signature is only equal to itself.
    pub fn matches(&self, other: &Signature<V>) -> bool {
        match (self, other) {
            (Signature::Empty, Signature::Empty) => true,
            (Signature::Lifted(left), Signature::Lifted(right)) => {
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right.iter())
                        .all(|((lb, lv), (rb, rv))| lb == rb && lv.approx_eq(rv))
            }
            _ => false,
        }
    }
}

/// Signatures of one old block, each paired with the index of the new block it defines.
///
/// The lookup is a linear scan, because tolerance-based equality cannot be hashed. The
/// number of distinct signatures within one block is typically small.
pub(crate) struct SignatureClasses<V> {
    classes: Vec<(Signature<V>, usize)>,
}

impl<V: ValueAlgebra> SignatureClasses<V> {
    pub fn new() -> Self {
        SignatureClasses {
            classes: Vec::new(),
        }
    }

    pub fn find(&self, signature: &Signature<V>) -> Option<usize> {
        self.classes
            .iter()
            .find(|(known, _)| known.matches(signature))
            .map(|(_, block)| *block)
    }

    pub fn insert(&mut self, signature: Signature<V>, block: usize) {
        self.classes.push((signature, block));
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.classes.iter().map(|(_, block)| *block)
    }
}

#[cfg(test)]
mod tests {
    use crate::BisimulationError;
    use crate::chain::{ChainKind, SparseChain};
    use crate::partition::Partition;
    use crate::signature::Signature;

    fn chain() -> SparseChain<f64> {
        SparseChain::from_rows(
            ChainKind::Dtmc,
            vec![
                vec![(1, 0.25), (2, 0.25), (3, 0.5)],
                vec![(3, 1.0)],
                vec![(2, 0.5), (1, 0.5)],
                vec![(3, 1.0)],
            ],
        )
    }

    #[test]
    fn test_lifting_groups_by_block() -> Result<(), BisimulationError> {
        let chain = chain();
        let partition = Partition::new(vec![0, 1, 1, 2], 3)?;
        let signature = Signature::full(&chain, 0, &partition);

        assert_eq!(signature.probability(1)?, 0.5);
        assert_eq!(signature.probability(2)?, 0.5);
        assert_eq!(signature.probability(0)?, 0.0);
        assert_eq!(signature.entries().count(), 2);
        Ok(())
    }

    #[test]
    fn test_non_splitters_are_ignored() -> Result<(), BisimulationError> {
        let chain = chain();
        let partition = Partition::new(vec![0, 1, 1, 2], 3)?;
        let only_two = Signature::of_state(&chain, 1, &partition, |block| block == 1);
        assert!(only_two.is_empty());

        let with_two = Signature::of_state(&chain, 1, &partition, |block| block == 2);
        assert!(!with_two.is_empty());
        assert_eq!(with_two.probability(2)?, 1.0);
        Ok(())
    }

    #[test]
    fn test_empty_signature_query_is_a_fault() {
        let signature: Signature<f64> = Signature::Empty;
        assert!(matches!(
            signature.probability(0),
            Err(BisimulationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_signature_equality() -> Result<(), BisimulationError> {
        let chain = chain();
        let partition = Partition::new(vec![0, 1, 1, 2], 3)?;
        let s0 = Signature::full(&chain, 0, &partition);
        let s1 = Signature::full(&chain, 1, &partition);
        let s2 = Signature::full(&chain, 2, &partition);
        let s3 = Signature::full(&chain, 3, &partition);

        assert!(s1.matches(&s3));
        assert!(!s0.matches(&s1));
        assert!(!s2.matches(&s1));
        assert!(Signature::<f64>::Empty.matches(&Signature::Empty));
        assert!(!Signature::Empty.matches(&s1));
        assert!(!s1.matches(&Signature::Empty));
        Ok(())
    }

    #[test]
    fn test_zero_transitions_are_ignored() -> Result<(), BisimulationError> {
        let chain = SparseChain::from_rows(
            ChainKind::Dtmc,
            vec![vec![(2, 1.0), (3, 0.0)], vec![(2, 1.0)], vec![(2, 1.0)], vec![(3, 1.0)]],
        );
        let partition = Partition::new(vec![0, 0, 1, 2], 3)?;
        let explicit = Signature::full(&chain, 0, &partition);
        let implicit = Signature::full(&chain, 1, &partition);
        assert!(explicit.matches(&implicit));
        assert_eq!(explicit.entries().count(), 1);

        // Only the zero transition enters the last block.
        let last_only = Signature::of_state(&chain, 0, &partition, |block| block == 2);
        assert!(last_only.is_empty());
        Ok(())
    }
}
