//! Construction of the quotient (reduced) chain of a stable partition.

use crate::BisimulationError;
use crate::chain::{MarkovChain, SparseChain};
use crate::partition::{Partition, Proposition};
use crate::signature::Signature;
use crate::value::ValueAlgebra;
use bit_set::BitSet;
use log::debug;


/// The reduced chain whose states are the blocks of a partition.
#[derive(Clone, Debug)]
pub struct Quotient<V> {
    /// One state per block; the kind of the chain is preserved.
    pub chain: SparseChain<V>,
    /// The first (lowest index) original state of every block.
    pub representatives: Vec<usize>,
    /// The original propositions, lifted onto blocks.
    pub labels: Vec<Proposition>,
}

impl<V: ValueAlgebra> Quotient<V> {
    pub fn num_blocks(&self) -> usize {
        self.representatives.len()
    }

    /// Pick the descriptor of the representative state of every block from `states`,
    /// the descriptors of the original chain.
    ///
    /// # Panics
    ///
    /// Panics if `states` does not cover all representatives.
    pub fn representative_states<S: Clone>(&self, states: &[S]) -> Vec<S> {
        self.representatives
            .iter()
            .map(|state| states[*state].clone())
            .collect()
    }
}

/// The result of a bisimulation minimisation.
#[derive(Clone, Debug)]
pub struct Minimisation<V> {
    /// The final (stable) partition of the original states.
    pub partition: Partition,
    /// The reduced chain, or `None` if no two states could be merged.
    pub quotient: Option<Quotient<V>>,
}

impl<V: ValueAlgebra> Minimisation<V> {
    /// True if the state space was actually reduced.
    pub fn minimised(&self) -> bool {
        self.quotient.is_some()
    }
}

/// Build the quotient of `chain` with respect to the stable `partition`.
///
/// The outgoing distribution of a block is the lifting of its representative onto blocks.
/// If `verify` is set, every other member of the block must have the same lifting and must
/// agree with the representative on all `propositions`, otherwise the partition is not
/// a bisimulation and [`BisimulationError::InvariantViolation`] is returned.
///
/// The liftings are recomputed from `partition` and not taken over from the last refinement
/// round, including for [`crate::refinement::LegacyRefinement`] whose last round already lifts
/// every state. The refinement computations only output partitions, and signature rounds
/// only lift onto splitters. This costs one extra pass over the transitions of the
/// representatives.
pub fn build_quotient<C: MarkovChain>(
    chain: &C,
    partition: &Partition,
    propositions: &[Proposition],
    verify: bool,
) -> Result<Quotient<C::Value>, BisimulationError> {
    if partition.num_states() != chain.num_states() {
        return Err(BisimulationError::InvariantViolation(format!(
            "partition covers {} states, but the chain has {}",
            partition.num_states(),
            chain.num_states()
        )));
    }
    for proposition in propositions {
        if let Some(state) = proposition.states.iter().find(|s| *s >= chain.num_states()) {
            return Err(BisimulationError::PropositionOutOfRange {
                name: proposition.name.clone(),
                state,
                num_states: chain.num_states(),
            });
        }
    }

    let representatives = partition.representatives();
    let liftings: Vec<Signature<C::Value>> = representatives
        .iter()
        .map(|state| Signature::full(chain, *state, partition))
        .collect();

    if verify {
        verify_blocks(chain, partition, propositions, &representatives, &liftings)?;
    }

    let mut reduced = SparseChain::new(chain.kind(), partition.num_blocks());
    for (block, lifting) in liftings.iter().enumerate() {
        for (target, value) in lifting.entries() {
            reduced.set_probability(block, target, value.clone());
        }
    }

    let labels = propositions
        .iter()
        .map(|proposition| {
            let blocks: BitSet = proposition
                .states
                .iter()
                .map(|state| partition.block_of(state))
                .collect();
            Proposition::new(proposition.name.clone(), blocks)
        })
        .collect();

    debug!(
        "Quotient with {} states and {} transitions.",
        reduced.num_states(),
        reduced.num_transitions()
    );

    Ok(Quotient {
        chain: reduced,
        representatives,
        labels,
    })
}

fn verify_blocks<C: MarkovChain>(
    chain: &C,
    partition: &Partition,
    propositions: &[Proposition],
    representatives: &[usize],
    liftings: &[Signature<C::Value>],
) -> Result<(), BisimulationError> {
    for state in 0..chain.num_states() {
        let block = partition.block_of(state);
        let representative = representatives[block];
        if state == representative {
            continue;
        }
        if !Signature::full(chain, state, partition).matches(&liftings[block]) {
            return Err(BisimulationError::InvariantViolation(format!(
                "state {state} and its representative {representative} have different liftings"
            )));
        }
        if let Some(proposition) = propositions
            .iter()
            .find(|it| it.contains(state) != it.contains(representative))
        {
            return Err(BisimulationError::InvariantViolation(format!(
                "state {state} and its representative {representative} disagree on `{}`",
                proposition.name
            )));
        }
    }
    Ok(())
}
