use crate::partition::{Partition, Proposition};
use crate::{BisimulationError, log_partition};
use bit_set::BitSet;
use log::debug;

/// Compute the initial partition induced by `propositions`.
///
/// Two states share an initial block iff they agree on every proposition. The blocks are
/// obtained by splitting the universal block with each proposition in order: the members
/// keep the index of the block they were split from, the non-members are appended as
/// a new block. Empty blocks are discarded.
///
/// Each split is a pair of bitset operations, so the cost is `O(num_states * propositions)`
/// (divided by the word size), never quadratic in the number of states.
pub fn initial_partition(
    num_states: usize,
    propositions: &[Proposition],
) -> Result<Partition, BisimulationError> {
    if propositions.is_empty() {
        return Err(BisimulationError::NoPropositions);
    }
    for proposition in propositions {
        if let Some(state) = proposition.states.iter().find(|s| *s >= num_states) {
            return Err(BisimulationError::PropositionOutOfRange {
                name: proposition.name.clone(),
                state,
                num_states,
            });
        }
    }

    let mut blocks: Vec<BitSet> = Vec::new();
    if num_states > 0 {
        blocks.push((0..num_states).collect());
    }

    for proposition in propositions {
        let existing = blocks.len();
        for index in 0..existing {
            let mut members = blocks[index].clone();
            members.intersect_with(&proposition.states);
            let mut others = blocks[index].clone();
            others.difference_with(&proposition.states);

            if members.is_empty() {
                blocks[index] = others;
            } else {
                blocks[index] = members;
                if !others.is_empty() {
                    blocks.push(others);
                }
            }
        }
    }

    let mut block_of = vec![0; num_states];
    for (block, states) in blocks.iter().enumerate() {
        for state in states.iter() {
            block_of[state] = block;
        }
    }

    let partition = Partition::from_assignment(block_of, blocks.len());
    debug!(
        "Initial partition from {} propositions ({}).",
        propositions.len(),
        log_partition(&partition)
    );
    Ok(partition)
}
