//! Robust bisimulation: bisimilarity up to couplings.
//!
//! Robust refinement starts from the stable partition computed by signature refinement and
//! keeps only those pairs of states that can be *confirmed*: a pair is confirmed if its
//! distributions can be matched through pairs that are already confirmed (starting with
//! the identity). Unconfirmed states are separated and the partition is stabilised again,
//! until every pair within every block is confirmed.
//!
//! Two pair tests are available (see [`PairTest`]). The coupling test reduces to a min-cost
//! max-flow query (see [`crate::flow`]).
//!
//! Robust bisimulation is only defined for discrete-time chains. Use [`check_supported`]
//! before running it.
//!
//! The computation completes with a [`RobustError`] instead of a partition if a pair cannot
//! be tested or if prune produces an inconsistent partition.

use crate::BisimulationError;
use crate::chain::{ChainKind, MarkovChain};
use crate::flow::FlowError;
use crate::partition::Partition;
use crate::value::ValueAlgebra;
use computation_process::Computation;
use thiserror::Error;


mod coupling;
mod relation;
mod robust_config;
mod robust_state;
mod robust_step;

pub use coupling::{has_confirmed_coupling, shares_confirmed_successor};
pub use relation::{Relation, num_equivalent_pairs};
pub use robust_config::RobustConfig;
pub use robust_state::RobustState;
pub use robust_step::{RobustStep, filter, prune};

/// The robust refinement procedure.
pub type RobustRefinement<C> =
    Computation<RobustConfig<C>, RobustState, Result<Partition, RobustError>, RobustStep>;

/// A failure that stops robust refinement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobustError {
    #[error("coupling of ({left}, {right}) cannot be decided: {source}")]
    Coupling {
        left: usize,
        right: usize,
        source: FlowError,
    },
    #[error("{0}")]
    InvariantViolation(String),
}

impl From<RobustError> for BisimulationError {
    fn from(value: RobustError) -> Self {
        match value {
            RobustError::Coupling { source, .. } => BisimulationError::Flow(source),
            RobustError::InvariantViolation(message) => {
                BisimulationError::InvariantViolation(message)
            }
        }
    }
}

/// How a candidate pair of states is confirmed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairTest {
    /// Some successor of one state is confirmed with some successor of the other.
    #[default]
    Successor,
    /// There is a coupling of both distributions within the current partition whose
    /// support contains a confirmed pair.
    Coupling,
}

/// Fail with [`BisimulationError::UnsupportedModel`] unless `chain` is a DTMC, and with
/// [`BisimulationError::Flow`] if it contains a negative probability (which cannot be used
/// as a capacity of the coupling network).
pub fn check_supported<C: MarkovChain>(
    chain: &C,
    strategy: &'static str,
) -> Result<(), BisimulationError> {
    if chain.kind() != ChainKind::Dtmc {
        return Err(BisimulationError::UnsupportedModel {
            strategy,
            kind: chain.kind(),
        });
    }
    for source in 0..chain.num_states() {
        if let Some((target, _)) = chain
            .transitions(source)
            .find(|(_, value)| **value < C::Value::zero())
        {
            return Err(FlowError::NegativeCapacity {
                from: source,
                to: target,
            }
            .into());
        }
    }
    Ok(())
}
