use crate::chain::ChainKind;
use crate::flow::FlowError;
use cancel_this::Cancelled;
use thiserror::Error;

/// The failure modes of a bisimulation minimisation.
///
/// Nothing here is retried internally: the algorithms are deterministic, so the same input
/// always produces the same error.
#[derive(Debug, Error)]
pub enum BisimulationError {
    /// The chosen method cannot process this kind of chain (e.g. robust bisimulation of a CTMC).
    #[error("`{strategy}` bisimulation is not supported for {kind} models")]
    UnsupportedModel {
        strategy: &'static str,
        kind: ChainKind,
    },
    /// At least one proposition is required to build the initial partition.
    #[error("bisimulation requires at least one proposition")]
    NoPropositions,
    /// A proposition refers to a state that does not exist in the chain.
    #[error("proposition `{name}` contains state {state}, but the chain has {num_states} states")]
    PropositionOutOfRange {
        name: String,
        state: usize,
        num_states: usize,
    },
    /// The strategy key could not be resolved by the [`crate::bisimulation::StrategyRegistry`].
    #[error("unknown bisimulation minimisation method `{0}`")]
    UnknownStrategy(String),
    /// A bug in the refinement logic. The computed partition cannot be trusted.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("{0}")]
    Cancelled(Cancelled),
}

impl From<Cancelled> for BisimulationError {
    fn from(value: Cancelled) -> Self {
        BisimulationError::Cancelled(value)
    }
}
