//! Partition refinement algorithms for exact probabilistic bisimulation.
//!
//! Each algorithm repeatedly splits the blocks of a partition until it is stable, i.e. until
//! all states within one block agree on the probability of moving into every other block.
//! One computation step corresponds to one refinement round; the computation completes once
//! a round does not increase the number of blocks.
//!
//! # Algorithm Variants
//!
//! - **Signature** (default): Only the blocks that were split in the previous round (the
//!   *splitters*) are used to compute state signatures. Blocks that did not change carry
//!   no new information.
//! - **Legacy**: Every round lifts the full distribution of each state onto all current
//!   blocks. Simpler, but each round does strictly more work.
//!
//! # Example
//!
//! ```
//! use biodivine_algo_bisim::chain::{ChainKind, SparseChain};
//! use biodivine_algo_bisim::partition::{Proposition, initial_partition};
//! use biodivine_algo_bisim::refinement::SignatureRefinement;
//! use computation_process::Algorithm;
//!
//! let chain = SparseChain::from_rows(
//!     ChainKind::Dtmc,
//!     vec![vec![(2, 1.0)], vec![(3, 1.0)], vec![(2, 1.0)], vec![(3, 1.0)]],
//! );
//! let props = vec![Proposition::from_states("done", &[2, 3])];
//! let initial = initial_partition(4, &props).unwrap();
//! let stable = SignatureRefinement::<SparseChain<f64>>::run(&chain, initial).unwrap();
//! assert_eq!(stable.num_blocks(), 2);
//! ```

use crate::chain::MarkovChain;
use crate::partition::Partition;
use cancel_this::Cancellable;
use computation_process::Computation;
use log::trace;

#[cfg(test)]
mod tests;

mod full_lifting_split;
mod iterative_refinement;
mod refinement_config;
mod refinement_state;
mod signature_split;

pub use full_lifting_split::FullLiftingSplit;
pub use iterative_refinement::IterativeRefinement;
pub use refinement_config::RefinementConfig;
pub use refinement_state::RefinementState;
pub use signature_split::SignatureSplit;

/// A helper alias which allows us to use [`RefinementComputation`] as shorthand for
/// `Computation<Context = RefinementConfig, State = RefinementState>`.
pub type RefinementComputation<C, STEP> =
    Computation<RefinementConfig<C>, RefinementState, Partition, STEP>;

/// The recommended refinement procedure, based on splitter signatures.
pub type SignatureRefinement<C> = RefinementComputation<C, IterativeRefinement<SignatureSplit>>;

/// Refinement that recomputes the full lifting of every state in every round.
pub type LegacyRefinement<C> = RefinementComputation<C, IterativeRefinement<FullLiftingSplit>>;

/// The outcome of a single refinement round.
#[derive(Clone, Debug)]
pub struct RefinementRound {
    pub partition: Partition,
    /// For each block of `partition`, whether it can split other blocks in the next round.
    pub splitters: Vec<bool>,
}

/// Used to reduce code repetition between refinement variants.
///
/// Implementors define a single refinement round, which is then iterated by
/// [`IterativeRefinement`] until a fixpoint is reached.
pub trait RefinementStep {
    /// If set, the fixpoint is reported in the numbering of the previous round instead of
    /// the (equivalent) partition computed by the last round.
    const KEEP_PREVIOUS: bool = false;

    /// Split every block of `partition` according to the outgoing transitions of its states.
    ///
    /// The returned partition must refine `partition`, and its blocks must be numbered in
    /// the order in which their first state appears.
    fn split<C: MarkovChain>(
        chain: &C,
        partition: &Partition,
        splitters: &[bool],
    ) -> Cancellable<RefinementRound>;
}

/// Splitters used in the first round.
///
/// If the probabilities of every state sum to one, the probability of entering the last
/// block follows from all the others and the block can be skipped. Sub-stochastic DTMCs
/// and CTMC rates have no such constraint, so every block is used.
pub fn initial_splitters<C: MarkovChain>(chain: &C, num_blocks: usize) -> Vec<bool> {
    let mut splitters = vec![true; num_blocks];
    if chain.is_stochastic()
        && let Some(last) = splitters.last_mut()
    {
        *last = false;
    }
    splitters
}

/// Run signature refinement of `partition` to a fixpoint without any iteration limit.
///
/// This is the plain function version of [`SignatureRefinement`], used by algorithms that
/// need to re-stabilise a partition as a part of their own rounds.
pub(crate) fn stabilise<C: MarkovChain>(chain: &C, partition: Partition) -> Cancellable<Partition> {
    let mut partition = partition;
    let mut splitters = initial_splitters(chain, partition.num_blocks());
    let mut rounds = 0usize;
    loop {
        rounds += 1;
        let round = SignatureSplit::split(chain, &partition, &splitters)?;
        if round.partition.num_blocks() == partition.num_blocks() {
            trace!("Partition stabilised after {} round(s).", rounds);
            return Ok(round.partition);
        }
        partition = round.partition;
        splitters = round.splitters;
    }
}
