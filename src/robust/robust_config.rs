use crate::chain::MarkovChain;
use crate::flow::CycleCancelling;
use crate::robust::PairTest;

/// A configuration object for robust bisimulation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobustConfig<C> {
    /// The chain whose states are being partitioned. Only discrete-time chains are supported.
    pub chain: C,
    /// How a candidate pair of states is confirmed (default: [`PairTest::Successor`]).
    pub pair_test: PairTest,
    /// Cycle cancelling used by [`PairTest::Coupling`] (default: [`CycleCancelling::Once`]).
    pub cycle_cancelling: CycleCancelling,
    /// Cancel the procedure if it exceeds the specified number of filter/prune rounds
    /// (default: `usize::MAX`).
    pub max_iterations: usize,
}

impl<C: MarkovChain> From<C> for RobustConfig<C> {
    fn from(value: C) -> Self {
        RobustConfig::new(value)
    }
}

impl<C: MarkovChain + Clone> From<&C> for RobustConfig<C> {
    fn from(value: &C) -> Self {
        RobustConfig::new(value.clone())
    }
}

impl<C: MarkovChain> RobustConfig<C> {
    pub fn new(chain: C) -> RobustConfig<C> {
        RobustConfig {
            chain,
            pair_test: PairTest::default(),
            cycle_cancelling: CycleCancelling::default(),
            max_iterations: usize::MAX,
        }
    }

    pub fn with_pair_test(mut self, pair_test: PairTest) -> RobustConfig<C> {
        self.pair_test = pair_test;
        self
    }

    pub fn with_cycle_cancelling(mut self, cycle_cancelling: CycleCancelling) -> RobustConfig<C> {
        self.cycle_cancelling = cycle_cancelling;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> RobustConfig<C> {
        self.max_iterations = max_iterations;
        self
    }
}
