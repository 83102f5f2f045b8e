use crate::chain::MarkovChain;

/// A "flat" configuration object for the partition refinement algorithms.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefinementConfig<C> {
    /// The chain whose states are being partitioned.
    ///
    /// # Panics
    ///
    /// The procedure is allowed to panic if initialized with a partition that does not
    /// cover exactly the states of this chain.
    pub chain: C,
    /// Cancel the procedure if it exceeds the specified number of refinement rounds
    /// (default: `usize::MAX`).
    pub max_iterations: usize,
}

impl<C: MarkovChain> From<C> for RefinementConfig<C> {
    fn from(value: C) -> Self {
        RefinementConfig::new(value)
    }
}

impl<C: MarkovChain + Clone> From<&C> for RefinementConfig<C> {
    fn from(value: &C) -> Self {
        RefinementConfig::new(value.clone())
    }
}

impl<C: MarkovChain> RefinementConfig<C> {
    pub fn new(chain: C) -> RefinementConfig<C> {
        RefinementConfig {
            chain,
            max_iterations: usize::MAX,
        }
    }

    /// Update the iteration limit of this configuration.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> RefinementConfig<C> {
        self.max_iterations = max_iterations;
        self
    }
}
