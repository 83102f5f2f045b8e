use crate::BisimulationError;
use crate::bisimulation::Bisimulation;
use crate::chain::{ChainKind, MarkovChain};
use crate::flow::CycleCancelling;
use crate::partition::Partition;
use crate::refinement::{LegacyRefinement, RefinementConfig, SignatureRefinement};
use crate::robust::{PairTest, RobustConfig, RobustRefinement, check_supported};
use computation_process::Algorithm;

/// Exact bisimulation using [`SignatureRefinement`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SignatureBisimulation;

/// Exact bisimulation using [`LegacyRefinement`].
#[derive(Copy, Clone, Debug, Default)]
pub struct LegacyBisimulation;

/// Robust bisimulation using [`RobustRefinement`]. Only supports DTMCs.
#[derive(Copy, Clone, Debug, Default)]
pub struct RobustBisimulation {
    pub pair_test: PairTest,
    pub cycle_cancelling: CycleCancelling,
}

impl RobustBisimulation {
    pub fn new(pair_test: PairTest) -> RobustBisimulation {
        RobustBisimulation {
            pair_test,
            cycle_cancelling: CycleCancelling::default(),
        }
    }
}

impl<C: MarkovChain + Clone + 'static> Bisimulation<C> for SignatureBisimulation {
    fn name(&self) -> &'static str {
        "signature"
    }

    fn refine(
        &self,
        chain: &C,
        initial: Partition,
        max_iterations: usize,
    ) -> Result<Partition, BisimulationError> {
        let config = RefinementConfig::<C>::from(chain).with_max_iterations(max_iterations);
        Ok(SignatureRefinement::<C>::run(config, initial)?)
    }
}

impl<C: MarkovChain + Clone + 'static> Bisimulation<C> for LegacyBisimulation {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn refine(
        &self,
        chain: &C,
        initial: Partition,
        max_iterations: usize,
    ) -> Result<Partition, BisimulationError> {
        let config = RefinementConfig::<C>::from(chain).with_max_iterations(max_iterations);
        Ok(LegacyRefinement::<C>::run(config, initial)?)
    }
}

impl<C: MarkovChain + Clone + 'static> Bisimulation<C> for RobustBisimulation {
    fn name(&self) -> &'static str {
        match self.pair_test {
            PairTest::Successor => "robust",
            PairTest::Coupling => "robust-coupling",
        }
    }

    fn supports(&self, kind: ChainKind) -> bool {
        kind == ChainKind::Dtmc
    }

    fn refine(
        &self,
        chain: &C,
        initial: Partition,
        max_iterations: usize,
    ) -> Result<Partition, BisimulationError> {
        check_supported(chain, <Self as Bisimulation<C>>::name(self))?;
        let config = RobustConfig::<C>::from(chain)
            .with_pair_test(self.pair_test)
            .with_cycle_cancelling(self.cycle_cancelling)
            .with_max_iterations(max_iterations);
        Ok(RobustRefinement::<C>::run(config, initial)??)
    }
}
