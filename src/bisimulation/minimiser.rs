use crate::bisimulation::{Bisimulation, MinimisationConfig, StrategyRegistry};
use crate::chain::MarkovChain;
use crate::partition::{Partition, Proposition, initial_partition};
use crate::quotient::Minimisation;
use crate::{BisimulationError, log_partition};
use log::{debug, info};

/// Runs minimisations of chains of type `C` using the methods of a [`StrategyRegistry`].
pub struct Minimiser<C> {
    registry: StrategyRegistry<C>,
    config: MinimisationConfig,
}

impl<C: MarkovChain + Clone + 'static> Minimiser<C> {
    /// A minimiser with the default [`StrategyRegistry`].
    pub fn new(config: MinimisationConfig) -> Minimiser<C> {
        Minimiser::with_registry(StrategyRegistry::default(), config)
    }
}

impl<C: MarkovChain> Minimiser<C> {
    pub fn with_registry(registry: StrategyRegistry<C>, config: MinimisationConfig) -> Minimiser<C> {
        Minimiser { registry, config }
    }

    pub fn config(&self) -> &MinimisationConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry<C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut StrategyRegistry<C> {
        &mut self.registry
    }

    /// Minimise `chain` using the configured [`crate::Strategy`].
    pub fn minimise(
        &self,
        chain: &C,
        propositions: &[Proposition],
    ) -> Result<Minimisation<C::Value>, BisimulationError> {
        self.minimise_with_key(chain, propositions, self.config.strategy.key())
    }

    /// Minimise `chain` using the method registered under `key`.
    pub fn minimise_with_key(
        &self,
        chain: &C,
        propositions: &[Proposition],
        key: &str,
    ) -> Result<Minimisation<C::Value>, BisimulationError> {
        let method = self.registry.resolve(Some(key))?;
        run_method(method.as_ref(), chain, propositions, &self.config)
    }
}

/// Minimise `chain` with respect to `propositions` using the built-in method selected
/// by `config`.
pub fn minimise<C: MarkovChain + Clone + 'static>(
    chain: &C,
    propositions: &[Proposition],
    config: &MinimisationConfig,
) -> Result<Minimisation<C::Value>, BisimulationError> {
    let method = config.strategy.method::<C>();
    run_method(method.as_ref(), chain, propositions, config)
}

fn run_method<C: MarkovChain>(
    method: &dyn Bisimulation<C>,
    chain: &C,
    propositions: &[Proposition],
    config: &MinimisationConfig,
) -> Result<Minimisation<C::Value>, BisimulationError> {
    let initial = initial_partition(chain.num_states(), propositions)?;

    let kind = chain.kind();
    if !method.supports(kind) {
        return Err(BisimulationError::UnsupportedModel {
            strategy: method.name(),
            kind,
        });
    }

    info!(
        "Minimising {} with {} states using `{}` bisimulation.",
        kind,
        chain.num_states(),
        method.name()
    );

    let partition = method.refine(chain, initial.clone(), config.max_iterations)?;
    check_result(&partition, &initial)?;

    info!(
        "Minimisation: {} to {} states",
        chain.num_states(),
        partition.num_blocks()
    );

    if partition.is_discrete() {
        debug!("Nothing to merge ({}).", log_partition(&partition));
        return Ok(Minimisation {
            partition,
            quotient: None,
        });
    }

    let quotient = method.build_quotient(chain, &partition, propositions, config.verify_quotient)?;
    Ok(Minimisation {
        partition,
        quotient: Some(quotient),
    })
}

fn check_result(partition: &Partition, initial: &Partition) -> Result<(), BisimulationError> {
    partition.check_invariants()?;
    if !partition.refines(initial) {
        return Err(BisimulationError::InvariantViolation(format!(
            "the final partition ({}) does not refine the initial partition ({})",
            log_partition(partition),
            log_partition(initial)
        )));
    }
    Ok(())
}
