//! The entry point of the crate: pick a refinement method, compute the coarsest stable
//! partition of a labelled chain and build its quotient.
//!
//! Methods implement [`Bisimulation`] and are selected by a string key through
//! [`StrategyRegistry`] (or directly through [`Strategy`]). [`Minimiser`] drives
//! a single minimisation:
//!
//! ```rust
//! use biodivine_algo_bisim::chain::{ChainKind, SparseChain};
//! use biodivine_algo_bisim::partition::Proposition;
//! use biodivine_algo_bisim::{MinimisationConfig, minimise};
//!
//! let chain = SparseChain::from_rows(
//!     ChainKind::Dtmc,
//!     vec![vec![(2, 1.0)], vec![(3, 1.0)], vec![(2, 1.0)], vec![(3, 1.0)]],
//! );
//! let end = Proposition::from_states("end", &[2, 3]);
//! let result = minimise(&chain, &[end], &MinimisationConfig::default()).unwrap();
//! assert!(result.minimised());
//! assert_eq!(result.partition.num_blocks(), 2);
//! ```

use crate::BisimulationError;
use crate::chain::{ChainKind, MarkovChain};
use crate::partition::{Partition, Proposition};
use crate::quotient::Quotient;


mod methods;
mod minimisation_config;
mod minimiser;
mod registry;
mod strategy;

pub use methods::{LegacyBisimulation, RobustBisimulation, SignatureBisimulation};
pub use minimisation_config::MinimisationConfig;
pub use minimiser::{Minimiser, minimise};
pub use registry::{MethodFactory, StrategyRegistry};
pub use strategy::Strategy;

/// A bisimulation minimisation method for chains of type `C`.
pub trait Bisimulation<C: MarkovChain> {
    /// The key under which the method reports itself in logs and errors.
    fn name(&self) -> &'static str;

    /// True if the method can process chains of the given kind.
    fn supports(&self, kind: ChainKind) -> bool {
        let _ = kind;
        true
    }

    /// Refine `initial` into the coarsest stable partition of `chain`.
    fn refine(
        &self,
        chain: &C,
        initial: Partition,
        max_iterations: usize,
    ) -> Result<Partition, BisimulationError>;

    /// Build the reduced chain of a stable `partition`.
    fn build_quotient(
        &self,
        chain: &C,
        partition: &Partition,
        propositions: &[Proposition],
        verify: bool,
    ) -> Result<Quotient<C::Value>, BisimulationError> {
        crate::quotient::build_quotient(chain, partition, propositions, verify)
    }
}
