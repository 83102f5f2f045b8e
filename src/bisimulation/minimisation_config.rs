use crate::bisimulation::Strategy;

/// A configuration object for [`crate::bisimulation::Minimiser`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimisationConfig {
    /// The refinement method (default: [`Strategy::Signature`]).
    pub strategy: Strategy,
    /// Cancel the refinement if it exceeds the specified number of rounds
    /// (default: `usize::MAX`).
    pub max_iterations: usize,
    /// Check that all members of every block are bisimilar to its representative
    /// before building the quotient (default: `true`).
    pub verify_quotient: bool,
}

impl Default for MinimisationConfig {
    fn default() -> Self {
        MinimisationConfig {
            strategy: Strategy::default(),
            max_iterations: usize::MAX,
            verify_quotient: true,
        }
    }
}

impl From<Strategy> for MinimisationConfig {
    fn from(value: Strategy) -> Self {
        MinimisationConfig {
            strategy: value,
            ..Default::default()
        }
    }
}
