//! Explicit-state Markov chains consumed by the minimisation algorithms.
//!
//! The algorithms only need the view described by [`MarkovChain`]: the number of states and,
//! for every state, its outgoing `(target, value)` pairs. [`SparseChain`] is the reference
//! implementation and is also used to represent quotient chains.

mod sparse_chain;

#[cfg(test)]
mod tests;

use crate::value::ValueAlgebra;
use std::fmt::{Display, Formatter};

pub use sparse_chain::SparseChain;

/// Distinguishes discrete-time chains (values are probabilities) from continuous-time
/// chains (values are rates).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainKind {
    Dtmc,
    Ctmc,
}

impl Display for ChainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainKind::Dtmc => write!(f, "DTMC"),
            ChainKind::Ctmc => write!(f, "CTMC"),
        }
    }
}

/// A read-only view of a labelled Markov chain's transition relation.
///
/// States are indexed `0..num_states`. Every target returned by [`MarkovChain::transitions`]
/// must be a valid state index.
pub trait MarkovChain {
    type Value: ValueAlgebra;

    fn kind(&self) -> ChainKind;

    fn num_states(&self) -> usize;

    /// Outgoing transitions of `state` as `(target, probability or rate)` pairs.
    ///
    /// # Panics
    ///
    /// Implementations are allowed to panic if `state` is out of range.
    fn transitions(&self, state: usize) -> impl Iterator<Item = (usize, &Self::Value)>;

    /// True for a DTMC in which the outgoing probabilities of every state sum to one.
    ///
    /// Rows of a sub-stochastic DTMC (e.g. with deadlock states) sum to at most one.
    fn is_stochastic(&self) -> bool {
        self.kind() == ChainKind::Dtmc
            && (0..self.num_states()).all(|state| {
                self.transitions(state)
                    .fold(Self::Value::zero(), |sum, (_, value)| sum.add(value))
                    .is_one()
            })
    }
}
