//! Small fixtures and proptest strategies for building labelled Markov chains.

use crate::chain::{ChainKind, SparseChain};
use crate::partition::Proposition;
use num::{BigInt, BigRational};
use proptest::prelude::*;

/// An exact rational `numer / denom`.
pub fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Build a list of propositions from `(name, members)` pairs.
pub fn propositions(items: &[(&str, &[usize])]) -> Vec<Proposition> {
    items
        .iter()
        .map(|(name, states)| Proposition::from_states(*name, states))
        .collect()
}

/// Two "entry" states (0 and 1) moving with probability one to two absorbing
/// states (2 and 3) which share the `end` label.
pub fn two_paths() -> (SparseChain<f64>, Vec<Proposition>) {
    let chain = SparseChain::from_rows(
        ChainKind::Dtmc,
        vec![
            vec![(2, 1.0)],
            vec![(3, 1.0)],
            vec![(2, 1.0)],
            vec![(3, 1.0)],
        ],
    );
    (chain, propositions(&[("end", &[2, 3])]))
}

/// A biased and a fair "coin" which end in `heads`/`tails`; the two fair coins are
/// bisimilar, the biased one is not.
///
/// States: `0` fair, `1` fair (via a different pair of targets), `2` biased,
/// `3`, `5` heads, `4`, `6` tails (all absorbing).
pub fn coins() -> (SparseChain<f64>, Vec<Proposition>) {
    let chain = SparseChain::from_rows(
        ChainKind::Dtmc,
        vec![
            vec![(3, 0.5), (4, 0.5)],
            vec![(5, 0.5), (6, 0.5)],
            vec![(3, 0.75), (6, 0.25)],
            vec![(3, 1.0)],
            vec![(4, 1.0)],
            vec![(5, 1.0)],
            vec![(6, 1.0)],
        ],
    );
    let props = propositions(&[("heads", &[3, 5]), ("tails", &[4, 6])]);
    (chain, props)
}

/// Build an exact DTMC from integer weights: every row is normalised by its total weight.
/// A state without outgoing weights gets a self-loop.
pub fn weighted_dtmc(rows: &[Vec<(usize, u32)>]) -> SparseChain<BigRational> {
    let mut chain = SparseChain::new(ChainKind::Dtmc, rows.len());
    for (source, row) in rows.iter().enumerate() {
        let total: u32 = row.iter().map(|(_, weight)| *weight).sum();
        if total == 0 {
            chain.set_probability(source, source, ratio(1, 1));
            continue;
        }
        for (target, weight) in row {
            chain.add_probability(source, *target, ratio(i64::from(*weight), i64::from(total)));
        }
    }
    chain
}

/// A random exact DTMC with up to `max_states` states, together with one or two random
/// propositions.
pub fn arbitrary_labelled_dtmc(
    max_states: usize,
) -> impl Strategy<Value = (SparseChain<BigRational>, Vec<Proposition>)> {
    (1..=max_states)
        .prop_flat_map(|num_states| {
            let row = prop::collection::vec((0..num_states, 1u32..4), 1..=3);
            let rows = prop::collection::vec(row, num_states);
            let labels = prop::collection::vec(prop::collection::vec(any::<bool>(), num_states), 1..=2);
            (rows, labels)
        })
        .prop_map(|(rows, labels)| {
            let chain = weighted_dtmc(&rows);
            let props = labels
                .iter()
                .enumerate()
                .map(|(index, members)| {
                    let states: Vec<usize> = members
                        .iter()
                        .enumerate()
                        .filter(|(_, member)| **member)
                        .map(|(state, _)| state)
                        .collect();
                    Proposition::from_states(format!("p{index}"), &states)
                })
                .collect();
            (chain, props)
        })
}
