use crate::BisimulationError;
use crate::chain::{ChainKind, MarkovChain, SparseChain};
use crate::test_utils::chain_builder::ratio;
use crate::value::ValueAlgebra;

#[test]
fn test_rows_are_sorted_and_merged() {
    let chain = SparseChain::from_rows(
        ChainKind::Dtmc,
        vec![vec![(2, 0.25), (1, 0.5), (2, 0.25)], vec![(1, 1.0)], vec![]],
    );
    assert_eq!(chain.num_states(), 3);
    assert_eq!(chain.num_transitions(), 3);
    assert_eq!(chain.row(0), &[(1, 0.5), (2, 0.5)]);
    assert!(chain.row(2).is_empty());

    let targets: Vec<usize> = MarkovChain::transitions(&chain, 0).map(|(t, _)| t).collect();
    assert_eq!(targets, vec![1, 2]);
}

#[test]
fn test_stochastic_rows() {
    let chain = SparseChain::from_rows(
        ChainKind::Dtmc,
        vec![
            vec![(1, ratio(1, 3)), (2, ratio(2, 3))],
            vec![(1, ratio(1, 1))],
            vec![(0, ratio(1, 1))],
        ],
    );
    assert!(chain.is_stochastic());

    // A deadlock state has no outgoing probability at all.
    let deadlock = SparseChain::from_rows(ChainKind::Dtmc, vec![vec![(1, 1.0)], vec![]]);
    assert!(!deadlock.is_stochastic());
    let leaking = SparseChain::from_rows(ChainKind::Dtmc, vec![vec![(0, 0.5)]]);
    assert!(!leaking.is_stochastic());

    // Rates are never stochastic, even if they happen to sum to one.
    let ctmc = SparseChain::from_rows(ChainKind::Ctmc, vec![vec![(0, 1.0)]]);
    assert!(!ctmc.is_stochastic());
    assert!(SparseChain::<f64>::new(ChainKind::Dtmc, 0).is_stochastic());
}

#[test]
fn test_set_and_add_probability() {
    let mut chain = SparseChain::new(ChainKind::Dtmc, 2);
    chain.add_probability(0, 1, 0.25);
    chain.add_probability(0, 1, 0.25);
    chain.add_probability(0, 0, 0.5);
    assert_eq!(chain.row(0), &[(0, 0.5), (1, 0.5)]);

    chain.set_probability(0, 1, 0.75);
    assert_eq!(chain.row(0), &[(0, 0.5), (1, 0.75)]);
    assert_eq!(chain.num_transitions(), 2);
}

#[test]
#[should_panic]
fn test_target_out_of_range() {
    let mut chain = SparseChain::new(ChainKind::Dtmc, 2);
    chain.set_probability(0, 2, 1.0);
}

#[test]
fn test_exit_rates_ignore_self_loops() {
    let chain = SparseChain::from_rows(
        ChainKind::Ctmc,
        vec![vec![(0, 10.0), (1, 2.0)], vec![(0, 1.0), (2, 3.5)], vec![]],
    );
    assert_eq!(chain.exit_rate(0), 2.0);
    assert_eq!(chain.exit_rate(1), 4.5);
    assert_eq!(chain.exit_rate(2), 0.0);
    assert_eq!(chain.max_exit_rate(), 4.5);
    assert_eq!(SparseChain::<f64>::new(ChainKind::Ctmc, 0).max_exit_rate(), 0.0);
}

#[test]
fn test_uniformisation() -> Result<(), BisimulationError> {
    let chain = SparseChain::from_rows(
        ChainKind::Ctmc,
        vec![
            vec![(0, ratio(7, 1)), (1, ratio(2, 1))],
            vec![(0, ratio(1, 1)), (2, ratio(3, 1))],
            vec![],
        ],
    );
    let dtmc = chain.uniformised(&ratio(4, 1))?;
    assert_eq!(dtmc.kind(), ChainKind::Dtmc);
    assert_eq!(dtmc.row(0), &[(0, ratio(1, 2)), (1, ratio(1, 2))]);
    // The state with the maximal exit rate has no self-loop.
    assert_eq!(dtmc.row(1), &[(0, ratio(1, 4)), (2, ratio(3, 4))]);
    assert_eq!(dtmc.row(2), &[(2, ratio(1, 1))]);

    for state in 0..dtmc.num_states() {
        let total = dtmc
            .row(state)
            .iter()
            .fold(ratio(0, 1), |acc, (_, value)| acc.add(value));
        assert!(total.is_one());
    }
    Ok(())
}

#[test]
fn test_uniformisation_errors() {
    let ctmc = SparseChain::from_rows(ChainKind::Ctmc, vec![vec![(1, 2.0)], vec![]]);
    assert!(matches!(
        ctmc.uniformised(&1.0),
        Err(BisimulationError::InvariantViolation(_))
    ));
    assert!(matches!(
        ctmc.uniformised(&0.0),
        Err(BisimulationError::InvariantViolation(_))
    ));
    assert!(ctmc.uniformised(&2.0).is_ok());

    let dtmc = SparseChain::from_rows(ChainKind::Dtmc, vec![vec![(0, 1.0)]]);
    assert!(matches!(
        dtmc.uniformised(&1.0),
        Err(BisimulationError::UnsupportedModel {
            kind: ChainKind::Dtmc,
            ..
        })
    ));
}

#[test]
fn test_kind_display() {
    assert_eq!(ChainKind::Dtmc.to_string(), "DTMC");
    assert_eq!(ChainKind::Ctmc.to_string(), "CTMC");
}
