//! Tests of the exact refinement algorithms on small hand-made chains.


use crate::BisimulationError;
use crate::chain::{ChainKind, SparseChain};
use crate::partition::{Partition, initial_partition};
use crate::refinement::{
    LegacyRefinement, RefinementConfig, SignatureRefinement, initial_splitters, stabilise,
};
use crate::test_utils::chain_builder::{coins, propositions, two_paths};
use crate::test_utils::init_logger;
use computation_process::{Algorithm, Computable, Stateful};

type Chain = SparseChain<f64>;

#[test]
fn test_entry_states_are_merged() -> Result<(), BisimulationError> {
    init_logger();
    let (chain, props) = two_paths();
    let initial = initial_partition(chain.num_states(), &props)?;

    let result = SignatureRefinement::<Chain>::run(&chain, initial)?;

    assert_eq!(result.num_blocks(), 2);
    assert!(result.same_block(0, 1));
    assert!(result.same_block(2, 3));
    assert!(!result.same_block(0, 2));
    Ok(())
}

#[test]
fn test_labels_are_never_merged() -> Result<(), BisimulationError> {
    init_logger();
    // States 0 and 1 have the same distribution, but only state 0 is labelled.
    let chain = SparseChain::from_rows(
        ChainKind::Dtmc,
        vec![vec![(2, 1.0)], vec![(2, 1.0)], vec![(2, 1.0)]],
    );
    let props = propositions(&[("a", &[0])]);
    let initial = initial_partition(3, &props)?;

    let result = SignatureRefinement::<Chain>::run(&chain, initial)?;

    assert!(!result.same_block(0, 1));
    assert!(result.same_block(1, 2));
    Ok(())
}

#[test]
fn test_coins_block_numbering() -> Result<(), BisimulationError> {
    init_logger();
    let (chain, props) = coins();
    let initial = initial_partition(chain.num_states(), &props)?;
    assert_eq!(initial.assignment(), &[2, 2, 2, 0, 1, 0, 1]);

    let result = SignatureRefinement::<Chain>::run(&chain, initial)?;

    // New blocks are numbered by the first state that reaches them.
    assert_eq!(result.assignment(), &[0, 0, 1, 2, 3, 2, 3]);
    result.check_invariants()?;
    Ok(())
}

#[test]
fn test_legacy_agrees_with_signature() -> Result<(), BisimulationError> {
    init_logger();
    let (chain, props) = coins();
    let initial = initial_partition(chain.num_states(), &props)?;

    let signature = SignatureRefinement::<Chain>::run(&chain, initial.clone())?;
    let legacy = LegacyRefinement::<Chain>::run(&chain, initial.clone())?;

    assert!(signature.is_equivalent(&legacy));
    assert!(legacy.refines(&initial));
    Ok(())
}

#[test]
fn test_ctmc_lumps_equal_exit_rates() -> Result<(), BisimulationError> {
    init_logger();
    // States 0 and 1 enter `goal` with total rate 3, state 4 only with rate 1.
    let chain = SparseChain::from_rows(
        ChainKind::Ctmc,
        vec![
            vec![(2, 2.0), (3, 1.0)],
            vec![(2, 1.5), (3, 1.5)],
            vec![],
            vec![],
            vec![(2, 1.0)],
        ],
    );
    let props = propositions(&[("goal", &[2, 3])]);
    let initial = initial_partition(5, &props)?;

    let signature = SignatureRefinement::<Chain>::run(&chain, initial.clone())?;
    assert_eq!(signature.num_blocks(), 3);
    assert!(signature.same_block(0, 1));
    assert!(signature.same_block(2, 3));
    assert!(!signature.same_block(0, 4));

    let legacy = LegacyRefinement::<Chain>::run(&chain, initial)?;
    assert!(signature.is_equivalent(&legacy));
    Ok(())
}

#[test]
fn test_max_iterations_cancels_refinement() -> Result<(), BisimulationError> {
    init_logger();
    let (chain, props) = coins();
    let initial = initial_partition(chain.num_states(), &props)?;
    let config = RefinementConfig::<Chain>::from(&chain).with_max_iterations(1);

    let result = SignatureRefinement::<Chain>::run(config, initial);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_one_round_per_step() -> Result<(), BisimulationError> {
    init_logger();
    let (chain, props) = coins();
    let initial = initial_partition(chain.num_states(), &props)?;

    let mut computation = <SignatureRefinement<Chain> as Stateful<
        RefinementConfig<Chain>,
        crate::refinement::RefinementState,
    >>::configure(&chain, initial);

    // The first round splits the unlabelled block, the second one confirms the fixpoint.
    assert!(computation.try_compute().is_err());
    let result: Partition = match computation.try_compute() {
        Ok(result) => result.clone(),
        Err(e) => panic!("Refinement did not converge in two rounds: {e:?}"),
    };
    assert_eq!(result.num_blocks(), 4);
    Ok(())
}

#[test]
fn test_empty_chain() -> Result<(), BisimulationError> {
    let chain: SparseChain<f64> = SparseChain::new(ChainKind::Dtmc, 0);
    let result = SignatureRefinement::<Chain>::run(&chain, Partition::trivial(0))?;
    assert_eq!(result.num_blocks(), 0);
    let result = LegacyRefinement::<Chain>::run(&chain, Partition::trivial(0))?;
    assert_eq!(result.num_blocks(), 0);
    Ok(())
}

#[test]
fn test_stabilise_matches_computation() -> Result<(), BisimulationError> {
    let (chain, props) = coins();
    let initial = initial_partition(chain.num_states(), &props)?;
    let computed = SignatureRefinement::<Chain>::run(&chain, initial.clone())?;
    let stabilised = stabilise(&chain, initial)?;
    assert_eq!(computed, stabilised);
    Ok(())
}

#[test]
fn test_initial_splitters() {
    let (chain, _) = two_paths();
    assert_eq!(initial_splitters(&chain, 3), vec![true, true, false]);
    assert!(initial_splitters(&chain, 0).is_empty());

    let ctmc = SparseChain::from_rows(ChainKind::Ctmc, vec![vec![(0, 1.0)]]);
    assert_eq!(initial_splitters(&ctmc, 3), vec![true, true, true]);

    let deadlock = SparseChain::from_rows(ChainKind::Dtmc, vec![vec![(1, 1.0)], vec![]]);
    assert_eq!(initial_splitters(&deadlock, 3), vec![true, true, true]);
}

#[test]
fn test_deadlock_state_is_separated() -> Result<(), BisimulationError> {
    init_logger();
    // State 1 has no outgoing transitions, state 0 moves to the absorbing state 2.
    let chain = SparseChain::from_rows(
        ChainKind::Dtmc,
        vec![vec![(2, 1.0)], vec![], vec![(2, 1.0)]],
    );
    let props = propositions(&[("a", &[0, 1])]);
    let initial = initial_partition(chain.num_states(), &props)?;

    let signature = SignatureRefinement::<Chain>::run(&chain, initial.clone())?;
    let legacy = LegacyRefinement::<Chain>::run(&chain, initial.clone())?;
    assert!(signature.is_discrete());
    assert!(signature.is_equivalent(&legacy));
    assert!(stabilise(&chain, initial)?.is_discrete());
    Ok(())
}
