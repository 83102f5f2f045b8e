use crate::chain::MarkovChain;
use crate::log_partition;
use crate::partition::Partition;
use crate::refinement::stabilise;
use crate::robust::coupling::{has_confirmed_coupling, shares_confirmed_successor};
use crate::robust::relation::{Relation, num_equivalent_pairs};
use crate::robust::{PairTest, RobustConfig, RobustError, RobustState};
use cancel_this::{Cancellable, Cancelled, is_cancelled};
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, error, trace};

/// One filter/prune round of robust bisimulation.
///
/// The first step stabilises the initial partition using signature refinement. Every other
/// step computes the confirmed relation `Q` within the current partition (see [`filter`]).
/// If `Q` covers every pair of the partition, the partition is the result. Otherwise, states
/// are regrouped by their `Q`-neighbourhoods (see [`prune`]) and the result is stabilised
/// again.
///
/// A [`RobustError`] completes the computation; the partition of the failed round is
/// not reported.
pub struct RobustStep;

impl<C: MarkovChain> ComputationStep<RobustConfig<C>, RobustState, Result<Partition, RobustError>>
    for RobustStep
{
    fn step(
        context: &RobustConfig<C>,
        state: &mut RobustState,
    ) -> Completable<Result<Partition, RobustError>> {
        if state.iteration >= context.max_iterations {
            debug!(
                "[iteration:{}] Robust<{:?}> canceled (exceeded iteration count).",
                state.iteration, context.pair_test
            );

            return Err(Cancelled::new("RobustConfig::max_iterations").into());
        } else {
            state.iteration += 1;
        }

        if !state.stabilised {
            state.partition = stabilise(&context.chain, state.partition.clone())?;
            state.stabilised = true;

            debug!(
                "[iteration:{}] Robust<{:?}> stabilised initial partition ({}).",
                state.iteration,
                context.pair_test,
                log_partition(&state.partition)
            );

            return if state.partition.is_discrete() {
                Ok(Ok(state.partition.clone()))
            } else {
                Err(Suspended)
            };
        }

        let pruned = match filter(context, &state.partition)? {
            Ok(confirmed) if confirmed.num_pairs() == num_equivalent_pairs(&state.partition) => {
                debug!(
                    "[iteration:{}] Robust<{:?}> finished with ({}).",
                    state.iteration,
                    context.pair_test,
                    log_partition(&state.partition)
                );

                return Ok(Ok(state.partition.clone()));
            }
            Ok(confirmed) => prune(&confirmed, &state.partition).inspect(|pruned| {
                debug!(
                    "[iteration:{}] Robust<{:?}> pruned {} unconfirmed pair(s) into ({}).",
                    state.iteration,
                    context.pair_test,
                    num_equivalent_pairs(&state.partition) - confirmed.num_pairs(),
                    log_partition(pruned)
                );
            }),
            Err(e) => Err(e),
        };

        match pruned {
            Ok(pruned) => {
                state.partition = stabilise(&context.chain, pruned)?;
                Err(Suspended)
            }
            Err(e) => {
                error!(
                    "[iteration:{}] Robust<{:?}> failed: {}",
                    state.iteration, context.pair_test, e
                );
                Ok(Err(e))
            }
        }
    }
}

/// Compute the relation `Q` of confirmed pairs within the blocks of `partition`.
///
/// `Q` starts as the identity and a pair of states from one block is added whenever the
/// configured [`PairTest`] succeeds with respect to the current `Q`. This repeats until `Q`
/// stops growing. `Q` is always contained in the equivalence given by `partition`.
///
/// Fails with [`RobustError::Coupling`] if the coupling network of a pair cannot be built.
pub fn filter<C: MarkovChain>(
    context: &RobustConfig<C>,
    partition: &Partition,
) -> Cancellable<Result<Relation, RobustError>> {
    let blocks = partition.blocks();
    let mut confirmed = Relation::diagonal(partition.num_states());
    let mut sweeps = 0usize;
    loop {
        sweeps += 1;
        let mut changed = false;
        for block in &blocks {
            for (i, left) in block.iter().enumerate() {
                is_cancelled!()?;
                for right in &block[i + 1..] {
                    if confirmed.contains(*left, *right) {
                        continue;
                    }
                    match pair_test(context, partition, &confirmed, *left, *right) {
                        Ok(true) => {
                            trace!("Confirmed pair ({}, {}).", left, right);
                            confirmed.insert(*left, *right);
                            changed = true;
                        }
                        Ok(false) => (),
                        Err(e) => return Ok(Err(e)),
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    trace!(
        "Relation confirmed {} pair(s) after {} sweep(s).",
        confirmed.num_pairs(),
        sweeps
    );
    Ok(Ok(confirmed))
}

/// Regroup the states of `partition` by their neighbourhoods in `confirmed`.
///
/// Fails with [`RobustError::InvariantViolation`] if the result does not refine `partition`
/// or if it groups two states whose pair is not confirmed.
pub fn prune(confirmed: &Relation, partition: &Partition) -> Result<Partition, RobustError> {
    let pruned = confirmed.quotient();
    if !pruned.refines(partition) {
        return Err(RobustError::InvariantViolation(format!(
            "the pruned partition ({}) does not refine ({})",
            log_partition(&pruned),
            log_partition(partition)
        )));
    }
    for block in pruned.blocks() {
        for (i, left) in block.iter().enumerate() {
            if let Some(right) = block[i + 1..]
                .iter()
                .find(|right| !confirmed.contains(*left, **right))
            {
                return Err(RobustError::InvariantViolation(format!(
                    "states {left} and {right} share a block after prune, but their pair is not confirmed"
                )));
            }
        }
    }
    Ok(pruned)
}

fn pair_test<C: MarkovChain>(
    context: &RobustConfig<C>,
    partition: &Partition,
    confirmed: &Relation,
    left: usize,
    right: usize,
) -> Result<bool, RobustError> {
    match context.pair_test {
        PairTest::Successor => Ok(shares_confirmed_successor(
            &context.chain,
            left,
            right,
            confirmed,
        )),
        PairTest::Coupling => has_confirmed_coupling(
            &context.chain,
            left,
            right,
            partition,
            confirmed,
            context.cycle_cancelling,
        )
        .map_err(|source| RobustError::Coupling {
            left,
            right,
            source,
        }),
    }
}
