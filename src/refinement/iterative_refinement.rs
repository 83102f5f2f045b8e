use crate::chain::MarkovChain;
use crate::partition::Partition;
use crate::refinement::{RefinementConfig, RefinementState, RefinementStep, initial_splitters};
use crate::{log_partition, simple_type_name};
use cancel_this::Cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::debug;
use std::marker::PhantomData;

/// A helper implementation of [`ComputationStep`] that repeatedly calls a [`RefinementStep`]
/// until the number of blocks stops growing.
pub struct IterativeRefinement<S: RefinementStep>(PhantomData<S>);

impl<C: MarkovChain, S: RefinementStep>
    ComputationStep<RefinementConfig<C>, RefinementState, Partition> for IterativeRefinement<S>
{
    fn step(context: &RefinementConfig<C>, state: &mut RefinementState) -> Completable<Partition> {
        if state.iteration >= context.max_iterations {
            debug!(
                "[iteration:{}] Refinement<{}> canceled (exceeded iteration count).",
                state.iteration,
                simple_type_name::<S>()
            );

            return Err(Cancelled::new("RefinementConfig::max_iterations").into());
        } else {
            state.iteration += 1;
        }

        let splitters = match &state.splitters {
            Some(splitters) => splitters.clone(),
            None => initial_splitters(&context.chain, state.partition.num_blocks()),
        };
        let round = S::split(&context.chain, &state.partition, &splitters)?;

        let converged = round.partition.num_blocks() == state.partition.num_blocks();
        state.splitters = Some(round.splitters);

        if converged {
            if !S::KEEP_PREVIOUS {
                state.partition = round.partition;
            }

            debug!(
                "[iteration:{}] Refinement<{}> finished with ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_partition(&state.partition)
            );

            Ok(state.partition.clone())
        } else {
            state.partition = round.partition;

            debug!(
                "[iteration:{}] Refinement<{}> split into ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_partition(&state.partition)
            );

            Err(Suspended)
        }
    }
}
