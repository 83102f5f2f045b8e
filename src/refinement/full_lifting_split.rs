use crate::chain::MarkovChain;
use crate::partition::Partition;
use crate::refinement::{RefinementRound, RefinementStep};
use crate::signature::{Signature, SignatureClasses};
use cancel_this::{Cancellable, is_cancelled};

/// One round of the legacy refinement: the full lifting of every state onto all blocks.
///
/// Splitters are ignored (and every block of the result is reported as a splitter). Once
/// converged, the previous partition is kept, since the liftings of the last round are
/// expressed in its numbering.
pub struct FullLiftingSplit;

impl RefinementStep for FullLiftingSplit {
    const KEEP_PREVIOUS: bool = true;

    fn split<C: MarkovChain>(
        chain: &C,
        partition: &Partition,
        _splitters: &[bool],
    ) -> Cancellable<RefinementRound> {
        let mut classes: Vec<SignatureClasses<C::Value>> = (0..partition.num_blocks())
            .map(|_| SignatureClasses::new())
            .collect();
        let mut block_of = Vec::with_capacity(partition.num_states());
        let mut num_blocks = 0;

        for state in 0..partition.num_states() {
            is_cancelled!()?;
            let lifting = Signature::full(chain, state, partition);
            let group = &mut classes[partition.block_of(state)];
            let block = if let Some(block) = group.find(&lifting) {
                block
            } else {
                group.insert(lifting, num_blocks);
                num_blocks += 1;
                num_blocks - 1
            };
            block_of.push(block);
        }

        Ok(RefinementRound {
            partition: Partition::from_assignment(block_of, num_blocks),
            splitters: vec![true; num_blocks],
        })
    }
}
