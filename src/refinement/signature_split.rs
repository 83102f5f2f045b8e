use crate::chain::MarkovChain;
use crate::partition::Partition;
use crate::refinement::{RefinementRound, RefinementStep};
use crate::signature::{Signature, SignatureClasses};
use cancel_this::{Cancellable, is_cancelled};

/// States between two cancellation checks.
const CANCELLATION_INTERVAL: usize = 1 << 12;

/// One round of signature refinement.
///
/// The signature of every state only covers the current splitter blocks. States of one old
/// block are grouped by signature, and every group becomes a new block. If an old block
/// falls apart into multiple groups, all of them are splitters of the next round. A block
/// that stays whole is not, since it cannot distinguish anything it did not distinguish
/// already.
pub struct SignatureSplit;

impl RefinementStep for SignatureSplit {
    fn split<C: MarkovChain>(
        chain: &C,
        partition: &Partition,
        splitters: &[bool],
    ) -> Cancellable<RefinementRound> {
        let mut classes: Vec<SignatureClasses<C::Value>> = (0..partition.num_blocks())
            .map(|_| SignatureClasses::new())
            .collect();
        let mut block_of = Vec::with_capacity(partition.num_states());
        let mut num_blocks = 0;

        for state in 0..partition.num_states() {
            if state % CANCELLATION_INTERVAL == 0 {
                is_cancelled!()?;
            }
            let signature = Signature::of_state(chain, state, partition, |block| splitters[block]);
            let group = &mut classes[partition.block_of(state)];
            let block = match group.find(&signature) {
                Some(block) => block,
                None => {
                    group.insert(signature, num_blocks);
                    num_blocks += 1;
                    num_blocks - 1
                }
            };
            block_of.push(block);
        }

        let mut next_splitters = vec![false; num_blocks];
        for group in classes.iter().filter(|group| group.len() > 1) {
            for block in group.blocks() {
                next_splitters[block] = true;
            }
        }

        Ok(RefinementRound {
            partition: Partition::from_assignment(block_of, num_blocks),
            splitters: next_splitters,
        })
    }
}
