use crate::partition::Partition;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobustState {
    pub iteration: usize,
    pub partition: Partition,
    /// Set once `partition` has been stabilised by signature refinement.
    pub stabilised: bool,
}

impl From<Partition> for RobustState {
    fn from(value: Partition) -> Self {
        RobustState {
            iteration: 0,
            partition: value,
            stabilised: false,
        }
    }
}

impl From<&Partition> for RobustState {
    fn from(value: &Partition) -> Self {
        Self::from(value.clone())
    }
}

impl From<RobustState> for Partition {
    fn from(value: RobustState) -> Self {
        value.partition
    }
}
