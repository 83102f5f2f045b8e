use crate::partition::Partition;

#[cfg(test)]
mod test_utils;

mod error;

pub mod bisimulation;
pub mod chain;
pub mod flow;
pub mod partition;
pub mod quotient;
pub mod refinement;
pub mod robust;
pub mod signature;
pub mod value;

pub use bisimulation::{MinimisationConfig, Minimiser, Strategy, minimise};
pub use error::BisimulationError;

/// A utility method for printing useful metadata of partitions.
fn log_partition(partition: &Partition) -> String {
    format!(
        "blocks={}; states={}",
        partition.num_blocks(),
        partition.num_states()
    )
}

/// Extract the "simple name" of a type argument at compile time.
///
/// In the future, this should be a `const fn`, but `type_name` and `unwrap_or` are not
/// yet stabilized as `const` functions (even thought they probably are).
fn simple_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    // Generic arguments would otherwise leak into the "simple" name.
    let name = name.split('<').next().unwrap_or(name);
    name.split("::").last().unwrap_or("?")
}
