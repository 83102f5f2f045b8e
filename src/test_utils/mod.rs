pub mod chain_builder;

use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence, RngAlgorithm};

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Deterministic proptest configuration shared by all property tests of the crate.
///
/// The cases are kept small, since every case runs a full fixpoint computation.
pub fn proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases,
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "proptest-regressions",
        ))),
        rng_algorithm: RngAlgorithm::ChaCha,
        ..ProptestConfig::default()
    }
}
