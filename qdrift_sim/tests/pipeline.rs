//! End-to-end properties of the drift pipeline.

use proptest::prelude::*;
use qdrift_core::{Bucket, FragilityLevel, SimulationConfig};
use qdrift_env::{DriftError, RandomSource};
use qdrift_sim::{read_report, write_report, DriftEngine, ExecutionMode, SeededSource};

/// Source that panics if a draw is ever requested.
struct PanickingSource;

impl RandomSource for PanickingSource {
    fn next_unit(&mut self) -> f64 {
        panic!("no draw may happen for a rejected configuration");
    }

    fn fork_at(&self, _index: u64) -> Self {
        PanickingSource
    }

    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Source whose every draw is out of range.
struct SaturatedSource;

impl RandomSource for SaturatedSource {
    fn next_unit(&mut self) -> f64 {
        1.0
    }

    fn fork_at(&self, _index: u64) -> Self {
        SaturatedSource
    }

    fn seed(&self) -> Option<u64> {
        None
    }
}

#[test]
fn decay_failure_aborts_without_report() {
    let config = SimulationConfig::new(10, 0.5, Some(0)).unwrap();
    let modes = [
        ExecutionMode::Sequential,
        ExecutionMode::Parallel { partitions: 3 },
    ];

    for mode in modes {
        let err = DriftEngine::new()
            .with_mode(mode)
            .analyze_with(&config, &mut SaturatedSource)
            .unwrap_err();
        assert!(
            matches!(err, DriftError::InvariantViolation(_)),
            "mode={mode:?}: {err}"
        );
        assert!(!err.is_configuration());
    }
}

#[test]
fn invalid_configs_fail_before_any_draw() {
    let engine = DriftEngine::new();
    for (simulations, noise) in [(0u64, 0.3), (100, 1.5)] {
        let err = SimulationConfig::new(simulations, noise, Some(42))
            .and_then(|config| engine.analyze_with(&config, &mut PanickingSource))
            .unwrap_err();
        assert!(err.is_configuration(), "unexpected error: {err}");
    }
}

#[test]
fn example_scenario_is_reproducible() {
    let config = SimulationConfig::new(1000, 0.4, Some(42)).unwrap();

    let first = DriftEngine::new().analyze(&config).unwrap();
    let second = DriftEngine::new().analyze(&config).unwrap();
    let parallel = DriftEngine::new()
        .with_mode(ExecutionMode::Parallel { partitions: 8 })
        .analyze(&config)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, parallel);
    assert_eq!(first.metrics.entropy_bits.to_bits(), second.metrics.entropy_bits.to_bits());

    // noise 0.4 never reaches the collapse threshold (amplitude >= 0.6)
    assert_eq!(first.distribution.count(Bucket::Collapsed), 0);
    assert_eq!(first.distribution.total(), 1000);
}

#[test]
fn zero_noise_is_fully_stable() {
    let config = SimulationConfig::new(2000, 0.0, Some(7)).unwrap();
    let report = DriftEngine::new().analyze(&config).unwrap();

    assert_eq!(report.distribution.count(Bucket::Stable), 2000);
    assert_eq!(report.metrics.entropy_bits, 0.0);
    assert_eq!(report.metrics.bias, -1.0);
    assert_eq!(report.fragility_level(), FragilityLevel::Low);
}

#[test]
fn counts_sum_to_simulations() {
    for simulations in [1u64, 10, 2000] {
        let config = SimulationConfig::new(simulations, 0.65, Some(99)).unwrap();
        let report = DriftEngine::new().analyze(&config).unwrap();
        let sum: u64 = report.distribution.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, simulations);
    }
}

#[test]
fn custom_source_drives_the_run() {
    let config = SimulationConfig::new(500, 0.8, Some(5)).unwrap();
    let via_config = DriftEngine::new().analyze(&config).unwrap();
    let via_source = DriftEngine::new()
        .analyze_with(&config, &mut SeededSource::new(5))
        .unwrap();
    assert_eq!(via_config, via_source);
}

#[test]
fn export_round_trip_preserves_report() {
    let config = SimulationConfig::new(1000, 0.4, Some(42)).unwrap();
    let report = DriftEngine::new().analyze(&config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report(&report, &path).unwrap();

    let reloaded = read_report(&path).unwrap();
    assert_eq!(reloaded, report);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["config"]["noise"], 0.4);
    assert_eq!(raw["distribution"]["collapsed"], 0);
}

#[test]
fn failed_export_leaves_report_untouched() {
    let config = SimulationConfig::new(100, 0.5, Some(1)).unwrap();
    let report = DriftEngine::new().analyze(&config).unwrap();
    let snapshot = report.clone();

    let dir = tempfile::tempdir().unwrap();
    let bad_path = dir.path().join("missing").join("report.json");
    assert!(write_report(&report, &bad_path).is_err());
    assert_eq!(report, snapshot);
}

#[test]
fn reloading_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tampered.json");

    let config = SimulationConfig::new(10, 0.5, Some(1)).unwrap();
    let report = DriftEngine::new().analyze(&config).unwrap();
    let mut value = serde_json::to_value(&report).unwrap();
    value["config"]["noise"] = serde_json::json!(1.5);
    std::fs::write(&path, value.to_string()).unwrap();

    assert!(read_report(&path).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_same_report(seed in any::<u64>(), noise in 0.0f64..=1.0, n in 1u64..500) {
        let config = SimulationConfig::new(n, noise, Some(seed)).unwrap();
        let engine = DriftEngine::new();
        prop_assert_eq!(engine.analyze(&config).unwrap(), engine.analyze(&config).unwrap());
    }

    #[test]
    fn bias_never_decreases_with_noise(
        seed in any::<u64>(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        n in 1u64..500,
    ) {
        let (quiet, loud) = if a <= b { (a, b) } else { (b, a) };
        let engine = DriftEngine::new();
        let low = engine.analyze(&SimulationConfig::new(n, quiet, Some(seed)).unwrap()).unwrap();
        let high = engine.analyze(&SimulationConfig::new(n, loud, Some(seed)).unwrap()).unwrap();
        prop_assert!(high.metrics.bias >= low.metrics.bias);
    }

    #[test]
    fn entropy_within_bounds_for_any_run(seed in any::<u64>(), noise in 0.0f64..=1.0) {
        let config = SimulationConfig::new(300, noise, Some(seed)).unwrap();
        let report = DriftEngine::new().analyze(&config).unwrap();
        prop_assert!(report.metrics.entropy_bits >= 0.0);
        prop_assert!(report.metrics.entropy_bits <= 3f64.log2());
    }
}

#[test]
fn drift_error_is_comparable() {
    // Config errors carry the offending value for the CLI to report
    assert_eq!(
        SimulationConfig::new(0, 0.1, None).unwrap_err(),
        DriftError::InvalidSimulations(0)
    );
}
