use relative_sampler::sampler::cma_es::CmaEsSampler;
use relative_sampler::sampler::{RelativeSampler, sample_relative_from};
use relative_sampler::storage::MemoryStorage;
use relative_sampler::{Distribution, Error, FrozenTrial, UniformDistribution};

use super::{xy_trial, y_dist};

#[test]
fn test_single_dimension_returns_empty_sample() {
    let sampler = CmaEsSampler::with_seed(42);
    let history: Vec<FrozenTrial> = (0..3)
        .map(|n| {
            FrozenTrial::builder(n)
                .param("y", y_dist(), 0.1 * n as f64)
                .complete(0.0)
                .build()
                .unwrap()
        })
        .collect();
    let trial = FrozenTrial::builder(3).build().unwrap();

    let sample = sample_relative_from(&sampler, &history, &trial).unwrap();
    assert!(sample.is_empty());
    assert!(sampler.mean().is_empty());
}

#[test]
fn test_warm_up_returns_empty_sample() {
    let sampler = CmaEsSampler::builder()
        .n_startup_trials(3)
        .seed(1)
        .build()
        .unwrap();
    let storage = MemoryStorage::new();
    storage.push(xy_trial(0, 2.0, 0.0).unwrap());
    storage.push(xy_trial(1, 5.0, 1.0).unwrap());

    let trial = FrozenTrial::builder(2).build().unwrap();
    let sample = sample_relative_from(&sampler, &storage, &trial).unwrap();
    assert!(sample.is_empty());
    assert!(sampler.dimensions().is_empty());
}

#[test]
fn test_after_warm_up_state_is_prepared_then_not_implemented() {
    let sampler = CmaEsSampler::with_seed(3);
    let storage = MemoryStorage::new();
    storage.push(xy_trial(0, 2.0, 0.0).unwrap());

    let trial = FrozenTrial::builder(1).build().unwrap();
    let err = sample_relative_from(&sampler, &storage, &trial).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)));

    // x: IntUniform[0, 10], y: Uniform[-3, 3]
    assert_eq!(sampler.dimensions(), vec!["x".to_string(), "y".to_string()]);
    let mean = sampler.mean();
    assert!((mean[0] - 5.0).abs() < 1e-12);
    assert!(mean[1].abs() < 1e-12);
    assert!((sampler.sigma() - 1.0).abs() < 1e-12);
}

#[test]
fn test_explicit_sigma0_is_used() {
    let sampler = CmaEsSampler::builder().sigma0(0.25).build().unwrap();
    let history = vec![xy_trial(0, 2.0, 0.0).unwrap()];
    let space = sampler
        .infer_relative_search_space(&history, &FrozenTrial::default())
        .unwrap();

    let result = sampler.sample_relative(&history, &FrozenTrial::default(), &space);
    assert!(result.is_err());
    assert!((sampler.sigma() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_reseed_does_not_touch_state() {
    let sampler = CmaEsSampler::with_seed(0);
    let history = vec![xy_trial(0, 2.0, 0.0).unwrap()];
    let space = sampler
        .infer_relative_search_space(&history, &FrozenTrial::default())
        .unwrap();
    let _ = sampler.sample_relative(&history, &FrozenTrial::default(), &space);
    let mean = sampler.mean();

    sampler.reseed_rng(99);
    assert_eq!(sampler.mean(), mean);
}

#[test]
fn test_changed_bounds_reinitialize_state() {
    let sampler = CmaEsSampler::with_seed(5);
    let trial = FrozenTrial::default();
    let first = vec![xy_trial(0, 2.0, 0.0).unwrap()];
    let space = sampler.infer_relative_search_space(&first, &trial).unwrap();
    let _ = sampler.sample_relative(&first, &trial, &space);
    assert!(sampler.mean()[1].abs() < 1e-12);

    let wide_y = Distribution::from(UniformDistribution::new(0.0, 30.0).unwrap());
    let second = vec![
        FrozenTrial::builder(0)
            .param("x", super::x_dist(), 2.0)
            .param("y", wide_y, 4.0)
            .complete(6.0)
            .build()
            .unwrap(),
    ];
    let space = sampler.infer_relative_search_space(&second, &trial).unwrap();
    let _ = sampler.sample_relative(&second, &trial, &space);

    assert_eq!(sampler.dimensions(), vec!["x".to_string(), "y".to_string()]);
    assert!((sampler.mean()[1] - 15.0).abs() < 1e-12);
    assert!((sampler.sigma() - 10.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_invalid_sigma0_is_rejected() {
    assert!(matches!(
        CmaEsSampler::builder().sigma0(-0.5).build(),
        Err(Error::InvalidSigma(_))
    ));
    assert!(matches!(
        CmaEsSampler::builder().sigma0(f64::NAN).build(),
        Err(Error::InvalidSigma(_))
    ));
}
