use relative_sampler::sampler::tpe::{FnWeights, TpeSampler, UniformWeights};
use relative_sampler::sampler::{RelativeSampler, sample_relative_from};
use relative_sampler::storage::MemoryStorage;
use relative_sampler::{
    CategoricalDistribution, Distribution, Error, FrozenTrial, LogUniformDistribution,
};

use super::xy_trial;

fn storage_with(n: u64) -> MemoryStorage {
    let storage = MemoryStorage::new();
    for i in 0..n {
        storage.push(xy_trial(i, (i % 11) as f64, -3.0 + 0.5 * i as f64 % 6.0).unwrap());
    }
    storage
}

#[test]
fn test_warm_up_returns_empty_sample() {
    let sampler = TpeSampler::builder()
        .n_startup_trials(5)
        .seed(42)
        .build()
        .unwrap();
    let storage = storage_with(4);
    let trial = FrozenTrial::builder(4).build().unwrap();

    let sample = sample_relative_from(&sampler, &storage, &trial).unwrap();
    assert!(sample.is_empty());
}

#[test]
fn test_warm_up_counts_complete_trials_only() {
    let sampler = TpeSampler::builder().n_startup_trials(2).build().unwrap();
    let storage = storage_with(1);
    storage.push(FrozenTrial::builder(1).failed().build().unwrap());
    storage.push(FrozenTrial::builder(2).pruned().build().unwrap());
    let trial = FrozenTrial::builder(3).build().unwrap();

    let sample = sample_relative_from(&sampler, &storage, &trial).unwrap();
    assert!(sample.is_empty());
}

#[test]
fn test_sampling_after_warm_up_is_not_implemented() {
    let sampler = TpeSampler::builder()
        .n_startup_trials(3)
        .seed(7)
        .build()
        .unwrap();
    let storage = storage_with(5);
    let trial = FrozenTrial::builder(5).build().unwrap();

    let err = sample_relative_from(&sampler, &storage, &trial).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)));
}

#[test]
fn test_empty_search_space_short_circuits() {
    let sampler = TpeSampler::builder().n_startup_trials(0).build().unwrap();
    let history = vec![FrozenTrial::builder(0).complete(1.0).build().unwrap()];
    let trial = FrozenTrial::builder(1).build().unwrap();

    let sample = sample_relative_from(&sampler, &history, &trial).unwrap();
    assert!(sample.is_empty());
}

#[test]
fn test_infer_matches_joint_intersection() {
    let sampler = TpeSampler::new();
    let fixed = Distribution::from(CategoricalDistribution::new(["only"]).unwrap());
    let history = vec![
        FrozenTrial::builder(0)
            .param("c", fixed, 0.0)
            .param("x", super::x_dist(), 3.0)
            .complete(3.0)
            .build()
            .unwrap(),
    ];
    let trial = FrozenTrial::builder(1).build().unwrap();

    let space = sampler.infer_relative_search_space(&history, &trial).unwrap();
    assert_eq!(space.keys().collect::<Vec<_>>(), vec!["x"]);
}

#[test]
fn test_estimators_cover_numeric_params() {
    let sampler = TpeSampler::builder()
        .weights(UniformWeights)
        .build()
        .unwrap();
    let storage = storage_with(3);
    let history = relative_sampler::storage::TrialSource::get_trials(&storage).unwrap();
    let space = sampler
        .infer_relative_search_space(&history, &FrozenTrial::default())
        .unwrap();

    let estimators = sampler.build_estimators(&history, &space).unwrap();
    assert_eq!(estimators.len(), 2);
    for pe in estimators.values() {
        assert_eq!(pe.len(), 4);
        let total: f64 = pe.weights().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_estimators_use_log_space() {
    let lr = Distribution::from(LogUniformDistribution::new(1.0, 100.0).unwrap());
    let history = vec![
        FrozenTrial::builder(0)
            .param("lr", lr, 10.0)
            .param("x", super::x_dist(), 1.0)
            .complete(1.0)
            .build()
            .unwrap(),
    ];
    let sampler = TpeSampler::builder().consider_prior(false).build().unwrap();
    let space = sampler
        .infer_relative_search_space(&history, &FrozenTrial::default())
        .unwrap();

    let estimators = sampler.build_estimators(&history, &space).unwrap();
    let pe = &estimators["lr"];
    assert_eq!(pe.mus().len(), 1);
    assert!((pe.mus()[0] - 10f64.ln()).abs() < 1e-12);
    assert!((pe.max_sigma() - 100f64.ln()).abs() < 1e-12);
}

#[test]
fn test_custom_weights_with_wrong_length_fail() {
    let sampler = TpeSampler::builder()
        .weights(FnWeights::new(|n| vec![1.0; n + 1]))
        .build()
        .unwrap();
    let storage = storage_with(2);
    let history = relative_sampler::storage::TrialSource::get_trials(&storage).unwrap();
    let space = sampler
        .infer_relative_search_space(&history, &FrozenTrial::default())
        .unwrap();

    let err = sampler.build_estimators(&history, &space).unwrap_err();
    assert!(matches!(
        err,
        Error::WeightsLengthMismatch {
            expected: 2,
            got: 3
        }
    ));
}

#[test]
fn test_invalid_prior_weight_rejected_by_builder() {
    assert!(matches!(
        TpeSampler::builder().prior_weight(0.0).build(),
        Err(Error::InvalidPriorWeight(_))
    ));
}

#[test]
fn test_sampler_is_shareable_across_threads() {
    let sampler = std::sync::Arc::new(TpeSampler::builder().n_startup_trials(100).build().unwrap());
    let storage = std::sync::Arc::new(storage_with(10));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let sampler = sampler.clone();
            let storage = storage.clone();
            std::thread::spawn(move || {
                let trial = FrozenTrial::builder(100 + i).build().unwrap();
                sample_relative_from(sampler.as_ref(), storage.as_ref(), &trial).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_empty());
    }
}
