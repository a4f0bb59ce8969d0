use relative_sampler::sampler::joint_search_space;
use relative_sampler::storage::{MemoryStorage, TrialSource};
use relative_sampler::{
    CategoricalDistribution, Distribution, FrozenTrial, IntUniformDistribution,
    IntersectionSearchSpace, LogUniformDistribution, UniformDistribution,
};

use super::{x_dist, xy_trial, y_dist};

#[test]
fn test_empty_history_has_empty_space() {
    let storage = MemoryStorage::new();
    let trials = storage.get_trials().unwrap();
    assert!(IntersectionSearchSpace::calculate(&trials).is_empty());
}

#[test]
fn test_single_complete_trial_defines_space() {
    let storage = MemoryStorage::new();
    storage.push(xy_trial(0, 4.0, 1.5).unwrap());

    let space = IntersectionSearchSpace::calculate(&storage.get_trials().unwrap());
    assert_eq!(space.len(), 2);
    assert_eq!(space["x"], x_dist());
    assert_eq!(space["y"], y_dist());
}

#[test]
fn test_trial_with_fewer_params_shrinks_space() {
    let storage = MemoryStorage::new();
    storage.push(xy_trial(0, 4.0, 1.5).unwrap());
    storage.push(
        FrozenTrial::builder(1)
            .param("y", y_dist(), -2.0)
            .complete(0.0)
            .build()
            .unwrap(),
    );

    let space = IntersectionSearchSpace::calculate(&storage.get_trials().unwrap());
    assert_eq!(space.keys().collect::<Vec<_>>(), vec!["y"]);
    assert_eq!(space["y"], y_dist());
}

#[test]
fn test_failed_and_pruned_trials_do_not_change_space() {
    let storage = MemoryStorage::new();
    storage.push(xy_trial(0, 4.0, 1.5).unwrap());
    storage.push(
        FrozenTrial::builder(1)
            .param("y", y_dist(), -2.0)
            .complete(0.0)
            .build()
            .unwrap(),
    );
    let before = IntersectionSearchSpace::calculate(&storage.get_trials().unwrap());

    storage.push(
        FrozenTrial::builder(2)
            .param("y", y_dist(), 0.0)
            .failed()
            .build()
            .unwrap(),
    );
    storage.push(
        FrozenTrial::builder(3)
            .param("y", y_dist(), 0.5)
            .pruned()
            .build()
            .unwrap(),
    );
    let after = IntersectionSearchSpace::calculate(&storage.get_trials().unwrap());

    assert_eq!(before, after);
}

#[test]
fn test_running_trial_with_new_param_is_ignored() {
    let storage = MemoryStorage::new();
    storage.push(xy_trial(0, 1.0, 0.0).unwrap());
    storage.push(
        FrozenTrial::builder(1)
            .param("z", Distribution::from(UniformDistribution::new(0.0, 1.0).unwrap()), 0.3)
            .build()
            .unwrap(),
    );

    let space = IntersectionSearchSpace::calculate(&storage.get_trials().unwrap());
    assert_eq!(space.len(), 2);
    assert!(!space.contains_key("z"));
}

#[test]
fn test_changed_distribution_drops_param() {
    let wide = Distribution::from(UniformDistribution::new(-10.0, 10.0).unwrap());
    let trials = vec![
        xy_trial(0, 1.0, 0.0).unwrap(),
        FrozenTrial::builder(1)
            .param("x", x_dist(), 2.0)
            .param("y", wide, 7.0)
            .complete(9.0)
            .build()
            .unwrap(),
    ];

    let space = IntersectionSearchSpace::calculate(&trials);
    assert_eq!(space.keys().collect::<Vec<_>>(), vec!["x"]);
}

#[test]
fn test_intersection_is_order_independent() {
    let lr = Distribution::from(LogUniformDistribution::new(1e-4, 1e-1).unwrap());
    let a = xy_trial(0, 1.0, 0.0).unwrap();
    let b = FrozenTrial::builder(1)
        .param("y", y_dist(), 1.0)
        .param("lr", lr.clone(), 1e-3)
        .complete(1.0)
        .build()
        .unwrap();
    let c = FrozenTrial::builder(2)
        .param("x", x_dist(), 3.0)
        .param("y", y_dist(), 2.0)
        .param("lr", lr, 1e-2)
        .complete(2.0)
        .build()
        .unwrap();

    let forward = IntersectionSearchSpace::calculate(&[a.clone(), b.clone(), c.clone()]);
    let backward = IntersectionSearchSpace::calculate(&[c, b, a]);
    assert_eq!(forward, backward);
    assert_eq!(forward.keys().collect::<Vec<_>>(), vec!["y"]);
}

#[test]
fn test_incremental_updates_only_shrink() {
    let mut intersection = IntersectionSearchSpace::new();
    assert!(intersection.search_space().is_none());

    intersection.add_trial(&xy_trial(0, 1.0, 0.0).unwrap());
    let mut previous = intersection.search_space().cloned().unwrap();

    let more = [
        xy_trial(1, 2.0, 1.0).unwrap(),
        FrozenTrial::builder(2)
            .param("y", y_dist(), 1.0)
            .complete(1.0)
            .build()
            .unwrap(),
        xy_trial(3, 5.0, -1.0).unwrap(),
    ];
    for trial in &more {
        intersection.add_trial(trial);
        let current = intersection.search_space().cloned().unwrap();
        assert!(current.keys().all(|k| previous.contains_key(k)));
        previous = current;
    }
    assert_eq!(previous.keys().collect::<Vec<_>>(), vec!["y"]);
}

#[test]
fn test_joint_space_excludes_single_valued() {
    let fixed = Distribution::from(CategoricalDistribution::new(["adam"]).unwrap());
    let trials = vec![
        FrozenTrial::builder(0)
            .param("optimizer", fixed, 0.0)
            .param("y", y_dist(), 0.0)
            .complete(0.0)
            .build()
            .unwrap(),
    ];

    assert_eq!(IntersectionSearchSpace::calculate(&trials).len(), 2);
    let joint = joint_search_space(&trials);
    assert_eq!(joint.keys().collect::<Vec<_>>(), vec!["y"]);
}

#[test]
fn test_joint_space_handles_full_i64_range() {
    let wide = Distribution::from(IntUniformDistribution::new(i64::MIN, i64::MAX).unwrap());
    let trials = vec![
        FrozenTrial::builder(0)
            .param("seed", wide.clone(), 0.0)
            .param("y", y_dist(), 0.0)
            .complete(0.0)
            .build()
            .unwrap(),
    ];

    let joint = joint_search_space(&trials);
    assert_eq!(joint.keys().collect::<Vec<_>>(), vec!["seed", "y"]);
    assert!(!wide.single());
    assert!(wide.contains(0.0));
    assert!(wide.contains(i64::MAX as f64));
}
