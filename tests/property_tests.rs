//! Property-based tests for firefly-evo
//!
//! Uses proptest to verify invariants of the swarm, the budget and the run
//! controller.

use firefly_evo::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn mode_strategy() -> impl Strategy<Value = SearchMode> {
    prop::sample::select(SearchMode::ALL.to_vec())
}

proptest! {
    // ==================== Bounds Properties ====================

    #[test]
    fn clamp_lands_inside_bounds(
        lo in -1e3f64..0.0,
        width in 1e-3f64..1e3,
        value in -1e6f64..1e6
    ) {
        let bounds = Bounds::new(lo, lo + width).unwrap();
        prop_assert!(bounds.contains(bounds.clamp(value)));
    }

    #[test]
    fn sampled_positions_inside_bounds(dim in 1usize..20, half_width in 0.1f64..100.0, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = Bounds::symmetric(half_width).unwrap();
        let position = bounds.sample_vec(dim, &mut rng);
        prop_assert_eq!(position.len(), dim);
        prop_assert!(bounds.contains_vec(&position));
    }

    // ==================== Candidate Properties ====================

    #[test]
    fn distance_symmetric_and_non_negative(
        a in prop::collection::vec(-10.0..10.0f64, 5),
        b in prop::collection::vec(-10.0..10.0f64, 5)
    ) {
        let ca = Candidate::new(a);
        let cb = Candidate::new(b);
        prop_assert!((ca.distance(&cb) - cb.distance(&ca)).abs() < 1e-10);
        prop_assert!(ca.distance(&cb) >= 0.0);
        prop_assert!(ca.distance(&ca) == 0.0);
    }

    // ==================== Archive Properties ====================

    #[test]
    fn archive_sorted_and_bounded(
        capacity in 1usize..10,
        fitnesses in prop::collection::vec(-100.0..100.0f64, 0..40)
    ) {
        let batch: Vec<Candidate> = fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Candidate::with_fitness(vec![i as f64], f))
            .collect();
        let mut archive = Archive::new(capacity);
        archive.insert_batch(&batch);

        prop_assert!(archive.len() <= capacity);
        prop_assert_eq!(archive.len(), capacity.min(batch.len()));
        let entries = archive.entries();
        prop_assert!(entries.windows(2).all(|w| w[0].fitness <= w[1].fitness));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // ==================== Run Properties ====================

    #[test]
    fn run_spends_exactly_the_budget(
        num_fireflies in 1usize..30,
        max_fes in 1usize..400,
        dim in 1usize..5,
        mode in mode_strategy(),
        seed: u64
    ) {
        let config = FireflyConfig::builder()
            .num_fireflies(num_fireflies)
            .bounds(-5.0, 5.0)
            .max_fes(max_fes)
            .mode(mode)
            .seed(seed)
            .build()
            .unwrap();
        let mut calls = 0usize;
        let oracle = FnOracle::new(|x: &[f64]| {
            calls += 1;
            sphere(x)
        });
        let result = FireflyOptimizer::new(config)
            .unwrap()
            .run_with_observer(oracle, dim, 1, "proptest", NoopObserver)
            .unwrap();

        prop_assert_eq!(result.evaluations, max_fes);
        prop_assert_eq!(calls, max_fes);
    }

    #[test]
    fn swarm_stays_in_bounds_and_best_never_worsens(
        num_fireflies in 2usize..15,
        alpha in 0.0f64..3.0,
        mode in mode_strategy(),
        seed: u64
    ) {
        let config = FireflyConfig::builder()
            .num_fireflies(num_fireflies)
            .alpha(alpha)
            .bounds(-2.0, 3.0)
            .max_fes(300)
            .mode(mode)
            .seed(seed)
            .build()
            .unwrap();
        let bounds = config.bounds().unwrap();
        let mut run = FireflyRun::new(config, FnOracle::new(sphere), 3, 1, "proptest", NoopObserver)
            .unwrap();

        let mut previous_best = f64::INFINITY;
        while run.step() != RunPhase::Terminated {
            for candidate in run.swarm().iter() {
                prop_assert!(bounds.contains_vec(&candidate.position));
            }
            prop_assert!(bounds.contains_vec(&run.best().position) || !run.best().is_evaluated());
            prop_assert!(run.best().fitness <= previous_best);
            previous_best = run.best().fitness;
        }
    }

    #[test]
    fn seeded_runs_are_reproducible(mode in mode_strategy(), seed: u64) {
        let config = FireflyConfig::builder()
            .num_fireflies(8)
            .max_fes(240)
            .mode(mode)
            .seed(seed)
            .build()
            .unwrap();
        let optimizer = FireflyOptimizer::new(config).unwrap();
        let a = optimizer
            .run_with_observer(FnOracle::new(sphere), 2, 1, "proptest", NoopObserver)
            .unwrap();
        let b = optimizer
            .run_with_observer(FnOracle::new(sphere), 2, 1, "proptest", NoopObserver)
            .unwrap();

        prop_assert_eq!(a.best_position, b.best_position);
        prop_assert_eq!(a.best_fitness, b.best_fitness);
        prop_assert_eq!(a.stats.best_fitness_history(), b.stats.best_fitness_history());
    }
}
