use std::sync::{Arc, OnceLock};

use rand::{rngs::StdRng, SeedableRng};
use similar_asserts::assert_eq;

use super::{meet::tests::icosahedral_ball, *};
use crate::{
    error::GroupError,
    generators::{
        icosahedron::{antipodal_map, symmetries, Orientation},
        GeneratorSet,
    },
    permutation::Perm,
    rank::{Rank, DOMAIN_SIZE},
};

const SAMPLES: usize = 2000;

#[test]
fn sampled_distances_follow_word_lengths() {
    let mitm = icosahedral_ball();
    let exact = Histogram::icosahedral();
    let mut rng = StdRng::seed_from_u64(239_500_800);

    let mut sampled = Histogram::new();
    let mut kept = 0;
    while kept < SAMPLES {
        let p = Perm::random(&mut rng);
        if !p.parity().is_even() {
            assert_eq!(mitm.shortest_path(&p), Err(GroupError::OddPermutation));
            continue;
        }
        let path = mitm.shortest_path(&p).unwrap();
        assert!(path.verify(mitm.generators(), &p), "{p}: {path}");
        sampled.record(path.len());
        kept += 1;
    }

    assert_eq!(sampled.total(), SAMPLES as u64);
    let n = SAMPLES as f64;
    for (d, &p) in exact.density().iter().enumerate() {
        let observed = sampled.count(d) as f64 / n;
        let tolerance = 4.0 * (p * (1.0 - p) / n).sqrt() + 1e-3;
        assert!(
            (observed - p).abs() <= tolerance,
            "distance {d}: observed {observed}, expected {p}"
        );
    }
    assert!(sampled.diameter().unwrap() <= 8);
}

fn icosahedral_engine() -> &'static CayleyEngine {
    static ENGINE: OnceLock<CayleyEngine> = OnceLock::new();
    let engine = ENGINE.get_or_init(|| CayleyEngine::icosahedral().unwrap());
    engine.build().unwrap();
    engine
}

#[test]
#[ignore = "builds the full 228 MiB table"]
fn exhaustive_histogram() {
    let engine = icosahedral_engine();
    assert!(engine.is_ready());
    let table = engine.table().unwrap();
    assert_eq!(table.histogram().counts(), &ICOSAHEDRAL_WORD_LENGTHS[..]);
    assert_eq!(table.diameter(), 8);
    assert_eq!(table.len(), DOMAIN_SIZE as usize);
    assert_eq!(table.unreached_count(), 0);

    // building again reuses the table
    assert!(std::ptr::eq(engine.build().unwrap(), table));
}

#[test]
#[ignore = "builds the full 228 MiB table"]
fn exhaustive_paths() {
    let engine = icosahedral_engine();
    let gens = engine.generators();

    assert_eq!(engine.distance(&Perm::id()).unwrap(), 0);
    assert_eq!(engine.table().unwrap().distance_of_rank(Rank::IDENTITY).unwrap(), 0);
    assert_eq!(engine.distance(&antipodal_map()).unwrap(), 8);

    for s in symmetries() {
        let d = engine.distance(&s.perm).unwrap();
        match s.orientation {
            Orientation::Reversing => assert_eq!(d, 8),
            Orientation::Preserving => assert!(matches!(d, 0 | 2 | 4)),
        }
    }

    let last = Rank::new(u64::from(DOMAIN_SIZE) - 1).unwrap();
    let path = engine.table().unwrap().path_to_rank(last).unwrap();
    assert!(path.verify(gens, &last.unrank()));

    let mitm = icosahedral_ball();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let p = Perm::random_even(&mut rng);
        let path = engine.shortest_path(&p).unwrap();
        assert!(path.verify(gens, &p), "{p}: {path}");
        assert_eq!(path.len(), mitm.distance(&p).unwrap());
    }

    let swap = Perm::from_disjoint_cycles(&[vec![0, 1]]).unwrap();
    assert_eq!(engine.shortest_path(&swap), Err(GroupError::OddPermutation));
}

#[test]
#[ignore = "builds the full 228 MiB table"]
fn top_down_only() {
    let config = BuildConfig {
        threads: Some(4),
        direction: DirectionPolicy::TopDown,
    };
    let gens = Arc::new(GeneratorSet::icosahedral().unwrap());
    let table = CayleyTable::build(gens, &config).unwrap();
    assert_eq!(table.histogram(), &Histogram::icosahedral());
}

#[test]
#[ignore = "allocates the full 228 MiB table"]
fn disconnected_generators() {
    let c = Perm::from_disjoint_cycles(&[vec![0, 1, 2]]).unwrap();
    let engine = CayleyEngine::new(GeneratorSet::new(vec![c, c.inverse()]).unwrap());
    assert_eq!(
        engine.build().unwrap_err(),
        GroupError::DisconnectedGeneratorSet {
            reached: 3,
            expected: u64::from(DOMAIN_SIZE),
        }
    );
    assert!(!engine.is_ready());
    assert_eq!(engine.distance(&c), Err(GroupError::EngineNotReady));
}
