//! The exhaustive distance table.
//!
//! One byte per rank of A12 (≈228 MiB), filled by a breadth-first search from
//! the identity. Each BFS layer is a parallel pass over the whole table:
//!
//! - *top-down*: every slot open at the current depth is expanded through all
//!   generators and unvisited neighbours are claimed with a compare-and-set;
//! - *bottom-up*: every unvisited slot looks, in generator order, for a
//!   neighbour open at the current depth and claims itself on the first hit.
//!
//! A closing pass then marks the expanded layer as done. Layers are joined
//! before the next one starts, so every claim happens at the true distance.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU8, Ordering::Relaxed},
        Arc,
    },
    time::Instant,
};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    error::{GroupError, Result},
    generators::GeneratorSet,
    permutation::Perm,
    rank::{rank, rank_even, unrank_unchecked, Rank, DOMAIN_SIZE},
};

use super::{
    histogram::Histogram,
    path::{walk_parent_links, Path},
    slot::{Link, Slot},
    ShortestPath,
};

/// Ranks handed to a rayon task at a time.
const MIN_CHUNK: usize = 1 << 14;

/// Which way a BFS layer is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopDown,
    BottomUp,
}

/// How the build picks a [`Direction`] per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionPolicy {
    /// Bottom-up once the frontier is large compared to what is left.
    #[default]
    Auto,
    TopDown,
    BottomUp,
}

impl DirectionPolicy {
    fn choose(self, frontier: u64, unvisited: u64) -> Direction {
        match self {
            DirectionPolicy::Auto if frontier.saturating_mul(4) > unvisited => Direction::BottomUp,
            DirectionPolicy::Auto | DirectionPolicy::TopDown => Direction::TopDown,
            DirectionPolicy::BottomUp => Direction::BottomUp,
        }
    }
}

/// Settings for [`CayleyTable::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfig {
    /// Size of a dedicated worker pool; `None` uses rayon's global pool.
    pub threads: Option<usize>,
    pub direction: DirectionPolicy,
}

/// Shortest-path links for every element of A12.
///
/// Immutable once built: all queries are plain loads and may run from any
/// number of threads.
pub struct CayleyTable {
    generators: Arc<GeneratorSet>,
    slots: Vec<AtomicU8>,
    histogram: Histogram,
}

impl CayleyTable {
    /// Runs the full BFS.
    ///
    /// Fails with [`GroupError::DisconnectedGeneratorSet`] if the generators do
    /// not reach every even permutation.
    pub fn build(generators: Arc<GeneratorSet>, config: &BuildConfig) -> Result<Self> {
        match config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| Self::build_in_pool(generators, config.direction)),
            None => Self::build_in_pool(generators, config.direction),
        }
    }

    fn build_in_pool(generators: Arc<GeneratorSet>, policy: DirectionPolicy) -> Result<Self> {
        let start = Instant::now();
        let total = u64::from(DOMAIN_SIZE);
        info!(
            generators = generators.len(),
            threads = rayon::current_num_threads(),
            ?policy,
            "building distance table"
        );

        let slots: Vec<AtomicU8> = (0..DOMAIN_SIZE)
            .into_par_iter()
            .map(|_| AtomicU8::new(Slot::UNVISITED.into()))
            .collect();
        slots[Rank::IDENTITY.index()].store(Slot::root().into(), Relaxed);

        let mut layers = vec![1u64];
        let mut reached = 1u64;
        for depth in 0u32.. {
            let frontier = layers[depth as usize];
            let direction = policy.choose(frontier, total - reached);
            let layer_start = Instant::now();

            // rayon joins every task before returning, which orders the
            // relaxed accesses of one pass before the next
            let discovered = match direction {
                Direction::TopDown => expand_top_down(&slots, &generators, depth),
                Direction::BottomUp => expand_bottom_up(&slots, &generators, depth),
            };
            close_layer(&slots, depth);

            debug!(
                depth = depth + 1,
                frontier,
                discovered,
                ?direction,
                elapsed_ms = layer_start.elapsed().as_millis() as u64,
                "expanded layer"
            );
            if discovered == 0 {
                break;
            }
            reached += discovered;
            layers.push(discovered);
        }

        if reached != total {
            warn!(reached, expected = total, "generator set is disconnected");
            return Err(GroupError::DisconnectedGeneratorSet {
                reached,
                expected: total,
            });
        }

        let histogram = Histogram::from_counts(layers);
        info!(
            diameter = histogram.diameter().unwrap_or(0),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "distance table complete"
        );
        Ok(CayleyTable {
            generators,
            slots,
            histogram,
        })
    }

    pub fn generators(&self) -> &Arc<GeneratorSet> {
        &self.generators
    }

    /// Number of elements at each distance, as counted by the BFS.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn diameter(&self) -> usize {
        self.histogram.diameter().unwrap_or(0)
    }

    /// Number of slots, one per element of A12.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots still unvisited. Zero for every successfully built table.
    pub fn unreached_count(&self) -> u64 {
        self.slots
            .par_iter()
            .with_min_len(MIN_CHUNK)
            .filter(|slot| Slot::from(slot.load(Relaxed)).is_unvisited())
            .count() as u64
    }

    fn link(&self, rank: Rank) -> Result<Link> {
        Slot::from(self.slots[rank.index()].load(Relaxed))
            .link()
            .ok_or(GroupError::Unreachable {
                rank: u64::from(rank.get()),
            })
    }

    /// A shortest word for the element with rank `rank`.
    pub fn path_to_rank(&self, rank: Rank) -> Result<Path> {
        walk_parent_links(&self.generators, rank.unrank(), self.diameter(), |p| {
            self.link(rank_even(p))
        })
    }

    pub fn distance_of_rank(&self, rank: Rank) -> Result<usize> {
        self.path_to_rank(rank).map(|p| p.len())
    }
}

impl fmt::Debug for CayleyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CayleyTable")
            .field("generators", &self.generators.len())
            .field("slots", &self.slots.len())
            .field("histogram", &self.histogram)
            .finish()
    }
}

impl ShortestPath for CayleyTable {
    fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    fn shortest_path(&self, target: &Perm) -> Result<Path> {
        self.path_to_rank(rank(target)?)
    }
}

fn expand_top_down(slots: &[AtomicU8], generators: &GeneratorSet, depth: u32) -> u64 {
    slots
        .par_iter()
        .enumerate()
        .with_min_len(MIN_CHUNK)
        .map(|(r, slot)| {
            if !Slot::from(slot.load(Relaxed)).is_open_at(depth) {
                return 0;
            }
            let p = unrank_unchecked(r as u32);
            let mut claimed = 0;
            for (i, g) in generators.iter() {
                let neighbor = &slots[rank_even(&p.compose(g)).index()];
                if Slot::from(neighbor.load(Relaxed)).is_unvisited()
                    && neighbor
                        .compare_exchange(
                            Slot::UNVISITED.into(),
                            Slot::open(depth + 1, i).into(),
                            Relaxed,
                            Relaxed,
                        )
                        .is_ok()
                {
                    claimed += 1;
                }
            }
            claimed
        })
        .sum()
}

fn expand_bottom_up(slots: &[AtomicU8], generators: &GeneratorSet, depth: u32) -> u64 {
    slots
        .par_iter()
        .enumerate()
        .with_min_len(MIN_CHUNK)
        .filter(|(r, slot)| {
            if !Slot::from(slot.load(Relaxed)).is_unvisited() {
                return false;
            }
            let p = unrank_unchecked(*r as u32);
            let parent = generators.iter().map(|(i, _)| i).find(|&i| {
                let q = p.compose(generators.inverse(i));
                Slot::from(slots[rank_even(&q).index()].load(Relaxed)).is_open_at(depth)
            });
            match parent {
                // only this task writes this slot during the pass
                Some(i) => {
                    slot.store(Slot::open(depth + 1, i).into(), Relaxed);
                    true
                }
                None => false,
            }
        })
        .count() as u64
}

fn close_layer(slots: &[AtomicU8], depth: u32) {
    slots.par_iter().with_min_len(MIN_CHUNK).for_each(|slot| {
        let s = Slot::from(slot.load(Relaxed));
        if s.is_open_at(depth) {
            slot.store(s.closed().into(), Relaxed);
        }
    });
}
