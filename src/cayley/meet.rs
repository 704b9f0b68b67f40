//! Meet-in-the-middle search over a ball around the identity.
//!
//! A word of length `k ≤ 2R` for `g` splits into a prefix `x` of length
//! `min(k, R)` and a suffix `y`. With `h = y⁻¹` the prefix is `x = g ∘ h`, so
//! trying every `h` of the right length against the ball finds `x`. Lengths
//! are tried in increasing order, which makes the first hit a shortest word.

use std::{collections::hash_map::Entry, sync::Arc, time::Instant};

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    error::{GroupError, Result},
    generators::GeneratorSet,
    permutation::Perm,
    rank::rank_even,
};

use super::{
    path::{walk_parent_links, Path},
    slot::Link,
    ShortestPath,
};

/// Radius that covers the whole group for the icosahedral twists.
pub const DEFAULT_RADIUS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BallEntry {
    distance: u32,
    link: Link,
}

#[derive(Debug)]
pub struct MeetInTheMiddle {
    generators: Arc<GeneratorSet>,
    ball: AHashMap<Perm, BallEntry>,
    spheres: Vec<Vec<Perm>>,
}

impl MeetInTheMiddle {
    /// Enumerates every element within `radius` of the identity.
    ///
    /// Each sphere is expanded in parallel; new elements are then recorded in
    /// sphere and generator order, so the links do not depend on scheduling.
    pub fn new(generators: Arc<GeneratorSet>, radius: usize) -> Self {
        let start = Instant::now();
        let mut ball = AHashMap::new();
        ball.insert(
            Perm::id(),
            BallEntry {
                distance: 0,
                link: Link::Root,
            },
        );
        let mut spheres = vec![vec![Perm::id()]];

        for distance in 1..=radius as u32 {
            let candidates: Vec<_> = spheres[spheres.len() - 1]
                .par_iter()
                .flat_map_iter(|p| {
                    let ball = &ball;
                    generators
                        .iter()
                        .map(move |(i, g)| (p.compose(g), i))
                        .filter(move |(q, _)| !ball.contains_key(q))
                })
                .collect();

            let mut sphere = Vec::new();
            for (q, i) in candidates {
                if let Entry::Vacant(slot) = ball.entry(q) {
                    slot.insert(BallEntry {
                        distance,
                        link: Link::Via(i),
                    });
                    sphere.push(q);
                }
            }
            debug!(distance, size = sphere.len(), "enumerated sphere");
            if sphere.is_empty() {
                break;
            }
            spheres.push(sphere);
        }

        info!(
            radius,
            elements = ball.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ball ready"
        );
        MeetInTheMiddle {
            generators,
            ball,
            spheres,
        }
    }

    pub fn icosahedral() -> Result<Self> {
        Ok(Self::new(
            Arc::new(GeneratorSet::icosahedral()?),
            DEFAULT_RADIUS,
        ))
    }

    /// Largest distance stored in the ball. Can be below the requested radius
    /// when the ball already covers the whole group.
    pub fn radius(&self) -> usize {
        self.spheres.len() - 1
    }

    /// Longest word this search can find.
    pub fn reach(&self) -> usize {
        2 * self.radius()
    }

    pub fn ball_len(&self) -> usize {
        self.ball.len()
    }

    pub fn sphere(&self, distance: usize) -> &[Perm] {
        self.spheres.get(distance).map_or(&[], Vec::as_slice)
    }

    pub fn sphere_sizes(&self) -> Vec<u64> {
        self.spheres.iter().map(|s| s.len() as u64).collect()
    }

    /// Distance of `p` if it lies inside the ball.
    pub fn ball_distance(&self, p: &Perm) -> Option<usize> {
        self.ball.get(p).map(|e| e.distance as usize)
    }

    fn ball_path(&self, p: &Perm) -> Result<Path> {
        walk_parent_links(&self.generators, *p, self.radius(), |q| {
            self.ball
                .get(q)
                .map(|e| e.link)
                .ok_or(GroupError::Unreachable {
                    rank: u64::from(rank_even(q).get()),
                })
        })
    }

    /// The word for `h⁻¹`: `h`'s word reversed, each step inverted.
    fn inverse_ball_path(&self, h: &Perm) -> Result<Path> {
        let path = self.ball_path(h)?;
        Ok(path
            .steps()
            .iter()
            .rev()
            .map(|&i| self.generators.inverse_index(i))
            .collect())
    }
}

impl ShortestPath for MeetInTheMiddle {
    fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    fn shortest_path(&self, target: &Perm) -> Result<Path> {
        if !target.parity().is_even() {
            return Err(GroupError::OddPermutation);
        }
        let radius = self.radius();
        for k in 0..=self.reach() {
            let a = k.min(radius);
            let b = k - a;
            let hit = self.sphere(b).par_iter().find_first(|h| {
                self.ball_distance(&target.compose(h)) == Some(a)
            });
            if let Some(h) = hit {
                let x = target.compose(h);
                return Ok(self.ball_path(&x)?.concat(self.inverse_ball_path(h)?));
            }
        }
        Err(GroupError::Unreachable {
            rank: u64::from(rank_even(target).get()),
        })
    }
}
