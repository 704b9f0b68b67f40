//! # Shortest paths in the Cayley graph of A12
//!
//! Vertices are the 239 500 800 even permutations of twelve symbols; there is
//! an edge `g → g ∘ s` for every generator `s`. Two searches answer
//! shortest-path queries:
//!
//! - [`CayleyTable`] stores one byte per element, filled by an exhaustive
//!   parallel BFS. [`CayleyEngine`] wraps it with a build-once lifecycle.
//! - [`MeetInTheMiddle`] keeps a ball of small radius around the identity and
//!   answers any query within twice that radius without the full table.
//!
//! Both implement [`ShortestPath`].

use crate::{error::Result, generators::GeneratorSet, permutation::Perm};

pub mod engine;
pub mod histogram;
pub mod meet;
pub mod path;
pub(crate) mod slot;
pub mod table;
#[cfg(test)]
mod tests;

pub use engine::CayleyEngine;
pub use histogram::{Histogram, ICOSAHEDRAL_WORD_LENGTHS};
pub use meet::MeetInTheMiddle;
pub use path::Path;
pub use slot::Link;
pub use table::{BuildConfig, CayleyTable, DirectionPolicy};

pub trait ShortestPath {
    fn generators(&self) -> &GeneratorSet;

    /// A minimum-length word for `target`, first generator first.
    ///
    /// Odd permutations fail with [`crate::error::GroupError::OddPermutation`].
    fn shortest_path(&self, target: &Perm) -> Result<Path>;

    fn distance(&self, target: &Perm) -> Result<usize> {
        self.shortest_path(target).map(|p| p.len())
    }

    /// The shortest path spelled out as permutations.
    fn shortest_path_perms(&self, target: &Perm) -> Result<Vec<Perm>> {
        let path = self.shortest_path(target)?;
        Ok(path.permutations(self.generators()))
    }
}
