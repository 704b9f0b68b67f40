//! # Kiss
//!
//! Kiss finds shortest words in the Cayley graph of the alternating group A12.
//! The twelve symbols are the vertices of an icosahedron, and the default
//! generators twist the five neighbours of a vertex.
//!
//! - [`permutation`]: permutations of twelve symbols and their algebra.
//! - [`rank`]: a bijection between A12 and `0..239_500_800`.
//! - [`generators`]: validated generator sets and the icosahedron itself.
//! - [`cayley`]: the exhaustive distance table and the meet-in-the-middle search.
//!
//! ```
//! use std::sync::Arc;
//! use kiss::{cayley::{MeetInTheMiddle, ShortestPath}, generators::GeneratorSet, permutation::Perm};
//!
//! let gens = Arc::new(GeneratorSet::icosahedral()?);
//! let search = MeetInTheMiddle::new(gens.clone(), 2);
//! let target = gens.perms()[0].compose(&gens.perms()[4]);
//! let path = search.shortest_path(&target)?;
//! assert_eq!(path.len(), 2);
//! assert!(path.verify(&gens, &target));
//! # Ok::<(), kiss::error::GroupError>(())
//! ```

pub mod cayley;
pub mod error;
pub mod generators;
pub mod permutation;
pub mod rank;

pub use cayley::{CayleyEngine, MeetInTheMiddle, Path, ShortestPath};
pub use error::{GroupError, Result};
pub use generators::{GenIndex, GeneratorSet};
pub use permutation::Perm;
pub use rank::{rank, unrank, Rank};
