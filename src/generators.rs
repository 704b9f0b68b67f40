//! # Generator sets
//!
//! The Cayley graph searched by [`crate::cayley`] is defined by a
//! [`GeneratorSet`]: an ordered list of even permutations that is closed under
//! inversion. Every generator gets a stable [`GenIndex`]; paths are sequences of
//! these indices.
//!
//! The default set is [`GeneratorSet::icosahedral`]: the twelve symbols are the
//! vertices of an icosahedron and each generator turns the five neighbours of
//! one vertex by one or two fifths of a turn in either direction, giving
//! 12 × 4 = 48 five-cycles.

use std::{fmt, ops::Index};

use ahash::AHashMap;
use itertools::Itertools;

use crate::{
    error::{GroupError, Result},
    permutation::{CycleNotation, Perm},
};

pub mod icosahedron;

use icosahedron::{DEGREE, RINGS, VERTICES};

/// Generator indices share a table byte with two state bits.
pub const MAX_GENERATORS: usize = 63;

/// Position of a generator in its [`GeneratorSet`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_more::Into,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct GenIndex(u8);

impl GenIndex {
    pub(crate) const fn new_unchecked(i: u8) -> Self {
        GenIndex(i)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where an icosahedral generator comes from: the vertex whose neighbours
/// turn, and the signed number of fifth-turns (`1, 2, -2, -1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Twist {
    pub vertex: u8,
    pub turns: i8,
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}", self.vertex, self.turns)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSet {
    perms: Vec<Perm>,
    inverses: Vec<GenIndex>,
    twists: Option<Vec<Twist>>,
}

impl GeneratorSet {
    /// Validates a generating set.
    ///
    /// The set must be non-empty, hold at most [`MAX_GENERATORS`] distinct
    /// even permutations and contain the inverse of each of them.
    /// Connectivity of the Cayley graph is only known once a full table is built.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::{generators::GeneratorSet, permutation::Perm};
    /// let c = Perm::from_disjoint_cycles(&[vec![0, 1, 2]]).unwrap();
    /// assert!(GeneratorSet::new(vec![c, c.inverse()]).is_ok());
    /// assert!(GeneratorSet::new(vec![c]).is_err());
    /// ```
    pub fn new(perms: Vec<Perm>) -> Result<Self> {
        if perms.is_empty() {
            return Err(GroupError::EmptyGenerators);
        }
        if perms.len() > MAX_GENERATORS {
            return Err(GroupError::TooManyGenerators {
                len: perms.len(),
                max: MAX_GENERATORS,
            });
        }

        let mut position: AHashMap<Perm, usize> = AHashMap::with_capacity(perms.len());
        for (index, p) in perms.iter().enumerate() {
            if !p.parity().is_even() {
                return Err(GroupError::OddGenerator { index });
            }
            if let Some(&first) = position.get(p) {
                return Err(GroupError::DuplicateGenerator { index, first });
            }
            position.insert(*p, index);
        }

        let inverses = perms
            .iter()
            .enumerate()
            .map(|(index, p)| {
                position
                    .get(&p.inverse())
                    .map(|&i| GenIndex(i as u8))
                    .ok_or(GroupError::MissingInverse { index })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GeneratorSet {
            perms,
            inverses,
            twists: None,
        })
    }

    /// The 48 icosahedral twists.
    ///
    /// Generator `4v + (n-1)` sends the `j`-th neighbour of vertex `v` to the
    /// `(j+n)`-th, for `n` in `1..=4`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::generators::GeneratorSet;
    /// let gens = GeneratorSet::icosahedral().unwrap();
    /// assert_eq!(gens.len(), 48);
    /// assert_eq!(gens.to_string().split(' ').next(), Some("(12345)"));
    /// ```
    pub fn icosahedral() -> Result<Self> {
        let mut perms = Vec::with_capacity(VERTICES * (DEGREE - 1));
        let mut twists = Vec::with_capacity(VERTICES * (DEGREE - 1));
        for (vertex, ring) in RINGS.iter().enumerate() {
            for n in 1..DEGREE {
                let mut map: Vec<usize> = (0..VERTICES).collect();
                for (j, &w) in ring.iter().enumerate() {
                    map[w as usize] = ring[(j + n) % DEGREE] as usize;
                }
                perms.push(Perm::from_permutation(&map)?);
                twists.push(Twist {
                    vertex: vertex as u8,
                    turns: if n < 3 { n as i8 } else { n as i8 - DEGREE as i8 },
                });
            }
        }
        let mut set = Self::new(perms)?;
        set.twists = Some(twists);
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.perms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    pub fn perms(&self) -> &[Perm] {
        &self.perms
    }

    pub fn get(&self, index: GenIndex) -> Option<&Perm> {
        self.perms.get(index.index())
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (GenIndex, &Perm)> + '_ {
        self.perms
            .iter()
            .enumerate()
            .map(|(i, p)| (GenIndex(i as u8), p))
    }

    /// Index of the generator undoing `index`.
    pub fn inverse_index(&self, index: GenIndex) -> GenIndex {
        self.inverses[index.index()]
    }

    pub fn inverse(&self, index: GenIndex) -> &Perm {
        &self[self.inverse_index(index)]
    }

    pub fn index_of(&self, p: &Perm) -> Option<GenIndex> {
        self.perms
            .iter()
            .position(|g| g == p)
            .map(|i| GenIndex(i as u8))
    }

    /// Geometric provenance, for sets built by [`GeneratorSet::icosahedral`].
    pub fn twist(&self, index: GenIndex) -> Option<Twist> {
        self.twists.as_ref()?.get(index.index()).copied()
    }
}

impl Index<GenIndex> for GeneratorSet {
    type Output = Perm;

    fn index(&self, index: GenIndex) -> &Self::Output {
        &self.perms[index.index()]
    }
}

impl fmt::Display for GeneratorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.perms
                .iter()
                .map(|p| p.cycle_notation(CycleNotation::default()))
                .join(" ")
        )
    }
}
