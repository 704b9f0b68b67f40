//! # Permutations
//!
//! This module provides the `Perm` type: a permutation of the twelve symbols
//! `0..12`, the alphabet on which the alternating group A12 acts.
//!
//! ## Key Features:
//!
//! - **Representation**: A `Perm` is stored by its direct mapping (`map[i]` is
//!   the image of `i`) packed into a `[u8; 12]`, so it is `Copy` and cheap to hash.
//! - **Construction**:
//!   - Identity permutation: `Perm::id()`.
//!   - Validated from a raw sequence: `Perm::from_permutation(&[...])`.
//!   - From disjoint cycles: `Perm::from_disjoint_cycles(&[vec![...]])`.
//!   - Uniformly at random: `Perm::random(rng)`, `Perm::random_even(rng)`.
//! - **Basic Operations**:
//!   - Inverse: `p.inverse()`.
//!   - Composition: `p1.compose(&p2)` (applies `p2` then `p1`).
//!   - Products of many factors: `Perm::product(iter)`.
//!   - Power: `p.pow(k)`.
//!   - Parity: `p.parity()`, `p.sign()`.
//! - **Cycle Utilities**:
//!   - Find cycle decomposition: `p.find_cycles()`.
//!   - Cycle notation: `p.cycle_notation(CycleNotation::default())`.
//!
//! Every path returned by the search engines in [`crate::cayley`] is read with
//! this composition order: the path `[s1, s2, s3]` denotes
//! `id.compose(s1).compose(s2).compose(s3)`.

use std::{fmt, ops::BitXor, ops::Index};

use bitvec::prelude::*;
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::error::{GroupError, Result};

/// Number of symbols permuted.
pub const SYMBOLS: usize = 12;

const IDENTITY_MAP: [u8; SYMBOLS] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// A permutation of `0..12`.
///
/// # Examples
///
/// ```
/// use kiss::permutation::Perm;
///
/// // 0->1, 1->2, 2->0, everything else fixed
/// let p = Perm::from_permutation(&[1, 2, 0, 3, 4, 5, 6, 7, 8, 9, 10, 11]).unwrap();
/// assert_eq!(p[0], 1);
/// assert_eq!(p.pow(3), Perm::id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct Perm {
    map: [u8; SYMBOLS],
}

/// Whether a permutation is a product of an even or an odd number of transpositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn is_even(self) -> bool {
        self == Parity::Even
    }

    /// Parity of a permutation made of `n` transpositions.
    pub fn of_transpositions(n: usize) -> Self {
        if n % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl BitXor for Parity {
    type Output = Parity;

    fn bitxor(self, rhs: Self) -> Self::Output {
        if self == rhs {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl Default for Perm {
    fn default() -> Self {
        Self::id()
    }
}

impl Perm {
    // --------------------------------------------------------------------------------------------
    // Basic Constructors and Accessors
    // --------------------------------------------------------------------------------------------

    /// The identity permutation.
    pub const fn id() -> Self {
        Perm { map: IDENTITY_MAP }
    }

    /// Alias of [`Perm::id`].
    pub const fn identity() -> Self {
        Self::id()
    }

    /// Wraps a mapping that is already known to be a bijection.
    pub(crate) const fn from_map_unchecked(map: [u8; SYMBOLS]) -> Self {
        Perm { map }
    }

    /// Validates a raw sequence: `seq[i]` is the image of `i`.
    ///
    /// Fails with [`GroupError::InvalidPermutation`] unless `seq` holds each of
    /// `0..12` exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::Perm;
    /// assert!(Perm::from_permutation(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]).is_ok());
    /// assert!(Perm::from_permutation(&[0, 0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]).is_err());
    /// assert!(Perm::from_permutation(&[0, 1, 2]).is_err());
    /// ```
    pub fn from_permutation(seq: &[usize]) -> Result<Self> {
        if seq.len() != SYMBOLS {
            return Err(GroupError::InvalidPermutation {
                reason: format!("expected {SYMBOLS} symbols, got {}", seq.len()),
            });
        }
        let mut seen = bitarr![u16, Lsb0; 0; SYMBOLS];
        let mut map = [0u8; SYMBOLS];
        for (slot, &s) in map.iter_mut().zip(seq) {
            if s >= SYMBOLS {
                return Err(GroupError::InvalidPermutation {
                    reason: format!("symbol {s} is not below {SYMBOLS}"),
                });
            }
            if seen.replace(s, true) {
                return Err(GroupError::InvalidPermutation {
                    reason: format!("symbol {s} appears twice"),
                });
            }
            *slot = s as u8;
        }
        Ok(Perm { map })
    }

    /// Creates a permutation from a set of disjoint cycles.
    /// Symbols not mentioned are fixed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::Perm;
    /// let p = Perm::from_disjoint_cycles(&[vec![0, 1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(&p.map()[..5], &[1, 2, 0, 4, 3]);
    ///
    /// // Error if cycles are not disjoint
    /// assert!(Perm::from_disjoint_cycles(&[vec![0, 1], vec![1, 2]]).is_err());
    /// ```
    pub fn from_disjoint_cycles(cycles: &[Vec<usize>]) -> Result<Self> {
        let mut seen = bitarr![u16, Lsb0; 0; SYMBOLS];
        let mut map = IDENTITY_MAP;
        for cycle in cycles {
            for &s in cycle {
                if s >= SYMBOLS {
                    return Err(GroupError::InvalidPermutation {
                        reason: format!("symbol {s} is not below {SYMBOLS}"),
                    });
                }
                if seen.replace(s, true) {
                    return Err(GroupError::InvalidPermutation {
                        reason: "cycles are not disjoint".to_string(),
                    });
                }
            }
            for (&from, &to) in cycle.iter().circular_tuple_windows() {
                map[from] = to as u8;
            }
        }
        Ok(Perm { map })
    }

    /// Returns the mapping: `map()[i]` is the image of `i`.
    pub fn map(&self) -> &[u8; SYMBOLS] {
        &self.map
    }

    /// The mapping widened to `usize`, the form accepted by [`Perm::from_permutation`].
    pub fn to_vec(&self) -> Vec<usize> {
        self.map.iter().map(|&s| s as usize).collect()
    }

    // --------------------------------------------------------------------------------------------
    // Basic Operations
    // --------------------------------------------------------------------------------------------

    /// Returns the inverse of the permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::Perm;
    /// let p = Perm::from_disjoint_cycles(&[vec![0, 5, 3]]).unwrap();
    /// assert_eq!(p.compose(&p.inverse()), Perm::id());
    /// ```
    pub fn inverse(&self) -> Self {
        let mut map = [0u8; SYMBOLS];
        for (i, &j) in self.map.iter().enumerate() {
            map[j as usize] = i as u8;
        }
        Perm { map }
    }

    /// Composes `self` with another permutation `other`, returning a new permutation:
    /// `(self ◦ other)(i) = self[other[i]]`, i.e. `other` acts first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::Perm;
    /// let a = Perm::from_disjoint_cycles(&[vec![0, 1]]).unwrap();
    /// let b = Perm::from_disjoint_cycles(&[vec![1, 2]]).unwrap();
    /// // b sends 1 to 2, then a leaves 2 alone
    /// assert_eq!(a.compose(&b)[1], 2);
    /// ```
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        let mut map = [0u8; SYMBOLS];
        for (m, &o) in map.iter_mut().zip(other.map.iter()) {
            *m = self.map[o as usize];
        }
        Perm { map }
    }

    /// Folds `compose` over `factors`, starting from the identity.
    ///
    /// This is how a search path is turned back into a group element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::Perm;
    /// let a = Perm::from_disjoint_cycles(&[vec![0, 1, 2]]).unwrap();
    /// let b = Perm::from_disjoint_cycles(&[vec![2, 3, 4]]).unwrap();
    /// assert_eq!(Perm::product([&a, &b]), a.compose(&b));
    /// assert_eq!(Perm::product(std::iter::empty()), Perm::id());
    /// ```
    pub fn product<'a, I>(factors: I) -> Self
    where
        I: IntoIterator<Item = &'a Perm>,
    {
        factors
            .into_iter()
            .fold(Perm::id(), |acc, factor| acc.compose(factor))
    }

    /// Checks if this permutation is the identity permutation.
    pub fn is_identity(&self) -> bool {
        self.map == IDENTITY_MAP
    }

    /// Whether the permutation is even or odd.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::{Parity, Perm};
    /// let p = Perm::from_disjoint_cycles(&[vec![0, 1], vec![2, 3]]).unwrap();
    /// assert_eq!(p.parity(), Parity::Even);
    ///
    /// let q = Perm::from_disjoint_cycles(&[vec![0, 1, 2, 3]]).unwrap();
    /// assert_eq!(q.parity(), Parity::Odd);
    /// ```
    pub fn parity(&self) -> Parity {
        // Each cycle of length k contributes (k-1) transpositions
        let transpositions: usize = self.find_cycles().iter().map(|c| c.len() - 1).sum();
        Parity::of_transpositions(transpositions)
    }

    /// Returns +1 for an even permutation and -1 for an odd one.
    pub fn sign(&self) -> i8 {
        match self.parity() {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }

    /// Computes the k-th power of the permutation (composition with itself k times).
    /// For k = 0, it returns the identity.
    pub fn pow(&self, k: usize) -> Self {
        let mut result = Perm::id();
        let mut base = *self;
        let mut exp = k;

        while exp > 0 {
            if exp % 2 == 1 {
                result = result.compose(&base);
            }
            base = base.compose(&base);
            exp /= 2;
        }
        result
    }

    // --------------------------------------------------------------------------------------------
    // Random Elements
    // --------------------------------------------------------------------------------------------

    /// A uniformly random permutation of the twelve symbols.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut map = IDENTITY_MAP;
        map.shuffle(rng);
        Perm { map }
    }

    /// A uniformly random element of A12.
    ///
    /// Odd draws are paired with even ones by swapping the images of the
    /// last two symbols, which keeps the distribution uniform.
    pub fn random_even<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut p = Self::random(rng);
        if p.parity() == Parity::Odd {
            p.map.swap(SYMBOLS - 2, SYMBOLS - 1);
        }
        p
    }

    // --------------------------------------------------------------------------------------------
    // Cycles
    // --------------------------------------------------------------------------------------------

    /// Returns the cycle decomposition of `self`, fixed points included.
    /// Each cycle starts at its smallest symbol, e.g. `[0, 2, 1]` means `0->2, 2->1, 1->0`,
    /// and cycles are ordered by that symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::Perm;
    /// let p = Perm::from_disjoint_cycles(&[vec![0, 2, 1]]).unwrap();
    /// let cycles = p.find_cycles();
    /// assert_eq!(cycles[0], vec![0, 2, 1]);
    /// assert_eq!(cycles.len(), 10);
    /// ```
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = bitarr![u16, Lsb0; 0; SYMBOLS];
        let mut cycles = Vec::new();
        for i in 0..SYMBOLS {
            if visited[i] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = i;
            while !visited.replace(j, true) {
                cycle.push(j);
                j = self.map[j] as usize;
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Formats the permutation in cycle notation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiss::permutation::{CycleNotation, Perm};
    /// let p = Perm::from_disjoint_cycles(&[vec![0, 10, 3, 5, 9]]).unwrap();
    /// assert_eq!(p.cycle_notation(CycleNotation::default()), "(0a359)");
    /// assert_eq!(p.cycle_notation(CycleNotation::spaced()), "(0 10 3 5 9)");
    /// assert_eq!(Perm::id().cycle_notation(CycleNotation::default()), "");
    /// ```
    pub fn cycle_notation(&self, notation: CycleNotation) -> String {
        let cycles = self
            .find_cycles()
            .into_iter()
            .filter(|c| notation.include_fixed_points || c.len() > 1);
        match notation.style {
            CycleStyle::Compact => cycles
                .map(|c| format!("({})", c.into_iter().map(compact_symbol).collect::<String>()))
                .collect(),
            CycleStyle::Spaced => {
                let s = cycles.map(|c| format!("({})", c.iter().join(" "))).join(" ");
                if s.is_empty() {
                    "()".to_string()
                } else {
                    s
                }
            }
        }
    }
}

fn compact_symbol(s: usize) -> char {
    // 10 and 11 print as 'a' and 'b'
    char::from_digit(s as u32, 16).unwrap_or('?')
}

/// How cycles are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleStyle {
    /// One character per symbol, `a` and `b` for 10 and 11: `(0a359)(12)`.
    /// The identity prints as the empty string.
    #[default]
    Compact,
    /// Space separated symbols and cycles: `(0 10 3 5 9) (1 2)`.
    /// The identity prints as `()`.
    Spaced,
}

/// Configuration for [`Perm::cycle_notation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleNotation {
    pub style: CycleStyle,
    pub include_fixed_points: bool,
}

impl CycleNotation {
    pub fn spaced() -> Self {
        CycleNotation {
            style: CycleStyle::Spaced,
            include_fixed_points: false,
        }
    }

    pub fn with_fixed_points(self) -> Self {
        CycleNotation {
            include_fixed_points: true,
            ..self
        }
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First show cycle notation
        write!(f, "{}", self.cycle_notation(CycleNotation::spaced()))?;

        // Then show one-line notation
        write!(f, " [{}]", self.map.iter().join(" "))
    }
}

impl Index<usize> for Perm {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.map[index]
    }
}

impl TryFrom<&[usize]> for Perm {
    type Error = GroupError;

    fn try_from(value: &[usize]) -> Result<Self> {
        Perm::from_permutation(value)
    }
}

impl From<Perm> for [u8; SYMBOLS] {
    fn from(p: Perm) -> Self {
        p.map
    }
}


#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use proptest::prelude::*;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::strategy::arb_perm;
    use super::*;

    fn mixed() -> Perm {
        Perm::from_permutation(&[1, 2, 0, 3, 4, 5, 6, 7, 8, 9, 11, 10]).unwrap()
    }

    #[test]
    fn test_from_permutation_errors() {
        assert!(matches!(
            Perm::from_permutation(&[0; 11]),
            Err(GroupError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            Perm::from_permutation(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12]),
            Err(GroupError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            Perm::from_permutation(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10]),
            Err(GroupError::InvalidPermutation { .. })
        ));
        let err = Perm::from_permutation(&[1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]).unwrap_err();
        assert_eq!(err.to_string(), "invalid permutation: symbol 1 appears twice");
    }

    #[test]
    fn test_from_disjoint_cycles() {
        let p = Perm::from_disjoint_cycles(&[vec![0, 3, 2], vec![1, 4]]).unwrap();
        assert_eq!(&p.map()[..5], &[3, 4, 0, 2, 1]);

        let p = Perm::from_disjoint_cycles(&[]).unwrap();
        assert!(p.is_identity());

        let p = Perm::from_disjoint_cycles(&[vec![7]]).unwrap();
        assert!(p.is_identity());

        assert!(Perm::from_disjoint_cycles(&[vec![0, 12]]).is_err());
    }

    #[test]
    fn test_compose() {
        // (0 1)(1 2) = (0 1 2) when the right factor acts first
        let a = Perm::from_disjoint_cycles(&[vec![0, 1]]).unwrap();
        let b = Perm::from_disjoint_cycles(&[vec![1, 2]]).unwrap();
        let c = Perm::from_disjoint_cycles(&[vec![0, 1, 2]]).unwrap();
        assert_eq!(a.compose(&b), c);
        assert_ne!(b.compose(&a), c);
        assert_eq!(b.compose(&a), c.inverse());
    }

    #[test]
    fn test_find_cycles() {
        let cycles = mixed().find_cycles();
        assert_eq!(cycles.len(), 9);
        assert_eq!(cycles[0], vec![0, 1, 2]);
        assert_eq!(cycles[8], vec![10, 11]);
    }

    #[test]
    fn test_sign() {
        assert_eq!(Perm::id().sign(), 1);
        assert_eq!(mixed().sign(), -1);
        assert_eq!(mixed().pow(2).sign(), 1);
    }

    #[test]
    fn test_pow() {
        let p = mixed();
        assert_eq!(p.pow(0), Perm::id());
        assert_eq!(p.pow(1), p);
        assert_eq!(p.pow(6), Perm::id());
        assert_eq!(p.pow(3), Perm::from_disjoint_cycles(&[vec![10, 11]]).unwrap());
    }

    #[test]
    fn test_cycle_notation() {
        let p = mixed();
        assert_snapshot!(p.cycle_notation(CycleNotation::default()), @"(012)(ab)");
        assert_snapshot!(p.cycle_notation(CycleNotation::spaced()), @"(0 1 2) (10 11)");
        assert_snapshot!(
            p.cycle_notation(CycleNotation::default().with_fixed_points()),
            @"(012)(3)(4)(5)(6)(7)(8)(9)(ab)"
        );
        assert_snapshot!(Perm::id().cycle_notation(CycleNotation::spaced()), @"()");
    }

    #[test]
    fn test_display() {
        assert_snapshot!(mixed().to_string(), @"(0 1 2) (10 11) [1 2 0 3 4 5 6 7 8 9 11 10]");
        assert_snapshot!(Perm::id().to_string(), @"() [0 1 2 3 4 5 6 7 8 9 10 11]");
    }

    #[test]
    fn test_random_even() {
        let mut rng = SmallRng::seed_from_u64(239500800);
        for _ in 0..200 {
            let p = Perm::random_even(&mut rng);
            assert_eq!(p.parity(), Parity::Even);
            assert!(Perm::from_permutation(&p.to_vec()).is_ok());
        }
    }

    proptest! {
        #[test]
        fn parity_is_a_homomorphism(a in arb_perm(), b in arb_perm()) {
            prop_assert_eq!(a.compose(&b).parity(), a.parity() ^ b.parity());
        }

        #[test]
        fn inverse_cancels(a in arb_perm()) {
            prop_assert!(a.compose(&a.inverse()).is_identity());
            prop_assert!(a.inverse().compose(&a).is_identity());
            prop_assert_eq!(a.inverse().parity(), a.parity());
        }

        #[test]
        fn compose_is_associative(a in arb_perm(), b in arb_perm(), c in arb_perm()) {
            prop_assert_eq!(a.compose(&b).compose(&c), a.compose(&b.compose(&c)));
        }

        #[test]
        fn cycles_rebuild_the_permutation(a in arb_perm()) {
            prop_assert_eq!(Perm::from_disjoint_cycles(&a.find_cycles()).unwrap(), a);
        }
    }

    #[test]
    fn identity_is_even() {
        assert_eq!(Perm::id().parity(), Parity::Even);
        assert_eq!(Parity::Odd ^ Parity::Odd, Parity::Even);
    }
}
