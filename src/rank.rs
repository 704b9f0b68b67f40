//! # Ranks
//!
//! A dense numbering of A12: every even permutation of the twelve symbols gets a
//! unique [`Rank`] in `0..DOMAIN_SIZE`, which is used directly as an index into
//! the distance table.
//!
//! The rank is the Lehmer code rank halved. The Lehmer digit `c_i` counts the
//! symbols to the right of position `i` that are smaller than `map[i]`, and the
//! full rank is `Σ c_i (11-i)!`. The digit sum has the parity of the
//! permutation, so for even permutations the digit `c_10` (weight `1!`) is
//! determined by the others and dropping it leaves `Σ_{i<10} c_i (11-i)!/2`.
//! This keeps the lexicographic order of the even permutations.

use crate::{
    error::{GroupError, Result},
    permutation::{Parity, Perm, SYMBOLS},
};

/// `|A12| = 12!/2`.
pub const DOMAIN_SIZE: u32 = 239_500_800;

/// `(11-i)!/2` for the first ten Lehmer digits.
const WEIGHTS: [u32; SYMBOLS - 2] = half_factorial_weights();

const fn half_factorial_weights() -> [u32; SYMBOLS - 2] {
    let mut weights = [0u32; SYMBOLS - 2];
    let mut i = 0;
    while i < SYMBOLS - 2 {
        let mut f = 1u32;
        let mut k = 2u32;
        while k as usize <= SYMBOLS - 1 - i {
            f *= k;
            k += 1;
        }
        weights[i] = f / 2;
        i += 1;
    }
    weights
}

const ALL_SYMBOLS: u16 = (1 << SYMBOLS) - 1;

/// The position of an even permutation in the lexicographic order of A12.
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
pub struct Rank(u32);

impl Rank {
    /// Rank of the identity.
    pub const IDENTITY: Rank = Rank(0);

    /// Checks that `rank` lies in `0..DOMAIN_SIZE`.
    pub fn new(rank: u64) -> Result<Self> {
        if rank < u64::from(DOMAIN_SIZE) {
            Ok(Rank(rank as u32))
        } else {
            Err(GroupError::RankOutOfRange { rank })
        }
    }

    pub(crate) const fn new_unchecked(rank: u32) -> Self {
        Rank(rank)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The rank as an index into a table of `DOMAIN_SIZE` slots.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The even permutation with this rank.
    pub fn unrank(self) -> Perm {
        unrank_unchecked(self.0)
    }

    /// Iterates over every rank in the domain.
    pub fn all() -> impl DoubleEndedIterator<Item = Rank> + ExactSizeIterator {
        (0..DOMAIN_SIZE).map(Rank)
    }
}

impl TryFrom<u64> for Rank {
    type Error = GroupError;

    fn try_from(value: u64) -> Result<Self> {
        Rank::new(value)
    }
}

/// Ranks `p`, failing with [`GroupError::OddPermutation`] if it is odd.
///
/// # Examples
///
/// ```
/// # use kiss::{permutation::Perm, rank::{rank, DOMAIN_SIZE}};
/// assert_eq!(rank(&Perm::id()).unwrap().get(), 0);
///
/// let reversal = Perm::from_permutation(&[11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
/// assert_eq!(rank(&reversal).unwrap().get(), DOMAIN_SIZE - 1);
/// ```
pub fn rank(p: &Perm) -> Result<Rank> {
    match lehmer_rank(p) {
        (r, Parity::Even) => Ok(Rank(r)),
        (_, Parity::Odd) => Err(GroupError::OddPermutation),
    }
}

/// The even permutation with rank `rank`, failing with
/// [`GroupError::RankOutOfRange`] outside `0..DOMAIN_SIZE`.
///
/// # Examples
///
/// ```
/// # use kiss::rank::{unrank, DOMAIN_SIZE};
/// let p = unrank(1).unwrap();
/// assert_eq!(p.to_vec(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 9]);
/// assert!(unrank(u64::from(DOMAIN_SIZE)).is_err());
/// ```
pub fn unrank(rank: u64) -> Result<Perm> {
    Rank::new(rank).map(Rank::unrank)
}

impl Perm {
    /// See [`rank`].
    pub fn rank(&self) -> Result<Rank> {
        rank(self)
    }
}

/// Halved Lehmer rank together with the parity read off the digit sum.
///
/// For odd permutations the returned number is meaningless.
#[inline]
pub(crate) fn lehmer_rank(p: &Perm) -> (u32, Parity) {
    let mut unused = ALL_SYMBOLS;
    let mut rank = 0u32;
    let mut digit_sum = 0u32;
    for (i, &s) in p.map().iter().enumerate() {
        let digit = (unused & ((1u16 << s) - 1)).count_ones();
        unused &= !(1u16 << s);
        digit_sum += digit;
        if i < SYMBOLS - 2 {
            rank += digit * WEIGHTS[i];
        }
    }
    (rank, Parity::of_transpositions(digit_sum as usize))
}

/// Ranks a permutation that is even by construction.
#[inline]
pub(crate) fn rank_even(p: &Perm) -> Rank {
    let (r, parity) = lehmer_rank(p);
    debug_assert!(parity.is_even(), "ranked an odd permutation {p}");
    Rank(r)
}

#[inline]
pub(crate) fn unrank_unchecked(rank: u32) -> Perm {
    let mut digits = [0u32; SYMBOLS];
    let mut rest = rank;
    let mut digit_sum = 0;
    for (d, &w) in digits.iter_mut().zip(WEIGHTS.iter()) {
        *d = rest / w;
        rest %= w;
        digit_sum += *d;
    }
    // restore the digit dropped by halving; the last digit is always 0
    digits[SYMBOLS - 2] = digit_sum & 1;

    let mut unused = ALL_SYMBOLS;
    let mut map = [0u8; SYMBOLS];
    for (slot, &d) in map.iter_mut().zip(digits.iter()) {
        let s = nth_set_bit(unused, d);
        unused &= !(1u16 << s);
        *slot = s as u8;
    }
    Perm::from_map_unchecked(map)
}

#[inline]
fn nth_set_bit(mut mask: u16, n: u32) -> u32 {
    for _ in 0..n {
        mask &= mask - 1;
    }
    mask.trailing_zeros()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::permutation::strategy::{arb_even_perm, arb_perm};

    #[test]
    fn weights() {
        assert_eq!(
            WEIGHTS,
            [19958400, 1814400, 181440, 20160, 2520, 360, 60, 12, 3, 1]
        );
        assert_eq!(WEIGHTS[0] * 12, DOMAIN_SIZE);
    }

    #[test]
    fn known_ranks() {
        assert_eq!(rank(&Perm::id()), Ok(Rank::IDENTITY));
        assert_eq!(Rank::IDENTITY.unrank(), Perm::id());

        let last = unrank(u64::from(DOMAIN_SIZE) - 1).unwrap();
        assert_eq!(last.to_vec(), (0..SYMBOLS).rev().collect::<Vec<_>>());

        let antipode =
            Perm::from_permutation(&[11, 9, 10, 6, 7, 8, 3, 4, 5, 1, 2, 0]).unwrap();
        assert_eq!(rank(&antipode).unwrap().get(), 237_643_426);
    }

    #[test]
    fn odd_permutations_have_no_rank() {
        let swap = Perm::from_disjoint_cycles(&[vec![0, 1]]).unwrap();
        assert_eq!(rank(&swap), Err(GroupError::OddPermutation));
        assert_eq!(swap.rank(), Err(GroupError::OddPermutation));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            unrank(u64::from(DOMAIN_SIZE)),
            Err(GroupError::RankOutOfRange {
                rank: u64::from(DOMAIN_SIZE)
            })
        );
        assert!(Rank::new(u64::MAX).is_err());
        assert!(Rank::try_from(u64::from(DOMAIN_SIZE) - 1).is_ok());
    }

    #[test]
    fn first_ranks_follow_lexicographic_order() {
        let perms: Vec<Perm> = Rank::all().take(2000).map(Rank::unrank).collect();
        for pair in perms.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(perms.iter().all(|p| p.parity().is_even()));
    }

    proptest! {
        #[test]
        fn rank_then_unrank(p in arb_even_perm()) {
            prop_assert_eq!(rank(&p)?.unrank(), p);
        }

        #[test]
        fn unrank_then_rank(r in 0..DOMAIN_SIZE) {
            let p = unrank(u64::from(r))?;
            prop_assert!(p.parity().is_even());
            prop_assert_eq!(rank(&p)?.get(), r);
        }

        #[test]
        fn rank_detects_parity(p in arb_perm()) {
            prop_assert_eq!(rank(&p).is_ok(), p.parity().is_even());
            prop_assert_eq!(lehmer_rank(&p).1, p.parity());
        }

        #[test]
        fn rank_preserves_order(a in arb_even_perm(), b in arb_even_perm()) {
            prop_assert_eq!(a.cmp(&b), rank(&a)?.cmp(&rank(&b)?));
        }
    }
}
