use std::fmt;

use itertools::Itertools;

use crate::{
    error::{GroupError, Result},
    generators::{GenIndex, GeneratorSet},
    permutation::Perm,
    rank::lehmer_rank,
};

use super::slot::Link;

/// A word in the generators.
///
/// The path `[s1, s2, …, sk]` stands for `id ∘ s1 ∘ s2 ∘ … ∘ sk`, which is
/// what [`Path::product`] computes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<GenIndex>,
}

impl Path {
    pub fn new(steps: Vec<GenIndex>) -> Self {
        Path { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[GenIndex] {
        &self.steps
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = GenIndex> + '_ {
        self.steps.iter().copied()
    }

    /// The generators along the path, first applied first.
    pub fn permutations(&self, generators: &GeneratorSet) -> Vec<Perm> {
        self.iter().map(|i| generators[i]).collect()
    }

    pub fn product(&self, generators: &GeneratorSet) -> Perm {
        Perm::product(self.iter().map(|i| &generators[i]))
    }

    /// Whether the path multiplies out to `target`.
    pub fn verify(&self, generators: &GeneratorSet, target: &Perm) -> bool {
        self.product(generators) == *target
    }

    /// The word for `a ∘ b`, given words for `a` and `b`.
    pub fn concat(mut self, other: Path) -> Path {
        self.steps.extend(other.steps);
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.steps.iter().join(" "))
    }
}

impl FromIterator<GenIndex> for Path {
    fn from_iter<I: IntoIterator<Item = GenIndex>>(iter: I) -> Self {
        Path::new(iter.into_iter().collect())
    }
}

/// Follows parent links from `target` back to the identity.
///
/// `link_of` reports how an element was first reached. Each `Via(g)` step moves
/// to `current ∘ g⁻¹`; the collected generators are reversed so the first one
/// applied comes first. `max_len` bounds the walk, so a corrupt table cannot
/// loop forever.
pub(crate) fn walk_parent_links<F>(
    generators: &GeneratorSet,
    target: Perm,
    max_len: usize,
    mut link_of: F,
) -> Result<Path>
where
    F: FnMut(&Perm) -> Result<Link>,
{
    let mut steps = Vec::new();
    let mut current = target;
    loop {
        match link_of(&current)? {
            Link::Root => break,
            Link::Via(g) => {
                if steps.len() == max_len {
                    return Err(GroupError::Unreachable {
                        rank: u64::from(lehmer_rank(&target).0),
                    });
                }
                steps.push(g);
                current = current.compose(generators.inverse(g));
            }
        }
    }
    steps.reverse();
    Ok(Path::new(steps))
}
