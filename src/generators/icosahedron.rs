//! The icosahedron whose vertices are the twelve symbols.
//!
//! Vertex 0 is the top, 1..=5 the upper ring, 6..=10 the lower ring and 11 the
//! bottom. Every ring in [`RINGS`] lists the five neighbours of a vertex in the
//! same rotational sense (seen from outside), starting from a fixed neighbour.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::permutation::Perm;

pub const VERTICES: usize = 12;
pub const DEGREE: usize = 5;

/// Neighbours of each vertex in cyclic order around it.
pub const RINGS: [[u8; DEGREE]; VERTICES] = [
    [1, 2, 3, 4, 5],
    [0, 5, 6, 7, 2],
    [0, 1, 7, 8, 3],
    [0, 2, 8, 9, 4],
    [0, 3, 9, 10, 5],
    [0, 4, 10, 6, 1],
    [11, 7, 1, 5, 10],
    [11, 8, 2, 1, 6],
    [11, 9, 3, 2, 7],
    [11, 10, 4, 3, 8],
    [11, 6, 5, 4, 9],
    [6, 10, 9, 8, 7],
];

/// The vertex opposite each vertex.
pub const ANTIPODES: [u8; VERTICES] = [11, 9, 10, 6, 7, 8, 3, 4, 5, 1, 2, 0];

pub fn neighbors(vertex: usize) -> &'static [u8; DEGREE] {
    &RINGS[vertex]
}

pub fn are_adjacent(a: usize, b: usize) -> bool {
    RINGS[a].contains(&(b as u8))
}

/// Point reflection through the centre, as a permutation of the vertices.
pub fn antipodal_map() -> Perm {
    Perm::from_map_unchecked(ANTIPODES)
}

/// Whether a symmetry keeps the rotational sense of the vertex rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Preserving,
    Reversing,
}

/// An element of the full symmetry group of the icosahedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symmetry {
    pub perm: Perm,
    pub orientation: Orientation,
}

/// All 120 symmetries: 60 rotations and 60 orientation reversing ones.
///
/// A symmetry is fixed by the image of vertex 0, the image of its first
/// neighbour and the orientation; the rest follows ring by ring.
pub fn symmetries() -> Vec<Symmetry> {
    let mut out = Vec::with_capacity(2 * VERTICES * DEGREE);
    for top in 0..VERTICES {
        for &first in &RINGS[top] {
            for orientation in [Orientation::Preserving, Orientation::Reversing] {
                if let Some(perm) = extend(top as u8, first, orientation) {
                    out.push(Symmetry { perm, orientation });
                }
            }
        }
    }
    out
}

fn extend(top: u8, first: u8, orientation: Orientation) -> Option<Perm> {
    let mut image: [Option<u8>; VERTICES] = [None; VERTICES];
    image[0] = Some(top);
    image[RINGS[0][0] as usize] = Some(first);

    let mut done = bitarr![u16, Lsb0; 0; VERTICES];
    let mut queue = VecDeque::from([0usize]);
    while let Some(v) = queue.pop_front() {
        if done.replace(v, true) {
            continue;
        }
        let ring = &RINGS[v];
        let target_ring = &RINGS[image[v]? as usize];

        // anchor the ring on any neighbour whose image is already known
        let (j0, anchor) = ring
            .iter()
            .enumerate()
            .find_map(|(j, &w)| image[w as usize].map(|s| (j, s)))?;
        let p = target_ring.iter().position(|&x| x == anchor)?;

        for (j, &w) in ring.iter().enumerate() {
            let offset = (j + DEGREE - j0) % DEGREE;
            let q = match orientation {
                Orientation::Preserving => (p + offset) % DEGREE,
                Orientation::Reversing => (p + DEGREE - offset) % DEGREE,
            };
            match image[w as usize] {
                Some(known) if known != target_ring[q] => return None,
                Some(_) => {}
                None => image[w as usize] = Some(target_ring[q]),
            }
            queue.push_back(w as usize);
        }
    }

    let map = image
        .iter()
        .map(|s| s.map(usize::from))
        .collect::<Option<Vec<_>>>()?;
    Perm::from_permutation(&map).ok()
}

#[cfg(test)]
mod tests {
    use ahash::AHashSet;

    use super::*;

    #[test]
    fn rings_describe_a_consistent_surface() {
        for v in 0..VERTICES {
            for (j, &w) in RINGS[v].iter().enumerate() {
                assert!(are_adjacent(w as usize, v));
                let next = RINGS[v][(j + 1) % DEGREE];
                assert!(are_adjacent(w as usize, next as usize));
                // the face (v, w, next) is seen with the same sense from w
                let ring_w = &RINGS[w as usize];
                let k = ring_w.iter().position(|&x| x == next).unwrap();
                assert_eq!(ring_w[(k + 1) % DEGREE] as usize, v);
            }
        }
    }

    #[test]
    fn antipodes_are_far() {
        let a = antipodal_map();
        assert!(a.compose(&a).is_identity());
        for v in 0..VERTICES {
            let w = ANTIPODES[v] as usize;
            assert_ne!(v, w);
            assert!(!are_adjacent(v, w));
            assert!(neighbors(v).iter().all(|&n| !are_adjacent(n as usize, w)));
        }
    }

    #[test]
    fn symmetry_group() {
        let all = symmetries();
        assert_eq!(all.len(), 120);
        let distinct: AHashSet<Perm> = all.iter().map(|s| s.perm).collect();
        assert_eq!(distinct.len(), 120);

        let reversing: Vec<_> = all
            .iter()
            .filter(|s| s.orientation == Orientation::Reversing)
            .collect();
        assert_eq!(reversing.len(), 60);
        assert!(reversing.iter().any(|s| s.perm == antipodal_map()));

        for s in &all {
            assert!(s.perm.parity().is_even());
            for v in 0..VERTICES {
                for &w in neighbors(v) {
                    assert!(are_adjacent(s.perm[v] as usize, s.perm[w as usize] as usize));
                }
            }
        }
    }
}
