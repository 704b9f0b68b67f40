//! One byte of BFS state per rank.
//!
//! ```text
//!  7 6 5 4 3 2 1 0
//! [state][ generator ]
//! ```
//!
//! `state` is 0 for unvisited, 1 or 2 for "open" (reached, not yet expanded)
//! at an even or odd depth, and 3 for closed. The low six bits hold the index
//! of the generator that first reached the slot, or [`ROOT`] for the identity.
//! Only the parity of the depth is stored: at any time the open slots belong
//! to at most two consecutive layers.

use crate::generators::{GenIndex, MAX_GENERATORS};

const STATE_SHIFT: u32 = 6;
const GEN_MASK: u8 = (1 << STATE_SHIFT) - 1;
const OPEN_EVEN: u8 = 1;
const OPEN_ODD: u8 = 2;
const CLOSED: u8 = 3;

/// Generator bits of the identity's slot.
pub(crate) const ROOT: u8 = GEN_MASK;

const _: () = assert!(MAX_GENERATORS == ROOT as usize);

/// How a reached element was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// The identity.
    Root,
    /// Reached from `element ∘ generator⁻¹` along this generator.
    Via(GenIndex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Slot(u8);

impl Slot {
    pub const UNVISITED: Slot = Slot(0);

    pub fn root() -> Slot {
        Slot((OPEN_EVEN << STATE_SHIFT) | ROOT)
    }

    /// A slot reached at `depth` along generator `via`.
    pub fn open(depth: u32, via: GenIndex) -> Slot {
        let state = if depth % 2 == 0 { OPEN_EVEN } else { OPEN_ODD };
        Slot((state << STATE_SHIFT) | via.index() as u8)
    }

    fn state(self) -> u8 {
        self.0 >> STATE_SHIFT
    }

    pub fn is_unvisited(self) -> bool {
        self.state() == 0
    }

    /// Reached at `depth` and not yet expanded.
    pub fn is_open_at(self, depth: u32) -> bool {
        let state = self.state();
        (state == OPEN_EVEN && depth % 2 == 0) || (state == OPEN_ODD && depth % 2 == 1)
    }

    pub fn closed(self) -> Slot {
        Slot((CLOSED << STATE_SHIFT) | (self.0 & GEN_MASK))
    }

    pub fn link(self) -> Option<Link> {
        if self.is_unvisited() {
            return None;
        }
        match self.0 & GEN_MASK {
            ROOT => Some(Link::Root),
            g => Some(Link::Via(GenIndex::new_unchecked(g))),
        }
    }
}

impl From<u8> for Slot {
    fn from(byte: u8) -> Self {
        Slot(byte)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}
