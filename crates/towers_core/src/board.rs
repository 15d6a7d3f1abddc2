//! Board model: three pegs, their slot positions and occupancy stacks.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::action::MoveError;
use super::config::BoardGeometry;
use super::contracts::{CommitContract, Contract, assert_invariants};
use super::geometry::Point3;
use super::types::{DiscId, Move, PEG_COUNT, PegId};

/// A single peg: fixed slot positions plus the disc resting in each slot.
///
/// Heights are indexed bottom (`0`) to top. Occupied heights always form a
/// contiguous run starting at `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    id: PegId,
    slots: Vec<Point3>,
    occupancy: Vec<Option<DiscId>>,
}

impl Peg {
    fn new(id: PegId, disc_count: usize, geometry: &BoardGeometry) -> Self {
        let x = (id.index() as f64 - 1.0) * geometry.peg_spacing();
        let slots = (0..disc_count)
            .map(|h| Point3::new(x, 0.0, geometry.slot_z(h)))
            .collect();
        Self {
            id,
            slots,
            occupancy: vec![None; disc_count],
        }
    }

    /// Which peg this is.
    pub fn id(&self) -> PegId {
        self.id
    }

    /// Number of slots (equal to the disc count).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// World position of every slot, bottom to top.
    pub fn slots(&self) -> &[Point3] {
        &self.slots
    }

    /// World position of the slot at `height`.
    pub fn slot_position(&self, height: usize) -> Option<Point3> {
        self.slots.get(height).copied()
    }

    /// Occupancy by height, bottom to top.
    pub fn occupancy(&self) -> &[Option<DiscId>] {
        &self.occupancy
    }

    /// Disc at `height`, if any.
    pub fn disc_at(&self, height: usize) -> Option<DiscId> {
        self.occupancy.get(height).copied().flatten()
    }

    /// Highest occupied height, or `None` for an empty peg.
    pub fn top_height(&self) -> Option<usize> {
        self.occupancy.iter().rposition(Option::is_some)
    }

    /// The disc on top of the stack.
    pub fn top_disc(&self) -> Option<DiscId> {
        self.top_height().and_then(|h| self.disc_at(h))
    }

    /// Lowest unoccupied height, or `None` when every slot is taken.
    pub fn free_height(&self) -> Option<usize> {
        self.occupancy.iter().position(Option::is_none)
    }

    /// Whether no disc rests on this peg.
    pub fn is_empty(&self) -> bool {
        self.occupancy.iter().all(Option::is_none)
    }

    /// Resting discs, bottom to top.
    pub fn discs(&self) -> impl Iterator<Item = DiscId> + '_ {
        self.occupancy.iter().filter_map(|d| *d)
    }

    pub(crate) fn set(&mut self, height: usize, disc: Option<DiscId>) {
        self.occupancy[height] = disc;
    }
}

/// Record of a committed move: which disc moved and between which slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// The disc that moved.
    pub disc: DiscId,
    /// Source and destination pegs.
    pub mv: Move,
    /// Height the disc left.
    pub from_height: usize,
    /// Height the disc now occupies.
    pub to_height: usize,
    /// World position of the vacated slot.
    pub start: Point3,
    /// World position of the newly occupied slot.
    pub dest: Point3,
}

/// Three pegs plus the geometry they were laid out with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    geometry: BoardGeometry,
    disc_count: usize,
    pegs: [Peg; PEG_COUNT],
}

impl Board {
    /// Lays out the pegs and stacks every disc on peg 0, largest at the bottom.
    #[instrument(skip(geometry))]
    pub fn new(disc_count: usize, geometry: &BoardGeometry) -> Self {
        let mut pegs = PegId::ALL.map(|id| Peg::new(id, disc_count, geometry));
        for h in 0..disc_count {
            pegs[PegId::Left.index()].set(h, Some(DiscId(disc_count - 1 - h)));
        }
        debug!(disc_count, "Board initialized");
        Self {
            geometry: geometry.clone(),
            disc_count,
            pegs,
        }
    }

    /// Geometry the board was laid out with.
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Number of discs in play.
    pub fn disc_count(&self) -> usize {
        self.disc_count
    }

    /// All pegs in index order.
    pub fn pegs(&self) -> &[Peg; PEG_COUNT] {
        &self.pegs
    }

    /// A single peg.
    pub fn peg(&self, id: PegId) -> &Peg {
        &self.pegs[id.index()]
    }

    pub(crate) fn peg_mut(&mut self, id: PegId) -> &mut Peg {
        &mut self.pegs[id.index()]
    }

    /// Highest occupied height on `peg`, `None` if empty.
    pub fn top_disc_height(&self, peg: PegId) -> Option<usize> {
        self.peg(peg).top_height()
    }

    /// A peg can be moved from when it holds at least one disc.
    pub fn is_legal_source(&self, peg: PegId) -> bool {
        !self.peg(peg).is_empty()
    }

    /// Whether moving `from`'s top disc onto `to` keeps smaller-on-larger
    /// order. False when `from` is empty or `from == to`.
    pub fn can_stack(&self, from: PegId, to: PegId) -> bool {
        if from == to {
            return false;
        }
        match (self.peg(from).top_disc(), self.peg(to).top_disc()) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(moving), Some(resting)) => moving < resting,
        }
    }

    /// True when every disc rests on peg 0, i.e. the classic starting layout.
    pub fn is_start_layout(&self) -> bool {
        self.disc_count > 0
            && self
                .peg(PegId::Left)
                .top_height()
                .is_some_and(|h| h + 1 == self.disc_count)
    }

    /// Peg and height where `disc` currently rests.
    pub fn locate(&self, disc: DiscId) -> Option<(PegId, usize)> {
        self.pegs.iter().find_map(|peg| {
            peg.occupancy()
                .iter()
                .position(|d| *d == Some(disc))
                .map(|h| (peg.id(), h))
        })
    }

    /// Moves the top disc of `mv.from` onto the lowest free slot of `mv.to`.
    ///
    /// On error the board is unchanged.
    #[instrument(skip(self), fields(mv = %mv))]
    pub fn commit_move(&mut self, mv: Move) -> Result<Transfer, MoveError> {
        CommitContract::pre(self, &mv)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let from_height = self
            .top_disc_height(mv.from)
            .ok_or(MoveError::EmptyPeg(mv.from))?;
        let to_height = self
            .peg(mv.to)
            .free_height()
            .ok_or(MoveError::PegFull(mv.to))?;
        let disc = self
            .peg(mv.from)
            .disc_at(from_height)
            .ok_or(MoveError::EmptyPeg(mv.from))?;

        let start = self.pegs[mv.from.index()].slots[from_height];
        let dest = self.pegs[mv.to.index()].slots[to_height];

        self.peg_mut(mv.from).set(from_height, None);
        self.peg_mut(mv.to).set(to_height, Some(disc));

        #[cfg(debug_assertions)]
        if let Err(e) = CommitContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        assert_invariants(self);

        debug!(%disc, from_height, to_height, "Move committed");
        Ok(Transfer {
            disc,
            mv,
            from_height,
            to_height,
            start,
            dest,
        })
    }
}
