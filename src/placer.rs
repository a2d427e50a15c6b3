// Random placement of a whole fleet, used to produce a ground-truth layout.
// No sums are involved; ships only have to keep clear of each other.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::{
    bitmask::Mask,
    config::{PLACEMENT_ATTEMPTS, PLACEMENT_CALL_LIMIT},
    ship::{Orientation, Placement, ShipPlacement},
};

/// A fleet laid out at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedFleet {
    /// Ship lengths actually placed, longest first.
    pub ships: Vec<usize>,
    pub placement: Placement,
    /// Ships dropped because the fleet would not fit.
    pub dropped: Vec<usize>,
}

/// Place `ships` (sorted longest first) at uniformly random positions with
/// at least one cell of water around each ship.
///
/// Each attempt is bounded by [`PLACEMENT_CALL_LIMIT`] recursive calls.
/// After [`PLACEMENT_ATTEMPTS`] failed attempts a ship of middling length is
/// removed from the fleet and placement starts over. A single ship always
/// fits, so this terminates.
pub fn place_fleet<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    mut ships: Vec<usize>,
    rng: &mut R,
) -> PlacedFleet {
    let mut dropped = Vec::new();
    loop {
        for _ in 0..PLACEMENT_ATTEMPTS {
            if let Some(placement) = try_place(height, width, &ships, PLACEMENT_CALL_LIMIT, rng) {
                return PlacedFleet {
                    ships,
                    placement,
                    dropped,
                };
            }
        }
        if ships.len() <= 1 {
            // Only reachable with a ship longer than the grid.
            return PlacedFleet {
                ships,
                placement: Placement::default(),
                dropped,
            };
        }
        let removed = ships.remove(ships.len().div_ceil(2) - 1);
        log::debug!("fleet does not fit, dropping a ship of length {}", removed);
        dropped.push(removed);
    }
}

/// One bounded attempt; `None` when the call limit runs out.
pub fn try_place<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    ships: &[usize],
    limit: usize,
    rng: &mut R,
) -> Option<Placement> {
    if ships.is_empty() {
        return Some(Placement::default());
    }
    if ships.iter().any(|&len| len == 0 || len > height.min(width)) {
        return None;
    }
    let mut placer = Placer {
        height,
        width,
        ships,
        halos: vec![Mask::new(height, width); ships.len()],
        placed: Vec::with_capacity(ships.len()),
        calls: 0,
        limit,
    };
    if placer.place(0, rng) {
        Some(Placement::new(placer.placed))
    } else {
        None
    }
}

struct Placer<'a> {
    height: usize,
    width: usize,
    ships: &'a [usize],
    halos: Vec<Mask>,
    placed: Vec<ShipPlacement>,
    calls: usize,
    limit: usize,
}

impl Placer<'_> {
    /// Draw positions for ship `index` until the rest of the fleet fits
    /// behind it. A draw that hits an earlier halo hands the failure back
    /// to the previous ship, which then moves.
    fn place<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> bool {
        self.calls += 1;
        if self.calls > self.limit {
            return false;
        }
        let len = self.ships[index];
        let (h, w) = (self.height, self.width);
        let across = w - len + 1;
        let horizontal = h * across;
        let positions = horizontal + (h - len + 1) * w;

        loop {
            let pos = rng.random_range(0..positions);
            let ship = if pos < horizontal {
                ShipPlacement::new(len, Orientation::Horizontal, pos / across, pos % across)
            } else {
                let pos = pos - horizontal;
                ShipPlacement::new(len, Orientation::Vertical, pos / w, pos % w)
            };
            let blocked = ship
                .cells()
                .any(|(r, c)| self.halos[..index].iter().any(|m| m.contains(r, c)));
            if blocked {
                return false;
            }

            self.placed.truncate(index);
            self.placed.push(ship);
            if index + 1 == self.ships.len() {
                return true;
            }
            self.halos[index] = ship.halo(h, w);
            if self.place(index + 1, rng) {
                return true;
            }
            if self.calls > self.limit {
                return false;
            }
            self.halos[index].clear_all();
        }
    }
}
