use crate::options::Options;
use crate::sheet::Sheet;
use crate::types::{GrainDirection, PieceUnit, Placement, Rect};

/// Lower is better. The second element breaks ties on the first.
pub type Score = (i64, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub rect: Rect,
    pub rotated: bool,
}

/// A position a packer found for a unit on one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Free rectangle the position came from, for packers that track one.
    pub free_idx: usize,
    pub x: u32,
    pub y: u32,
    pub orientation: Orientation,
    pub score: Score,
}

impl Candidate {
    /// Strictly better than `best`, so the first candidate wins ties.
    pub fn beats(&self, best: &Option<Candidate>) -> bool {
        best.is_none_or(|b| self.score < b.score)
    }
}

/// Allowed orientations of `unit`, non-rotated first.
pub fn orientations(unit: &PieceUnit, options: &Options) -> Vec<Orientation> {
    let mut out = vec![Orientation {
        rect: unit.rect,
        rotated: false,
    }];
    let grain_locked =
        options.respect_grain_direction && unit.grain_direction != GrainDirection::None;
    if options.allow_rotation && unit.can_rotate && !unit.rect.is_square() && !grain_locked {
        out.push(Orientation {
            rect: unit.rect.rotated(),
            rotated: true,
        });
    }
    out
}

/// A placement strategy over one sheet. `find` never mutates; `commit`
/// updates the sheet's free space and placements.
pub trait Packer {
    fn name(&self) -> &'static str;

    fn find(&self, sheet: &Sheet, orientations: &[Orientation]) -> Option<Candidate>;

    fn commit(&self, sheet: &mut Sheet, unit: &PieceUnit, candidate: Candidate) -> Placement;

    fn try_place(
        &self,
        sheet: &mut Sheet,
        unit: &PieceUnit,
        orientations: &[Orientation],
    ) -> Option<Placement> {
        let candidate = self.find(sheet, orientations)?;
        Some(self.commit(sheet, unit, candidate))
    }

    /// Places the first unit of a freshly opened sheet at the origin,
    /// preferring the non-rotated orientation.
    fn place_first(
        &self,
        sheet: &mut Sheet,
        unit: &PieceUnit,
        orientations: &[Orientation],
    ) -> Option<Placement> {
        let orientation = *orientations.iter().find(|o| o.rect.fits_in(&sheet.size))?;
        let candidate = Candidate {
            free_idx: 0,
            x: 0,
            y: 0,
            orientation,
            score: (0, 0),
        };
        Some(self.commit(sheet, unit, candidate))
    }
}
