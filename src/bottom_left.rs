use crate::packer::{Candidate, Orientation, Packer};
use crate::sheet::Sheet;
use crate::types::{PieceUnit, Placement, rects_clear};

/// Bottom-left fill: tries the sheet origin and the corners next to every
/// placed piece, keeping the lowest `y`, then lowest `x`.
#[derive(Debug, Clone, Copy)]
pub struct BottomLeftPacker {
    kerf: u32,
}

impl BottomLeftPacker {
    pub fn new(kerf: u32) -> Self {
        Self { kerf }
    }

    fn anchor_points(&self, sheet: &Sheet) -> Vec<(u32, u32)> {
        let mut points = Vec::with_capacity(1 + sheet.placements.len() * 2);
        points.push((0, 0));
        for p in &sheet.placements {
            points.push((p.x.saturating_add(p.width).saturating_add(self.kerf), p.y));
            points.push((p.x, p.y.saturating_add(p.height).saturating_add(self.kerf)));
        }
        points
    }
}

impl Packer for BottomLeftPacker {
    fn name(&self) -> &'static str {
        "bottom-left"
    }

    fn find(&self, sheet: &Sheet, orientations: &[Orientation]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (x, y) in self.anchor_points(sheet) {
            for &orientation in orientations {
                if !sheet.in_bounds(x, y, orientation.rect) {
                    continue;
                }
                let clear = sheet.placements.iter().all(|p| {
                    rects_clear(x, y, orientation.rect, p.x, p.y, p.rect(), self.kerf)
                });
                if !clear {
                    continue;
                }
                let candidate = Candidate {
                    free_idx: 0,
                    x,
                    y,
                    orientation,
                    score: (y as i64, x as i64),
                };
                if candidate.beats(&best) {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    fn commit(&self, sheet: &mut Sheet, unit: &PieceUnit, candidate: Candidate) -> Placement {
        let Candidate {
            x, y, orientation, ..
        } = candidate;
        sheet.free_rects.occupy(x, y, orientation.rect, self.kerf);
        sheet.record(unit, x, y, orientation.rect, orientation.rotated)
    }
}
