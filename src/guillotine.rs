use crate::free_rects::FreeRect;
use crate::packer::{Candidate, Orientation, Packer};
use crate::sheet::Sheet;
use crate::types::{PieceUnit, Placement, Rect};

/// Guillotine cutting: each placement cuts its free rectangle into exactly
/// two disjoint remainders, so the free list never needs merging or pruning.
#[derive(Debug, Clone, Copy)]
pub struct GuillotinePacker {
    kerf: u32,
}

impl GuillotinePacker {
    pub fn new(kerf: u32) -> Self {
        Self { kerf }
    }

    /// Best fit: the smaller of the two leftover sides.
    fn score(piece: Rect, free: Rect) -> (i64, i64) {
        let short = std::cmp::min(free.w - piece.w, free.h - piece.h);
        (short as i64, 0)
    }

    /// Cuts the unused part of `free` into a right and a bottom remainder,
    /// each starting one kerf past the piece. When both exist, the remainder
    /// across the larger leftover spans the whole of `free`.
    fn split(&self, sheet: &mut Sheet, free: FreeRect, placed: Rect) {
        let used_w = placed.w.saturating_add(self.kerf);
        let used_h = placed.h.saturating_add(self.kerf);
        let right_w = free.rect.w.saturating_sub(used_w);
        let bottom_h = free.rect.h.saturating_sub(used_h);

        let both = right_w > 0 && bottom_h > 0;
        let wide_bottom = free.rect.w - placed.w < free.rect.h - placed.h;
        let (right_h, bottom_w) = match (both, wide_bottom) {
            (true, true) => (placed.h, free.rect.w),
            (true, false) => (free.rect.h, placed.w),
            (false, _) => (free.rect.h, free.rect.w),
        };

        let right = FreeRect::new(free.x.saturating_add(used_w), free.y, right_w, right_h);
        let bottom = FreeRect::new(free.x, free.y.saturating_add(used_h), bottom_w, bottom_h);
        sheet.free_rects.push(right);
        sheet.free_rects.push(bottom);
    }
}

impl Packer for GuillotinePacker {
    fn name(&self) -> &'static str {
        "guillotine"
    }

    fn find(&self, sheet: &Sheet, orientations: &[Orientation]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (idx, free) in sheet.free_rects.as_slice().iter().enumerate() {
            for &orientation in orientations {
                if !orientation.rect.fits_in(&free.rect) {
                    continue;
                }
                let candidate = Candidate {
                    free_idx: idx,
                    x: free.x,
                    y: free.y,
                    orientation,
                    score: Self::score(orientation.rect, free.rect),
                };
                if candidate.beats(&best) {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    fn commit(&self, sheet: &mut Sheet, unit: &PieceUnit, candidate: Candidate) -> Placement {
        let free = sheet.free_rects.take(candidate.free_idx);
        let placed = candidate.orientation.rect;
        self.split(sheet, free, placed);
        sheet.record(unit, free.x, free.y, placed, candidate.orientation.rotated)
    }
}
