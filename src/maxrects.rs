//! MaxRects placement over the sheet's maximal free rectangles.
//!
//! Every free rectangle and allowed orientation is scored at the rectangle's
//! top-left corner. All heuristics report "lower is better": bottom-left and
//! contact-point fold their natural orientation into the score here, so the
//! comparison in [`MaxRectsPacker::find`] is the same for every heuristic.

use crate::free_rects::FreeRect;
use crate::options::Heuristic;
use crate::packer::{Candidate, Orientation, Packer, Score};
use crate::sheet::Sheet;
use crate::types::{PieceUnit, Placement, Rect};

/// Weight of `y` in the bottom-left score.
const BOTTOM_LEFT_ROW_WEIGHT: i64 = 10_000;

/// A single scoring rule, as opposed to [`Heuristic::Best`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitHeuristic {
    ShortSide,
    Area,
    LongSide,
    BottomLeft,
    ContactPoint,
}

impl FitHeuristic {
    pub const ALL: [FitHeuristic; 5] = [
        FitHeuristic::ShortSide,
        FitHeuristic::Area,
        FitHeuristic::LongSide,
        FitHeuristic::BottomLeft,
        FitHeuristic::ContactPoint,
    ];
}

impl Heuristic {
    /// The scoring rules one pass each should be run with.
    pub fn passes(self) -> &'static [FitHeuristic] {
        match self {
            Heuristic::BestShortSideFit => &[FitHeuristic::ShortSide],
            Heuristic::BestAreaFit => &[FitHeuristic::Area],
            Heuristic::BestLongSideFit => &[FitHeuristic::LongSide],
            Heuristic::BottomLeft => &[FitHeuristic::BottomLeft],
            Heuristic::ContactPoint => &[FitHeuristic::ContactPoint],
            Heuristic::Best => &FitHeuristic::ALL,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaxRectsPacker {
    kerf: u32,
    heuristic: FitHeuristic,
}

impl MaxRectsPacker {
    pub fn new(kerf: u32, heuristic: FitHeuristic) -> Self {
        Self { kerf, heuristic }
    }

    fn score(&self, sheet: &Sheet, free: &FreeRect, piece: Rect) -> Score {
        let leftover_x = (free.rect.w - piece.w) as i64;
        let leftover_y = (free.rect.h - piece.h) as i64;
        let short = leftover_x.min(leftover_y);
        let long = leftover_x.max(leftover_y);

        match self.heuristic {
            FitHeuristic::ShortSide => (short, long),
            FitHeuristic::Area => ((free.rect.area() - piece.area()) as i64, short),
            FitHeuristic::LongSide => (long, short),
            FitHeuristic::BottomLeft => {
                (free.y as i64 * BOTTOM_LEFT_ROW_WEIGHT + free.x as i64, 0)
            }
            FitHeuristic::ContactPoint => (-self.contact(sheet, free.x, free.y, piece), 0),
        }
    }

    /// Length of the piece's perimeter that would touch the sheet border or
    /// a neighbour sitting exactly one kerf away.
    fn contact(&self, sheet: &Sheet, x: u32, y: u32, piece: Rect) -> i64 {
        let (x, y, w, h) = (x as i64, y as i64, piece.w as i64, piece.h as i64);
        let kerf = self.kerf as i64;
        let mut total = 0;

        if x == 0 {
            total += h;
        }
        if x + w == sheet.size.w as i64 {
            total += h;
        }
        if y == 0 {
            total += w;
        }
        if y + h == sheet.size.h as i64 {
            total += w;
        }

        for p in &sheet.placements {
            let (px, py, pw, ph) = (p.x as i64, p.y as i64, p.width as i64, p.height as i64);
            if px + pw + kerf == x || x + w + kerf == px {
                total += overlap(y, y + h, py, py + ph);
            }
            if py + ph + kerf == y || y + h + kerf == py {
                total += overlap(x, x + w, px, px + pw);
            }
        }
        total
    }
}

fn overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

impl Packer for MaxRectsPacker {
    fn name(&self) -> &'static str {
        match self.heuristic {
            FitHeuristic::ShortSide => "maxrects-bssf",
            FitHeuristic::Area => "maxrects-baf",
            FitHeuristic::LongSide => "maxrects-blsf",
            FitHeuristic::BottomLeft => "maxrects-bl",
            FitHeuristic::ContactPoint => "maxrects-cp",
        }
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
                    score: self.score(sheet, free, orientation.rect),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free_rects::FreeRects;
    use crate::options::Options;
    use crate::packer::orientations;
    use crate::pieces::expand_pieces;
    use crate::types::{Piece, StockDef};
    use test_case::test_case;

    fn sheet(w: u32, h: u32) -> Sheet {
        Sheet::new(0, &StockDef::new("s", w, h, 1))
    }

    fn units(w: u32, h: u32, qty: u32, can_rotate: bool) -> Vec<PieceUnit> {
        let mut piece = Piece::new("p", w, h, qty);
        piece.can_rotate = can_rotate;
        expand_pieces(&[piece])
    }

    /// A tall snug rect at the origin and a wide loose one further right.
    fn two_rect_sheet() -> Sheet {
        let mut s = sheet(200, 200);
        let mut free = FreeRects::default();
        free.push(FreeRect::new(0, 0, 44, 200));
        free.push(FreeRect::new(100, 0, 100, 35));
        s.free_rects = free;
        s
    }

    #[test_case(FitHeuristic::ShortSide, 0; "short side picks the snug width")]
    #[test_case(FitHeuristic::Area, 100; "area picks the smaller rect")]
    #[test_case(FitHeuristic::LongSide, 100; "long side picks the shorter long leftover")]
    #[test_case(FitHeuristic::BottomLeft, 0; "bottom left picks the origin")]
    #[test_case(FitHeuristic::ContactPoint, 0; "contact point picks the corner")]
    fn test_heuristic_choice(heuristic: FitHeuristic, expected_x: u32) {
        let packer = MaxRectsPacker::new(0, heuristic);
        let s = two_rect_sheet();
        let unit = &units(40, 30, 1, false)[0];
        let found = packer
            .find(&s, &orientations(unit, &Options::default()))
            .unwrap();
        assert_eq!(found.x, expected_x);
    }

    #[test_case(FitHeuristic::ShortSide)]
    #[test_case(FitHeuristic::Area)]
    #[test_case(FitHeuristic::LongSide)]
    #[test_case(FitHeuristic::BottomLeft)]
    #[test_case(FitHeuristic::ContactPoint)]
    fn test_fills_sheet_exactly(heuristic: FitHeuristic) {
        let packer = MaxRectsPacker::new(0, heuristic);
        let mut s = sheet(100, 100);
        let opts = Options::default();
        for unit in units(50, 50, 4, true) {
            assert!(packer.try_place(&mut s, &unit, &orientations(&unit, &opts)).is_some());
        }
        assert!(s.free_rects.is_empty());
        assert_eq!(s.used_area(), 100 * 100);
    }

    #[test]
    fn test_kerf_keeps_clearance() {
        let packer = MaxRectsPacker::new(0, FitHeuristic::ShortSide);
        let kerfed = MaxRectsPacker::new(4, FitHeuristic::ShortSide);
        let opts = Options::default();

        let mut s = sheet(100, 100);
        let placed: Vec<_> = units(48, 100, 2, false)
            .iter()
            .filter_map(|u| packer.try_place(&mut s, u, &orientations(u, &opts)))
            .collect();
        assert_eq!(placed.len(), 2);

        let mut s = sheet(100, 100);
        let placed: Vec<_> = units(48, 100, 2, false)
            .iter()
            .filter_map(|u| kerfed.try_place(&mut s, u, &orientations(u, &opts)))
            .collect();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].x, 52);
        assert!(placed[0].is_clear_of(&placed[1], 4));
    }

    #[test]
    fn test_contact_counts_neighbours() {
        let packer = MaxRectsPacker::new(2, FitHeuristic::ContactPoint);
        let opts = Options::default();
        let mut s = sheet(100, 100);
        let u = &units(30, 30, 2, false);
        packer.try_place(&mut s, &u[0], &orientations(&u[0], &opts));
        // right of the first piece: touches top border (30) and the piece (30)
        assert_eq!(packer.contact(&s, 32, 0, Rect::new(30, 30)), 60);
        // floating in the middle touches nothing
        assert_eq!(packer.contact(&s, 50, 50, Rect::new(10, 10)), 0);
    }

    #[test]
    fn test_best_passes() {
        assert_eq!(Heuristic::Best.passes().len(), 5);
        assert_eq!(Heuristic::BottomLeft.passes(), &[FitHeuristic::BottomLeft]);
    }
}
