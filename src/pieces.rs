use std::cmp::Reverse;

use crate::options::SortStrategy;
use crate::types::{Piece, PieceUnit};

/// Expands demand lines into one unit per physical piece, in input order.
pub fn expand_pieces(pieces: &[Piece]) -> Vec<PieceUnit> {
    let mut units = Vec::with_capacity(pieces.iter().map(|p| p.quantity as usize).sum());
    for (piece_index, piece) in pieces.iter().enumerate() {
        for i in 0..piece.quantity {
            units.push(PieceUnit {
                id: format!("{}_{}", piece.id, i),
                piece_index,
                rect: piece.rect(),
                source_item_id: piece.source_item_id.clone(),
                can_rotate: piece.can_rotate,
                grain_direction: piece.grain_direction,
            });
        }
    }
    units
}

/// Stable descending sort, so units with equal keys keep their input order.
pub fn sort_units(units: &mut [PieceUnit], strategy: SortStrategy) {
    units.sort_by_key(|u| Reverse(sort_key(u, strategy)));
}

fn sort_key(unit: &PieceUnit, strategy: SortStrategy) -> u64 {
    let (w, h) = (unit.rect.w as u64, unit.rect.h as u64);
    match strategy {
        SortStrategy::AreaDesc => w * h,
        SortStrategy::ShortSide => w.min(h),
        SortStrategy::LongSide => w.max(h),
        SortStrategy::Perimeter => 2 * (w + h),
        SortStrategy::Difference => w.abs_diff(h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(units: &[PieceUnit]) -> Vec<&str> {
        units.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn test_expand_ids() {
        let units = expand_pieces(&[Piece::new("a", 10, 20, 2), Piece::new("b", 5, 5, 1)]);
        assert_eq!(ids(&units), ["a_0", "a_1", "b_0"]);
        assert_eq!(units[2].piece_index, 1);
    }

    #[test]
    fn test_sort_area_is_stable() {
        let mut units = expand_pieces(&[
            Piece::new("small", 10, 10, 1),
            Piece::new("wide", 40, 10, 1),
            Piece::new("tall", 10, 40, 1),
        ]);
        sort_units(&mut units, SortStrategy::AreaDesc);
        assert_eq!(ids(&units), ["wide_0", "tall_0", "small_0"]);
    }

    #[test]
    fn test_sort_keys() {
        let pieces = [
            Piece::new("a", 30, 30, 1),
            Piece::new("b", 50, 10, 1),
            Piece::new("c", 20, 25, 1),
        ];
        let mut units = expand_pieces(&pieces);
        sort_units(&mut units, SortStrategy::ShortSide);
        assert_eq!(ids(&units), ["a_0", "c_0", "b_0"]);

        sort_units(&mut units, SortStrategy::LongSide);
        assert_eq!(ids(&units), ["b_0", "a_0", "c_0"]);

        sort_units(&mut units, SortStrategy::Difference);
        assert_eq!(ids(&units), ["b_0", "c_0", "a_0"]);

        let mut units = expand_pieces(&pieces);
        sort_units(&mut units, SortStrategy::Perimeter);
        // a and b both have perimeter 120
        assert_eq!(ids(&units), ["a_0", "b_0", "c_0"]);
    }
}
