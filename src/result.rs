use serde::{Deserialize, Serialize};

use crate::sheet::Sheet;
use crate::types::{GrainDirection, Piece, PieceUnit, Placement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResult {
    pub stock_id: String,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
    pub used_area: u64,
    pub waste_area: u64,
    pub waste_percentage: f64,
}

impl SheetResult {
    pub fn stock_area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Units of one input piece that found no place, re-aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedGroup {
    pub piece_id: String,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
    pub source_item_id: Option<String>,
    pub can_rotate: bool,
    pub grain_direction: GrainDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_pieces: u64,
    pub total_stock_area: u64,
    pub total_used_area: u64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub success: bool,
    pub sheets: Vec<SheetResult>,
    pub total_waste_area: u64,
    pub total_waste_percentage: f64,
    pub stock_used_count: usize,
    pub unplaced_pieces: Vec<UnplacedGroup>,
    pub statistics: Statistics,
}

impl OptimizationResult {
    pub fn placed_count(&self) -> usize {
        self.sheets.iter().map(|s| s.placements.len()).sum()
    }

    pub fn unplaced_count(&self) -> u64 {
        self.unplaced_pieces.iter().map(|g| g.quantity as u64).sum()
    }

    /// Fewer unplaced units, then fewer sheets, then less waste.
    fn rank(&self) -> (u64, usize, u64) {
        (self.unplaced_count(), self.stock_used_count, self.total_waste_area)
    }

    /// Strictly better than `incumbent`; ties keep the incumbent.
    pub fn improves_on(&self, incumbent: &Option<OptimizationResult>) -> bool {
        incumbent
            .as_ref()
            .is_none_or(|best| self.rank() < best.rank())
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Builds the final report from the sheets of one pass and the units it
/// could not place.
pub fn build(pieces: &[Piece], sheets: Vec<Sheet>, unplaced: &[PieceUnit]) -> OptimizationResult {
    let sheets: Vec<SheetResult> = sheets
        .into_iter()
        .map(|sheet| {
            let stock_area = sheet.size.area();
            let used_area = sheet.used_area();
            let waste_area = stock_area - used_area;
            SheetResult {
                stock_id: sheet.stock_id,
                width: sheet.size.w,
                height: sheet.size.h,
                placements: sheet.placements,
                used_area,
                waste_area,
                waste_percentage: percent(waste_area, stock_area),
            }
        })
        .collect();

    let mut failed = vec![0u32; pieces.len()];
    for unit in unplaced {
        failed[unit.piece_index] += 1;
    }
    let mut unplaced_pieces: Vec<UnplacedGroup> = Vec::new();
    for (piece, quantity) in pieces.iter().zip(failed) {
        if quantity == 0 {
            continue;
        }
        // lines sharing an id report as one group, shaped like the first
        match unplaced_pieces.iter_mut().find(|g| g.piece_id == piece.id) {
            Some(group) => group.quantity += quantity,
            None => unplaced_pieces.push(UnplacedGroup {
                piece_id: piece.id.clone(),
                width: piece.width,
                height: piece.height,
                quantity,
                source_item_id: piece.source_item_id.clone(),
                can_rotate: piece.can_rotate,
                grain_direction: piece.grain_direction,
            }),
        }
    }

    let total_stock_area: u64 = sheets.iter().map(|s| s.stock_area()).sum();
    let total_used_area: u64 = sheets.iter().map(|s| s.used_area).sum();
    let total_waste_area = total_stock_area - total_used_area;

    OptimizationResult {
        success: unplaced_pieces.is_empty(),
        stock_used_count: sheets.len(),
        total_waste_area,
        total_waste_percentage: percent(total_waste_area, total_stock_area),
        unplaced_pieces,
        statistics: Statistics {
            total_pieces: pieces.iter().map(|p| p.quantity as u64).sum(),
            total_stock_area,
            total_used_area,
            efficiency: percent(total_used_area, total_stock_area),
        },
        sheets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::expand_pieces;
    use crate::types::{Rect, StockDef};

    #[test]
    fn test_sheet_statistics() {
        let pieces = vec![Piece::new("a", 50, 40, 2)];
        let units = expand_pieces(&pieces);
        let mut sheet = Sheet::new(0, &StockDef::new("s", 100, 100, 1));
        sheet.record(&units[0], 0, 0, Rect::new(50, 40), false);

        let result = build(&pieces, vec![sheet], &units[1..]);
        let s = &result.sheets[0];
        assert_eq!(s.used_area, 2000);
        assert_eq!(s.waste_area, 8000);
        assert_eq!(s.used_area + s.waste_area, s.stock_area());
        assert!((s.waste_percentage - 80.0).abs() < 1e-9);
        assert!(!result.success);
        assert_eq!(result.unplaced_pieces.len(), 1);
        assert_eq!(result.unplaced_pieces[0].quantity, 1);
        assert_eq!(result.statistics.total_pieces, 2);
        assert!((result.statistics.efficiency - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_unplaced_grouped_in_input_order() {
        let pieces = vec![
            Piece::new("first", 10, 10, 2),
            Piece::new("second", 20, 20, 3),
        ];
        let mut units = expand_pieces(&pieces);
        units.reverse();
        let result = build(&pieces, vec![], &units);
        let ids: Vec<_> = result.unplaced_pieces.iter().map(|g| g.piece_id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
        assert_eq!(result.unplaced_pieces[1].quantity, 3);
        assert_eq!(result.unplaced_count(), 5);
    }

    #[test]
    fn test_unplaced_lines_sharing_id_merge() {
        let pieces = vec![
            Piece::new("p", 2000, 2000, 1),
            Piece::new("q", 5, 5, 1),
            Piece::new("p", 2000, 2000, 2),
        ];
        let units = expand_pieces(&pieces);
        let result = build(&pieces, vec![], &units);
        let groups: Vec<_> = result
            .unplaced_pieces
            .iter()
            .map(|g| (g.piece_id.as_str(), g.quantity))
            .collect();
        assert_eq!(groups, [("p", 3), ("q", 1)]);
        assert_eq!(result.unplaced_count(), 4);
    }

    #[test]
    fn test_empty_result() {
        let result = build(&[], vec![], &[]);
        assert!(result.success);
        assert_eq!(result.stock_used_count, 0);
        assert_eq!(result.total_waste_area, 0);
        assert_eq!(result.total_waste_percentage, 0.0);
        assert_eq!(result.statistics.efficiency, 0.0);
    }

    #[test]
    fn test_json_shape() {
        let pieces = [Piece::new("a", 10, 10, 1)];
        let result = build(&pieces, vec![], &expand_pieces(&pieces));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["unplacedPieces"][0]["pieceId"], "a");
        assert_eq!(json["statistics"]["totalPieces"], 1);
        assert_eq!(json["stockUsedCount"], 0);
    }
}
