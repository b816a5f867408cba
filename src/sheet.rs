use crate::free_rects::FreeRects;
use crate::types::{PieceUnit, Placement, Rect, StockDef};

/// A stock sheet opened during a single optimization pass.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub stock_index: usize,
    pub stock_id: String,
    pub size: Rect,
    pub free_rects: FreeRects,
    pub placements: Vec<Placement>,
}

impl Sheet {
    pub fn new(stock_index: usize, def: &StockDef) -> Self {
        let size = def.rect();
        Self {
            stock_index,
            stock_id: def.id.clone(),
            size,
            free_rects: FreeRects::new(size),
            placements: Vec::new(),
        }
    }

    pub fn used_area(&self) -> u64 {
        self.placements.iter().map(|p| p.area()).sum()
    }

    pub fn in_bounds(&self, x: u32, y: u32, rect: Rect) -> bool {
        x as u64 + rect.w as u64 <= self.size.w as u64
            && y as u64 + rect.h as u64 <= self.size.h as u64
    }

    /// Appends a placement for `unit` without touching free space.
    pub fn record(
        &mut self,
        unit: &PieceUnit,
        x: u32,
        y: u32,
        rect: Rect,
        rotated: bool,
    ) -> Placement {
        let placement = Placement {
            piece_unit_id: unit.id.clone(),
            source_item_id: unit.source_item_id.clone(),
            x,
            y,
            width: rect.w,
            height: rect.h,
            rotated,
        };
        self.placements.push(placement.clone());
        placement
    }
}
