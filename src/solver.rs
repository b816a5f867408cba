use crate::dispatch::{self, select_strategy};
use crate::error::OptimizeError;
use crate::options::{Options, SortStrategy};
use crate::packer::{Packer, orientations};
use crate::pieces::{expand_pieces, sort_units};
use crate::result::{self, OptimizationResult};
use crate::sheet::Sheet;
use crate::stock::StockManager;
use crate::types::{Piece, PieceUnit, Rect, StockDef};

/// Lays `pieces` onto `stock` sheets. See [`Solver`].
pub fn optimize(
    pieces: &[Piece],
    stock: &[StockDef],
    options: &Options,
) -> Result<OptimizationResult, OptimizeError> {
    Solver::new(pieces, stock, options).solve()
}

/// One optimization call. Every pass owns its sheets, so nothing outlives
/// [`Solver::solve`] except the returned result.
pub struct Solver<'a> {
    pieces: &'a [Piece],
    stock: &'a [StockDef],
    options: &'a Options,
}

impl<'a> Solver<'a> {
    pub fn new(pieces: &'a [Piece], stock: &'a [StockDef], options: &'a Options) -> Self {
        Self {
            pieces,
            stock,
            options,
        }
    }

    pub fn solve(&self) -> Result<OptimizationResult, OptimizeError> {
        self.validate()?;

        let strategy = select_strategy(self.options);
        let packers = dispatch::packers(strategy, self.options.kerf);
        let sorts: &[SortStrategy] = if self.options.multi_pass {
            &SortStrategy::ALL
        } else {
            std::slice::from_ref(&self.options.sort_strategy)
        };

        let expanded = expand_pieces(self.pieces);
        let mut best: Option<OptimizationResult> = None;
        for &sort in sorts {
            let mut units = expanded.clone();
            sort_units(&mut units, sort);
            for packer in &packers {
                let result = self.pack(packer.as_ref(), &units);
                tracing::debug!(
                    packer = packer.name(),
                    sort = ?sort,
                    sheets = result.stock_used_count,
                    unplaced = result.unplaced_count(),
                    "pass finished"
                );
                if result.improves_on(&best) {
                    best = Some(result);
                }
            }
        }

        let result = best.unwrap_or_else(|| result::build(self.pieces, Vec::new(), &expanded));
        tracing::info!(
            strategy = ?strategy,
            sheets = result.stock_used_count,
            unplaced = result.unplaced_count(),
            efficiency = result.statistics.efficiency,
            "optimization finished"
        );
        Ok(result)
    }

    fn validate(&self) -> Result<(), OptimizeError> {
        for piece in self.pieces {
            if piece.width == 0 || piece.height == 0 {
                return Err(OptimizeError::InvalidPiece {
                    id: piece.id.clone(),
                    width: piece.width,
                    height: piece.height,
                });
            }
            if piece.quantity == 0 {
                return Err(OptimizeError::InvalidQuantity {
                    id: piece.id.clone(),
                });
            }
        }
        for def in self.stock {
            if def.width == 0 || def.height == 0 {
                return Err(OptimizeError::InvalidStock {
                    id: def.id.clone(),
                    width: def.width,
                    height: def.height,
                });
            }
        }
        Ok(())
    }

    /// Greedy pass: each unit goes to the first open sheet that takes it,
    /// otherwise onto a newly opened sheet, otherwise into the unplaced list.
    fn pack(&self, packer: &dyn Packer, units: &[PieceUnit]) -> OptimizationResult {
        let mut stock = StockManager::new(self.stock, self.options.stock_order);
        let mut sheets: Vec<Sheet> = Vec::new();
        let mut unplaced: Vec<PieceUnit> = Vec::new();

        for unit in units {
            let orientations = orientations(unit, self.options);
            if sheets
                .iter_mut()
                .any(|sheet| packer.try_place(sheet, unit, &orientations).is_some())
            {
                continue;
            }

            let footprints: Vec<Rect> = orientations.iter().map(|o| o.rect).collect();
            let opened = stock.select(&footprints).and_then(|idx| {
                let mut sheet = Sheet::new(idx, stock.def(idx));
                packer.place_first(&mut sheet, unit, &orientations)?;
                Some(sheet)
            });

            match opened {
                Some(sheet) => {
                    let consumed = stock.consume(sheet.stock_index);
                    debug_assert!(consumed, "selected stock had no sheets left");
                    tracing::debug!(
                        stock = %sheet.stock_id,
                        size = %sheet.size,
                        left = stock.remaining(sheet.stock_index),
                        "opened sheet"
                    );
                    sheets.push(sheet);
                }
                None => {
                    tracing::debug!(unit = %unit.id, size = %unit.rect, "unit not placed");
                    unplaced.push(unit.clone());
                }
            }
        }

        result::build(self.pieces, sheets, &unplaced)
    }
}
