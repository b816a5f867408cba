//! Rectangular cutting-stock optimizer.
//!
//! Lays piece demand onto a finite set of stock sheets with one of three
//! greedy placement strategies (bottom-left fill, guillotine, MaxRects),
//! honouring kerf, rotation and grain constraints, and reports waste and
//! any pieces that could not be placed.
//!
//! ```
//! use sheet_optimizer::{Options, Piece, StockDef, optimize};
//!
//! let pieces = [Piece::new("shelf", 800, 300, 4)];
//! let stock = [StockDef::new("ply", 2440, 1220, 2)];
//! let result = optimize(&pieces, &stock, &Options::default()).unwrap();
//! assert!(result.success);
//! assert_eq!(result.stock_used_count, 1);
//! ```

pub mod bottom_left;
pub mod dispatch;
pub mod error;
pub mod free_rects;
pub mod guillotine;
pub mod maxrects;
pub mod options;
pub mod packer;
pub mod pieces;
pub mod render;
pub mod result;
pub mod sheet;
pub mod solver;
pub mod stock;
pub mod types;

pub use error::OptimizeError;
pub use options::{Algorithm, Heuristic, Options, SortStrategy, StockOrder};
pub use result::{OptimizationResult, SheetResult, Statistics, UnplacedGroup};
pub use solver::{Solver, optimize};
pub use types::{GrainDirection, Piece, Placement, StockDef};
