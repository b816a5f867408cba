use thiserror::Error;

/// Contract violations in the optimizer input. Everything else, including
/// pieces that fit no stock, is reported through the result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    #[error("piece \"{id}\" has a zero dimension ({width}x{height})")]
    InvalidPiece { id: String, width: u32, height: u32 },

    #[error("piece \"{id}\" has quantity 0")]
    InvalidQuantity { id: String },

    #[error("stock \"{id}\" has a zero dimension ({width}x{height})")]
    InvalidStock { id: String, width: u32, height: u32 },
}
