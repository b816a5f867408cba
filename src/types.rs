use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }

    pub fn is_square(&self) -> bool {
        self.w == self.h
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Material grain a piece must follow. Any value other than `None` pins the
/// piece to its declared orientation when grain is respected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrainDirection {
    #[serde(rename = "H", alias = "HORIZONTAL", alias = "horizontal")]
    Horizontal,
    #[serde(rename = "V", alias = "VERTICAL", alias = "vertical")]
    Vertical,
    #[default]
    #[serde(rename = "none", alias = "NONE")]
    None,
}

/// A demand line: `quantity` identical pieces to cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub quantity: u32,
    #[serde(default)]
    pub source_item_id: Option<String>,
    #[serde(default = "default_true")]
    pub can_rotate: bool,
    #[serde(default)]
    pub grain_direction: GrainDirection,
}

impl Piece {
    pub fn new(id: impl Into<String>, width: u32, height: u32, quantity: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            quantity,
            source_item_id: None,
            can_rotate: true,
            grain_direction: GrainDirection::None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }
}

/// One physical piece, expanded from a [`Piece`].
#[derive(Debug, Clone, PartialEq)]
pub struct PieceUnit {
    /// `<pieceId>_<index>`
    pub id: String,
    /// Index of the originating piece in the input list.
    pub piece_index: usize,
    pub rect: Rect,
    pub source_item_id: Option<String>,
    pub can_rotate: bool,
    pub grain_direction: GrainDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDef {
    pub id: String,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub height: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub available_count: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

impl StockDef {
    pub fn new(id: impl Into<String>, width: u32, height: u32, available_count: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            available_count,
            unit_price: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }
}

/// A unit laid onto a sheet. `width`/`height` are the footprint after rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub piece_unit_id: String,
    pub source_item_id: Option<String>,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.rect().area()
    }

    /// True when the two placements keep at least `kerf` between them on
    /// one axis.
    pub fn is_clear_of(&self, other: &Placement, kerf: u32) -> bool {
        rects_clear(self.x, self.y, self.rect(), other.x, other.y, other.rect(), kerf)
    }
}

/// Whether rectangles at `(ax, ay)` and `(bx, by)` are separated by a gap of
/// at least `kerf` along x or along y.
pub fn rects_clear(ax: u32, ay: u32, a: Rect, bx: u32, by: u32, b: Rect, kerf: u32) -> bool {
    let (ax, ay, bx, by) = (ax as u64, ay as u64, bx as u64, by as u64);
    let kerf = kerf as u64;
    ax + a.w as u64 + kerf <= bx
        || bx + b.w as u64 + kerf <= ax
        || ay + a.h as u64 + kerf <= by
        || by + b.h as u64 + kerf <= ay
}

fn default_true() -> bool {
    true
}

/// Accepts JSON integers as well as floats with no fractional part, so
/// `1200` and `1200.0` both deserialize. Negative or fractional values are
/// rejected.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(serde::de::Error::custom);
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected a non-negative whole number, got {value}"
        ))),
    }
}
