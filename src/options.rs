use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Requested packing algorithm, as named by callers. See
/// [`crate::dispatch::select_strategy`] for how names map to strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum Algorithm {
    #[default]
    BottomLeft,
    Guillotine,
    #[serde(rename = "MAXRECTS")]
    MaxRects,
    #[serde(rename = "MAXRECTS_BEST")]
    MaxRectsBest,
}

impl Algorithm {
    /// Resolves a name; anything unrecognized falls back to bottom-left.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "BOTTOM_LEFT" => Algorithm::BottomLeft,
            "GUILLOTINE" => Algorithm::Guillotine,
            "MAXRECTS" => Algorithm::MaxRects,
            "MAXRECTS_BEST" => Algorithm::MaxRectsBest,
            other => {
                tracing::warn!(algorithm = other, "unknown algorithm, using BOTTOM_LEFT");
                Algorithm::BottomLeft
            }
        }
    }
}

impl From<String> for Algorithm {
    fn from(name: String) -> Self {
        Algorithm::from_name(&name)
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Algorithm::from_name(s))
    }
}

/// MaxRects candidate scoring. `Best` runs every other heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    #[serde(rename = "BSSF")]
    BestShortSideFit,
    #[serde(rename = "BAF")]
    BestAreaFit,
    #[serde(rename = "BLSF")]
    BestLongSideFit,
    #[serde(rename = "BL")]
    BottomLeft,
    #[serde(rename = "CP")]
    ContactPoint,
    #[serde(rename = "BEST")]
    Best,
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BSSF" => Ok(Heuristic::BestShortSideFit),
            "BAF" => Ok(Heuristic::BestAreaFit),
            "BLSF" => Ok(Heuristic::BestLongSideFit),
            "BL" => Ok(Heuristic::BottomLeft),
            "CP" => Ok(Heuristic::ContactPoint),
            "BEST" => Ok(Heuristic::Best),
            _ => Err(format!(
                "invalid heuristic '{}', expected: BSSF, BAF, BLSF, BL, CP, or BEST",
                s
            )),
        }
    }
}

/// Ordering applied to expanded units before placement. Every key sorts
/// descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortStrategy {
    #[default]
    AreaDesc,
    ShortSide,
    LongSide,
    Perimeter,
    Difference,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 5] = [
        SortStrategy::AreaDesc,
        SortStrategy::ShortSide,
        SortStrategy::LongSide,
        SortStrategy::Perimeter,
        SortStrategy::Difference,
    ];
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "AREA_DESC" | "AREA" => Ok(SortStrategy::AreaDesc),
            "SHORT_SIDE" => Ok(SortStrategy::ShortSide),
            "LONG_SIDE" => Ok(SortStrategy::LongSide),
            "PERIMETER" => Ok(SortStrategy::Perimeter),
            "DIFFERENCE" => Ok(SortStrategy::Difference),
            _ => Err(format!(
                "invalid sort strategy '{}', expected: area-desc, short-side, long-side, perimeter, or difference",
                s
            )),
        }
    }
}

/// Which stock definition the stock manager reaches for first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockOrder {
    #[default]
    LargestFirst,
    SmallestFirst,
    /// Lowest price per unit of area; unpriced stock goes last.
    Cheapest,
}

impl FromStr for StockOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "LARGEST_FIRST" | "LARGEST" => Ok(StockOrder::LargestFirst),
            "SMALLEST_FIRST" | "SMALLEST" => Ok(StockOrder::SmallestFirst),
            "CHEAPEST" => Ok(StockOrder::Cheapest),
            _ => Err(format!(
                "invalid stock order '{}', expected: largest-first, smallest-first, or cheapest",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub algorithm: Algorithm,
    #[serde(deserialize_with = "crate::types::deserialize_u32_from_number")]
    pub kerf: u32,
    pub allow_rotation: bool,
    pub guillotine_only: bool,
    pub respect_grain_direction: bool,
    pub heuristic: Option<Heuristic>,
    pub sort_strategy: SortStrategy,
    pub multi_pass: bool,
    pub stock_order: StockOrder,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::BottomLeft,
            kerf: 0,
            allow_rotation: true,
            guillotine_only: false,
            respect_grain_direction: false,
            heuristic: None,
            sort_strategy: SortStrategy::AreaDesc,
            multi_pass: false,
            stock_order: StockOrder::LargestFirst,
        }
    }
}
