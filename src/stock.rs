use std::cmp::{Ordering, Reverse};

use crate::options::StockOrder;
use crate::types::{Rect, StockDef};

/// Remaining sheet counts for one optimization pass.
#[derive(Debug, Clone)]
pub struct StockManager<'a> {
    defs: &'a [StockDef],
    remaining: Vec<u32>,
    /// Indices into `defs`, in preference order.
    order: Vec<usize>,
}

impl<'a> StockManager<'a> {
    pub fn new(defs: &'a [StockDef], preference: StockOrder) -> Self {
        let mut order: Vec<usize> = (0..defs.len()).collect();
        match preference {
            StockOrder::LargestFirst => order.sort_by_key(|&i| Reverse(defs[i].rect().area())),
            StockOrder::SmallestFirst => order.sort_by_key(|&i| defs[i].rect().area()),
            StockOrder::Cheapest => order.sort_by(|&a, &b| cmp_price(&defs[a], &defs[b])),
        }
        Self {
            defs,
            remaining: defs.iter().map(|d| d.available_count).collect(),
            order,
        }
    }

    /// Picks the first preferred stock with sheets left that holds one of
    /// the given piece orientations.
    pub fn select(&self, orientations: &[Rect]) -> Option<usize> {
        self.order.iter().copied().find(|&i| {
            let sheet = self.defs[i].rect();
            self.remaining[i] > 0 && orientations.iter().any(|o| o.fits_in(&sheet))
        })
    }

    /// Takes one sheet of `idx`. Returns false when none are left.
    pub fn consume(&mut self, idx: usize) -> bool {
        match self.remaining.get_mut(idx) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, idx: usize) -> u32 {
        self.remaining.get(idx).copied().unwrap_or(0)
    }

    pub fn def(&self, idx: usize) -> &'a StockDef {
        &self.defs[idx]
    }
}

fn cmp_price(a: &StockDef, b: &StockDef) -> Ordering {
    let per_area = |d: &StockDef| d.unit_price.map(|p| p / d.rect().area() as f64);
    match (per_area(a), per_area(b)) {
        (Some(pa), Some(pb)) => pa.total_cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
