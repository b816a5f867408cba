//! Free-space bookkeeping for a sheet.
//!
//! The set holds maximal free rectangles that may overlap each other. After
//! every occupation it is split, merged and pruned so that no rectangle is
//! contained in another.

use crate::types::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub rect: Rect,
}

impl FreeRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            rect: Rect::new(w, h),
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.rect.w
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.rect.h
    }

    pub fn contains(&self, other: &FreeRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap with positive area; shared edges do not count.
    pub fn intersects(&self, other: &FreeRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FreeRects {
    rects: Vec<FreeRect>,
}

impl FreeRects {
    pub fn new(sheet: Rect) -> Self {
        Self {
            rects: vec![FreeRect::new(0, 0, sheet.w, sheet.h)],
        }
    }

    pub fn as_slice(&self) -> &[FreeRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn push(&mut self, rect: FreeRect) {
        if rect.rect.w > 0 && rect.rect.h > 0 {
            self.rects.push(rect);
        }
    }

    pub fn take(&mut self, idx: usize) -> FreeRect {
        self.rects.swap_remove(idx)
    }

    /// Removes the region at `(x, y)` of size `placed`, grown by `kerf` on
    /// every side, from the free space.
    pub fn occupy(&mut self, x: u32, y: u32, placed: Rect, kerf: u32) {
        let x0 = x.saturating_sub(kerf);
        let y0 = y.saturating_sub(kerf);
        let used = FreeRect {
            x: x0,
            y: y0,
            rect: Rect::new(
                (x + placed.w).saturating_add(kerf) - x0,
                (y + placed.h).saturating_add(kerf) - y0,
            ),
        };

        let mut next = Vec::with_capacity(self.rects.len() + 4);
        let mut untouched = Vec::with_capacity(self.rects.len());
        for free in self.rects.drain(..) {
            if free.intersects(&used) {
                split(&free, &used, &mut next);
            } else {
                untouched.push(free);
            }
        }
        next.extend(untouched);
        self.rects = next;

        self.merge();
        self.prune();
    }

    /// Joins pairs that share a full edge until no pair does.
    pub fn merge(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.rects.len() {
                for j in (i + 1)..self.rects.len() {
                    if let Some(m) = try_merge(self.rects[i], self.rects[j]) {
                        self.rects[i] = m;
                        self.rects.swap_remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
        }
    }

    /// Drops every rectangle contained in another. Of two identical
    /// rectangles the earlier one survives.
    pub fn prune(&mut self) {
        let mut i = 0;
        while i < self.rects.len() {
            let candidate = self.rects[i];
            let redundant = self.rects.iter().enumerate().any(|(j, other)| {
                j != i && other.contains(&candidate) && (*other != candidate || j < i)
            });
            if redundant {
                self.rects.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

/// Up to four maximal slivers of `free` outside `used`.
fn split(free: &FreeRect, used: &FreeRect, out: &mut Vec<FreeRect>) {
    if used.x > free.x {
        out.push(FreeRect::new(free.x, free.y, used.x - free.x, free.rect.h));
    }
    if used.right() < free.right() {
        out.push(FreeRect::new(
            used.right(),
            free.y,
            free.right() - used.right(),
            free.rect.h,
        ));
    }
    if used.y > free.y {
        out.push(FreeRect::new(free.x, free.y, free.rect.w, used.y - free.y));
    }
    if used.bottom() < free.bottom() {
        out.push(FreeRect::new(
            free.x,
            used.bottom(),
            free.rect.w,
            free.bottom() - used.bottom(),
        ));
    }
}

/// The union of `a` and `b` when it is itself a rectangle.
fn try_merge(a: FreeRect, b: FreeRect) -> Option<FreeRect> {
    let (lo, hi) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
    if lo.y == hi.y && lo.rect.h == hi.rect.h && lo.right() == hi.x {
        Some(FreeRect::new(lo.x, lo.y, lo.rect.w + hi.rect.w, lo.rect.h))
    } else if lo.x == hi.x && lo.rect.w == hi.rect.w && lo.bottom() == hi.y {
        Some(FreeRect::new(lo.x, lo.y, lo.rect.w, lo.rect.h + hi.rect.h))
    } else {
        None
    }
}
