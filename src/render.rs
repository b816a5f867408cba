use crate::result::SheetResult;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Draws a sheet and its placements as ASCII art, scaled to fit 80x40.
pub fn render_sheet(sheet: &SheetResult) -> String {
    let scale = f64::min(
        MAX_WIDTH / sheet.width as f64,
        MAX_HEIGHT / sheet.height as f64,
    );
    let cells = |len: u32| (len as f64 * scale).round() as usize;

    let (cols, rows) = (cells(sheet.width), cells(sheet.height));
    if cols == 0 || rows == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; cols + 1]; rows + 1];
    draw_rect(&mut grid, 0, 0, cols, rows);

    for p in &sheet.placements {
        let (x, y, w, h) = (cells(p.x), cells(p.y), cells(p.width), cells(p.height));
        if w == 0 || h == 0 {
            continue;
        }
        draw_rect(&mut grid, x, y, w, h);
        if w > 2 {
            write_label(&mut grid, (x, y, w, h), &p.rect().to_string());
        }
    }

    grid.iter()
        .map(|row| {
            let mut line: String = row.iter().collect();
            line.truncate(line.trim_end().len());
            line.push('\n');
            line
        })
        .collect()
}

/// Centers `label` inside the box, clipped to its interior.
fn write_label(
    grid: &mut [Vec<char>],
    (x, y, w, h): (usize, usize, usize, usize),
    label: &str,
) {
    let row = y + h / 2;
    if row <= y || row >= y + h {
        return;
    }
    let start = (x + w / 2).saturating_sub(label.chars().count() / 2);
    for (col, ch) in (start..).zip(label.chars()) {
        if col > x && col < x + w {
            grid[row][col] = ch;
        }
    }
}

/// Writes an edge character, turning crossings into `+`.
fn stroke(grid: &mut [Vec<char>], row: usize, col: usize, edge: char) {
    let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) else {
        return;
    };
    *cell = match (*cell, edge) {
        ('+', _) => '+',
        ('|', '-') | ('-', '|') => '+',
        _ => edge,
    };
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    for col in x..=x + w {
        stroke(grid, y, col, '-');
        stroke(grid, y + h, col, '-');
    }
    for row in y..=y + h {
        stroke(grid, row, x, '|');
        stroke(grid, row, x + w, '|');
    }
    for (row, col) in [(y, x), (y, x + w), (y + h, x), (y + h, x + w)] {
        stroke(grid, row, col, '+');
    }
}
