use glam::Vec2;

use fairway_putt::config::GreenTheme;
use fairway_putt::physics::Bounds;

use crate::render::{Canvas, Rgb};

/// Character-grid canvas for terminals and tests.
///
/// Each cell covers a `width/columns x height/rows` patch of the green and is
/// painted when its center falls inside a shape. Colors map to the glyph of the
/// nearest theme color.
pub struct AsciiCanvas {
    columns: usize,
    rows: usize,
    cell: Vec2,
    cells: Vec<char>,
    palette: Vec<(Rgb, char)>,
}

impl AsciiCanvas {
    pub fn new(columns: usize, rows: usize, bounds: Bounds, theme: &GreenTheme) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            cell: Vec2::new(bounds.width / columns as f32, bounds.height / rows as f32),
            cells: vec![' '; columns * rows],
            palette: vec![
                (theme.background, '.'),
                (theme.hole, 'O'),
                (theme.ball, 'o'),
                (theme.aim_line, '*'),
            ],
        }
    }

    fn glyph(&self, color: Rgb) -> char {
        let dist = |c: &Rgb| {
            (0..3)
                .map(|i| (c[i] - color[i]) * (c[i] - color[i]))
                .sum::<f32>()
        };
        self.palette
            .iter()
            .min_by(|a, b| dist(&a.0).total_cmp(&dist(&b.0)))
            .map(|&(_, glyph)| glyph)
            .unwrap_or('?')
    }

    fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.cell.x,
            (row as f32 + 0.5) * self.cell.y,
        )
    }

    fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / self.cell.x) as usize;
        let row = (point.y / self.cell.y) as usize;
        (col < self.columns && row < self.rows).then_some((col, row))
    }

    fn set(&mut self, col: usize, row: usize, glyph: char) {
        self.cells[row * self.columns + col] = glyph;
    }

    fn fill_where(&mut self, glyph: char, inside: impl Fn(Vec2) -> bool) {
        for row in 0..self.rows {
            for col in 0..self.columns {
                if inside(self.cell_center(col, row)) {
                    self.set(col, row, glyph);
                }
            }
        }
    }

    /// The grid as text, one line per row.
    pub fn render(&self) -> String {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for AsciiCanvas {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgb) {
        let glyph = self.glyph(color);
        let end = origin + size;
        self.fill_where(glyph, |p| {
            p.x >= origin.x && p.y >= origin.y && p.x < end.x && p.y < end.y
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let glyph = self.glyph(color);
        self.fill_where(glyph, |p| p.distance(center) <= radius);
        // Small discs can miss every cell center; always mark the cell under the center.
        if let Some((col, row)) = self.cell_at(center) {
            self.set(col, row, glyph);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        let glyph = self.glyph(color);
        let spacing = self.cell.min_element() / 2.0;
        let samples = ((from.distance(to) / spacing).ceil() as usize).max(1);
        for i in 0..=samples {
            let p = from.lerp(to, i as f32 / samples as f32);
            if let Some((col, row)) = self.cell_at(p) {
                self.set(col, row, glyph);
            }
        }
    }
}
