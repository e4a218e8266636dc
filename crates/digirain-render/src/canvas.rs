//! Terminal cell canvas.
//!
//! Maps the renderer's pixel coordinates onto terminal cells and keeps a
//! per-cell color that fades under each translucent fill, which gives the
//! trail its persistence.

use digirain_core::Rgb;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::surface::{GlyphDraw, Surface, SurfaceSize};

/// Cells whose remaining weight drops below this are blanked.
const MIN_WEIGHT: f32 = 0.03;

/// Shadow blur at which a glyph is rendered bold.
const BOLD_BLUR: f32 = 8.0;

/// How far a glow shadow tints a glyph toward its shadow color, per pixel of blur.
const GLOW_TINT_PER_PX: f32 = 0.02;

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: u32,
    pub height: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 7,
            height: 14,
        }
    }
}

impl CellMetrics {
    /// Pixel size of a `cols` by `rows` cell grid.
    pub fn surface_size(&self, cols: u16, rows: u16) -> SurfaceSize {
        SurfaceSize::new(cols as u32 * self.width, rows as u32 * self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Rgb,
    weight: f32,
    bold: bool,
}

/// An in-memory grid of glyph cells presented through ratatui.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    metrics: CellMetrics,
    cols: u16,
    rows: u16,
    cells: Vec<Option<Cell>>,
    background: Rgb,
}

impl CellCanvas {
    /// A canvas of `cols` by `rows` cells with the default metrics.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self::with_metrics(cols, rows, CellMetrics::default())
    }

    pub fn with_metrics(cols: u16, rows: u16, metrics: CellMetrics) -> Self {
        Self {
            metrics,
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
            background: Rgb::BLACK,
        }
    }

    /// Canvas matching a ratatui area.
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Grid dimensions in cells.
    pub fn cells(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Glyph currently shown at a cell, if any.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        self.index(col, row)
            .and_then(|i| self.cells[i])
            .map(|c| c.ch)
    }

    /// Color currently shown at a cell, if any.
    pub fn color_at(&self, col: u16, row: u16) -> Option<Rgb> {
        self.index(col, row)
            .and_then(|i| self.cells[i])
            .map(|c| c.color)
    }

    /// Number of cells showing a glyph.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Build the styled lines for the whole grid.
    ///
    /// A double-width glyph swallows the cell to its right so every line
    /// stays as wide as the grid.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let bg = Style::new().bg(self.background.into());
        (0..self.rows)
            .map(|row| {
                let start = row as usize * self.cols as usize;
                let cells = &self.cells[start..start + self.cols as usize];
                let mut spans = Vec::with_capacity(cells.len());
                let mut skip = 0;
                for cell in cells {
                    if skip > 0 {
                        skip -= 1;
                        continue;
                    }
                    let span = match cell {
                        Some(cell) => {
                            let mut style = bg.fg(cell.color.into());
                            if cell.bold {
                                style = style.add_modifier(Modifier::BOLD);
                            }
                            Span::styled(cell.ch.to_string(), style)
                        }
                        None => Span::styled(" ", bg),
                    };
                    skip = span.width().saturating_sub(1);
                    spans.push(span);
                }
                Line::from(spans)
            })
            .collect()
    }

    /// Render the canvas into `area` of the frame.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.lines()), area);
    }
}

impl Surface for CellCanvas {
    fn size(&self) -> SurfaceSize {
        self.metrics.surface_size(self.cols, self.rows)
    }

    fn resize(&mut self, size: SurfaceSize) {
        let cols = size.width.checked_div(self.metrics.width).unwrap_or(0);
        let rows = size.height.checked_div(self.metrics.height).unwrap_or(0);
        let cols = cols.min(u16::MAX as u32) as u16;
        let rows = rows.min(u16::MAX as u32) as u16;
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; cols as usize * rows as usize];
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.cells.fill(None);
    }

    fn fill(&mut self, color: Rgb, alpha: f32) {
        let alpha = color.with_alpha(alpha).clamped_alpha();
        for slot in &mut self.cells {
            if let Some(cell) = slot {
                cell.color = cell.color.lerp(color, alpha);
                cell.weight *= 1.0 - alpha;
                if cell.weight < MIN_WEIGHT {
                    *slot = None;
                }
            }
        }
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        if glyph.x < 0.0 || glyph.y < glyph.font_size as f64 {
            return;
        }
        let col = (glyph.x / self.metrics.width as f64) as u32;
        let row = ((glyph.y - glyph.font_size as f64) / self.metrics.height as f64) as u32;
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        let Some(idx) = self.index(col, row) else {
            return;
        };

        let alpha = glyph.color.with_alpha(glyph.alpha).clamped_alpha();
        let mut color = self.background.lerp(glyph.color, alpha);
        let mut bold = alpha >= 1.0;
        if let Some(shadow) = glyph.shadow {
            color = color.lerp(shadow.color, shadow.blur * GLOW_TINT_PER_PX);
            bold |= shadow.blur >= BOLD_BLUR;
        }

        self.cells[idx] = Some(Cell {
            ch: glyph.ch,
            color,
            weight: alpha,
            bold,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Shadow;

    fn glyph(ch: char, x: f64, y: f64, alpha: f32) -> GlyphDraw {
        GlyphDraw {
            ch,
            x,
            y,
            font_size: 14,
            color: Rgb::new(0, 200, 0),
            alpha,
            shadow: None,
        }
    }

    #[test]
    fn test_size_in_pixels() {
        let canvas = CellCanvas::new(80, 24);
        assert_eq!(canvas.size(), SurfaceSize::new(560, 336));
        assert!(CellCanvas::new(0, 24).size().is_empty());
    }

    #[test]
    fn test_resize_rebuilds_grid() {
        let mut canvas = CellCanvas::new(10, 10);
        canvas.draw_glyph(&glyph('A', 0.0, 14.0, 1.0));
        canvas.resize(SurfaceSize::new(140, 70));
        assert_eq!(canvas.cells(), (20, 5));
        assert_eq!(canvas.lit_cells(), 0);
    }

    #[test]
    fn test_glyph_maps_to_cell() {
        let mut canvas = CellCanvas::new(10, 10);
        // column 2 of a 14px grid sits at x = 28 → cell 4; row 3 has baseline 56
        canvas.draw_glyph(&glyph('Z', 28.0, 56.0, 1.0));
        assert_eq!(canvas.glyph_at(4, 3), Some('Z'));
        assert_eq!(canvas.color_at(4, 3), Some(Rgb::new(0, 200, 0)));
        assert_eq!(canvas.lit_cells(), 1);
    }

    #[test]
    fn test_out_of_bounds_glyph_is_dropped() {
        let mut canvas = CellCanvas::new(2, 2);
        canvas.draw_glyph(&glyph('X', 500.0, 14.0, 1.0));
        canvas.draw_glyph(&glyph('X', 0.0, 5000.0, 1.0));
        canvas.draw_glyph(&glyph('X', 0.0, 3.0, 1.0));
        assert_eq!(canvas.lit_cells(), 0);
    }

    #[test]
    fn test_fill_fades_and_blanks() {
        let mut canvas = CellCanvas::new(4, 4);
        canvas.draw_glyph(&glyph('A', 0.0, 14.0, 1.0));
        canvas.fill(Rgb::BLACK, 0.5);
        assert_eq!(canvas.color_at(0, 0), Some(Rgb::new(0, 100, 0)));
        for _ in 0..8 {
            canvas.fill(Rgb::BLACK, 0.5);
        }
        assert_eq!(canvas.glyph_at(0, 0), None);
    }

    #[test]
    fn test_fill_alpha_is_clamped() {
        let mut canvas = CellCanvas::new(4, 4);
        canvas.draw_glyph(&glyph('A', 0.0, 14.0, 1.0));
        canvas.fill(Rgb::BLACK, 1.17);
        assert_eq!(canvas.lit_cells(), 0);
    }

    #[test]
    fn test_strong_glow_is_bold() {
        let mut canvas = CellCanvas::new(4, 4);
        let mut g = glyph('A', 0.0, 14.0, 0.5);
        g.shadow = Some(Shadow {
            color: Rgb::new(255, 255, 255),
            blur: 12.0,
        });
        canvas.draw_glyph(&g);
        let lines = canvas.lines();
        assert_eq!(lines.len(), 4);
        let span = &lines[0].spans[0];
        assert_eq!(span.content, "A");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_wide_glyph_keeps_line_width() {
        let mut canvas = CellCanvas::new(4, 1);
        canvas.draw_glyph(&glyph('ア', 0.0, 14.0, 1.0));
        let lines = canvas.lines();
        assert_eq!(lines[0].width(), 4);
        assert_eq!(lines[0].spans.len(), 3);
    }

    #[test]
    fn test_lines_cover_grid() {
        let canvas = CellCanvas::new(3, 2);
        let lines = canvas.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.spans.len() == 3));
    }
}
