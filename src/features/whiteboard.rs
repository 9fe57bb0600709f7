//! Gesture-driven whiteboard.
//!
//! Each combined position+gesture sample advances a small pen state machine.
//! Strokes are kept in an append-only log; the raster is the rendered result
//! and can always be rebuilt from the log alone.

use crate::backend::types::{Gesture, GestureRole, HandPosition};
use std::fmt;

pub const DRAW_WIDTH: f64 = 3.0;
pub const ERASE_WIDTH: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// HSL to RGB with hue in degrees and saturation/lightness in percent.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let l = l / 100.0;
        let a = s * l.min(1.0 - l) / 100.0;
        let f = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (255.0 * color).round().clamp(0.0, 255.0) as u8
        };
        Self::new(f(0.0), f(8.0), f(4.0))
    }

    /// Color picked by the recolor gesture: hue follows the horizontal hand
    /// position at full saturation and half lightness.
    pub fn from_position(x: f64) -> Self {
        let hue = (x.clamp(0.0, 1.0) * 360.0).floor();
        Self::from_hsl(hue, 100.0, 50.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const PALETTE: [Rgb; 6] = [
    Rgb::new(0xff, 0xff, 0xff),
    Rgb::new(0xff, 0x6b, 0x6b),
    Rgb::new(0x51, 0xcf, 0x66),
    Rgb::new(0x4d, 0xab, 0xf7),
    Rgb::new(0xfc, 0xc4, 0x19),
    Rgb::new(0xcc, 0x5d, 0xe8),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Draw,
    Erase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub kind: StrokeKind,
    pub from: Point,
    pub to: Point,
    pub color: Option<Rgb>,
    pub width: f64,
}

/// Cell grid holding the painted color of each cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    cols: usize,
    rows: usize,
    cell_size: f64,
    cells: Vec<Option<Rgb>>,
}

impl Raster {
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let cell_size = cell_size.max(1.0);
        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        Self {
            cols,
            rows,
            cell_size,
            cells: vec![None; cols * rows],
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Painted cells as `(col, row, color)`.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|rgb| (i % self.cols, i / self.cols, rgb)))
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn apply(&mut self, stroke: &Stroke) {
        // A stroke always covers at least the cell its centre line passes through
        let radius = (stroke.width / 2.0).max(self.cell_size / 2.0);
        let value = match stroke.kind {
            StrokeKind::Draw => stroke.color,
            StrokeKind::Erase => None,
        };

        let min_x = stroke.from.x.min(stroke.to.x) - radius;
        let max_x = stroke.from.x.max(stroke.to.x) + radius;
        let min_y = stroke.from.y.min(stroke.to.y) - radius;
        let max_y = stroke.from.y.max(stroke.to.y) + radius;

        let col_range = self.cell_range(min_x, max_x, self.cols);
        let row_range = self.cell_range(min_y, max_y, self.rows);

        for row in row_range {
            for col in col_range.clone() {
                let center = Point {
                    x: (col as f64 + 0.5) * self.cell_size,
                    y: (row as f64 + 0.5) * self.cell_size,
                };
                if distance_to_segment(center, stroke.from, stroke.to) <= radius {
                    self.cells[row * self.cols + col] = value;
                }
            }
        }
    }

    fn cell_range(&self, min: f64, max: f64, limit: usize) -> std::ops::Range<usize> {
        let lo = (min / self.cell_size).floor().max(0.0) as usize;
        let hi = ((max / self.cell_size).floor().max(-1.0) + 1.0) as usize;
        lo.min(limit)..hi.min(limit)
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// What a single sample did to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    PenDown(Point),
    Stroke(Stroke),
    Recolored(Rgb),
    Cleared,
    PenUp,
}

#[derive(Debug, Clone)]
pub struct Whiteboard {
    width: f64,
    height: f64,
    pen_down: bool,
    anchor: Point,
    color: Rgb,
    strokes: Vec<Stroke>,
    raster: Raster,
}

impl Whiteboard {
    pub fn new(width: f64, height: f64, cell_size: f64, color: Rgb) -> Self {
        Self {
            width,
            height,
            pen_down: false,
            anchor: Point { x: 0.0, y: 0.0 },
            color,
            strokes: Vec::new(),
            raster: Raster::new(width, height, cell_size),
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn lift_pen(&mut self) {
        self.pen_down = false;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn cycle_color(&mut self) -> Rgb {
        let next = PALETTE
            .iter()
            .position(|c| *c == self.color)
            .map(|i| (i + 1) % PALETTE.len())
            .unwrap_or(0);
        self.color = PALETTE[next];
        self.color
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Fresh drawing session: blank canvas, empty log, pen up.
    pub fn start_session(&mut self) {
        self.clear();
    }

    /// Advance the pen state machine with one combined sample. A missing
    /// gesture (hand not visible) lifts the pen.
    pub fn apply_sample(&mut self, position: HandPosition, gesture: Option<Gesture>) -> SampleOutcome {
        let gesture = match gesture {
            Some(g) if position.visible => g,
            _ => {
                self.pen_down = false;
                return SampleOutcome::PenUp;
            }
        };
        let (x, y) = position.scale_to(self.width, self.height);
        let point = Point { x, y };

        match gesture.role() {
            GestureRole::Draw => self.extend(point, StrokeKind::Draw),
            GestureRole::Erase => self.extend(point, StrokeKind::Erase),
            GestureRole::Recolor => {
                self.color = Rgb::from_position(position.x);
                SampleOutcome::Recolored(self.color)
            }
            GestureRole::Clear => {
                self.clear();
                SampleOutcome::Cleared
            }
            _ => {
                self.pen_down = false;
                SampleOutcome::PenUp
            }
        }
    }

    fn extend(&mut self, point: Point, kind: StrokeKind) -> SampleOutcome {
        if !self.pen_down {
            self.pen_down = true;
            self.anchor = point;
            return SampleOutcome::PenDown(point);
        }
        let stroke = match kind {
            StrokeKind::Draw => Stroke {
                kind,
                from: self.anchor,
                to: point,
                color: Some(self.color),
                width: DRAW_WIDTH,
            },
            StrokeKind::Erase => Stroke {
                kind,
                from: self.anchor,
                to: point,
                color: None,
                width: ERASE_WIDTH,
            },
        };
        self.raster.apply(&stroke);
        self.strokes.push(stroke.clone());
        self.anchor = point;
        SampleOutcome::Stroke(stroke)
    }

    /// Drop the most recent stroke and replay the remaining log.
    pub fn undo(&mut self) -> Option<Stroke> {
        let stroke = self.strokes.pop()?;
        self.redraw();
        Some(stroke)
    }

    pub fn redraw(&mut self) {
        self.raster.clear();
        for stroke in &self.strokes {
            self.raster.apply(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.raster.clear();
        self.pen_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Whiteboard {
        Whiteboard::new(100.0, 100.0, 2.0, Rgb::new(255, 255, 255))
    }

    fn at(x: f64, y: f64) -> HandPosition {
        HandPosition { x, y, visible: true }
    }

    #[test]
    fn test_first_draw_sample_only_lowers_pen() {
        let mut wb = board();
        let outcome = wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        assert_eq!(outcome, SampleOutcome::PenDown(Point { x: 10.0, y: 10.0 }));
        assert!(wb.is_pen_down());
        assert!(wb.strokes().is_empty());
    }

    #[test]
    fn test_consecutive_draws_chain_segments() {
        let mut wb = board();
        wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        wb.apply_sample(at(0.2, 0.2), Some(Gesture::OneFingerUp));
        wb.apply_sample(at(0.3, 0.1), Some(Gesture::OneFingerUp));

        let strokes = wb.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].from, Point { x: 10.0, y: 10.0 });
        assert_eq!(strokes[1].from, strokes[0].to);
        assert_eq!(strokes[1].to, Point { x: 30.0, y: 10.0 });
        assert_eq!(strokes[0].width, DRAW_WIDTH);
        assert_eq!(strokes[0].color, Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_erase_uses_wide_brush_and_clears_cells() {
        let mut wb = board();
        wb.apply_sample(at(0.1, 0.5), Some(Gesture::OneFingerUp));
        wb.apply_sample(at(0.9, 0.5), Some(Gesture::OneFingerUp));
        let painted = wb.raster().painted_count();
        assert!(painted > 0);

        wb.apply_sample(at(0.5, 0.5), Some(Gesture::Fist));
        wb.apply_sample(at(0.5, 0.4), Some(Gesture::TwoFingersUp));
        wb.apply_sample(at(0.5, 0.6), Some(Gesture::TwoFingersUp));

        let last = wb.strokes().last().unwrap();
        assert_eq!(last.kind, StrokeKind::Erase);
        assert_eq!(last.width, ERASE_WIDTH);
        assert_eq!(last.color, None);
        assert!(wb.raster().painted_count() < painted);
        assert_eq!(wb.raster().get(25, 25), None);
    }

    #[test]
    fn test_recolor_keeps_anchor_and_maps_hue() {
        let mut wb = board();
        wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        let outcome = wb.apply_sample(at(0.0, 0.9), Some(Gesture::ThreeFingersUp));
        assert_eq!(outcome, SampleOutcome::Recolored(Rgb::new(255, 0, 0)));
        assert!(wb.is_pen_down());

        wb.apply_sample(at(0.2, 0.1), Some(Gesture::OneFingerUp));
        let stroke = &wb.strokes()[0];
        assert_eq!(stroke.from, Point { x: 10.0, y: 10.0 });
        assert_eq!(stroke.color, Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_hue_mapping_matches_hsl() {
        assert_eq!(Rgb::from_position(0.0).to_string(), "#ff0000");
        assert_eq!(Rgb::from_hsl(120.0, 100.0, 50.0).to_string(), "#00ff00");
        assert_eq!(Rgb::from_hsl(240.0, 100.0, 50.0).to_string(), "#0000ff");
    }

    #[test]
    fn test_clear_gesture_empties_everything() {
        let mut wb = board();
        wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        wb.apply_sample(at(0.5, 0.5), Some(Gesture::OneFingerUp));
        assert_eq!(wb.apply_sample(at(0.5, 0.5), Some(Gesture::OpenPalm)), SampleOutcome::Cleared);
        assert!(wb.strokes().is_empty());
        assert_eq!(wb.raster().painted_count(), 0);
        assert!(!wb.is_pen_down());
    }

    #[test]
    fn test_other_gestures_and_hidden_hand_lift_pen() {
        let mut wb = board();
        wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        assert_eq!(wb.apply_sample(at(0.2, 0.2), Some(Gesture::Unknown)), SampleOutcome::PenUp);
        assert!(!wb.is_pen_down());

        wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        let hidden = HandPosition { x: 0.3, y: 0.3, visible: false };
        assert_eq!(wb.apply_sample(hidden, Some(Gesture::OneFingerUp)), SampleOutcome::PenUp);
        assert_eq!(wb.apply_sample(at(0.3, 0.3), None), SampleOutcome::PenUp);
        assert!(wb.strokes().is_empty());
    }

    #[test]
    fn test_undo_replays_to_prior_canvas() {
        let mut wb = board();
        wb.apply_sample(at(0.1, 0.1), Some(Gesture::OneFingerUp));
        wb.apply_sample(at(0.4, 0.4), Some(Gesture::OneFingerUp));
        let before = wb.raster().clone();

        wb.apply_sample(at(0.4, 0.4), Some(Gesture::Fist));
        wb.apply_sample(at(0.4, 0.4), Some(Gesture::TwoFingersUp));
        wb.apply_sample(at(0.2, 0.2), Some(Gesture::TwoFingersUp));
        assert_ne!(wb.raster(), &before);

        let undone = wb.undo().unwrap();
        assert_eq!(undone.kind, StrokeKind::Erase);
        assert_eq!(wb.strokes().len(), 1);
        assert_eq!(wb.raster(), &before);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut wb = board();
        assert_eq!(wb.undo(), None);
    }

    #[test]
    fn test_palette_cycles() {
        let mut wb = board();
        assert_eq!(wb.cycle_color(), PALETTE[1]);
        wb.set_color(Rgb::new(1, 2, 3));
        assert_eq!(wb.cycle_color(), PALETTE[0]);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#4dabf7"), Some(Rgb::new(0x4d, 0xab, 0xf7)));
        assert_eq!(Rgb::from_hex("4dabf7"), Some(Rgb::new(0x4d, 0xab, 0xf7)));
        assert_eq!(Rgb::from_hex("#fff"), None);
    }
}
