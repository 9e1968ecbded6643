//! Dial rendering for the countdown.
//!
//! Rendering happens in two steps. [`render`] is a pure mapping from a
//! [`Snapshot`] to a [`RenderedFrame`]: the outer ring, the 60 radial marks
//! with their elapsed/remaining coloring and the `"<seconds> : <millis>"`
//! label, all in resolution-independent design units. [`Dial::view`] then
//! rasterizes a frame onto a character grid and styles it with lipgloss.
//!
//! ```rust
//! use dial_timer::dial::{render, Dial, MarkKind};
//! use dial_timer::state::TimerState;
//!
//! let frame = render(&TimerState::new().snapshot());
//! assert_eq!(frame.marks.len(), 60);
//! assert!(frame.marks.iter().all(|m| m.kind == MarkKind::Remaining));
//! assert_eq!(frame.label, "60 : 0");
//!
//! let view = Dial::new().with_radius(8).view(&frame);
//! assert_eq!(view.lines().count(), 17);
//! ```

use crate::state::{Snapshot, COUNTDOWN_SECONDS};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Number of marks around the dial.
pub const MARK_COUNT: u32 = 60;

/// Rotation between neighbouring marks, in degrees.
pub const MARK_STEP_DEGREES: f32 = 6.0;

/// Radius of the outer ring in design units.
pub const RING_RADIUS: f32 = 450.0;

/// Stroke width of the outer ring in design units.
pub const RING_STROKE: f32 = 4.0;

/// Distance from the center where a mark starts.
pub const MARK_INNER: f32 = 300.0;

/// Distance from the center where a mark ends.
pub const MARK_OUTER: f32 = 410.0;

/// Smallest raster radius that still fits the label inside the marks.
pub const MIN_RADIUS: usize = 5;

/// Largest raster radius; bigger dials would not fit any terminal.
pub const MAX_RADIUS: usize = 64;

/// Raster radius used when none is configured.
pub const DEFAULT_RADIUS: usize = 12;

/// Whether a mark stands for an elapsed or a remaining second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// The second has already passed.
    Elapsed,
    /// The second is still to come.
    Remaining,
}

/// One radial mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    /// Position on the dial, `1..=60`.
    pub index: u32,
    /// Clockwise rotation from 12 o'clock in degrees. Marks advance
    /// counter-clockwise, so this is `-6 * index`.
    pub rotation: f32,
    /// Start distance from the center.
    pub inner: f32,
    /// End distance from the center.
    pub outer: f32,
    /// Coloring of the mark.
    pub kind: MarkKind,
}

/// The static outer ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Radius in design units.
    pub radius: f32,
    /// Stroke width in design units.
    pub stroke: f32,
}

/// Everything needed to draw one frame of the dial.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Outer ring.
    pub ring: Ring,
    /// The 60 marks, ordered by index.
    pub marks: Vec<Mark>,
    /// Centered text label.
    pub label: String,
}

impl RenderedFrame {
    /// Number of marks drawn in the elapsed color.
    pub fn elapsed_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| m.kind == MarkKind::Elapsed)
            .count()
    }
}

/// Coloring rule for mark `index` given the seconds left.
///
/// Marks switch to elapsed from index 1 upward, one per elapsed second, so
/// exactly `60 - seconds_left` marks are elapsed.
pub fn mark_kind(index: u32, seconds_left: u32) -> MarkKind {
    let seconds_left = seconds_left.min(COUNTDOWN_SECONDS);
    if index <= COUNTDOWN_SECONDS - seconds_left {
        MarkKind::Elapsed
    } else {
        MarkKind::Remaining
    }
}

/// Formats the center label.
pub fn format_label(seconds_left: u32, millis_left: u32) -> String {
    format!("{} : {}", seconds_left, millis_left)
}

/// Maps a snapshot to the frame describing it.
pub fn render(snapshot: &Snapshot) -> RenderedFrame {
    let marks = (1..=MARK_COUNT)
        .map(|index| Mark {
            index,
            rotation: -MARK_STEP_DEGREES * index as f32,
            inner: MARK_INNER,
            outer: MARK_OUTER,
            kind: mark_kind(index, snapshot.seconds_left),
        })
        .collect();

    RenderedFrame {
        ring: Ring {
            radius: RING_RADIUS,
            stroke: RING_STROKE,
        },
        marks,
        label: format_label(snapshot.seconds_left, snapshot.millis_left),
    }
}

/// Styles used when drawing the dial.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Outer ring.
    pub ring: Style,
    /// Marks for elapsed seconds.
    pub elapsed: Style,
    /// Marks for remaining seconds.
    pub remaining: Style,
    /// Center label.
    pub label: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            ring: Style::new().foreground(lipgloss::Color::from("#1E88E5")),
            elapsed: Style::new().foreground(lipgloss::Color::from("#334455")),
            remaining: Style::new().foreground(lipgloss::Color::from("#CCCCCC")),
            label: Style::new().bold(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Ring,
    Elapsed,
    Remaining,
    Label,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    paint: Paint,
}

struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    fn put(&mut self, row: i64, col: i64, cell: Cell) {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = Some(cell);
    }
}

/// Rasterizes frames onto the terminal.
#[derive(Debug, Clone)]
pub struct Dial {
    /// Ring radius in terminal rows. Columns are doubled to keep the
    /// dial round in typical cell proportions.
    pub radius: usize,
    /// Styles applied to each element.
    pub styles: Styles,
}

impl Default for Dial {
    fn default() -> Self {
        Self::new()
    }
}

impl Dial {
    /// Creates a dial of the default radius.
    pub fn new() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            styles: Styles::default(),
        }
    }

    /// Sets the radius, clamped to [`MIN_RADIUS`]..=[`MAX_RADIUS`].
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.set_radius(radius);
        self
    }

    /// Sets the radius in place, clamped to [`MIN_RADIUS`]..=[`MAX_RADIUS`].
    pub fn set_radius(&mut self, radius: usize) {
        self.radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Width of the rendered dial in columns.
    pub fn width(&self) -> usize {
        self.radius * 4 + 1
    }

    /// Height of the rendered dial in rows.
    pub fn height(&self) -> usize {
        self.radius * 2 + 1
    }

    /// Draws `frame` as styled lines.
    pub fn view(&self, frame: &RenderedFrame) -> String {
        let mut grid = Grid::new(self.height(), self.width());
        let center_row = self.radius as i64;
        let center_col = (self.radius * 2) as i64;
        let scale = self.radius as f32 / frame.ring.radius;

        // Project a point given by distance and clockwise rotation.
        let project = |distance: f32, rotation: f32| -> (i64, i64) {
            let (sin, cos) = rotation.to_radians().sin_cos();
            let dx = distance * scale * sin * 2.0;
            let dy = -distance * scale * cos;
            (center_row + dy.round() as i64, center_col + dx.round() as i64)
        };

        let ring_steps = (self.radius * 24).max(96);
        for step in 0..ring_steps {
            let rotation = 360.0 * step as f32 / ring_steps as f32;
            let (row, col) = project(frame.ring.radius, rotation);
            grid.put(
                row,
                col,
                Cell {
                    glyph: '·',
                    paint: Paint::Ring,
                },
            );
        }

        for mark in &frame.marks {
            let glyph = mark_glyph(mark.rotation);
            let paint = match mark.kind {
                MarkKind::Elapsed => Paint::Elapsed,
                MarkKind::Remaining => Paint::Remaining,
            };
            let length = (mark.outer - mark.inner) * scale * 2.0;
            let samples = (length.ceil() as usize).max(2);
            for i in 0..=samples {
                let distance = mark.inner + (mark.outer - mark.inner) * i as f32 / samples as f32;
                let (row, col) = project(distance, mark.rotation);
                grid.put(row, col, Cell { glyph, paint });
            }
        }

        let label_width = frame.label.width() as i64;
        let mut col = center_col - label_width / 2;
        for ch in frame.label.chars() {
            grid.put(
                center_row,
                col,
                Cell {
                    glyph: ch,
                    paint: Paint::Label,
                },
            );
            col += 1;
        }

        let mut lines = Vec::with_capacity(grid.rows);
        for row in 0..grid.rows {
            let cells = &grid.cells[row * grid.cols..(row + 1) * grid.cols];
            lines.push(self.render_row(cells));
        }
        lines.join("\n")
    }

    // Styles consecutive cells of the same paint as one run.
    fn render_row(&self, cells: &[Option<Cell>]) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut run_paint: Option<Paint> = None;

        for cell in cells {
            let paint = cell.map(|c| c.paint);
            if paint != run_paint && !run.is_empty() {
                out.push_str(&self.paint(run_paint, &run));
                run.clear();
            }
            run_paint = paint;
            run.push(cell.map_or(' ', |c| c.glyph));
        }
        if !run.is_empty() {
            out.push_str(&self.paint(run_paint, &run));
        }
        out
    }

    fn paint(&self, paint: Option<Paint>, text: &str) -> String {
        let style = match paint {
            None => return text.to_string(),
            Some(Paint::Ring) => &self.styles.ring,
            Some(Paint::Elapsed) => &self.styles.elapsed,
            Some(Paint::Remaining) => &self.styles.remaining,
            Some(Paint::Label) => &self.styles.label,
        };
        style.clone().inline(true).render(text)
    }
}

// Picks a line glyph matching the mark's orientation.
fn mark_glyph(rotation: f32) -> char {
    let orientation = rotation.rem_euclid(180.0);
    if !(22.5..157.5).contains(&orientation) {
        '┃'
    } else if orientation < 67.5 {
        '╱'
    } else if orientation < 112.5 {
        '━'
    } else {
        '╲'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerState;

    fn plain(view: &str) -> String {
        strip_ansi_escapes::strip_str(view)
    }

    #[test]
    fn test_full_countdown_all_remaining() {
        let frame = render(&TimerState::new().snapshot());
        assert_eq!(frame.elapsed_count(), 0);
        assert_eq!(frame.marks.first().map(|m| m.index), Some(1));
        assert_eq!(frame.marks.last().map(|m| m.index), Some(60));
    }

    #[test]
    fn test_finished_all_elapsed() {
        let frame = render(&TimerState::from_parts(0, 0, true).snapshot());
        assert_eq!(frame.elapsed_count(), 60);
        assert!(frame.marks.iter().all(|m| m.kind == MarkKind::Elapsed));
    }

    #[test]
    fn test_marks_sweep_from_index_one() {
        assert_eq!(mark_kind(1, 60), MarkKind::Remaining);
        assert_eq!(mark_kind(1, 59), MarkKind::Elapsed);
        assert_eq!(mark_kind(2, 59), MarkKind::Remaining);

        let frame = render(&TimerState::from_parts(30, 0, true).snapshot());
        assert_eq!(frame.elapsed_count(), 30);
        assert!(frame.marks[..30].iter().all(|m| m.kind == MarkKind::Elapsed));
        assert!(frame.marks[30..].iter().all(|m| m.kind == MarkKind::Remaining));
    }

    #[test]
    fn test_mark_geometry() {
        let frame = render(&TimerState::new().snapshot());
        for mark in &frame.marks {
            assert_eq!(mark.rotation, -6.0 * mark.index as f32);
            assert_eq!(mark.inner, MARK_INNER);
            assert_eq!(mark.outer, MARK_OUTER);
        }
        assert_eq!(frame.ring.radius, RING_RADIUS);
    }

    #[test]
    fn test_label_format() {
        assert_eq!(format_label(60, 0), "60 : 0");
        assert_eq!(format_label(12, 345), "12 : 345");
        let frame = render(&TimerState::from_parts(7, 42, false).snapshot());
        assert_eq!(frame.label, "7 : 42");
    }

    #[test]
    fn test_render_is_pure() {
        let snapshot = TimerState::from_parts(15, 250, true).snapshot();
        assert_eq!(render(&snapshot), render(&snapshot));
    }

    #[test]
    fn test_mark_glyphs() {
        assert_eq!(mark_glyph(-360.0), '┃');
        assert_eq!(mark_glyph(-180.0), '┃');
        assert_eq!(mark_glyph(-90.0), '━');
        assert_eq!(mark_glyph(-270.0), '━');
        assert_eq!(mark_glyph(-48.0), '╲');
        assert_eq!(mark_glyph(-132.0), '╱');
    }

    #[test]
    fn test_view_dimensions() {
        let dial = Dial::new().with_radius(12);
        let view = plain(&dial.view(&render(&TimerState::new().snapshot())));
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 25);
        for line in &lines {
            assert_eq!(line.chars().count(), 49);
        }
    }

    #[test]
    fn test_view_places_label_and_top_mark() {
        let dial = Dial::new().with_radius(12);
        let view = plain(&dial.view(&render(&TimerState::new().snapshot())));
        let lines: Vec<Vec<char>> = view.lines().map(|l| l.chars().collect()).collect();

        assert!(lines[12].iter().collect::<String>().contains("60 : 0"));
        assert_eq!(lines[0][24], '·');
        assert_eq!(lines[3][24], '┃');
    }

    #[test]
    fn test_radius_ceiling() {
        let dial = Dial::new().with_radius(usize::MAX);
        assert_eq!(dial.radius, MAX_RADIUS);
        assert_eq!(dial.width(), MAX_RADIUS * 4 + 1);
        assert_eq!(dial.height(), MAX_RADIUS * 2 + 1);
    }

    #[test]
    fn test_radius_floor() {
        let dial = Dial::new().with_radius(1);
        assert_eq!(dial.radius, MIN_RADIUS);
        let view = plain(&dial.view(&render(&TimerState::from_parts(59, 999, true).snapshot())));
        assert!(view.contains("59 : 999"));
    }
}
