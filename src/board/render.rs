//! Board rendering: cell outlines, labels, boundary highlights and pieces.
//!
//! Every call redraws from its inputs; the renderer keeps no per-frame state,
//! so drawing the same snapshot twice produces the same picture.

use crate::config::Palette;
use crate::engine::{BoardState, Player};

use super::geometry::{hexagon_vertices, CellRef, GridSpec, HexLayout, Point};
use super::surface::{DrawSurface, Stroke};

/// Piece radius as a fraction of the hexagon radius.
pub const MARKER_SCALE: f64 = 0.4;
/// Label offset from a cell center, as a fraction of the radius.
const LABEL_OFFSET: f64 = 0.6;

/// The four sides of the board, in highlight traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// Which of the two highlight colors a side uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideColor {
    Primary,
    Secondary,
}

impl BoardSide {
    pub const ALL: [BoardSide; 4] = [
        BoardSide::Top,
        BoardSide::Right,
        BoardSide::Bottom,
        BoardSide::Left,
    ];

    /// Three consecutive outline vertices whose two edges face outward.
    pub fn vertex_run(self) -> &'static [usize; 3] {
        match self {
            BoardSide::Top => &[3, 4, 5],
            BoardSide::Right => &[4, 5, 0],
            BoardSide::Bottom => &[0, 1, 2],
            BoardSide::Left => &[1, 2, 3],
        }
    }

    pub fn color(self) -> SideColor {
        match self {
            BoardSide::Top | BoardSide::Bottom => SideColor::Primary,
            BoardSide::Right | BoardSide::Left => SideColor::Secondary,
        }
    }

    /// Cells along this side in traversal order (clockwise around the board).
    pub fn cells(self, spec: &GridSpec) -> Vec<CellRef> {
        let last_row = spec.rows() - 1;
        let last_col = spec.cols() - 1;
        match self {
            BoardSide::Top => (0..spec.cols()).map(|c| CellRef::new(0, c)).collect(),
            BoardSide::Right => (0..spec.rows()).map(|r| CellRef::new(r, last_col)).collect(),
            BoardSide::Bottom => (0..spec.cols())
                .rev()
                .map(|c| CellRef::new(last_row, c))
                .collect(),
            BoardSide::Left => (0..spec.rows())
                .rev()
                .map(|r| CellRef::new(r, 0))
                .collect(),
        }
    }

    /// Whether `cell` is the corner this side shares with a side whose run
    /// already covers its first edge.
    fn truncated_at(self, cell: CellRef, spec: &GridSpec) -> bool {
        match self {
            BoardSide::Right => cell.row == 0,
            BoardSide::Left => cell.row == spec.rows() - 1,
            BoardSide::Top | BoardSide::Bottom => false,
        }
    }
}

/// Outward-facing outline run of one boundary cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryEdge {
    pub side: BoardSide,
    pub cell: CellRef,
    /// Vertex indices into [`hexagon_vertices`], stroked as one polyline.
    pub vertices: &'static [usize],
}

/// Highlight runs for all four sides.
pub fn boundary_edges(spec: &GridSpec) -> Vec<BoundaryEdge> {
    let mut edges = Vec::with_capacity(2 * (spec.rows() + spec.cols()));
    for side in BoardSide::ALL {
        let run = side.vertex_run();
        for cell in side.cells(spec) {
            let vertices: &'static [usize] = if side.truncated_at(cell, spec) {
                &run[1..]
            } else {
                &run[..]
            };
            edges.push(BoundaryEdge {
                side,
                cell,
                vertices,
            });
        }
    }
    edges
}

/// Column label: `A`, `B`, `C`, ... by ASCII offset. Columns past `Z` have none.
pub fn column_label(col: usize) -> Option<char> {
    u8::try_from(col)
        .ok()
        .filter(|&c| c < 26)
        .map(|c| char::from(b'A' + c))
}

/// Stroke a closed hexagon outline around `center`.
pub fn draw_hexagon_outline<S: DrawSurface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    stroke: Stroke<'_>,
) {
    surface.stroke_path(&hexagon_vertices(center, radius), true, stroke);
}

/// Stateless renderer for one session's layout.
#[derive(Clone, Debug)]
pub struct BoardRenderer {
    layout: HexLayout,
    palette: Palette,
}

impl BoardRenderer {
    pub fn new(layout: HexLayout, palette: Palette) -> Self {
        Self { layout, palette }
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn outline(&self) -> Stroke<'_> {
        Stroke::new(&self.palette.outline, self.palette.line_width)
    }

    fn side_stroke(&self, side: BoardSide) -> Stroke<'_> {
        let color = match side.color() {
            SideColor::Primary => &self.palette.primary_side,
            SideColor::Secondary => &self.palette.secondary_side,
        };
        Stroke::new(color, self.palette.line_width)
    }

    pub fn player_color(&self, player: Player) -> &str {
        match player {
            Player::One => &self.palette.player_one,
            Player::Two => &self.palette.player_two,
        }
    }

    /// Clear, outline every cell, label the first row and column, then
    /// highlight the four board sides.
    pub fn draw_board<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.layout.extent());
        let radius = self.layout.radius();
        for (_, center) in self.layout.centers().iter() {
            draw_hexagon_outline(surface, center, radius, self.outline());
        }
        self.draw_labels(surface);
        self.draw_boundary_edges(surface);
    }

    fn draw_labels<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let offset = self.layout.radius() * LABEL_OFFSET;
        let font = &self.palette.label_font;
        let color = &self.palette.label;
        for (cell, center) in self.layout.centers().iter() {
            if cell.col == 0 {
                let at = Point::new(center.x - offset, center.y);
                surface.fill_text(&(cell.row + 1).to_string(), at, font, color);
            }
            if cell.row == 0 {
                let at = Point::new(center.x, center.y - offset);
                if let Some(label) = column_label(cell.col) {
                    surface.fill_text(&label.to_string(), at, font, color);
                }
            }
        }
    }

    pub fn draw_boundary_edges<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let radius = self.layout.radius();
        for edge in boundary_edges(self.layout.spec()) {
            let Some(center) = self.layout.center(edge.cell) else {
                continue;
            };
            let outline = hexagon_vertices(center, radius);
            let points: Vec<Point> = edge.vertices.iter().map(|&k| outline[k]).collect();
            surface.stroke_path(&points, false, self.side_stroke(edge.side));
        }
    }

    /// Draw a piece on `cell`. Returns false when the cell is off the board.
    pub fn draw_occupancy_marker<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        cell: CellRef,
        color: &str,
    ) -> bool {
        let Some(center) = self.layout.center(cell) else {
            return false;
        };
        let radius = self.layout.radius() * MARKER_SCALE;
        surface.fill_circle(center, radius, color, Stroke::new(color, self.palette.line_width));
        true
    }

    /// Full frame for a board snapshot.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, board: &BoardState) {
        self.draw_board(surface);
        for (cell, player) in board.occupied() {
            if !self.draw_occupancy_marker(surface, cell, self.player_color(player)) {
                let spec = self.layout.spec();
                log::warn!(
                    "snapshot cell {cell:?} is outside the {}x{} grid",
                    spec.rows(),
                    spec.cols()
                );
            }
        }
    }
}
