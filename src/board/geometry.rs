//! Hexagon grid geometry: cell centers, canvas sizing and pixel <-> cell mapping.
//!
//! Cells are pointy-top hexagons packed into a rhombus: every row is shifted
//! half a cell to the right of the row above it. The shift is not a parity
//! branch; it falls out of adding `y * √3 / 3` to each center's x.

use std::f64::consts::PI;

use crate::engine::BoardState;
use crate::error::GeometryError;

/// Fraction of the radius within which a click still counts as a hit.
pub const HIT_TOLERANCE: f64 = 0.8;

fn sqrt3() -> f64 {
    3f64.sqrt()
}

/// A pixel position on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Logical cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    /// Integer pair used where "no cell" has to travel as a value.
    pub const SENTINEL: (i32, i32) = (-1, -1);

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// `(row, col)` for a hit, [`CellRef::SENTINEL`] for a miss.
    pub fn to_wire(cell: Option<CellRef>) -> (i32, i32) {
        cell.map_or(Self::SENTINEL, |c| (c.row as i32, c.col as i32))
    }
}

/// Board dimensions and hexagon size. Valid by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    rows: usize,
    cols: usize,
    radius: f64,
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize, radius: f64) -> Result<Self, GeometryError> {
        if rows == 0 || cols == 0 {
            return Err(GeometryError::EmptyGrid { rows, cols });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { rows, cols, radius })
    }

    /// Spec matching the dimensions of a board snapshot.
    pub fn from_board(board: &BoardState, radius: f64) -> Result<Self, GeometryError> {
        Self::new(board.rows(), board.cols(), radius)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Distance from a center to the midpoint of an edge.
    pub fn apothem(&self) -> f64 {
        self.radius * sqrt3() / 2.0
    }

    /// Horizontal distance between neighbours in the same row.
    pub fn column_step(&self) -> f64 {
        self.radius * sqrt3()
    }

    /// Vertical distance between consecutive rows.
    pub fn row_step(&self) -> f64 {
        self.radius * 1.5
    }
}

/// Canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasExtent {
    pub width: f64,
    pub height: f64,
}

impl CanvasExtent {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// Row-major table of cell centers.
#[derive(Clone, Debug, PartialEq)]
pub struct CellCenters {
    rows: usize,
    cols: usize,
    centers: Vec<Point>,
}

impl CellCenters {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn get(&self, cell: CellRef) -> Option<Point> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        self.centers.get(cell.row * self.cols + cell.col).copied()
    }

    /// Centers with their cell, in row-major scan order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, Point)> + '_ {
        let cols = self.cols;
        self.centers
            .iter()
            .enumerate()
            .map(move |(idx, p)| (CellRef::new(idx / cols, idx % cols), *p))
    }
}

/// Pixel center of every cell.
pub fn compute_cell_centers(spec: &GridSpec) -> CellCenters {
    let r = spec.radius();
    let skew = sqrt3() / 3.0;
    let mut centers = Vec::with_capacity(spec.cell_count());
    for row in 0..spec.rows() {
        let y = r + row as f64 * spec.row_step();
        for col in 0..spec.cols() {
            let x = r + col as f64 * spec.column_step() + y * skew;
            centers.push(Point::new(x, y));
        }
    }
    CellCenters {
        rows: spec.rows(),
        cols: spec.cols(),
        centers,
    }
}

/// Canvas size that holds every hexagon of the grid, boundary strokes included.
pub fn compute_canvas_extent(spec: &GridSpec) -> CanvasExtent {
    let r = spec.radius();
    let apothem = spec.apothem();
    let loss_h = (r * r - apothem * apothem).sqrt();
    let rows = spec.rows() as f64;
    let cols = spec.cols() as f64;
    CanvasExtent {
        width: 2.0 * apothem * cols + r + apothem * (rows - 1.0),
        height: 2.0 * r * rows - (rows - 1.0) * (loss_h - 1.0),
    }
}

/// Cell under `point`, or `None` when the nearest center is not within
/// `radius * HIT_TOLERANCE`. Ties keep the first cell in row-major order.
pub fn resolve_cell(point: Point, centers: &CellCenters, radius: f64) -> Option<CellRef> {
    let mut best: Option<(CellRef, f64)> = None;
    for (cell, center) in centers.iter() {
        let d = point.distance(center);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((cell, d)),
        }
    }
    best.filter(|&(_, d)| d < radius * HIT_TOLERANCE)
        .map(|(cell, _)| cell)
}

/// The six outline vertices, vertex `k` at angle `π/3·k + π/6`.
///
/// With canvas y pointing down, vertex 1 is the bottom tip and vertex 4 the top.
pub fn hexagon_vertices(center: Point, radius: f64) -> [Point; 6] {
    let step = PI / 3.0;
    std::array::from_fn(|k| {
        let angle = step * k as f64 + step / 2.0;
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}

/// Adjacent cells of `cell` on the skewed grid, clipped to the board.
pub fn neighbors(cell: CellRef, spec: &GridSpec) -> Vec<CellRef> {
    const OFFSETS: [(isize, isize); 6] = [(-1, 0), (1, 0), (0, -1), (0, 1), (1, -1), (-1, 1)];
    OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            let next = CellRef::new(row, col);
            spec.contains(next).then_some(next)
        })
        .collect()
}

/// Geometry computed once per session.
#[derive(Clone, Debug, PartialEq)]
pub struct HexLayout {
    spec: GridSpec,
    centers: CellCenters,
    extent: CanvasExtent,
}

impl HexLayout {
    pub fn new(spec: GridSpec) -> Self {
        Self {
            centers: compute_cell_centers(&spec),
            extent: compute_canvas_extent(&spec),
            spec,
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn centers(&self) -> &CellCenters {
        &self.centers
    }

    pub fn extent(&self) -> CanvasExtent {
        self.extent
    }

    pub fn radius(&self) -> f64 {
        self.spec.radius()
    }

    pub fn center(&self, cell: CellRef) -> Option<Point> {
        self.centers.get(cell)
    }

    pub fn cell_at(&self, point: Point) -> Option<CellRef> {
        resolve_cell(point, &self.centers, self.spec.radius())
    }
}
