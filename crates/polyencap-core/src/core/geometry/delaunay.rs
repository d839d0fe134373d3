//! Incremental 3D Delaunay triangulation (Bowyer–Watson).
//!
//! The triangulation is closed with a symbolic vertex at infinity: every convex-hull
//! face is the base of an "infinite" cell whose apex is [`INFINITE`]. A point outside the
//! hull conflicts with an infinite cell when it sees the hull face from outside, or when
//! it is coplanar with the face and strictly inside its circumcircle. This keeps the set
//! of finite cells an exact tetrahedralization of the convex hull at every step, with no
//! bounding super-simplex to clean up afterwards.
//!
//! Points are inserted in input order after exact duplicates are dropped (first
//! occurrence wins). A point lying exactly on a circumsphere does not conflict with that
//! cell, so co-spherical configurations are resolved by insertion order. All sign tests
//! go through the exact predicates in [`super::predicates`].

use super::GeometryError;
use super::bounds::Aabb;
use super::predicates::{in_circumcircle, insphere, orient3d};
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Vertex id of the symbolic point at infinity.
pub(crate) const INFINITE: usize = usize::MAX;

const UNLINKED: usize = usize::MAX;

/// Relative tolerance used only to reject (near-)collinear and (near-)coplanar inputs.
const DEGENERACY_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Vertex ids, positively oriented for finite cells.
    vertices: [usize; 4],
    /// `neighbors[k]` shares the face opposite `vertices[k]`.
    neighbors: [usize; 4],
    alive: bool,
}

impl Cell {
    fn new(vertices: [usize; 4]) -> Self {
        Self {
            vertices,
            neighbors: [UNLINKED; 4],
            alive: true,
        }
    }

    fn infinite_slot(&self) -> Option<usize> {
        self.vertices.iter().position(|&v| v == INFINITE)
    }
}

fn face_key(vertices: &[usize; 4], opposite: usize) -> [usize; 3] {
    let mut key = [0; 3];
    let mut n = 0;
    for (slot, &v) in vertices.iter().enumerate() {
        if slot != opposite {
            key[n] = v;
            n += 1;
        }
    }
    key.sort_unstable();
    key
}

#[derive(Debug)]
pub(crate) struct Delaunay3<'a> {
    points: &'a [Point3<f64>],
    cells: Vec<Cell>,
    free: Vec<usize>,
    hint: usize,
    vertex_count: usize,
}

impl<'a> Delaunay3<'a> {
    /// Triangulates `points`. Vertex ids in the result are indices into `points`.
    pub fn new(points: &'a [Point3<f64>]) -> Result<Self, GeometryError> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(GeometryError::DegenerateGeometry(format!(
                "point {} has a non-finite coordinate",
                index
            )));
        }

        let unique = unique_indices(points);
        if unique.len() < 4 {
            return Err(GeometryError::DegenerateGeometry(format!(
                "at least 4 distinct points are required, got {}",
                unique.len()
            )));
        }

        let initial = initial_simplex(points, &unique)?;
        let mut triangulation = Self {
            points,
            cells: Vec::with_capacity(unique.len() * 8),
            free: Vec::new(),
            hint: 0,
            vertex_count: 4,
        };
        triangulation.seed(initial)?;

        for &index in &unique {
            if initial.contains(&index) {
                continue;
            }
            if triangulation.insert(index)? {
                triangulation.vertex_count += 1;
            }
        }

        debug!(
            "Delaunay triangulation: {} vertices, {} finite cells ({} duplicate points dropped).",
            triangulation.vertex_count,
            triangulation.finite_cells().count(),
            points.len() - unique.len()
        );
        Ok(triangulation)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn point(&self, id: usize) -> &Point3<f64> {
        &self.points[id]
    }

    /// Finite tetrahedra as positively oriented vertex-id quadruples.
    pub fn finite_cells(&self) -> impl Iterator<Item = [usize; 4]> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.alive && cell.infinite_slot().is_none())
            .map(|cell| cell.vertices)
    }

    fn seed(&mut self, initial: [usize; 4]) -> Result<(), GeometryError> {
        self.cells.push(Cell::new(initial));
        for k in 0..4 {
            let mut vertices = initial;
            vertices[k] = INFINITE;
            // The apex sits on the far side of the face, so flip the finite triple.
            let others: Vec<usize> = (0..4).filter(|&slot| slot != k).collect();
            vertices.swap(others[0], others[1]);
            self.cells.push(Cell::new(vertices));
        }

        let mut open_faces: HashMap<[usize; 3], (usize, usize)> = HashMap::new();
        for id in 0..self.cells.len() {
            for slot in 0..4 {
                self.link_face(id, slot, &mut open_faces);
            }
        }
        if !open_faces.is_empty() {
            return Err(GeometryError::DegenerateGeometry(
                "initial simplex could not be closed".into(),
            ));
        }
        self.hint = 0;
        Ok(())
    }

    fn link_face(
        &mut self,
        id: usize,
        slot: usize,
        open_faces: &mut HashMap<[usize; 3], (usize, usize)>,
    ) {
        let key = face_key(&self.cells[id].vertices, slot);
        match open_faces.remove(&key) {
            Some((other, other_slot)) => {
                self.cells[id].neighbors[slot] = other;
                self.cells[other].neighbors[other_slot] = id;
            }
            None => {
                open_faces.insert(key, (id, slot));
            }
        }
    }

    /// Orientation of `cell` with the vertex in `slot` replaced by `p`.
    fn orient_with(&self, cell: &Cell, slot: usize, p: &Point3<f64>) -> f64 {
        let corner = |k: usize| {
            if k == slot {
                p
            } else {
                &self.points[cell.vertices[k]]
            }
        };
        orient3d(corner(0), corner(1), corner(2), corner(3))
    }

    fn in_conflict(&self, cell: &Cell, p: &Point3<f64>) -> bool {
        match cell.infinite_slot() {
            Some(slot) => {
                let side = self.orient_with(cell, slot, p);
                if side != 0.0 {
                    return side > 0.0;
                }
                let face: Vec<&Point3<f64>> = cell
                    .vertices
                    .iter()
                    .filter(|&&v| v != INFINITE)
                    .map(|&v| &self.points[v])
                    .collect();
                in_circumcircle(face[0], face[1], face[2], p)
            }
            None => {
                let [a, b, c, d] = cell.vertices.map(|v| &self.points[v]);
                insphere(a, b, c, d, p) > 0.0
            }
        }
    }

    /// Visibility walk from the last created cell towards `p`.
    fn locate(&self, p: &Point3<f64>) -> Option<usize> {
        let mut current = self.hint;
        for step in 0..self.cells.len() + 4 {
            let cell = &self.cells[current];
            if !cell.alive {
                return None;
            }
            if let Some(slot) = cell.infinite_slot() {
                if self.in_conflict(cell, p) {
                    return Some(current);
                }
                current = cell.neighbors[slot];
                continue;
            }
            let exit = (0..4)
                .map(|t| (t + step) % 4)
                .find(|&slot| self.orient_with(cell, slot, p) < 0.0);
            match exit {
                Some(slot) => current = cell.neighbors[slot],
                None => return Some(current),
            }
        }
        None
    }

    /// Inserts input point `index`; returns `false` when the point conflicts with no
    /// cell, which only happens for a point already present in the triangulation.
    fn insert(&mut self, index: usize) -> Result<bool, GeometryError> {
        let points = self.points;
        let p = &points[index];

        let located = self
            .locate(p)
            .filter(|&id| self.in_conflict(&self.cells[id], p));
        let seed = match located {
            Some(id) => id,
            None => match self
                .cells
                .iter()
                .position(|cell| cell.alive && self.in_conflict(cell, p))
            {
                Some(id) => id,
                None => {
                    trace!("Point {} conflicts with no cell; skipped.", index);
                    return Ok(false);
                }
            },
        };

        let cavity = self.carve_cavity(seed, index);
        self.fill_cavity(&cavity, index)?;
        Ok(true)
    }

    /// Collects the connected set of cells in conflict with the point. With exact
    /// predicates every boundary face of this set is strictly visible from the point.
    fn carve_cavity(&self, seed: usize, index: usize) -> Vec<usize> {
        let points = self.points;
        let p = &points[index];
        let mut members: HashSet<usize> = HashSet::from([seed]);
        let mut cavity = vec![seed];
        let mut stack = vec![seed];

        while let Some(id) = stack.pop() {
            for &neighbor in &self.cells[id].neighbors {
                if !members.contains(&neighbor) && self.in_conflict(&self.cells[neighbor], p) {
                    members.insert(neighbor);
                    cavity.push(neighbor);
                    stack.push(neighbor);
                }
            }
        }

        cavity
    }

    fn fill_cavity(&mut self, cavity: &[usize], index: usize) -> Result<(), GeometryError> {
        let members: HashSet<usize> = cavity.iter().copied().collect();
        let mut open_faces: HashMap<[usize; 3], (usize, usize)> = HashMap::new();
        let mut created = Vec::new();

        for &old in cavity {
            let cell = self.cells[old];
            for slot in 0..4 {
                let outside = cell.neighbors[slot];
                if members.contains(&outside) {
                    continue;
                }
                let mut vertices = cell.vertices;
                vertices[slot] = index;
                let id = self.allocate(Cell::new(vertices));

                self.cells[id].neighbors[slot] = outside;
                let back = self.cells[outside]
                    .neighbors
                    .iter()
                    .position(|&n| n == old)
                    .ok_or_else(|| {
                        GeometryError::DegenerateGeometry(format!(
                            "triangulation adjacency broken while inserting point {}",
                            index
                        ))
                    })?;
                self.cells[outside].neighbors[back] = id;

                for inner in (0..4).filter(|&k| k != slot) {
                    self.link_face(id, inner, &mut open_faces);
                }
                created.push(id);
            }
        }

        if !open_faces.is_empty() {
            return Err(GeometryError::DegenerateGeometry(format!(
                "cavity of point {} could not be closed ({} open faces)",
                index,
                open_faces.len()
            )));
        }

        for &old in cavity {
            self.cells[old].alive = false;
            self.free.push(old);
        }
        self.hint = created
            .iter()
            .copied()
            .find(|&id| self.cells[id].infinite_slot().is_none())
            .or_else(|| created.first().copied())
            .unwrap_or(self.hint);
        Ok(())
    }

    fn allocate(&mut self, cell: Cell) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.cells[id] = cell;
                id
            }
            None => {
                self.cells.push(cell);
                self.cells.len() - 1
            }
        }
    }
}

/// Input indices with exact duplicates removed, in input order.
fn unique_indices(points: &[Point3<f64>]) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(points.len());
    (0..points.len())
        .filter(|&i| {
            let p = &points[i];
            // `+ 0.0` folds negative zero into positive zero.
            seen.insert([
                (p.x + 0.0).to_bits(),
                (p.y + 0.0).to_bits(),
                (p.z + 0.0).to_bits(),
            ])
        })
        .collect()
}

/// Lowest-index quadruple spanning a non-degenerate tetrahedron, positively oriented.
fn initial_simplex(points: &[Point3<f64>], unique: &[usize]) -> Result<[usize; 4], GeometryError> {
    let scale = Aabb::from_points(unique.iter().map(|&i| &points[i]))
        .map(|aabb| aabb.diagonal())
        .unwrap_or(0.0);
    if scale == 0.0 {
        return Err(GeometryError::DegenerateGeometry(
            "all points are coincident".into(),
        ));
    }

    let i0 = unique[0];
    let i1 = unique[1];
    let p0 = &points[i0];
    let axis = points[i1] - p0;

    let i2 = unique[2..]
        .iter()
        .copied()
        .find(|&k| axis.cross(&(points[k] - p0)).norm() > DEGENERACY_TOLERANCE * scale * scale)
        .ok_or_else(|| GeometryError::DegenerateGeometry("all points are collinear".into()))?;

    let i3 = unique[2..]
        .iter()
        .copied()
        .find(|&k| {
            orient3d(p0, &points[i1], &points[i2], &points[k]).abs()
                > DEGENERACY_TOLERANCE * scale * scale * scale
        })
        .ok_or_else(|| GeometryError::DegenerateGeometry("all points are coplanar".into()))?;

    if orient3d(p0, &points[i1], &points[i2], &points[i3]) > 0.0 {
        Ok([i0, i1, i2, i3])
    } else {
        Ok([i0, i1, i3, i2])
    }
}
