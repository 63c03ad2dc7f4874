/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Turning curved surfaces into triangles

use log::debug;
use na::Vector3;

use super::Q3BspFile;
use crate::config::MAX_PATCH_DENSITY;
use crate::coords::CoordSystem;
use crate::traits::faces::FaceType;
use crate::traits::vertices::{MeshVert, Vertex};

const PARALLEL_EPSILON: f32 = 1e-5;

/// One 3x3 block of control points. `grid[row][col]`, columns run along x.
pub type ControlGrid = [[Vertex; 3]; 3];

impl<T: CoordSystem> Q3BspFile<T> {
    /// Replace every patch face with a triangle mesh, sampling each 3x3 block
    /// `density` times per side. New vertices and indices are appended and the
    /// face is pointed at them.
    pub fn tessellate_patches(&mut self, density: u32) {
        let density = density.clamp(2, MAX_PATCH_DENSITY) as usize;
        let mut n_patches = 0;

        for face in self.faces.iter_mut() {
            if face.face_type != FaceType::Patch {
                continue;
            }

            let first_vertex = self.vertices.len();
            let first_index = self.meshverts.len();
            let stride = face.size.x as usize;

            for (i, j) in sub_patches(face.size.x, face.size.y) {
                let base = face.vertices_idx.start as usize + 2 * (i + j * stride);
                let grid = control_grid(&self.vertices, base, stride);

                tessellate(
                    &grid,
                    density,
                    first_vertex,
                    &mut self.vertices,
                    &mut self.meshverts,
                );
                n_patches += 1;
            }

            face.vertices_idx = first_vertex as u32..self.vertices.len() as u32;
            face.meshverts_idx = first_index as u32..self.meshverts.len() as u32;
        }

        debug!("Tessellated {} patches at density {}", n_patches, density);
    }

    /// Give every patch face a list of control point indices instead, nine per
    /// 3x3 block, for tessellating elsewhere.
    pub fn index_patches(&mut self) {
        for face in self.faces.iter_mut() {
            if face.face_type != FaceType::Patch {
                continue;
            }

            let first_index = self.meshverts.len();
            let stride = face.size.x as usize;

            for (i, j) in sub_patches(face.size.x, face.size.y) {
                let base = 2 * (i + j * stride);
                for row in 0..3 {
                    for col in 0..3 {
                        self.meshverts.push((base + col + row * stride) as MeshVert);
                    }
                }
            }

            face.meshverts_idx = first_index as u32..self.meshverts.len() as u32;
        }
    }
}

/// `(i, j)` of every 3x3 block in a patch with the given control point grid size.
fn sub_patches(width: i32, height: i32) -> impl Iterator<Item = (usize, usize)> {
    let i_size = ((width - 1) / 2).max(0) as usize;
    let j_size = ((height - 1) / 2).max(0) as usize;

    (0..i_size).flat_map(move |i| (0..j_size).map(move |j| (i, j)))
}

fn control_grid(vertices: &[Vertex], base: usize, stride: usize) -> ControlGrid {
    let at = |row: usize, col: usize| vertices[base + col + row * stride];

    [
        [at(0, 0), at(0, 1), at(0, 2)],
        [at(1, 0), at(1, 1), at(1, 2)],
        [at(2, 0), at(2, 1), at(2, 2)],
    ]
}

/// Whether two vectors point along the same line.
fn parallel(v1: &Vector3<f32>, v2: &Vector3<f32>) -> bool {
    let ratio = match (0..3).find(|&k| v2[k].abs() >= PARALLEL_EPSILON) {
        Some(k) => v1[k] / v2[k],
        None => return false,
    };

    (0..3).all(|k| (v2[k] * ratio - v1[k]).abs() < PARALLEL_EPSILON)
}

fn edge(a: &Vertex, b: &Vertex) -> Vector3<f32> {
    b.position - a.position
}

/// Every row is a straight line, and the rows run alongside each other.
fn collinear_x(grid: &ControlGrid) -> bool {
    grid.iter()
        .all(|row| parallel(&edge(&row[0], &row[1]), &edge(&row[1], &row[2])))
        && (0..2).all(|r| {
            parallel(
                &edge(&grid[r][0], &grid[r][1]),
                &edge(&grid[r + 1][0], &grid[r + 1][1]),
            )
        })
}

/// Same as [`collinear_x`], for columns.
fn collinear_y(grid: &ControlGrid) -> bool {
    (0..3).all(|c| parallel(&edge(&grid[0][c], &grid[1][c]), &edge(&grid[1][c], &grid[2][c])))
        && (0..2).all(|c| {
            parallel(
                &edge(&grid[0][c], &grid[1][c]),
                &edge(&grid[0][c + 1], &grid[1][c + 1]),
            )
        })
}

fn bezier(a: &Vertex, b: &Vertex, c: &Vertex, t: f32) -> Vertex {
    let d = a.lerp(b, t);
    let e = b.lerp(c, t);

    d.lerp(&e, t)
}

/// Evaluate one 3x3 block, appending the sampled vertices and the triangles
/// between them. Indices are relative to `face_base`.
pub fn tessellate(
    grid: &ControlGrid,
    density: usize,
    face_base: usize,
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<MeshVert>,
) {
    let nx = if collinear_x(grid) { 2 } else { density };
    let ny = if collinear_y(grid) { 2 } else { density };
    let step_x = 1.0 / (nx - 1) as f32;
    let step_y = 1.0 / (ny - 1) as f32;

    let rel_base = vertices.len() - face_base;

    // Each column's curve through the three rows only depends on x.
    let mut filled: u64 = 0;
    let mut columns = vec![grid[0][0]; nx * 3];

    vertices.reserve(nx * ny);
    for iy in 0..ny {
        for ix in 0..nx {
            let column = &mut columns[ix * 3..ix * 3 + 3];
            if filled & (1 << ix) == 0 {
                filled |= 1 << ix;
                for (r, row) in grid.iter().enumerate() {
                    column[r] = bezier(&row[0], &row[1], &row[2], ix as f32 * step_x);
                }
            }

            vertices.push(bezier(&column[0], &column[1], &column[2], iy as f32 * step_y));
        }
    }

    indices.reserve((nx - 1) * (ny - 1) * 6);
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let ix0 = (rel_base + i + j * nx) as MeshVert;
            let ix1 = ix0 + 1;
            let ix2 = ix0 + nx as MeshVert;
            let ix3 = ix2 + 1;

            indices.extend_from_slice(&[ix0, ix3, ix1, ix0, ix2, ix3]);
        }
    }
}
