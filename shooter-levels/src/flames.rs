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

//! Flame faces are drawn as camera-independent quads, rebuilt from the
//! face's first four vertices.

use log::debug;
use na::Vector3;

use crate::coords::CoordSystem;
use crate::q3::Q3BspFile;
use crate::resolver::{TextureClass, TextureClasses};
use crate::traits::faces::{Face, HasFaces};
use crate::traits::vertices::Vertex;

/// Index order for a regenerated quad.
const QUAD_INDICES: [u32; 6] = [0, 2, 1, 0, 1, 3];

/// Corner offsets (in half width, half height) and surface UVs of the quad.
const QUAD_CORNERS: [([f32; 2], [f32; 2]); 4] = [
    ([-1.0, 1.0], [1.0, 0.0]),
    ([1.0, -1.0], [0.0, 1.0]),
    ([-1.0, -1.0], [1.0, 1.0]),
    ([1.0, 1.0], [0.0, 0.0]),
];

/// Rewrite the first four vertices of every face with a flame texture into an
/// upright quad centred on it. Returns how many faces were rebuilt.
pub fn regenerate_flames<T: CoordSystem>(
    file: &mut Q3BspFile<T>,
    classes: &TextureClasses,
) -> usize {
    let mut rebuilt = 0;

    for face_idx in 0..file.faces.len() {
        let face = &file.faces[face_idx];
        if face.texture_idx.map(|t| classes.get(t)) != Some(TextureClass::Flame) {
            continue;
        }

        if face.meshverts_idx.len() < 4 || face.vertices_idx.len() < 4 {
            debug!("Flame face {} has fewer than 4 vertices, skipping", face_idx);
            continue;
        }

        let corners = flame_corners(&file.vertices, &file.meshverts, face);
        let quad = build_quad(&corners);
        let vertex_start = face.vertices_idx.start;

        for (i, new) in quad.iter().enumerate() {
            let vertex = &mut file.vertices[vertex_start as usize + i];
            vertex.position = new.position;
            vertex.tex.surface = new.tex.surface;
        }

        let meshvert_start = file.meshverts.len() as u32;
        file.meshverts.extend_from_slice(&QUAD_INDICES);

        let face = &mut file.faces[face_idx];
        face.vertices_idx = vertex_start..vertex_start + 4;
        face.meshverts_idx = meshvert_start..meshvert_start + QUAD_INDICES.len() as u32;

        rebuilt += 1;
    }

    if rebuilt > 0 {
        debug!("Rebuilt {} flame quads", rebuilt);
    }

    rebuilt
}

fn flame_corners(vertices: &[Vertex], meshverts: &[u32], face: &Face) -> [Vertex; 4] {
    let at = |i: u32| {
        let mv = meshverts[(face.meshverts_idx.start + i) as usize];
        vertices[(face.vertices_idx.start + mv) as usize]
    };

    [at(0), at(1), at(2), at(3)]
}

fn build_quad(p: &[Vertex; 4]) -> [Vertex; 4] {
    let origin = p[0].position + (p[1].position - p[0].position) * 0.5;
    let mut half_height = (p[2].position - p[1].position).norm() / 2.0;
    let mut half_width = (p[2].position - p[0].position).norm() / 2.0;

    if half_width > half_height {
        std::mem::swap(&mut half_width, &mut half_height);
    }

    let mut quad = *p;
    for (vertex, (offset, uv)) in quad.iter_mut().zip(QUAD_CORNERS.iter()) {
        vertex.position =
            origin + Vector3::new(offset[0] * half_width, offset[1] * half_height, 0.0);
        vertex.tex.surface = *uv;
    }

    quad
}

/// Where a flame's light sits: halfway between its second and third vertices.
pub fn flame_origin<S: CoordSystem, T: HasFaces<S>>(file: &T, face_idx: u32) -> Option<Vector3<f32>> {
    let face = file.get_face(face_idx);
    if face.vertices_idx.len() < 3 {
        return None;
    }

    let a = file.get_vertex(face.vertices_idx.start + 1).position;
    let b = file.get_vertex(face.vertices_idx.start + 2).position;

    Some(a + (b - a) * 0.5)
}
