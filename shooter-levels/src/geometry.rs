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

//! Flat geometry for collision meshes and debug views

use na::Vector3;

use crate::coords::CoordSystem;
use crate::traits::faces::FaceType;
use crate::traits::MinBspFeatures;

/// Every vertex in the level, plus triangle indices for the solid faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGeometry {
    /// `x, y, z` for each vertex.
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,

    /// Absolute vertex indices, three per triangle.
    pub indices: Vec<u32>,

    pub bounds_min: Vector3<f32>,
    pub bounds_max: Vector3<f32>,
}

/// Collect the level's solid geometry. Billboards and faces with non-solid
/// textures are skipped. Bounds are those of the root of the tree.
pub fn solid_geometry<S: CoordSystem, T: MinBspFeatures<S>>(file: &T) -> RawGeometry {
    let n_verts = file.vertices_len() as usize;
    let mut positions = Vec::with_capacity(n_verts * 3);
    let mut normals = Vec::with_capacity(n_verts * 3);
    for vertex in file.vertices_iter() {
        positions.extend_from_slice(vertex.position.as_slice());
        normals.extend_from_slice(vertex.normal.as_slice());
    }

    let mut indices = Vec::new();
    for face in file.faces_iter() {
        let solid = face
            .texture_idx
            .map_or(false, |t| file.get_texture(t).is_solid());
        if face.face_type == FaceType::Billboard || !solid {
            continue;
        }

        indices.extend(
            face.meshverts_idx
                .clone()
                .map(|i| face.vertices_idx.start + file.get_meshvert(i)),
        );
    }

    let (bounds_min, bounds_max) = if file.nodes_len() > 0 {
        let root = file.get_node(0);
        (root.min, root.max)
    } else if file.leaves_len() > 0 {
        let leaf = file.get_leaf(0);
        (leaf.min, leaf.max)
    } else {
        (Vector3::zeros(), Vector3::zeros())
    };

    RawGeometry {
        positions,
        normals,
        indices,
        bounds_min,
        bounds_max,
    }
}
