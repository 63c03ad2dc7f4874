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

use super::Q3BspFile;
use crate::coords::CoordSystem;
use crate::helpers::{record_count, slice_to_f32, slice_to_i32, slice_to_vec3};
use crate::traits::vertices::*;
use crate::types::{ParseError, Result, Rgba};

const VERTEX_SIZE: usize = (4 * 3) + (2 * 2 * 4) + (4 * 3) + 4;

/// Parse the vertex lump. Positions are multiplied by `scale`.
pub fn verts_from_data(data: &[u8], scale: f32) -> Result<Vec<Vertex>> {
    let length = record_count(data, VERTEX_SIZE, "vertex lump size")?;

    let mut vertices = Vec::with_capacity(length);
    for vertex in data.chunks_exact(VERTEX_SIZE) {
        vertices.push(Vertex {
            position: slice_to_vec3(&vertex[0..12]) * scale,
            tex: TexCoord {
                surface: [slice_to_f32(&vertex[12..16]), slice_to_f32(&vertex[16..20])],
                lightmap: [slice_to_f32(&vertex[20..24]), slice_to_f32(&vertex[24..28])],
            },
            normal: slice_to_vec3(&vertex[28..40]),
            color: Rgba::from_slice(&vertex[40..44]),
        })
    }

    Ok(vertices)
}

pub fn meshverts_from_data(data: &[u8]) -> Result<Vec<MeshVert>> {
    let length = record_count(data, 4, "mesh vert lump size")?;

    let mut meshverts = Vec::with_capacity(length);
    for raw in data.chunks_exact(4) {
        let offset = slice_to_i32(raw);
        if offset < 0 {
            return Err(ParseError::Invalid("negative mesh vert"));
        }
        meshverts.push(offset as u32);
    }

    Ok(meshverts)
}

impl<T: CoordSystem> HasVertices<T> for Q3BspFile<T> {
    type VerticesIter<'a> = std::slice::Iter<'a, Vertex>
    where
        T: 'a;

    fn vertices_iter(&self) -> Self::VerticesIter<'_> {
        self.vertices.iter()
    }

    fn vertices_len(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn get_vertex(&self, index: u32) -> &Vertex {
        &self.vertices[index as usize]
    }
}

impl<T: CoordSystem> HasMeshVerts<T> for Q3BspFile<T> {
    type MeshVertsIter<'a> = std::slice::Iter<'a, MeshVert>
    where
        T: 'a;

    fn meshverts_iter(&self) -> Self::MeshVertsIter<'_> {
        self.meshverts.iter()
    }

    fn meshverts_len(&self) -> u32 {
        self.meshverts.len() as u32
    }

    fn get_meshvert(&self, index: u32) -> MeshVert {
        self.meshverts[index as usize]
    }
}
