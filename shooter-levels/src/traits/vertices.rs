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

use crate::coords::CoordSystem;
use crate::types::Rgba;
use na::Vector3;

/// A vertex, used to describe a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub tex: TexCoord,
    pub normal: Vector3<f32>,
    pub color: Rgba,
}

impl Vertex {
    /// Blend every attribute towards `other`. Used when evaluating curves.
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: self.position.lerp(&other.position, t),
            tex: self.tex.lerp(&other.tex, t),
            normal: self.normal.lerp(&other.normal, t),
            color: self.color.lerp(&other.color, t),
        }
    }
}

/// Surface and light map texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord {
    pub surface: [f32; 2],
    pub lightmap: [f32; 2],
}

impl TexCoord {
    pub fn lerp(&self, other: &TexCoord, t: f32) -> TexCoord {
        let mix = |a: [f32; 2], b: [f32; 2]| {
            [
                a[0] * (1.0 - t) + b[0] * t,
                a[1] * (1.0 - t) + b[1] * t,
            ]
        };

        TexCoord {
            surface: mix(self.surface, other.surface),
            lightmap: mix(self.lightmap, other.lightmap),
        }
    }
}

/// A vertex offset, relative to the first vertex of the face using it.
pub type MeshVert = u32;

pub trait HasVertices<S: CoordSystem> {
    type VerticesIter<'a>: Iterator<Item = &'a Vertex>
    where
        Self: 'a;

    fn vertices_iter(&self) -> Self::VerticesIter<'_>;
    fn vertices_len(&self) -> u32;
    fn get_vertex(&self, index: u32) -> &Vertex;
}

pub trait HasMeshVerts<S: CoordSystem>: HasVertices<S> {
    type MeshVertsIter<'a>: Iterator<Item = &'a MeshVert>
    where
        Self: 'a;

    fn meshverts_iter(&self) -> Self::MeshVertsIter<'_>;
    fn meshverts_len(&self) -> u32;
    fn get_meshvert(&self, index: u32) -> MeshVert;

    /// Look up the vertex a mesh vert points at, given the face's first vertex.
    fn resolve_meshvert(&self, index: u32, base: u32) -> &Vertex {
        self.get_vertex(self.get_meshvert(index) + base)
    }
}
