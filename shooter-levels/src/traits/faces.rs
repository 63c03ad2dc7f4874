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

use na::{Vector2, Vector3};
use std::convert::TryFrom;
use std::ops::Range;

use super::{HasEffects, HasLightMaps, HasMeshVerts, HasTextures};
use crate::coords::CoordSystem;
use crate::types::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FaceType {
    Polygon = 1,
    Patch = 2,
    Mesh = 3,
    Billboard = 4,
}

impl TryFrom<i32> for FaceType {
    type Error = ParseError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FaceType::Polygon),
            2 => Ok(FaceType::Patch),
            3 => Ok(FaceType::Mesh),
            4 => Ok(FaceType::Billboard),
            _ => Err(ParseError::Invalid("unknown face type")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub face_type: FaceType,
    /// `None` for faces the level compiler left untextured.
    pub texture_idx: Option<u32>,
    pub effect_idx: Option<u32>,
    pub lightmap_idx: Option<u32>,

    /// Vertices used by this face. Mesh verts are relative to `vertices_idx.start`.
    pub vertices_idx: Range<u32>,
    pub meshverts_idx: Range<u32>,

    pub map_start: Vector2<i32>,
    pub map_size: Vector2<i32>,
    pub map_origin: Vector3<f32>,
    pub map_vecs: [Vector3<f32>; 2],

    pub normal: Vector3<f32>,

    /// Control point grid size, for patches.
    pub size: Vector2<i32>,
}

impl Face {
    /// Key grouping faces that share a texture and light map, so sorting by it
    /// minimises texture rebinds.
    pub fn sort_key(&self) -> u32 {
        let tex = self.texture_idx.map(|t| t + 1).unwrap_or(0);
        let lightmap = self.lightmap_idx.map(|l| l + 1).unwrap_or(0);

        tex | (lightmap << 16)
    }
}

pub trait HasFaces<S: CoordSystem>:
    HasTextures + HasEffects<S> + HasLightMaps + HasMeshVerts<S>
{
    type FacesIter<'a>: Iterator<Item = &'a Face>
    where
        Self: 'a;

    fn faces_iter(&self) -> Self::FacesIter<'_>;
    fn faces_len(&self) -> u32;
    fn get_face(&self, index: u32) -> &Face;
}
