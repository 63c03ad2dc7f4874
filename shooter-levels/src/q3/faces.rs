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

use na::Vector3;
use std::convert::TryFrom;

use super::Q3BspFile;
use crate::coords::CoordSystem;
use crate::helpers::{
    checked_index, checked_range, record_count, slice_to_i32, slice_to_vec2i, slice_to_vec3,
};
use crate::traits::faces::*;
use crate::traits::vertices::MeshVert;
use crate::types::{ParseError, Result};

const FACE_SIZE: usize = (4 * 8) + (4 * 2) + (4 * 2) + (4 * 3) + ((4 * 3) * 2) + (4 * 3) + (4 * 2);

/// Lengths of the arrays faces point into.
pub struct FaceRefs<'a> {
    pub n_textures: usize,
    pub n_effects: usize,
    pub n_vertices: usize,
    pub n_lightmaps: usize,
    pub meshverts: &'a [MeshVert],
}

/// Parse the faces lump. Light map origins and basis vectors are multiplied by `scale`.
pub fn from_data(data: &[u8], refs: &FaceRefs, scale: f32) -> Result<Vec<Face>> {
    let length = record_count(data, FACE_SIZE, "face lump size")?;

    let mut faces = Vec::with_capacity(length);
    for raw in data.chunks_exact(FACE_SIZE) {
        faces.push(face_from_slice(raw, refs, scale)?);
    }

    Ok(faces)
}

fn face_from_slice(data: &[u8], refs: &FaceRefs, scale: f32) -> Result<Face> {
    let texture_idx = match slice_to_i32(&data[0..4]) {
        x if x < 0 => None,
        x => Some(checked_index(x, refs.n_textures, "face texture out of range")?),
    };

    let effect_idx = match slice_to_i32(&data[4..8]) {
        x if x < 0 => None,
        x => Some(checked_index(x, refs.n_effects, "face effect out of range")?),
    };

    let face_type = FaceType::try_from(slice_to_i32(&data[8..12]))?;

    let vertices_idx = checked_range(
        slice_to_i32(&data[12..16]),
        slice_to_i32(&data[16..20]),
        refs.n_vertices,
        "face vertices out of range",
    )?;

    let meshverts_idx = checked_range(
        slice_to_i32(&data[20..24]),
        slice_to_i32(&data[24..28]),
        refs.meshverts.len(),
        "face mesh verts out of range",
    )?;
    let n_face_vertices = vertices_idx.len() as u32;
    let meshverts = &refs.meshverts[meshverts_idx.start as usize..meshverts_idx.end as usize];
    if meshverts.iter().any(|&m| m >= n_face_vertices) {
        return Err(ParseError::Invalid("mesh vert outside face"));
    }

    let lightmap_idx = match slice_to_i32(&data[28..32]) {
        x if x < 0 => None,
        x => Some(checked_index(x, refs.n_lightmaps, "face light map out of range")?),
    };

    let map_start = slice_to_vec2i(&data[32..40]);
    let map_size = slice_to_vec2i(&data[40..48]);
    let map_origin = slice_to_vec3(&data[48..60]) * scale;

    let mut map_vecs = [Vector3::zeros(); 2];
    for (n, map_vec) in map_vecs.iter_mut().enumerate() {
        let offset = 60 + (n * 3 * 4);
        *map_vec = slice_to_vec3(&data[offset..offset + 12]) * scale;
    }

    let normal = slice_to_vec3(&data[84..96]);
    let size = slice_to_vec2i(&data[96..104]);

    if face_type == FaceType::Patch {
        let odd = |n: i32| n >= 3 && n % 2 == 1;
        if !odd(size.x) || !odd(size.y) {
            return Err(ParseError::Invalid("patch size must be odd and at least 3"));
        }
        if i64::from(size.x) * i64::from(size.y) > i64::from(n_face_vertices) {
            return Err(ParseError::Invalid("patch has too few control points"));
        }
    }

    Ok(Face {
        face_type,
        texture_idx,
        effect_idx,
        lightmap_idx,
        vertices_idx,
        meshverts_idx,
        map_start,
        map_size,
        map_origin,
        map_vecs,
        normal,
        size,
    })
}

impl<T: CoordSystem> HasFaces<T> for Q3BspFile<T> {
    type FacesIter<'a> = std::slice::Iter<'a, Face>
    where
        T: 'a;

    fn faces_iter(&self) -> Self::FacesIter<'_> {
        self.faces.iter()
    }

    fn faces_len(&self) -> u32 {
        self.faces.len() as u32
    }

    fn get_face(&self, index: u32) -> &Face {
        &self.faces[index as usize]
    }
}
