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
use crate::helpers::{checked_index, checked_range, record_count, slice_to_i32};
use crate::traits::brushes::*;
use crate::types::Result;

const BRUSH_SIZE: usize = 4 * 3;
const SIDE_SIZE: usize = 4 * 2;

pub fn from_data(
    brushes_data: &[u8],
    sides_data: &[u8],
    n_textures: usize,
    n_planes: usize,
) -> Result<Box<[Brush]>> {
    let length = record_count(brushes_data, BRUSH_SIZE, "brush lump size")?;
    let n_sides = record_count(sides_data, SIDE_SIZE, "brush side lump size")?;

    let mut brushes = Vec::with_capacity(length);
    for brush in brushes_data.chunks_exact(BRUSH_SIZE) {
        let sides_idx = checked_range(
            slice_to_i32(&brush[0..4]),
            slice_to_i32(&brush[4..8]),
            n_sides,
            "brush sides out of range",
        )?;
        let texture_idx = checked_index(
            slice_to_i32(&brush[8..12]),
            n_textures,
            "brush texture out of range",
        )?;

        let mut sides = Vec::with_capacity(sides_idx.len());
        for n in sides_idx {
            let offset = n as usize * SIDE_SIZE;
            let side = &sides_data[offset..offset + SIDE_SIZE];

            sides.push(BrushSide {
                plane_idx: checked_index(
                    slice_to_i32(&side[0..4]),
                    n_planes,
                    "brush side plane out of range",
                )?,
                texture_idx: checked_index(
                    slice_to_i32(&side[4..8]),
                    n_textures,
                    "brush side texture out of range",
                )?,
            });
        }

        brushes.push(Brush {
            sides: sides.into_boxed_slice(),
            texture_idx,
        });
    }

    Ok(brushes.into_boxed_slice())
}

impl<T: CoordSystem> HasBrushes<T> for Q3BspFile<T> {
    type BrushesIter<'a> = std::slice::Iter<'a, Brush>
    where
        T: 'a;

    fn brushes_iter(&self) -> Self::BrushesIter<'_> {
        self.brushes.iter()
    }

    fn brushes_len(&self) -> u32 {
        self.brushes.len() as u32
    }

    fn get_brush(&self, index: u32) -> &Brush {
        &self.brushes[index as usize]
    }
}
