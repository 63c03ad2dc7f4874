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
use crate::helpers::{checked_range, record_count, slice_to_i32, slice_to_vec3};
use crate::traits::models::*;
use crate::types::Result;

const MODEL_SIZE: usize = (4 * 3 * 2) + (4 * 4);

/// Parse the models lump. Bounds are multiplied by `scale`.
pub fn from_data(data: &[u8], n_faces: usize, n_brushes: usize, scale: f32) -> Result<Box<[Model]>> {
    let n_models = record_count(data, MODEL_SIZE, "model lump size")?;

    let mut models = Vec::with_capacity(n_models);
    for raw in data.chunks_exact(MODEL_SIZE) {
        models.push(Model {
            mins: slice_to_vec3(&raw[0..12]) * scale,
            maxs: slice_to_vec3(&raw[12..24]) * scale,
            faces_idx: checked_range(
                slice_to_i32(&raw[24..28]),
                slice_to_i32(&raw[28..32]),
                n_faces,
                "model faces out of range",
            )?,
            brushes_idx: checked_range(
                slice_to_i32(&raw[32..36]),
                slice_to_i32(&raw[36..40]),
                n_brushes,
                "model brushes out of range",
            )?,
        })
    }

    Ok(models.into_boxed_slice())
}

impl<T: CoordSystem> HasModels<T> for Q3BspFile<T> {
    type ModelsIter<'a> = std::slice::Iter<'a, Model>
    where
        T: 'a;

    fn models_iter(&self) -> Self::ModelsIter<'_> {
        self.models.iter()
    }

    fn get_model(&self, index: u32) -> &Model {
        &self.models[index as usize]
    }
}
