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

use super::textures::fixed_name;
use super::Q3BspFile;
use crate::coords::CoordSystem;
use crate::helpers::{checked_index, record_count, slice_to_i32};
use crate::traits::effects::*;
use crate::types::Result;

const EFFECT_SIZE: usize = 64 + 4 + 4;

pub fn from_data(data: &[u8], n_brushes: usize) -> Result<Box<[Effect]>> {
    let length = record_count(data, EFFECT_SIZE, "effect lump size")?;

    let mut effects = Vec::with_capacity(length);
    for raw in data.chunks_exact(EFFECT_SIZE) {
        let brush = slice_to_i32(&raw[64..68]);
        let brush_idx = if brush < 0 {
            None
        } else {
            Some(checked_index(brush, n_brushes, "effect brush out of range")?)
        };

        effects.push(Effect {
            name: fixed_name(&raw[..64]),
            brush_idx,
        });
    }

    Ok(effects.into_boxed_slice())
}

impl<T: CoordSystem> HasEffects<T> for Q3BspFile<T> {
    type EffectsIter<'a> = std::slice::Iter<'a, Effect>
    where
        T: 'a;

    fn effects_iter(&self) -> Self::EffectsIter<'_> {
        self.effects.iter()
    }

    fn effects_len(&self) -> u32 {
        self.effects.len() as u32
    }

    fn get_effect(&self, index: u32) -> &Effect {
        &self.effects[index as usize]
    }
}
