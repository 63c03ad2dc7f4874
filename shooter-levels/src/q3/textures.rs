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
use crate::helpers::{record_count, slice_to_u32};
use crate::traits::textures::*;
use crate::types::Result;

const TEXTURE_SIZE: usize = 64 + 4 + 4;

/// Read a NUL-padded fixed-width name.
pub(crate) fn fixed_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

pub fn from_data(lump: &[u8]) -> Result<Box<[Texture]>> {
    let length = record_count(lump, TEXTURE_SIZE, "texture lump size")?;

    let mut textures = Vec::with_capacity(length);
    for raw in lump.chunks_exact(TEXTURE_SIZE) {
        textures.push(Texture {
            name: fixed_name(&raw[0..64]),
            surface: SurfaceFlags::from_bits_truncate(slice_to_u32(&raw[64..68])),
            contents: ContentsFlags::from_bits_truncate(slice_to_u32(&raw[68..72])),
        });
    }

    Ok(textures.into_boxed_slice())
}

impl<T: CoordSystem> HasTextures for Q3BspFile<T> {
    type TexturesIter<'a> = std::slice::Iter<'a, Texture>
    where
        T: 'a;

    fn textures_iter(&self) -> Self::TexturesIter<'_> {
        self.textures.iter()
    }

    fn textures_len(&self) -> u32 {
        self.textures.len() as u32
    }

    fn get_texture(&self, idx: u32) -> &Texture {
        &self.textures[idx as usize]
    }
}
