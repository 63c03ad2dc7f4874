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

use image::RgbImage;

use crate::types::Rgb;

/// Width and height of every light map.
pub const LIGHTMAP_DIM: u32 = 128;

/// Stores light map textures that help make surface lighting more realistic
#[derive(Clone, PartialEq, Eq)]
pub struct LightMap {
    /// Row-major RGB texels.
    pub data: Box<[u8]>,
}

impl LightMap {
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        let offset = ((y * LIGHTMAP_DIM + x) * 3) as usize;
        Rgb::from_slice(&self.data[offset..offset + 3])
    }

    /// Copy into an image, ready for upload.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(LIGHTMAP_DIM, LIGHTMAP_DIM, |x, y| {
            let c = self.get(x, y);
            image::Rgb([c.r, c.g, c.b])
        })
    }
}

impl std::fmt::Debug for LightMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "LightMap {{ {}x{} }}", LIGHTMAP_DIM, LIGHTMAP_DIM)
    }
}

pub trait HasLightMaps {
    type LightMapsIter<'a>: Iterator<Item = &'a LightMap>
    where
        Self: 'a;

    fn lightmaps_iter(&self) -> Self::LightMapsIter<'_>;
    fn lightmaps_len(&self) -> u32;
    fn get_lightmap(&self, index: u32) -> &LightMap;
}
