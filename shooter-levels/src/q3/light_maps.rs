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
use crate::helpers::record_count;
use crate::traits::light_maps::*;
use crate::types::Result;

const LIGHTMAP_SIZE: usize = (LIGHTMAP_DIM * LIGHTMAP_DIM * 3) as usize;

pub fn from_data(data: &[u8]) -> Result<Box<[LightMap]>> {
    let length = record_count(data, LIGHTMAP_SIZE, "light map lump size")?;

    let mut maps = Vec::with_capacity(length);
    for raw in data.chunks_exact(LIGHTMAP_SIZE) {
        maps.push(LightMap { data: raw.into() });
    }

    Ok(maps.into_boxed_slice())
}

impl<T: CoordSystem> HasLightMaps for Q3BspFile<T> {
    type LightMapsIter<'a> = std::slice::Iter<'a, LightMap>
    where
        T: 'a;

    fn lightmaps_iter(&self) -> Self::LightMapsIter<'_> {
        self.light_maps.iter()
    }

    fn lightmaps_len(&self) -> u32 {
        self.light_maps.len() as u32
    }

    fn get_lightmap(&self, index: u32) -> &LightMap {
        &self.light_maps[index as usize]
    }
}
