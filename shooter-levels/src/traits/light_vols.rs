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

use crate::types::Rgb;

/// A sample of the level's ambient light grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightVol {
    pub ambient: Rgb,
    pub directional: Rgb,
    /// Direction to the light, as phi and theta.
    pub dir: [u8; 2],
}

pub trait HasLightVols {
    type LightVolsIter<'a>: Iterator<Item = &'a LightVol>
    where
        Self: 'a;

    fn lightvols_iter(&self) -> Self::LightVolsIter<'_>;
    fn get_lightvol(&self, index: u32) -> &LightVol;
}
