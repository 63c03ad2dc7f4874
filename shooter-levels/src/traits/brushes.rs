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

/// One brush record. Used for collision detection.
/// "Each brush describes a convex volume as defined by its surrounding surfaces."
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub sides: Box<[BrushSide]>,
    pub texture_idx: u32,
}

/// Bounding surface for brush.
/// Points with `dot(normal, p) > dist` for the side's plane are outside the brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSide {
    pub plane_idx: u32,
    pub texture_idx: u32,
}

pub trait HasBrushes<S: CoordSystem> {
    type BrushesIter<'a>: Iterator<Item = &'a Brush>
    where
        Self: 'a;

    fn brushes_iter(&self) -> Self::BrushesIter<'_>;
    fn brushes_len(&self) -> u32;
    fn get_brush(&self, index: u32) -> &Brush;
}
