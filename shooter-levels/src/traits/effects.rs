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

use super::HasBrushes;
use crate::coords::CoordSystem;

/// One effect definition
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    /// The name of the effect
    pub name: String,

    /// The brush used for this effect, if any
    pub brush_idx: Option<u32>,
}

pub trait HasEffects<S: CoordSystem>: HasBrushes<S> {
    type EffectsIter<'a>: Iterator<Item = &'a Effect>
    where
        Self: 'a;

    fn effects_iter(&self) -> Self::EffectsIter<'_>;
    fn effects_len(&self) -> u32;
    fn get_effect(&self, index: u32) -> &Effect;
}
