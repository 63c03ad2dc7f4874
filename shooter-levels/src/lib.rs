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

//! Quake 3 BSP levels for the shooter demo.
//!
//! Parses the level format into immutable arrays, then answers the two hot
//! queries the game runs every tick: sweeping a point, sphere or box through
//! the level's brushes ([`trace`]) and working out which faces the camera
//! can see ([`culling`]).

extern crate nalgebra as na;

#[macro_use]
extern crate bitflags;

pub mod archive;
pub mod config;
pub mod coords;
pub mod culling;
pub mod flames;
pub mod geometry;
pub mod helpers;
pub mod map;
pub mod math;
pub mod q3;
pub mod resolver;
pub mod trace;
pub mod traits;
pub mod types;

/// Everything you need to load a map and query it.
pub mod prelude {
    pub use crate::archive::{AssetSource, DirSource, PakArchive};
    pub use crate::config::LoadConfig;
    pub use crate::coords::{CoordSystem, GlSystem, Q3System};
    pub use crate::culling::{RenderTechnique, VisibleFaces};
    pub use crate::map::{LoadError, Q3Map};
    pub use crate::q3::Q3BspFile;
    pub use crate::trace::{TraceRequest, TraceResult, TraceShape};
    pub use crate::traits::*;
}
