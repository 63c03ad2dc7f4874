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

use std::iter::Iterator;

/// A texture reference from a level. Only the name is stored, images are
/// resolved separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub surface: SurfaceFlags,
    pub contents: ContentsFlags,
}

impl Texture {
    /// Whether traces collide with brushes using this texture.
    pub fn is_solid(&self) -> bool {
        self.contents.contains(ContentsFlags::SOLID)
    }
}

bitflags!(
    /// Per-surface flags, as written by the level compiler. Values match
    /// `code/game/surfaceflags.h` in the Quake III Arena source:
    /// https://github.com/id-Software/Quake-III-Arena/blob/master/code/game/surfaceflags.h
    pub struct SurfaceFlags: u32 {
        /// Landing here never hurts
        const NO_DAMAGE = 0x1;

        /// Low friction
        const SLICK = 0x2;

        /// Lit from the environment map; drawn as sky
        const SKY = 0x4;

        /// Climbable
        const LADDER = 0x8;

        /// Missiles pass through without exploding
        const NO_IMPACT = 0x10;

        /// No decals from missiles
        const NO_MARKS = 0x20;

        /// Flesh impact sounds and effects
        const FLESH = 0x40;

        /// No draw surface is generated
        const NODRAW = 0x80;

        /// Preferred splitting plane when building the tree
        const HINT = 0x01_00;

        /// Ignored by the compiler, so brushes using it may be open
        const SKIP = 0x02_00;

        /// Has no light map
        const NO_LIGHT_MAP = 0x04_00;

        /// Lit per vertex instead
        const POINT_LIGHT = 0x08_00;

        /// Metal footstep sounds
        const METAL_STEPS = 0x10_00;

        /// Silent footsteps
        const NO_STEPS = 0x20_00;

        /// Curved surfaces with this flag don't collide
        const NON_SOLID = 0x40_00;

        /// Filters light passing through it when lighting is compiled
        const LIGHT_FILTER = 0x80_00;

        /// Casts shadows from its alpha channel when lighting is compiled
        const ALPHA_SHADOW = 0x01_00_00;

        /// Ignores dynamic lights
        const NO_DLIGHT = 0x02_00_00;

        /// Walking here kicks up dust
        const DUST = 0x04_00_00;
    }
);

bitflags!(
    /// What a volume using this texture is filled with. From the same header
    /// as [`SurfaceFlags`]; most of these only matter to the game or the compiler.
    pub struct ContentsFlags: u32 {
        /// Blocks movement and traces
        const SOLID = 0x1;
        const LAVA = 0x8;
        const SLIME = 0x10;
        const WATER = 0x20;
        const FOG = 0x40;

        const NOT_TEAM1 = 0x00_80;
        const NOT_TEAM2 = 0x01_00;
        const NOT_BOT_CLIP = 0x02_00;

        /// Separates areas, for entity visibility
        const AREA_PORTAL = 0x80_00;

        /// Blocks players only
        const PLAYER_CLIP = 0x01_00_00;

        /// Blocks monsters only
        const MONSTER_CLIP = 0x02_00_00;

        // Bot navigation hints
        const TELEPORTER = 0x04_00_00;
        const JUMP_PAD = 0x08_00_00;
        const CLUSTER_PORTAL = 0x10_00_00;
        const DO_NOT_ENTER = 0x20_00_00;
        const BOT_CLIP = 0x40_00_00;
        const MOVER = 0x80_00_00;

        /// Marks an entity's origin; stripped by the compiler
        const ORIGIN = 0x01_00_00_00;

        /// Player and monster bodies. Only set at runtime
        const BODY = 0x02_00_00_00;
        const CORPSE = 0x04_00_00_00;

        /// Left out of the tree, still used for collision
        const DETAIL = 0x08_00_00_00;

        /// Used to build the tree
        const STRUCTURAL = 0x10_00_00_00;

        /// Surfaces behind it are still drawn
        const TRANSLUCENT = 0x20_00_00_00;

        const TRIGGER = 0x40_00_00_00;

        /// Items and bodies aren't dropped here (lava, death fog)
        const NODROP = 0x80_00_00_00;
    }
);

pub trait HasTextures {
    type TexturesIter<'a>: Iterator<Item = &'a Texture>
    where
        Self: 'a;

    fn textures_iter(&self) -> Self::TexturesIter<'_>;
    fn textures_len(&self) -> u32;
    fn get_texture(&self, idx: u32) -> &Texture;
}
