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

//! Resolves textures in a level to images, and works out how each should be drawn

use bitvec::prelude::*;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{debug, warn};

use crate::archive::AssetSource;
use crate::map::LoadError;
use crate::traits::textures::Texture;

/// A decoded texture image.
pub struct ResolvedTexture {
    pub image: RgbaImage,

    /// Channels in the source image, before conversion to RGBA.
    pub channels: u8,
}

/// An object that can be used to resolve a texture from a BSP File
pub trait TextureResolver {
    /// `None` if no image could be found, in which case the texture should be
    /// bound to handle 0.
    fn resolve(&mut self, texture: &Texture) -> Option<ResolvedTexture>;
}

/// Decode an image. The format comes from the name's extension if it has one,
/// otherwise it's guessed from the contents.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<DynamicImage, LoadError> {
    let decoded = match ImageFormat::from_path(name) {
        Ok(format) => image::load_from_memory_with_format(bytes, format),
        Err(_) => image::load_from_memory(bytes),
    };

    decoded.map_err(|source| LoadError::Image {
        name: name.to_owned(),
        source,
    })
}

/// Looks for `texture name + extension` in an asset source, trying each
/// extension in turn, then a placeholder.
pub struct SourceResolver<'a> {
    source: &'a dyn AssetSource,
    extensions: &'a [String],
    placeholder: &'a str,
}

impl<'a> SourceResolver<'a> {
    pub fn new(
        source: &'a dyn AssetSource,
        extensions: &'a [String],
        placeholder: &'a str,
    ) -> SourceResolver<'a> {
        SourceResolver {
            source,
            extensions,
            placeholder,
        }
    }

    fn try_load(&self, name: &str) -> Option<ResolvedTexture> {
        let bytes = self.source.read(name)?;

        match decode_image(name, &bytes) {
            Ok(img) => Some(ResolvedTexture {
                channels: img.color().channel_count(),
                image: img.into_rgba8(),
            }),
            Err(e) => {
                warn!("{}", crate::map::full_error_display(&e));
                None
            }
        }
    }
}

impl<'a> TextureResolver for SourceResolver<'a> {
    fn resolve(&mut self, tex: &Texture) -> Option<ResolvedTexture> {
        for ext in self.extensions {
            let name = format!("{}{}", tex.name, ext);
            if let Some(resolved) = self.try_load(&name) {
                debug!("Loaded texture {}", name);
                return Some(resolved);
            }
        }

        if let Some(resolved) = self.try_load(self.placeholder) {
            warn!("Texture {} not found, using placeholder", tex.name);
            return Some(resolved);
        }

        warn!("Texture {} not found, and no placeholder either", tex.name);
        None
    }
}

/// How faces using a texture get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureClass {
    Normal = 0,
    Transparent = 1,
    Flame = 2,
    Swirl = 3,
}

impl TextureClass {
    /// Images with an alpha channel are transparent, otherwise the name decides.
    pub fn classify(name: &str, channels: Option<u8>) -> TextureClass {
        if channels == Some(4) {
            return TextureClass::Transparent;
        }

        let name = name.to_lowercase();
        if name.contains("flame") {
            TextureClass::Flame
        } else if name.contains("swirl") {
            TextureClass::Swirl
        } else {
            TextureClass::Normal
        }
    }

    fn from_bits(bits: u8) -> TextureClass {
        match bits & 0b11 {
            1 => TextureClass::Transparent,
            2 => TextureClass::Flame,
            3 => TextureClass::Swirl,
            _ => TextureClass::Normal,
        }
    }
}

/// Texture classes, packed two bits per texture.
#[derive(Debug, Clone)]
pub struct TextureClasses {
    bits: BitVec<u8, Lsb0>,
}

impl TextureClasses {
    /// All textures start as [`TextureClass::Normal`].
    pub fn new(n_textures: usize) -> TextureClasses {
        TextureClasses {
            bits: bitvec![u8, Lsb0; 0; n_textures * 2],
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn set(&mut self, idx: u32, class: TextureClass) {
        let at = idx as usize * 2;
        self.bits[at..at + 2].store::<u8>(class as u8);
    }

    pub fn get(&self, idx: u32) -> TextureClass {
        let at = idx as usize * 2;
        TextureClass::from_bits(self.bits[at..at + 2].load::<u8>())
    }
}

/// Suffixes of the six skybox faces, in upload order.
pub const SKYBOX_FACES: [&str; 6] = ["_rt", "_lf", "_up", "_dn", "_bk", "_ft"];

/// Extensions tried when loading a skybox.
pub const SKYBOX_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".tga"];

/// Six decoded skybox faces, in [`SKYBOX_FACES`] order.
pub struct Skybox {
    pub faces: Vec<RgbaImage>,
    pub extension: &'static str,
}

/// Load `prefix_rt.ext` etc. The first extension for which all six faces
/// decode wins.
pub fn load_skybox(source: &dyn AssetSource, prefix: &str) -> Result<Skybox, LoadError> {
    'ext: for ext in SKYBOX_EXTENSIONS.iter() {
        let mut faces = Vec::with_capacity(SKYBOX_FACES.len());

        for suffix in SKYBOX_FACES.iter() {
            let name = format!("{}{}{}", prefix, suffix, ext);
            let img = source
                .read(&name)
                .and_then(|bytes| decode_image(&name, &bytes).ok());

            match img {
                Some(img) => faces.push(img.into_rgba8()),
                None => {
                    debug!("Skybox face {} missing, trying next extension", name);
                    continue 'ext;
                }
            }
        }

        return Ok(Skybox {
            faces,
            extension: ext,
        });
    }

    warn!("No complete skybox found for {}", prefix);
    Err(LoadError::Skybox(prefix.to_owned()))
}
