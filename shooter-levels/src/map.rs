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

//! A level ready to be queried and drawn.

use std::error::Error as StdError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{RgbImage, RgbaImage};
use log::{debug, info};
use na::{Matrix4, Vector3};
use rayon::prelude::*;
use thiserror::Error;

use crate::archive::{ArchiveError, AssetSource, DirSource, PakArchive};
use crate::config::LoadConfig;
use crate::coords::{GlSystem, Q3System};
use crate::culling::{self, VisibleFaces};
use crate::flames;
use crate::geometry::{self, RawGeometry};
use crate::q3::Q3BspFile;
use crate::resolver::{self, Skybox, SourceResolver, TextureClass, TextureClasses, TextureResolver};
use crate::trace::{self, TraceRequest, TraceResult};
use crate::traits::{HasLightMaps, HasTextures};
use crate::types::ParseError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Couldn't parse level")]
    Parse(#[from] ParseError),

    #[error("Couldn't read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No level file in archive")]
    NoMapInArchive,

    #[error("Couldn't open archive")]
    Archive(#[from] ArchiveError),

    #[error("Couldn't decode image {name}")]
    Image {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("No complete skybox found for {0}")]
    Skybox(String),

    #[error("Don't know how to load {}", .0.display())]
    UnknownFileType(PathBuf),
}

/// Displays an error along with everything that caused it
pub fn full_error_display(err: &(dyn StdError + 'static)) -> String {
    let mut out = format!("Error: {}", err);
    let mut cause = err.source();
    while let Some(c) = cause {
        out.push_str(&format!("\n    caused by: {}", c));
        cause = c.source();
    }

    out
}

/// A loaded level, in rendering co-ordinates, with its textures resolved.
pub struct Q3Map {
    file: Q3BspFile<GlSystem>,
    textures: Box<[Option<RgbaImage>]>,
    light_maps: Box<[RgbImage]>,
    classes: TextureClasses,
    source: Box<dyn AssetSource>,
}

impl Q3Map {
    /// Load a packaged level (`.pk3` or `.zip`), or a bare `.bsp` with its
    /// assets in the same directory.
    pub fn open<P: AsRef<Path>>(path: P, config: &LoadConfig) -> Result<Q3Map, LoadError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pk3" | "zip" => {
                let archive = PakArchive::open(path)?;
                debug!("Opened {} with {} entries", path.display(), archive.len());
                Q3Map::from_source(Box::new(archive), config)
            }
            "bsp" => {
                let data = fs::read(path).map_err(|source| LoadError::Io {
                    path: path.to_owned(),
                    source,
                })?;
                let root = path.parent().unwrap_or_else(|| Path::new("."));

                Q3Map::from_parts(&data, Box::new(DirSource::new(root)), config)
            }
            _ => Err(LoadError::UnknownFileType(path.to_owned())),
        }
    }

    /// Load the first level file found in `source`.
    pub fn from_source(source: Box<dyn AssetSource>, config: &LoadConfig) -> Result<Q3Map, LoadError> {
        let name = source.map_name().ok_or(LoadError::NoMapInArchive)?;
        let data = source.read(&name).ok_or(LoadError::NoMapInArchive)?;
        debug!("Loading level {}", name);

        Q3Map::from_parts(&data, source, config)
    }

    /// Load level data, resolving textures against `source`.
    pub fn from_parts(
        data: &[u8],
        source: Box<dyn AssetSource>,
        config: &LoadConfig,
    ) -> Result<Q3Map, LoadError> {
        let mut file = Q3BspFile::<Q3System>::parse_file(data, config.scale)?;

        if config.tessellate_patches {
            file.tessellate_patches(config.patch_density);
        } else if config.index_patches {
            file.index_patches();
        }

        if config.flip_winding {
            file.flip_winding();
        }

        let mut file = file.swizzle_to::<GlSystem>();

        let mut classes = TextureClasses::new(file.textures_len() as usize);
        let mut resolver = SourceResolver::new(
            source.as_ref(),
            &config.texture_extensions,
            &config.placeholder_texture,
        );

        let mut textures = Vec::with_capacity(classes.len());
        for (i, texture) in file.textures_iter().enumerate() {
            let resolved = resolver.resolve(texture);
            let class = TextureClass::classify(&texture.name, resolved.as_ref().map(|r| r.channels));

            classes.set(i as u32, class);
            textures.push(resolved.map(|r| r.image));
        }

        let light_maps = file.lightmaps_iter().map(|l| l.to_image()).collect();

        if config.regenerate_flames {
            flames::regenerate_flames(&mut file, &classes);
        }

        info!(
            "Loaded level with {} faces, {} textures ({} found), {} light maps",
            file.faces.len(),
            textures.len(),
            textures.iter().filter(|t| t.is_some()).count(),
            file.light_maps.len()
        );

        Ok(Q3Map {
            file,
            textures: textures.into_boxed_slice(),
            light_maps,
            classes,
            source,
        })
    }

    /// The parsed level data.
    pub fn file(&self) -> &Q3BspFile<GlSystem> {
        &self.file
    }

    /// True if the level has nothing to query. Traces and culling against an
    /// empty map always come back empty.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }

    pub fn trace(&self, request: &TraceRequest) -> TraceResult {
        trace::trace::<GlSystem, _>(&self.file, request)
    }

    /// Run many independent traces across the thread pool.
    pub fn trace_many(&self, requests: &[TraceRequest]) -> Vec<TraceResult> {
        requests
            .par_iter()
            .map(|request| trace::trace::<GlSystem, _>(&self.file, request))
            .collect()
    }

    pub fn find_visible_faces(&self, camera: &Vector3<f32>, view_proj: &Matrix4<f32>) -> VisibleFaces {
        culling::find_visible_faces::<GlSystem, _>(&self.file, &self.classes, camera, view_proj)
    }

    pub fn solid_geometry(&self) -> RawGeometry {
        geometry::solid_geometry::<GlSystem, _>(&self.file)
    }

    pub fn texture_class(&self, texture_idx: u32) -> TextureClass {
        self.classes.get(texture_idx)
    }

    pub fn texture_classes(&self) -> &TextureClasses {
        &self.classes
    }

    /// The decoded image for a texture, or `None` if nothing could be found.
    pub fn texture_image(&self, texture_idx: u32) -> Option<&RgbaImage> {
        self.textures.get(texture_idx as usize)?.as_ref()
    }

    pub fn light_map_image(&self, idx: u32) -> Option<&RgbImage> {
        self.light_maps.get(idx as usize)
    }

    pub fn flame_origin(&self, face_idx: u32) -> Option<Vector3<f32>> {
        flames::flame_origin::<GlSystem, _>(&self.file, face_idx)
    }

    /// Load a skybox from the same place as the level's textures.
    pub fn load_skybox(&self, prefix: &str) -> Result<Skybox, LoadError> {
        resolver::load_skybox(self.source.as_ref(), prefix)
    }
}
