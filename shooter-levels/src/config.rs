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

//! Options controlling how a level is loaded and post-processed.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ini::{Ini, Properties};
use serde::de::value::SeqDeserializer;
use serde::de::{self, DeserializeSeed, Deserializer, IntoDeserializer, MapAccess, Visitor};
use serde::{forward_to_deserialize_any, Deserialize};
use thiserror::Error;

/// The section of an ini file [`LoadConfig`] is read from.
pub const INI_SECTION: &str = "map";

/// Largest patch density we accept. Tessellation tracks cached columns in a `u64`.
pub const MAX_PATCH_DENSITY: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Couldn't read config file")]
    Ini(#[from] ini::Error),

    #[error("Couldn't parse config")]
    Parse(#[from] ini::ParseError),

    #[error("Bad value for {key}: {value:?}")]
    BadValue { key: String, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl de::Error for ConfigError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ConfigError::Invalid(msg.to_string())
    }
}

/// Settings for turning a level file into a usable map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Multiplied into every position, extent and plane distance.
    pub scale: f32,

    /// Reverse the index order of every triangle once patches are done.
    pub flip_winding: bool,

    /// Turn curved patches into triangles.
    pub tessellate_patches: bool,

    /// If not tessellating, give patches 3x3 control point index lists instead.
    pub index_patches: bool,

    /// Samples along each side of a 3x3 sub-patch.
    pub patch_density: u32,

    /// Image extensions to try for each texture, in order. Comma separated in ini files.
    pub texture_extensions: Vec<String>,

    /// Image used when a texture can't be found.
    pub placeholder_texture: String,

    /// Rewrite flame faces into billboard quads.
    pub regenerate_flames: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            scale: 0.03,
            flip_winding: true,
            tessellate_patches: true,
            index_patches: false,
            patch_density: 9,
            texture_extensions: vec![".jpg".into(), ".tga".into(), ".png".into()],
            placeholder_texture: "transparent.png".into(),
            regenerate_flames: true,
        }
    }
}

impl LoadConfig {
    /// Load from the `[map]` section of an ini file. Missing keys keep their defaults.
    pub fn from_ini_file<P: AsRef<Path>>(path: P) -> Result<LoadConfig, ConfigError> {
        let ini = Ini::load_from_file(path)?;
        LoadConfig::from_ini(&ini)
    }

    /// Load from ini text.
    pub fn from_ini_str(text: &str) -> Result<LoadConfig, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        LoadConfig::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<LoadConfig, ConfigError> {
        let section = match ini.section(Some(INI_SECTION)) {
            Some(s) => s,
            None => return Ok(LoadConfig::default()),
        };

        let config = LoadConfig::deserialize(SectionDeserializer { section })?;
        if !(2..=MAX_PATCH_DENSITY).contains(&config.patch_density) {
            return Err(ConfigError::BadValue {
                key: "patch_density".into(),
                value: config.patch_density.to_string(),
            });
        }

        Ok(config)
    }
}

/// Presents an ini section as a map of string keys to string values.
struct SectionDeserializer<'a> {
    section: &'a Properties,
}

impl<'de, 'a> Deserializer<'de> for SectionDeserializer<'a> {
    type Error = ConfigError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_map(SectionAccess {
            entries: self.section.iter(),
            pending: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct SectionAccess<'a, I> {
    entries: I,
    pending: Option<(&'a str, &'a str)>,
}

impl<'de, 'a, I> MapAccess<'de> for SectionAccess<'a, I>
where
    I: Iterator<Item = (&'a str, &'a str)>,
{
    type Error = ConfigError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, ConfigError> {
        match self.entries.next() {
            Some((key, value)) => {
                self.pending = Some((key, value));
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, ConfigError> {
        let (key, value) = self
            .pending
            .take()
            .ok_or_else(|| ConfigError::Invalid("value requested before key".into()))?;

        seed.deserialize(ValueDeserializer { key, value })
    }
}

/// A single ini value. Numbers and bools are parsed from the text, lists are comma separated.
struct ValueDeserializer<'a> {
    key: &'a str,
    value: &'a str,
}

impl<'a> ValueDeserializer<'a> {
    fn parse<T: FromStr>(&self) -> Result<T, ConfigError> {
        self.value.trim().parse().map_err(|_| ConfigError::BadValue {
            key: self.key.to_owned(),
            value: self.value.to_owned(),
        })
    }
}

impl<'de, 'a> Deserializer<'de> for ValueDeserializer<'a> {
    type Error = ConfigError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_str(self.value.trim())
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_bool(self.parse()?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_u32(self.parse()?)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_f32(self.parse()?)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        let items = self.value.split(',').map(str::trim).filter(|e| !e.is_empty());
        visitor.visit_seq(SeqDeserializer::new(items))
    }

    forward_to_deserialize_any! {
        i8 i16 i32 i64 i128 u8 u16 u64 u128 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
