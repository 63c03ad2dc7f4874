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

use crate::helpers::{slice_to_i32, slice_to_u32};
use crate::types::{ParseError, Result};

const MAGIC_HEADER: &[u8] = &[0x49, 0x42, 0x53, 0x50];
const VERSION: u32 = 0x2e;
const N_LUMPS: usize = 17;
const HEADER_LEN: usize = 4 + 4 + (N_LUMPS * 4 * 2);

/// Lump indices, in directory order.
pub mod lump {
    pub const ENTITIES: usize = 0;
    pub const TEXTURES: usize = 1;
    pub const PLANES: usize = 2;
    pub const NODES: usize = 3;
    pub const LEAVES: usize = 4;
    pub const LEAF_FACES: usize = 5;
    pub const LEAF_BRUSHES: usize = 6;
    pub const MODELS: usize = 7;
    pub const BRUSHES: usize = 8;
    pub const BRUSH_SIDES: usize = 9;
    pub const VERTICES: usize = 10;
    pub const MESH_VERTS: usize = 11;
    pub const EFFECTS: usize = 12;
    pub const FACES: usize = 13;
    pub const LIGHT_MAPS: usize = 14;
    pub const LIGHT_VOLS: usize = 15;
    pub const VIS_DATA: usize = 16;
}

/// The header found at the start of a (Q3) bsp file
#[derive(Clone, Copy, Debug)]
pub struct Header {
    pub version: u32,
    pub dir_entries: [DirEntry; N_LUMPS],
}

/// A directory entry, pointing to a lump in the file
#[derive(Clone, Copy, Debug, Default)]
pub struct DirEntry {
    /// Offset from beginning of file to start of lump
    pub offset: u32,

    /// Length of lump in bytes
    pub length: u32,
}

impl Header {
    /// Deserialise from buffer.
    /// # Format
    /// string[4] magic             Always "IBSP".
    /// int version                 0x2e for Quake 3 levels.
    /// direntry[17] direntries     Lump directory.
    pub fn from(v: &[u8]) -> Result<Header> {
        if v.len() < HEADER_LEN {
            if v.len() >= 4 && &v[0..4] != MAGIC_HEADER {
                return Err(ParseError::Unsupported);
            }
            return Err(ParseError::Invalid("file shorter than header"));
        }

        if &v[0..4] != MAGIC_HEADER {
            return Err(ParseError::Unsupported);
        }

        let version = slice_to_u32(&v[4..8]);
        if version != VERSION {
            return Err(ParseError::Unsupported);
        }

        let mut dir_entries = [DirEntry::default(); N_LUMPS];
        for (n, entry) in dir_entries.iter_mut().enumerate() {
            let base = 8 + n * 8;
            let offset = slice_to_i32(&v[base..base + 4]);
            let length = slice_to_i32(&v[base + 4..base + 8]);
            if offset < 0 || length < 0 {
                return Err(ParseError::Invalid("negative lump offset or length"));
            }

            *entry = DirEntry {
                offset: offset as u32,
                length: length as u32,
            };
        }

        Ok(Header {
            version,
            dir_entries,
        })
    }

    /// Get the lump at given index from the buffer, with offset & length based on this directory.
    pub fn get_lump<'l>(&self, buf: &'l [u8], index: usize) -> Result<&'l [u8]> {
        let entry = self.dir_entries[index];
        let start = entry.offset as usize;
        let end = start + entry.length as usize;

        buf.get(start..end)
            .ok_or(ParseError::Invalid("lump runs past end of file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_header() -> Vec<u8> {
        let mut v = Vec::with_capacity(HEADER_LEN);
        v.extend_from_slice(b"IBSP");
        v.extend_from_slice(&0x2ei32.to_le_bytes());
        v.resize(HEADER_LEN, 0);
        v
    }

    #[test]
    fn wrong_magic_is_unsupported() {
        let mut v = empty_header();
        v[0] = b'V';

        assert_eq!(Header::from(&v).unwrap_err(), ParseError::Unsupported);
    }

    #[test]
    fn wrong_version_is_unsupported() {
        let mut v = empty_header();
        v[4] = 0x2f;

        assert_eq!(Header::from(&v).unwrap_err(), ParseError::Unsupported);
    }

    #[test]
    fn short_buffer_is_invalid() {
        let v = empty_header();

        assert!(matches!(
            Header::from(&v[..20]),
            Err(ParseError::Invalid(_))
        ));
    }

    #[test]
    fn lump_past_end_is_invalid() {
        let mut v = empty_header();
        let entry = 8 + lump::PLANES * 8;
        v[entry..entry + 4].copy_from_slice(&(HEADER_LEN as i32).to_le_bytes());
        v[entry + 4..entry + 8].copy_from_slice(&16i32.to_le_bytes());

        let header = Header::from(&v).unwrap();
        assert!(header.get_lump(&v, lump::PLANES).is_err());
        assert_eq!(header.get_lump(&v, lump::TEXTURES).unwrap().len(), 0);
    }
}
