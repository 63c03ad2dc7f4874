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

//! Where level files and their images come from

use ahash::AHashMap;
use flate2::read::DeflateDecoder;
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use stream_unzip::ZipReader;
use thiserror::Error;

/// Anything we can read named assets out of.
pub trait AssetSource: Send + Sync {
    /// The full contents of `name`, or `None` if it doesn't exist.
    fn read(&self, name: &str) -> Option<Vec<u8>>;

    /// Every asset name, with `/` separators.
    fn names(&self) -> Vec<String>;

    /// The first level file in the source.
    fn map_name(&self) -> Option<String> {
        let mut names = self.names();
        names.sort();
        names
            .into_iter()
            .find(|n| n.to_lowercase().ends_with(".bsp"))
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Couldn't read archive")]
    Io(#[from] io::Error),

    #[error("Couldn't inflate {name}")]
    Inflate {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name} uses compression method {method}, only stored and deflate are supported")]
    UnsupportedMethod { name: String, method: u16 },

    #[error("{name} unpacked to {actual} bytes, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Assets stored as files under a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DirSource { root: root.into() }
    }

    fn collect_names(&self, dir: &Path, out: &mut Vec<String>) {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                self.collect_names(&path, out);
            } else if let Ok(rel) = path.strip_prefix(&self.root) {
                let name = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push(name);
            }
        }
    }
}

impl AssetSource for DirSource {
    fn read(&self, name: &str) -> Option<Vec<u8>> {
        fs::read(self.root.join(name)).ok()
    }

    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&self.root, &mut names);
        names
    }
}

const METHOD_STORED: u16 = 0;
const METHOD_DEFLATE: u16 = 8;

/// A zip-packaged level, read fully into memory. Lookups ignore case.
pub struct PakArchive {
    entries: Vec<(String, Vec<u8>)>,
    index: AHashMap<String, usize>,
}

impl PakArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<PakArchive, ArchiveError> {
        PakArchive::from_bytes(fs::read(path)?)
    }

    /// Read every entry of an in-memory zip. Stored and deflated entries are supported.
    pub fn from_bytes(data: Vec<u8>) -> Result<PakArchive, ArchiveError> {
        let mut zip_reader = ZipReader::default();
        zip_reader.update(data.into());
        zip_reader.finish();

        let mut entries = Vec::new();
        for entry in zip_reader.drain_entries() {
            let name = entry.header().filename.clone();
            if name.ends_with('/') {
                continue;
            }

            let expected = entry.header().uncompressed_size as usize;
            let raw = entry.compressed_data();

            let bytes = match entry.header().compression {
                METHOD_STORED => raw.to_vec(),
                METHOD_DEFLATE => {
                    let mut out = Vec::with_capacity(expected);
                    DeflateDecoder::new(&raw[..])
                        .read_to_end(&mut out)
                        .map_err(|source| ArchiveError::Inflate {
                            name: name.clone(),
                            source,
                        })?;
                    out
                }
                method => return Err(ArchiveError::UnsupportedMethod { name, method }),
            };

            if bytes.len() != expected {
                return Err(ArchiveError::SizeMismatch {
                    name,
                    expected,
                    actual: bytes.len(),
                });
            }

            entries.push((name, bytes));
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.to_lowercase(), i))
            .collect();

        debug!("Read {} entries from archive", entries.len());

        Ok(PakArchive { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetSource for PakArchive {
    fn read(&self, name: &str) -> Option<Vec<u8>> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| self.entries[i].1.clone())
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }
}
