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

use bitvec::prelude::*;
use std::vec::IntoIter;

use super::Q3BspFile;
use crate::coords::CoordSystem;
use crate::helpers::slice_to_i32;
use crate::traits::visdata::*;
use crate::types::{ParseError, Result};

/// One row per cluster: bit `n` of row `m` is set if `n` is visible from `m`.
pub type VisRows = Box<[BitBox<u8, Lsb0>]>;

/// Parse the visibility lump. An empty lump means there's no visibility data.
pub fn from_data(data: &[u8]) -> Result<VisRows> {
    if data.is_empty() {
        return Ok(Vec::new().into_boxed_slice());
    }
    if data.len() < 8 {
        return Err(ParseError::Invalid("visdata shorter than its header"));
    }

    let n_vecs = slice_to_i32(&data[0..4]);
    let size_vecs = slice_to_i32(&data[4..8]);
    if n_vecs < 0 || size_vecs < 0 {
        return Err(ParseError::Invalid("negative visdata dimensions"));
    }
    let (n_vecs, size_vecs) = (n_vecs as usize, size_vecs as usize);

    if size_vecs * 8 < n_vecs {
        return Err(ParseError::Invalid("visdata rows too short for cluster count"));
    }
    if data.len() - 8 < n_vecs * size_vecs {
        return Err(ParseError::Invalid("visdata truncated"));
    }

    let vecs = data[8..8 + n_vecs * size_vecs]
        .chunks_exact(size_vecs.max(1))
        .take(n_vecs)
        .map(|row| BitBox::from_bitslice(&row.view_bits::<Lsb0>()[..n_vecs]))
        .collect::<Vec<_>>();

    Ok(vecs.into_boxed_slice())
}

impl<T: CoordSystem> HasVisData for Q3BspFile<T> {
    type VisibleIterator<'a> = IntoIter<ClusterId>
    where
        T: 'a;

    fn has_visdata(&self) -> bool {
        !self.visdata.is_empty()
    }

    fn clusters_len(&self) -> u32 {
        self.visdata.len() as u32
    }

    fn all_visible_from(&self, from: ClusterId) -> Self::VisibleIterator<'_> {
        self.visdata[from as usize]
            .iter_ones()
            .map(|idx| idx as ClusterId)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn cluster_visible_from(&self, from: ClusterId, dest: ClusterId) -> bool {
        self.visdata[from as usize][dest as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visdata_bits_are_lsb_first() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&3i32.to_le_bytes());
        raw.extend_from_slice(&1i32.to_le_bytes());
        raw.extend_from_slice(&[0b0000_0011, 0b0000_0110, 0b1111_1100]);

        let rows = from_data(&raw).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0][0] && rows[0][1] && !rows[0][2]);
        assert!(!rows[1][0] && rows[1][1] && rows[1][2]);
        // Padding bits past the cluster count are dropped.
        assert_eq!(rows[2].count_ones(), 1);
    }

    #[test]
    fn visdata_empty_lump() {
        assert!(from_data(&[]).unwrap().is_empty());
    }

    #[test]
    fn visdata_truncated() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&16i32.to_le_bytes());
        raw.extend_from_slice(&2i32.to_le_bytes());
        raw.extend_from_slice(&[0xff; 10]);

        assert!(from_data(&raw).is_err());
    }
}
