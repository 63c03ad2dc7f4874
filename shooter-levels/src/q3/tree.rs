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

//! Parses the BSP tree into flat node and leaf arrays

use super::Q3BspFile;
use crate::coords::CoordSystem;
use crate::helpers::{checked_index, checked_range, record_count, slice_to_i32, slice_to_vec3i};
use crate::traits::tree::*;
use crate::types::{ParseError, Result};

const NODE_SIZE: usize = 4 + (4 * 2) + (4 * 3) + (4 * 3);
const LEAF_SIZE: usize = 4 * 6 + (4 * 3 * 2);

/// Raw lumps making up the tree.
pub struct TreeLumps<'a> {
    pub nodes: &'a [u8],
    pub leaves: &'a [u8],
    pub leaf_faces: &'a [u8],
    pub leaf_brushes: &'a [u8],
}

/// What the tree can point at.
pub struct TreeRefs {
    pub n_planes: usize,
    pub n_faces: usize,
    pub n_brushes: usize,
    /// Number of clusters in the visibility data, if there is any.
    pub n_clusters: Option<usize>,
}

pub fn from_data(
    lumps: &TreeLumps,
    refs: &TreeRefs,
    scale: f32,
) -> Result<(Box<[BspNode]>, Box<[BspLeaf]>)> {
    let n_nodes = record_count(lumps.nodes, NODE_SIZE, "node lump size")?;
    let n_leaves = record_count(lumps.leaves, LEAF_SIZE, "leaf lump size")?;
    let leaf_faces = index_list(lumps.leaf_faces, refs.n_faces, "leaf face out of range")?;
    let leaf_brushes = index_list(lumps.leaf_brushes, refs.n_brushes, "leaf brush out of range")?;

    let child = |raw: i32| -> Result<NodeChild> {
        let child = NodeChild::from_raw(raw);
        let valid = match child {
            NodeChild::Node(i) => (i as usize) < n_nodes,
            NodeChild::Leaf(i) => (i as usize) < n_leaves,
        };
        if !valid {
            return Err(ParseError::Invalid("node child out of range"));
        }

        Ok(child)
    };

    let mut nodes = Vec::with_capacity(n_nodes);
    for raw in lumps.nodes.chunks_exact(NODE_SIZE) {
        nodes.push(BspNode {
            plane_idx: checked_index(
                slice_to_i32(&raw[0..4]),
                refs.n_planes,
                "node plane out of range",
            )?,
            children: [
                child(slice_to_i32(&raw[4..8]))?,
                child(slice_to_i32(&raw[8..12]))?,
            ],
            min: slice_to_vec3i(&raw[12..24]) * scale,
            max: slice_to_vec3i(&raw[24..36]) * scale,
        });
    }

    let mut leaves = Vec::with_capacity(n_leaves);
    for raw in lumps.leaves.chunks_exact(LEAF_SIZE) {
        let cluster_id = match slice_to_i32(&raw[0..4]) {
            x if x < 0 => None,
            x => match refs.n_clusters {
                Some(n) => Some(checked_index(x, n, "leaf cluster out of range")?),
                None => Some(x as u32),
            },
        };

        let faces = checked_range(
            slice_to_i32(&raw[32..36]),
            slice_to_i32(&raw[36..40]),
            leaf_faces.len(),
            "leaf faces out of range",
        )?;
        let brushes = checked_range(
            slice_to_i32(&raw[40..44]),
            slice_to_i32(&raw[44..48]),
            leaf_brushes.len(),
            "leaf brushes out of range",
        )?;

        leaves.push(BspLeaf {
            cluster_id,
            area: slice_to_i32(&raw[4..8]),
            min: slice_to_vec3i(&raw[8..20]) * scale,
            max: slice_to_vec3i(&raw[20..32]) * scale,
            faces_idx: leaf_faces[faces.start as usize..faces.end as usize].into(),
            brushes_idx: leaf_brushes[brushes.start as usize..brushes.end as usize].into(),
        });
    }

    Ok((nodes.into_boxed_slice(), leaves.into_boxed_slice()))
}

fn index_list(data: &[u8], len: usize, what: &'static str) -> Result<Vec<u32>> {
    record_count(data, 4, what)?;

    data.chunks_exact(4)
        .map(|raw| checked_index(slice_to_i32(raw), len, what))
        .collect()
}

impl<T: CoordSystem> HasBspTree<T> for Q3BspFile<T> {
    type LeavesIter<'a> = std::slice::Iter<'a, BspLeaf>
    where
        T: 'a;

    fn nodes_len(&self) -> u32 {
        self.nodes.len() as u32
    }

    fn leaves_len(&self) -> u32 {
        self.leaves.len() as u32
    }

    fn get_node(&self, index: u32) -> &BspNode {
        &self.nodes[index as usize]
    }

    fn get_leaf(&self, index: u32) -> &BspLeaf {
        &self.leaves[index as usize]
    }

    fn leaves_iter(&self) -> Self::LeavesIter<'_> {
        self.leaves.iter()
    }
}
