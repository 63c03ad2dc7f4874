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

//! The BSP tree, flattened into node and leaf arrays

use na::Vector3;

use super::visdata::ClusterId;
use super::{HasBrushes, HasFaces, HasPlanes, HasVisData};
use crate::coords::CoordSystem;

/// Where a node's child lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChild {
    Node(u32),
    Leaf(u32),
}

impl NodeChild {
    /// Decode a raw child index. Leaves are stored as `-(leaf + 1)`.
    pub fn from_raw(raw: i32) -> NodeChild {
        if raw >= 0 {
            NodeChild::Node(raw as u32)
        } else {
            NodeChild::Leaf((-(raw + 1)) as u32)
        }
    }
}

/// An interior node. `children[0]` is in front of the plane, `children[1]` behind.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    pub plane_idx: u32,
    pub children: [NodeChild; 2],
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

/// A convex region at the bottom of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BspLeaf {
    /// `None` if the leaf is outside the playable area.
    pub cluster_id: Option<ClusterId>,
    pub area: i32,
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
    pub faces_idx: Box<[u32]>,
    pub brushes_idx: Box<[u32]>,
}

pub trait HasBspTree<S: CoordSystem>: HasPlanes<S> + HasFaces<S> + HasBrushes<S> + HasVisData {
    type LeavesIter<'a>: Iterator<Item = &'a BspLeaf>
    where
        Self: 'a;

    fn nodes_len(&self) -> u32;
    fn leaves_len(&self) -> u32;
    fn get_node(&self, index: u32) -> &BspNode;
    fn get_leaf(&self, index: u32) -> &BspLeaf;
    fn leaves_iter(&self) -> Self::LeavesIter<'_>;

    /// Walk down from the root to find the leaf containing `point`.
    /// Points exactly on a plane go to the front.
    fn locate_leaf(&self, point: &Vector3<f32>) -> Option<u32> {
        if self.leaves_len() == 0 {
            return None;
        }
        if self.nodes_len() == 0 {
            return Some(0);
        }

        let mut child = NodeChild::Node(0);
        loop {
            match child {
                NodeChild::Leaf(idx) => return Some(idx),
                NodeChild::Node(idx) => {
                    let node = self.get_node(idx);
                    let plane = self.get_plane(node.plane_idx);
                    child = if plane.distance_to(point) >= 0.0 {
                        node.children[0]
                    } else {
                        node.children[1]
                    };
                }
            }
        }
    }

    /// The cluster the given point is in, if any.
    fn locate_cluster(&self, point: &Vector3<f32>) -> Option<ClusterId> {
        self.locate_leaf(point)
            .and_then(|idx| self.get_leaf(idx).cluster_id)
    }
}
