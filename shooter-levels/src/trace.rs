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

//! Sweeping points, spheres and boxes through a level's brushes

use ahash::AHashSet;
use na::Vector3;
use std::marker::PhantomData;

use crate::coords::CoordSystem;
use crate::math::project_on_plane;
use crate::traits::textures::ContentsFlags;
use crate::traits::tree::NodeChild;
use crate::traits::MinBspFeatures;

/// Pushes hits slightly back towards the outside of a brush.
const SURFACE_EPSILON: f32 = 1e-4;

/// What's being moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceShape {
    Point,
    Sphere {
        radius: f32,
    },
    /// An axis-aligned box, relative to the traced position. `extents` is the
    /// largest distance from the centre along each axis.
    Box {
        mins: Vector3<f32>,
        maxs: Vector3<f32>,
        extents: Vector3<f32>,
    },
}

/// A shape moving in a straight line from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRequest {
    pub shape: TraceShape,
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
}

impl TraceRequest {
    /// A ray cast.
    pub fn point(start: Vector3<f32>, end: Vector3<f32>) -> TraceRequest {
        TraceRequest {
            shape: TraceShape::Point,
            start,
            end,
        }
    }

    pub fn sphere(start: Vector3<f32>, end: Vector3<f32>, radius: f32) -> TraceRequest {
        TraceRequest {
            shape: TraceShape::Sphere { radius },
            start,
            end,
        }
    }

    /// A box with corners `start + mins` and `start + maxs`. The box must
    /// contain its own origin.
    pub fn aabb(
        start: Vector3<f32>,
        end: Vector3<f32>,
        mins: Vector3<f32>,
        maxs: Vector3<f32>,
    ) -> TraceRequest {
        let extents = (-mins).sup(&maxs);
        debug_assert!(
            extents.iter().all(|e| *e >= 0.0),
            "box extents must be non-negative"
        );

        TraceRequest {
            shape: TraceShape::Box {
                mins,
                maxs,
                extents,
            },
            start,
            end,
        }
    }

    /// How far from a plane the shape's centre must be to not touch it.
    fn plane_offset(&self, normal: &Vector3<f32>) -> f32 {
        match self.shape {
            TraceShape::Point => 0.0,
            TraceShape::Sphere { radius } => radius,
            TraceShape::Box { extents, .. } => extents.dot(&normal.abs()),
        }
    }

    /// Offset of a brush side's plane, so the shape's centre can be tested as a point.
    fn side_offset(&self, normal: &Vector3<f32>) -> f32 {
        match self.shape {
            TraceShape::Point => 0.0,
            TraceShape::Sphere { radius } => radius,
            TraceShape::Box { mins, maxs, .. } => {
                let corner = Vector3::from_fn(|j, _| if normal[j] < 0.0 { maxs[j] } else { mins[j] });
                -corner.dot(normal)
            }
        }
    }
}

/// What a trace ran into.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceResult {
    pub collision: bool,

    /// False if the start position was inside a brush.
    pub starts_out: bool,

    /// True if the whole movement was inside a single brush.
    pub all_solid: bool,

    /// The plane of the nearest surface hit.
    pub plane_idx: Option<u32>,

    /// How far along the movement the shape got before hitting something. 1 if it didn't.
    pub fraction: f32,

    /// Contents of the brush that was hit.
    pub contents: ContentsFlags,

    /// The remaining movement after the hit, slid along the surface.
    pub plane_proj: Vector3<f32>,
}

impl Default for TraceResult {
    fn default() -> Self {
        TraceResult {
            collision: false,
            starts_out: true,
            all_solid: false,
            plane_idx: None,
            fraction: 1.0,
            contents: ContentsFlags::empty(),
            plane_proj: Vector3::zeros(),
        }
    }
}

impl TraceResult {
    /// Where the shape stopped.
    pub fn end_position(&self, request: &TraceRequest) -> Vector3<f32> {
        request.start + (request.end - request.start) * self.fraction
    }
}

/// Run a trace through the level, returning the nearest blocking surface.
pub fn trace<S: CoordSystem, T: MinBspFeatures<S>>(file: &T, request: &TraceRequest) -> TraceResult {
    let mut tracer = Tracer {
        file,
        request,
        result: TraceResult::default(),
        checked_brushes: AHashSet::new(),
        _phantom: PhantomData,
    };

    if file.nodes_len() > 0 {
        tracer.check_node(NodeChild::Node(0));
    } else if file.leaves_len() > 0 {
        tracer.check_node(NodeChild::Leaf(0));
    }

    let mut result = tracer.result;
    if let Some(plane_idx) = result.plane_idx.filter(|_| result.collision) {
        let plane = file.get_plane(plane_idx);
        let remaining = (request.end - request.start) * (1.0 - result.fraction);
        result.plane_proj = project_on_plane(&plane.normal, &remaining);
    }

    result
}

/// State for one trace. Each brush is tested at most once.
struct Tracer<'a, S: CoordSystem, T: MinBspFeatures<S>> {
    file: &'a T,
    request: &'a TraceRequest,
    result: TraceResult,
    checked_brushes: AHashSet<u32>,
    _phantom: PhantomData<S>,
}

impl<'a, S: CoordSystem, T: MinBspFeatures<S>> Tracer<'a, S, T> {
    fn check_node(&mut self, child: NodeChild) {
        let node_idx = match child {
            NodeChild::Leaf(leaf_idx) => return self.check_leaf(leaf_idx),
            NodeChild::Node(node_idx) => node_idx,
        };

        let (file, request) = (self.file, self.request);
        let node = file.get_node(node_idx);
        let plane = file.get_plane(node.plane_idx);

        let offset = request.plane_offset(&plane.normal);
        let start_dist = plane.distance_to(&request.start);
        let end_dist = plane.distance_to(&request.end);

        if start_dist >= offset && end_dist >= offset {
            self.check_node(node.children[0]);
        } else if start_dist < -offset && end_dist < -offset {
            self.check_node(node.children[1]);
        } else {
            // Spans the plane. Check the side the movement starts on first
            let side = if start_dist < end_dist { 1 } else { 0 };
            self.check_node(node.children[side]);
            self.check_node(node.children[1 - side]);
        }
    }

    fn check_leaf(&mut self, leaf_idx: u32) {
        let file = self.file;
        let leaf = file.get_leaf(leaf_idx);
        for &brush_idx in leaf.brushes_idx.iter() {
            if self.checked_brushes.insert(brush_idx) {
                self.check_brush(brush_idx);
            }
        }
    }

    fn check_brush(&mut self, brush_idx: u32) {
        let (file, request) = (self.file, self.request);
        let brush = file.get_brush(brush_idx);
        let contents = file.get_texture(brush.texture_idx).contents;
        if brush.sides.is_empty() || !contents.contains(ContentsFlags::SOLID) {
            return;
        }

        let mut enter_fraction = -1.0f32;
        let mut leave_fraction = 1.0f32;
        let mut enter_plane = None;
        let mut starts_out = false;
        let mut ends_out = false;

        for side in brush.sides.iter() {
            let plane = file.get_plane(side.plane_idx);
            let normal = plane.normal.normalize();
            let dist = plane.dist + request.side_offset(&normal);

            let start_dist = request.start.dot(&normal) - dist;
            let end_dist = request.end.dot(&normal) - dist;

            if start_dist > 0.0 {
                starts_out = true;
            }
            if end_dist > 0.0 {
                ends_out = true;
            }

            if start_dist > 0.0 && end_dist >= start_dist {
                // Entirely in front of this side, so it can't touch the brush
                return;
            }
            if start_dist <= 0.0 && end_dist <= 0.0 {
                continue;
            }

            if start_dist > end_dist {
                // Entering
                let fraction = (start_dist - SURFACE_EPSILON) / (start_dist - end_dist);
                if fraction > enter_fraction {
                    enter_fraction = fraction;
                    enter_plane = Some(side.plane_idx);
                }
            } else {
                // Leaving
                let fraction = (start_dist + SURFACE_EPSILON) / (start_dist - end_dist);
                if fraction < leave_fraction {
                    leave_fraction = fraction;
                }
            }
        }

        if !starts_out {
            self.result.starts_out = false;
            if !ends_out {
                self.result.all_solid = true;
            }
            return;
        }

        if enter_fraction < leave_fraction
            && enter_fraction > -1.0
            && enter_fraction <= self.result.fraction
        {
            if let Some(plane_idx) = enter_plane {
                self.result.plane_idx = Some(plane_idx);
                self.result.fraction = enter_fraction.max(0.0);
                self.result.contents = contents;
                self.result.collision = true;
            }
        }
    }
}
