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

//! Functions for figuring out what to render

use bitvec::prelude::*;
use na::{Matrix4, Vector3, Vector4};

use crate::coords::CoordSystem;
use crate::resolver::{TextureClass, TextureClasses};
use crate::traits::faces::{Face, FaceType};
use crate::traits::MinBspFeatures;

/// Points this close to a plane count as on it.
const PLANE_TOLERANCE: f32 = 0.001;

/// How a group of faces gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTechnique {
    Transparent = 0,
    Polygon = 1,
    Patch = 2,
    Mesh = 3,
    Billboard = 4,
    Flame = 5,
    Swirl = 6,
}

impl RenderTechnique {
    /// The order groups should be submitted in. Opaque geometry first, then
    /// animated effects, then anything blended.
    pub const DRAW_ORDER: [RenderTechnique; 7] = [
        RenderTechnique::Polygon,
        RenderTechnique::Mesh,
        RenderTechnique::Patch,
        RenderTechnique::Billboard,
        RenderTechnique::Flame,
        RenderTechnique::Swirl,
        RenderTechnique::Transparent,
    ];

    /// Texture classes that need their own shader override the face's type.
    pub fn for_face(face: &Face, class: TextureClass) -> RenderTechnique {
        match class {
            TextureClass::Transparent => RenderTechnique::Transparent,
            TextureClass::Flame => RenderTechnique::Flame,
            TextureClass::Swirl => RenderTechnique::Swirl,
            TextureClass::Normal => match face.face_type {
                FaceType::Polygon => RenderTechnique::Polygon,
                FaceType::Patch => RenderTechnique::Patch,
                FaceType::Mesh => RenderTechnique::Mesh,
                FaceType::Billboard => RenderTechnique::Billboard,
            },
        }
    }
}

/// A face that passed culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleFace {
    pub face_idx: u32,
    pub sort_key: u32,
}

/// Visible faces, grouped by technique and sorted to minimise texture binds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleFaces {
    groups: [Vec<VisibleFace>; 7],
}

impl VisibleFaces {
    pub fn get(&self, technique: RenderTechnique) -> &[VisibleFace] {
        &self.groups[technique as usize]
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Every visible face, in submission order.
    pub fn iter_draw_order(&self) -> impl Iterator<Item = (RenderTechnique, &VisibleFace)> + '_ {
        RenderTechnique::DRAW_ORDER
            .iter()
            .flat_map(move |&t| self.get(t).iter().map(move |f| (t, f)))
    }
}

/// Result of testing a box against a frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    Outside,
    Intersecting,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaneSide {
    Behind,
    InFront,
    On,
}

/// Six planes facing into the view volume: right, left, bottom, top, far, near.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: [Vector4<f32>; 6],
}

impl Frustum {
    /// Extract the planes from a combined view-projection matrix.
    pub fn from_matrix(m: &Matrix4<f32>) -> Frustum {
        let row = |i: usize| -> Vector4<f32> { m.row(i).transpose() };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let mut planes = [r3 - r0, r3 + r0, r3 + r1, r3 - r1, r3 - r2, r3 + r2];
        for plane in planes.iter_mut() {
            let len = plane.xyz().norm();
            if len > f32::EPSILON {
                *plane /= len;
            }
        }

        Frustum { planes }
    }

    fn side(point: &Vector3<f32>, plane: &Vector4<f32>) -> PlaneSide {
        let dist = point.dot(&plane.xyz()) + plane.w;
        if dist > PLANE_TOLERANCE {
            PlaneSide::InFront
        } else if dist < -PLANE_TOLERANCE {
            PlaneSide::Behind
        } else {
            PlaneSide::On
        }
    }

    /// Test a box given by its centre and half size. Only the corner furthest
    /// along each plane's normal needs checking to reject it.
    pub fn test_box(&self, center: &Vector3<f32>, half_dim: &Vector3<f32>) -> FrustumTest {
        let corner = |dir: Vector3<f32>| {
            center + half_dim.component_mul(&dir.map(|x| if x >= 0.0 { 1.0 } else { -1.0 }))
        };

        let mut result = FrustumTest::Inside;
        for plane in self.planes.iter() {
            let normal = plane.xyz();

            if Frustum::side(&corner(normal), plane) == PlaneSide::Behind {
                return FrustumTest::Outside;
            }
            if Frustum::side(&corner(-normal), plane) == PlaneSide::Behind {
                result = FrustumTest::Intersecting;
            }
        }

        result
    }
}

/// Find the faces visible from `camera`. Returns nothing if the camera is
/// outside the level.
pub fn find_visible_faces<S: CoordSystem, T: MinBspFeatures<S>>(
    file: &T,
    classes: &TextureClasses,
    camera: &Vector3<f32>,
    view_proj: &Matrix4<f32>,
) -> VisibleFaces {
    let mut visible = VisibleFaces::default();

    let cam_cluster = match file.locate_cluster(camera) {
        Some(c) => c,
        None => return visible,
    };

    let frustum = Frustum::from_matrix(view_proj);
    let mut seen = bitvec![u64, Lsb0; 0; file.faces_len() as usize];

    for leaf in file.leaves_iter() {
        if !file.clusters_mutually_visible(Some(cam_cluster), leaf.cluster_id) {
            continue;
        }

        let half_size = (leaf.max - leaf.min) * 0.5;
        if frustum.test_box(&(leaf.min + half_size), &half_size) == FrustumTest::Outside {
            continue;
        }

        for &face_idx in leaf.faces_idx.iter() {
            if seen.replace(face_idx as usize, true) {
                continue;
            }

            let face = file.get_face(face_idx);
            let class = face
                .texture_idx
                .map_or(TextureClass::Normal, |t| classes.get(t));
            let technique = RenderTechnique::for_face(face, class);
            visible.groups[technique as usize].push(VisibleFace {
                face_idx,
                sort_key: face.sort_key(),
            });
        }
    }

    for group in visible.groups.iter_mut() {
        group.sort_by_key(|f| f.sort_key);
    }

    visible
}

/// Which bindings need updating before drawing a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindChanges {
    /// The new diffuse texture, if it changed. `Some(None)` means unbind.
    pub diffuse: Option<Option<u32>>,
    pub lightmap: Option<Option<u32>>,
}

impl BindChanges {
    pub fn any(&self) -> bool {
        self.diffuse.is_some() || self.lightmap.is_some()
    }
}

/// Remembers what's currently bound while faces are submitted in order.
#[derive(Debug, Clone, Default)]
pub struct TextureBindTracker {
    diffuse: Option<Option<u32>>,
    lightmap: Option<Option<u32>>,
}

impl TextureBindTracker {
    pub fn new() -> TextureBindTracker {
        TextureBindTracker::default()
    }

    /// Record that `face` is about to be drawn.
    pub fn bind(&mut self, face: &Face) -> BindChanges {
        let diffuse = face.texture_idx;
        let lightmap = face.lightmap_idx;

        let changes = BindChanges {
            diffuse: Some(diffuse).filter(|d| self.diffuse != Some(*d)),
            lightmap: Some(lightmap).filter(|l| self.lightmap != Some(*l)),
        };

        self.diffuse = Some(diffuse);
        self.lightmap = Some(lightmap);

        changes
    }

    /// Forget everything, eg. after another renderer has touched the bindings.
    pub fn reset(&mut self) {
        *self = TextureBindTracker::default();
    }
}
