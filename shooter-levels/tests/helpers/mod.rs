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

//! Writes small levels byte-for-byte in the on-disk layout.
#![allow(dead_code)]

use std::path::PathBuf;

pub const CONTENTS_SOLID: i32 = 0x1;
pub const CONTENTS_WATER: i32 = 0x20;

pub const FACE_POLYGON: i32 = 1;
pub const FACE_PATCH: i32 = 2;

const N_LUMPS: usize = 17;

/// Assert two floats are within `tolerance` of each other.
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}

/// A scratch directory that's removed when dropped.
pub struct TempDir(pub PathBuf);

impl TempDir {
    pub fn new(name: &str) -> TempDir {
        let path = std::env::temp_dir().join(format!(
            "shooter-levels-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[derive(Debug, Clone, Default)]
pub struct BspBuilder {
    lumps: Vec<Vec<u8>>,
    magic: Option<[u8; 4]>,
}

fn ints(out: &mut Vec<u8>, vals: &[i32]) {
    for v in vals {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn floats(out: &mut Vec<u8>, vals: &[f32]) {
    for v in vals {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

impl BspBuilder {
    pub fn new() -> BspBuilder {
        BspBuilder {
            lumps: vec![Vec::new(); N_LUMPS],
            magic: None,
        }
    }

    pub fn magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = Some(*magic);
        self
    }

    pub fn entities(mut self, text: &str) -> Self {
        self.lumps[0] = text.as_bytes().to_vec();
        self
    }

    pub fn texture(mut self, name: &str, contents: i32) -> Self {
        let mut raw = [0u8; 64];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        self.lumps[1].extend_from_slice(&raw);
        ints(&mut self.lumps[1], &[0, contents]);
        self
    }

    pub fn plane(mut self, normal: [f32; 3], dist: f32) -> Self {
        floats(&mut self.lumps[2], &normal);
        floats(&mut self.lumps[2], &[dist]);
        self
    }

    pub fn node(mut self, plane: i32, children: [i32; 2], mins: [i32; 3], maxs: [i32; 3]) -> Self {
        ints(&mut self.lumps[3], &[plane, children[0], children[1]]);
        ints(&mut self.lumps[3], &mins);
        ints(&mut self.lumps[3], &maxs);
        self
    }

    /// `faces` and `brushes` are `(first, count)` into the leaf face and leaf brush lists.
    pub fn leaf(
        mut self,
        cluster: i32,
        mins: [i32; 3],
        maxs: [i32; 3],
        faces: (i32, i32),
        brushes: (i32, i32),
    ) -> Self {
        ints(&mut self.lumps[4], &[cluster, 0]);
        ints(&mut self.lumps[4], &mins);
        ints(&mut self.lumps[4], &maxs);
        ints(&mut self.lumps[4], &[faces.0, faces.1, brushes.0, brushes.1]);
        self
    }

    pub fn leaf_faces(mut self, faces: &[i32]) -> Self {
        ints(&mut self.lumps[5], faces);
        self
    }

    pub fn leaf_brushes(mut self, brushes: &[i32]) -> Self {
        ints(&mut self.lumps[6], brushes);
        self
    }

    pub fn model(mut self, mins: [f32; 3], maxs: [f32; 3], faces: (i32, i32), brushes: (i32, i32)) -> Self {
        floats(&mut self.lumps[7], &mins);
        floats(&mut self.lumps[7], &maxs);
        ints(&mut self.lumps[7], &[faces.0, faces.1, brushes.0, brushes.1]);
        self
    }

    pub fn brush(mut self, first_side: i32, n_sides: i32, texture: i32) -> Self {
        ints(&mut self.lumps[8], &[first_side, n_sides, texture]);
        self
    }

    pub fn brush_side(mut self, plane: i32, texture: i32) -> Self {
        ints(&mut self.lumps[9], &[plane, texture]);
        self
    }

    pub fn vertex(mut self, position: [f32; 3], normal: [f32; 3]) -> Self {
        floats(&mut self.lumps[10], &position);
        floats(&mut self.lumps[10], &[position[0] / 64.0, position[1] / 64.0, 0.5, 0.5]);
        floats(&mut self.lumps[10], &normal);
        self.lumps[10].extend_from_slice(&[255, 255, 255, 255]);
        self
    }

    pub fn meshverts(mut self, indices: &[i32]) -> Self {
        ints(&mut self.lumps[11], indices);
        self
    }

    pub fn face(
        mut self,
        texture: i32,
        face_type: i32,
        vertices: (i32, i32),
        meshverts: (i32, i32),
        size: [i32; 2],
    ) -> Self {
        let lump = &mut self.lumps[13];
        ints(
            lump,
            &[
                texture,
                -1,
                face_type,
                vertices.0,
                vertices.1,
                meshverts.0,
                meshverts.1,
                -1,
                0,
                0,
                0,
                0,
            ],
        );
        floats(lump, &[0.0; 3]);
        floats(lump, &[0.0; 6]);
        floats(lump, &[0.0, 0.0, 1.0]);
        ints(lump, &size);
        self
    }

    /// One row of bytes per cluster.
    pub fn visdata(mut self, rows: &[&[u8]]) -> Self {
        let size = rows.first().map(|r| r.len()).unwrap_or(0);
        let lump = &mut self.lumps[16];
        lump.clear();
        ints(lump, &[rows.len() as i32, size as i32]);
        for row in rows {
            lump.extend_from_slice(row);
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let header_len = 8 + N_LUMPS * 8;
        let mut out = Vec::new();
        out.extend_from_slice(self.magic.as_ref().unwrap_or(b"IBSP"));
        ints(&mut out, &[0x2e]);

        let mut offset = header_len;
        for lump in self.lumps.iter() {
            ints(&mut out, &[offset as i32, lump.len() as i32]);
            offset += lump.len();
        }

        for lump in self.lumps.iter() {
            out.extend_from_slice(lump);
        }

        out
    }
}

/// Textures: 0 is solid, 1 is water.
///
/// Brush 0 is a floor filling x, y in -64..64 and z in -16..0. Brush 1 is a
/// wall filling x in 32..48, y and z in -64..64. Brush 2 is water with the
/// same shape as the floor.
///
/// The root node splits on z = 0 (plane 0). Leaf 0 (cluster 0) is above it,
/// holding the wall and face 1. Leaf 1 (cluster 1) is below, holding all three
/// brushes and both faces.
///
/// Face 0 is a solid square on the floor, face 1 the same square with the
/// water texture.
pub fn test_level() -> BspBuilder {
    BspBuilder::new()
        .entities("{\n\"classname\" \"worldspawn\"\n\"message\" \"test level\"\n}\n")
        .texture("textures/base/floor", CONTENTS_SOLID)
        .texture("textures/liquids/water", CONTENTS_WATER)
        .plane([0.0, 0.0, 1.0], 0.0)
        .plane([0.0, 0.0, -1.0], 16.0)
        .plane([1.0, 0.0, 0.0], 64.0)
        .plane([-1.0, 0.0, 0.0], 64.0)
        .plane([0.0, 1.0, 0.0], 64.0)
        .plane([0.0, -1.0, 0.0], 64.0)
        .plane([1.0, 0.0, 0.0], 48.0)
        .plane([-1.0, 0.0, 0.0], -32.0)
        .plane([0.0, 0.0, 1.0], 64.0)
        .plane([0.0, 0.0, -1.0], 64.0)
        .node(0, [-1, -2], [-64, -64, -16], [64, 64, 64])
        .leaf(0, [-64, -64, 0], [64, 64, 64], (0, 1), (0, 1))
        .leaf(1, [-64, -64, -16], [64, 64, 0], (1, 2), (1, 3))
        .leaf_faces(&[1, 0, 1])
        .leaf_brushes(&[1, 0, 1, 2])
        .model([-64.0, -64.0, -16.0], [64.0, 64.0, 64.0], (0, 2), (0, 3))
        .brush(0, 6, 0)
        .brush(6, 6, 0)
        .brush(0, 6, 1)
        .brush_side(0, 0)
        .brush_side(1, 0)
        .brush_side(2, 0)
        .brush_side(3, 0)
        .brush_side(4, 0)
        .brush_side(5, 0)
        .brush_side(6, 0)
        .brush_side(7, 0)
        .brush_side(4, 0)
        .brush_side(5, 0)
        .brush_side(8, 0)
        .brush_side(9, 0)
        .vertex([-32.0, -32.0, 0.0], [0.0, 0.0, 1.0])
        .vertex([32.0, -32.0, 0.0], [0.0, 0.0, 1.0])
        .vertex([32.0, 32.0, 0.0], [0.0, 0.0, 1.0])
        .vertex([-32.0, 32.0, 0.0], [0.0, 0.0, 1.0])
        .meshverts(&[0, 1, 2, 0, 2, 3])
        .face(0, FACE_POLYGON, (0, 4), (0, 6), [0, 0])
        .face(1, FACE_POLYGON, (0, 4), (0, 6), [0, 0])
}
