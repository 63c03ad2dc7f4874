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

//! Flame faces are rebuilt into quads when a map is loaded.

extern crate nalgebra as na;

mod helpers;

use helpers::*;
use na::{Matrix4, Vector3};
use shooter_levels::prelude::*;
use shooter_levels::resolver::TextureClass;

/// One upright 16x32 flame face, in a single leaf.
fn flame_level() -> Vec<u8> {
    BspBuilder::new()
        .texture("textures/sfx/flame1", 0)
        .vertex([0.0, 0.0, 0.0], [0.0, -1.0, 0.0])
        .vertex([0.0, 0.0, 32.0], [0.0, -1.0, 0.0])
        .vertex([16.0, 0.0, 32.0], [0.0, -1.0, 0.0])
        .vertex([16.0, 0.0, 0.0], [0.0, -1.0, 0.0])
        .meshverts(&[0, 1, 2, 0, 2, 3])
        .face(0, FACE_POLYGON, (0, 4), (0, 6), [0, 0])
        .leaf(0, [-64, -64, -64], [64, 64, 64], (0, 1), (0, 0))
        .leaf_faces(&[0])
        .build()
}

fn load(regenerate_flames: bool) -> Q3Map {
    let dir = TempDir::new(if regenerate_flames { "flames" } else { "no-flames" });
    let config = LoadConfig {
        scale: 1.0,
        regenerate_flames,
        ..LoadConfig::default()
    };

    Q3Map::from_parts(&flame_level(), Box::new(DirSource::new(&dir.0)), &config).unwrap()
}

#[test]
fn flame_faces_become_quads() {
    let map = load(true);
    let file = map.file();
    assert_eq!(map.texture_class(0), TextureClass::Flame);

    let face = file.get_face(0);
    assert_eq!(face.vertices_idx, 0..4);
    assert_eq!(face.meshverts_idx, 6..12);

    let indices: Vec<_> = face.meshverts_idx.clone().map(|i| file.get_meshvert(i)).collect();
    assert_eq!(indices, vec![0, 2, 1, 0, 1, 3]);

    // The winding flip runs first, so the corners are read as
    // (16, 32), (0, 32), (0, 0) in rendering co-ordinates
    let half_width = 16.0;
    let half_height = (16.0f32 * 16.0 + 32.0 * 32.0).sqrt() / 2.0;

    let quad: Vec<_> = (0..4).map(|i| file.get_vertex(i).position).collect();
    let centre = quad.iter().fold(Vector3::zeros(), |acc, p| acc + p) / 4.0;
    assert_close(centre.x, 8.0, 1e-4);
    assert_close(centre.y, 32.0, 1e-4);
    assert!(quad.iter().all(|p| p.z == 0.0));

    assert_close(quad[3].x - quad[0].x, 2.0 * half_width, 1e-4);
    assert_close(quad[0].y - quad[2].y, 2.0 * half_height, 1e-4);

    assert_eq!(file.get_vertex(0).tex.surface, [1.0, 0.0]);
    assert_eq!(file.get_vertex(2).tex.surface, [1.0, 1.0]);

    let origin = map.flame_origin(0).unwrap();
    assert_close(origin.x, 8.0, 1e-4);
    assert_close(origin.y, 32.0 - half_height, 1e-4);
}

#[test]
fn flames_can_be_left_alone() {
    let map = load(false);
    let face = map.file().get_face(0);

    assert_eq!(face.meshverts_idx, 0..6);
    assert_eq!(map.file().get_vertex(1).position, Vector3::new(0.0, 32.0, 0.0));
}

#[test]
fn flames_are_drawn_with_their_own_technique() {
    let map = load(true);
    let visible = map.find_visible_faces(&Vector3::new(0.0, 10.0, 0.0), &Matrix4::new_scaling(0.01));

    assert_eq!(visible.get(RenderTechnique::Flame).len(), 1);
    assert_eq!(visible.get(RenderTechnique::Polygon).len(), 0);
}
