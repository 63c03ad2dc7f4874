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

//! Loading levels and the post-processing done on them.

extern crate nalgebra as na;

mod helpers;

use std::fs;

use helpers::*;
use image::{RgbImage, RgbaImage};
use na::Vector3;
use shooter_levels::prelude::*;
use shooter_levels::resolver::{load_skybox, TextureClass};
use shooter_levels::types::ParseError;

fn config() -> LoadConfig {
    LoadConfig {
        scale: 1.0,
        ..LoadConfig::default()
    }
}

fn write_image(dir: &TempDir, name: &str, alpha: bool) {
    let path = dir.0.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    if alpha {
        RgbaImage::new(2, 2).save(&path).unwrap();
    } else {
        RgbImage::new(2, 2).save(&path).unwrap();
    }
}

#[test]
fn wrong_magic_is_unsupported() {
    let data = test_level().magic(b"VBSP").build();
    assert_eq!(
        Q3BspFile::parse_file(&data, 1.0).err(),
        Some(ParseError::Unsupported)
    );
}

#[test]
fn short_file_is_invalid() {
    let data = test_level().build();
    assert!(matches!(
        Q3BspFile::parse_file(&data[..40], 1.0).err(),
        Some(ParseError::Invalid(_))
    ));
}

#[test]
fn out_of_range_side_plane_is_invalid() {
    let data = BspBuilder::new()
        .texture("textures/base/floor", CONTENTS_SOLID)
        .plane([0.0, 0.0, 1.0], 0.0)
        .brush(0, 1, 0)
        .brush_side(42, 0)
        .build();

    assert_eq!(
        Q3BspFile::parse_file(&data, 1.0).err(),
        Some(ParseError::Invalid("brush side plane out of range"))
    );
}

#[test]
fn out_of_range_leaf_brush_is_invalid() {
    let data = test_level().leaf_brushes(&[7]).build();
    assert!(matches!(
        Q3BspFile::parse_file(&data, 1.0).err(),
        Some(ParseError::Invalid(_))
    ));
}

#[test]
fn parses_every_lump() {
    let file = Q3BspFile::parse_file(&test_level().build(), 0.5).unwrap();

    assert_eq!(file.textures_len(), 2);
    assert_eq!(file.get_texture(1).name, "textures/liquids/water");
    assert!(file.get_texture(0).is_solid());
    assert!(!file.get_texture(1).is_solid());

    assert_eq!(file.planes_iter().count(), 10);
    assert_close(file.get_plane(2).dist, 32.0, 1e-6);

    assert_eq!(file.nodes_len(), 1);
    assert_eq!(file.leaves_len(), 2);
    assert_eq!(&file.get_leaf(1).brushes_idx[..], &[0, 1, 2]);
    assert_eq!(file.get_leaf(0).max, Vector3::new(32.0, 32.0, 32.0));

    assert_eq!(file.brushes_len(), 3);
    assert_eq!(file.get_brush(1).sides.len(), 6);
    assert_eq!(file.faces_len(), 2);
    assert_eq!(file.vertices_len(), 4);
    assert_eq!(file.get_vertex(1).position, Vector3::new(16.0, -16.0, 0.0));
    assert_eq!(file.models_iter().count(), 1);
    assert!(!file.has_visdata());

    let entity = file.entities_iter().next().unwrap();
    assert_eq!(entity.get("message"), Some("test level"));
}

#[test]
fn locate_leaf_follows_plane() {
    let file = Q3BspFile::parse_file(&test_level().build(), 1.0).unwrap();

    for (point, leaf) in [
        (Vector3::new(0.0, 0.0, 5.0), 0),
        (Vector3::new(10.0, -3.0, -5.0), 1),
        (Vector3::new(0.0, 0.0, 0.0), 0),
    ]
    .iter()
    {
        let found = file.locate_leaf(point).unwrap();
        assert_eq!(found, *leaf);

        let leaf = file.get_leaf(found);
        assert!((0..3).all(|i| leaf.min[i] <= point[i] && point[i] <= leaf.max[i]));
    }
}

#[test]
fn map_is_in_rendering_coordinates() {
    let dir = TempDir::new("coords");
    let map = Q3Map::from_parts(
        &test_level().build(),
        Box::new(DirSource::new(&dir.0)),
        &config(),
    )
    .unwrap();
    let file = map.file();

    // Up becomes -z
    assert_eq!(file.get_plane(4).normal, Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(file.get_vertex(0).position, Vector3::new(-32.0, 0.0, 32.0));

    for leaf in file.leaves_iter() {
        assert!((0..3).all(|i| leaf.min[i] <= leaf.max[i]));
    }

    let geometry = map.solid_geometry();
    assert_eq!(geometry.bounds_min, Vector3::new(-64.0, -16.0, -64.0));
    assert_eq!(geometry.bounds_max, Vector3::new(64.0, 64.0, 64.0));
}

#[test]
fn solid_geometry_skips_water() {
    let dir = TempDir::new("geometry");
    let map = Q3Map::from_parts(
        &test_level().build(),
        Box::new(DirSource::new(&dir.0)),
        &config(),
    )
    .unwrap();

    let geometry = map.solid_geometry();
    assert_eq!(geometry.positions.len(), 12);
    assert_eq!(geometry.normals.len(), 12);

    // Winding has been flipped
    assert_eq!(geometry.indices, vec![2, 1, 0, 3, 2, 0]);
}

#[test]
fn untextured_faces_load() {
    let dir = TempDir::new("untextured");
    let level = test_level().face(-1, FACE_POLYGON, (0, 4), (0, 6), [0, 0]);
    let map = Q3Map::from_parts(&level.build(), Box::new(DirSource::new(&dir.0)), &config()).unwrap();

    let face = map.file().get_face(2);
    assert_eq!(face.texture_idx, None);
    assert_eq!(face.sort_key(), 0);

    // Only the floor face is solid
    assert_eq!(map.solid_geometry().indices, vec![2, 1, 0, 3, 2, 0]);
}

#[test]
fn textures_are_resolved_and_classified() {
    let dir = TempDir::new("textures");
    write_image(&dir, "textures/base/floor.png", false);
    write_image(&dir, "textures/liquids/water.tga", true);

    let map = Q3Map::from_parts(
        &test_level().build(),
        Box::new(DirSource::new(&dir.0)),
        &config(),
    )
    .unwrap();

    assert!(map.texture_image(0).is_some());
    assert_eq!(map.texture_class(0), TextureClass::Normal);
    assert!(map.texture_image(1).is_some());
    assert_eq!(map.texture_class(1), TextureClass::Transparent);
}

#[test]
fn missing_textures_fall_back_to_placeholder() {
    let dir = TempDir::new("placeholder");
    write_image(&dir, "placeholder.png", false);

    let mut config = config();
    config.placeholder_texture = "placeholder.png".into();
    let map = Q3Map::from_parts(&test_level().build(), Box::new(DirSource::new(&dir.0)), &config)
        .unwrap();

    assert_eq!(map.texture_image(0).map(|i| i.dimensions()), Some((2, 2)));
    assert!(map.texture_image(5).is_none());
}

#[test]
fn open_bare_level_and_trace_in_parallel() {
    let dir = TempDir::new("open");
    let path = dir.0.join("test.bsp");
    fs::write(&path, test_level().build()).unwrap();

    let map = Q3Map::open(&path, &config()).unwrap();
    assert!(!map.is_empty());

    // Rendering coordinates: the floor's top is at y = 0
    let requests: Vec<_> = (0..16)
        .map(|i| {
            let x = i as f32 * 4.0 - 30.0;
            TraceRequest::point(Vector3::new(x, 10.0, 0.0), Vector3::new(x, -10.0, 0.0))
        })
        .collect();

    let batch = map.trace_many(&requests);
    assert_eq!(batch.len(), requests.len());
    for (request, result) in requests.iter().zip(batch.iter()) {
        assert_eq!(&map.trace(request), result);
        assert!(result.collision);
        assert_close(result.end_position(request).y, 0.0, 1e-3);
    }
}

#[test]
fn unknown_extension_is_an_error() {
    let err = Q3Map::open("level.txt", &config()).err().unwrap();
    assert!(matches!(err, LoadError::UnknownFileType(_)));
}

#[test]
fn patches_are_tessellated() {
    let mut builder = BspBuilder::new().texture("textures/base/curve", CONTENTS_SOLID);
    for row in 0..3 {
        for col in 0..3 {
            let height = if row == 1 && col == 1 { 16.0 } else { 0.0 };
            builder = builder.vertex(
                [col as f32 * 16.0, row as f32 * 16.0, height],
                [0.0, 0.0, 1.0],
            );
        }
    }
    let data = builder
        .face(0, FACE_PATCH, (0, 9), (0, 0), [3, 3])
        .leaf(-1, [0, 0, 0], [32, 32, 16], (0, 1), (0, 0))
        .leaf_faces(&[0])
        .build();

    let dir = TempDir::new("patch");
    let map = Q3Map::from_parts(&data, Box::new(DirSource::new(&dir.0)), &config()).unwrap();
    let face = map.file().get_face(0);

    assert_eq!(face.vertices_idx.len(), 81);
    assert_eq!(face.meshverts_idx.len(), 2 * 8 * 8 * 3);
    assert_eq!(face.vertices_idx.start, 9);
}

#[test]
fn patches_can_be_left_as_control_points() {
    let mut builder = BspBuilder::new().texture("textures/base/curve", CONTENTS_SOLID);
    for i in 0..15 {
        builder = builder.vertex([i as f32, 0.0, 0.0], [0.0, 0.0, 1.0]);
    }
    let data = builder.face(0, FACE_PATCH, (0, 15), (0, 0), [5, 3]).build();

    let file = {
        let mut file = Q3BspFile::parse_file(&data, 1.0).unwrap();
        file.index_patches();
        file
    };
    let face = file.get_face(0);

    // Two 3x3 blocks, the second starting two columns along
    assert_eq!(face.meshverts_idx.len(), 18);
    let indices: Vec<_> = face.meshverts_idx.clone().map(|i| file.get_meshvert(i)).collect();
    assert_eq!(&indices[..9], &[0, 1, 2, 5, 6, 7, 10, 11, 12]);
    assert_eq!(&indices[9..], &[2, 3, 4, 7, 8, 9, 12, 13, 14]);
}

#[test]
fn skybox_falls_back_to_next_extension() {
    let dir = TempDir::new("skybox");
    for suffix in ["_rt", "_lf", "_up", "_dn", "_bk"].iter() {
        write_image(&dir, &format!("env/sky{}.png", suffix), false);
    }
    for suffix in ["_rt", "_lf", "_up", "_dn", "_bk", "_ft"].iter() {
        write_image(&dir, &format!("env/sky{}.tga", suffix), false);
    }

    let source = DirSource::new(&dir.0);
    let skybox = load_skybox(&source, "env/sky").unwrap();
    assert_eq!(skybox.extension, ".tga");
    assert_eq!(skybox.faces.len(), 6);

    assert!(matches!(
        load_skybox(&source, "env/missing"),
        Err(LoadError::Skybox(_))
    ));
}
