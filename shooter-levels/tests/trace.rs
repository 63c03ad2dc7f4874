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

//! Sweeping shapes through the test level.

extern crate nalgebra as na;

mod helpers;

use helpers::*;
use na::Vector3;
use shooter_levels::coords::Q3System;
use shooter_levels::prelude::*;
use shooter_levels::trace::trace;
use shooter_levels::traits::textures::ContentsFlags;

fn level() -> Q3BspFile<Q3System> {
    Q3BspFile::parse_file(&test_level().build(), 1.0).unwrap()
}

fn run(file: &Q3BspFile<Q3System>, request: &TraceRequest) -> TraceResult {
    trace::<Q3System, _>(file, request)
}

#[test]
fn point_stops_at_floor() {
    let file = level();
    let request = TraceRequest::point(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -10.0));
    let result = run(&file, &request);

    assert!(result.collision);
    assert!(result.starts_out);
    assert_eq!(result.plane_idx, Some(0));
    assert_close(result.fraction, (10.0 - 1e-4) / 20.0, 1e-6);
    assert_close(result.end_position(&request).z, 0.0, 1e-3);
    assert!(result.contents.contains(ContentsFlags::SOLID));
}

#[test]
fn further_ends_stop_at_the_same_place() {
    let file = level();
    let start = Vector3::new(0.0, 0.0, 10.0);

    let mut last_fraction = 1.0;
    for depth in [1.0f32, 2.0, 5.0, 10.0, 15.0].iter() {
        let end = Vector3::new(0.0, 0.0, -depth);
        let request = TraceRequest::point(start, end);
        let result = run(&file, &request);

        assert!(result.collision);
        assert!(result.fraction >= 0.0 && result.fraction <= 1.0);
        // Longer movements reach the floor after a smaller share of their length
        assert!(result.fraction <= last_fraction);
        last_fraction = result.fraction;

        let normal = file.get_plane(result.plane_idx.unwrap()).normal;
        assert!(normal.dot(&(end - start)) < 0.0);
        assert_close(result.end_position(&request).z, 0.0, 1e-3);
    }
}

#[test]
fn identical_requests_give_identical_results() {
    let file = level();
    let request = TraceRequest::sphere(
        Vector3::new(-20.0, 3.0, 30.0),
        Vector3::new(60.0, -7.0, -5.0),
        2.5,
    );

    let copied = request;
    let first = run(&file, &request);
    let second = run(&file, &copied);
    assert_eq!(first, second);
}

#[test]
fn start_inside_brush_is_all_solid() {
    let file = level();
    let request = TraceRequest::point(Vector3::new(0.0, 0.0, -8.0), Vector3::new(0.0, 0.0, -4.0));
    let result = run(&file, &request);

    assert!(!result.starts_out);
    assert!(result.all_solid);
    assert_eq!(result.plane_idx, None);
    assert_eq!(result.fraction, 1.0);
}

#[test]
fn start_inside_brush_ending_outside() {
    let file = level();
    let request = TraceRequest::point(Vector3::new(0.0, 0.0, -8.0), Vector3::new(0.0, 0.0, 8.0));
    let result = run(&file, &request);

    assert!(!result.starts_out);
    assert!(!result.all_solid);
    assert!(!result.collision);
}

#[test]
fn clear_path_reaches_the_end() {
    let file = level();
    let request = TraceRequest::point(Vector3::new(0.0, 0.0, 32.0), Vector3::new(16.0, 0.0, 32.0));
    let result = run(&file, &request);

    assert!(!result.collision);
    assert_eq!(result.fraction, 1.0);
    assert_eq!(result.plane_idx, None);
    assert_eq!(result.plane_proj, Vector3::zeros());
}

#[test]
fn box_rests_half_height_above_floor() {
    let file = level();
    let request = TraceRequest::aabb(
        Vector3::new(0.0, 0.0, 10.0),
        Vector3::new(0.0, 0.0, -10.0),
        Vector3::new(-1.0, -1.0, -2.0),
        Vector3::new(1.0, 1.0, 2.0),
    );
    let result = run(&file, &request);

    assert!(result.collision);
    assert_eq!(result.plane_idx, Some(0));
    assert_close(result.end_position(&request).z, 2.0, 1e-3);
}

#[test]
fn sphere_stops_radius_short_of_wall() {
    let file = level();
    let request = TraceRequest::sphere(
        Vector3::new(0.0, 0.0, 32.0),
        Vector3::new(64.0, 0.0, 32.0),
        4.0,
    );
    let result = run(&file, &request);

    assert!(result.collision);
    assert_eq!(result.plane_idx, Some(7));
    assert_close(result.end_position(&request).x, 28.0, 1e-3);
}

#[test]
fn box_straddling_wall_side_uses_biased_fraction() {
    let file = level();
    let request = TraceRequest::aabb(
        Vector3::new(0.0, 0.0, 32.0),
        Vector3::new(64.0, 0.0, 32.0),
        Vector3::new(-2.0, -2.0, -2.0),
        Vector3::new(2.0, 2.0, 2.0),
    );
    let result = run(&file, &request);

    // The wall's -x side sits at x = 32, pushed out by the box's half width
    let start_dist: f32 = 32.0 - 2.0;
    let end_dist: f32 = 32.0 - 2.0 - 64.0;
    let expected = (start_dist - 1e-4) / (start_dist - end_dist);

    assert!(result.collision);
    assert!(result.fraction > 0.0 && result.fraction < 1.0);
    assert_close(result.fraction, expected, 1e-6);
}

#[test]
fn slide_vector_runs_along_wall() {
    let file = level();
    let request = TraceRequest::point(Vector3::new(0.0, -16.0, 32.0), Vector3::new(64.0, 16.0, 32.0));
    let result = run(&file, &request);

    assert!(result.collision);
    let normal = file.get_plane(result.plane_idx.unwrap()).normal;

    assert_close(result.plane_proj.dot(&normal), 0.0, 1e-5);
    assert!(result.plane_proj.y > 0.0);
}

#[test]
fn water_doesnt_block() {
    let data = BspBuilder::new()
        .texture("textures/liquids/water", CONTENTS_WATER)
        .plane([1.0, 0.0, 0.0], 8.0)
        .plane([-1.0, 0.0, 0.0], 8.0)
        .plane([0.0, 1.0, 0.0], 8.0)
        .plane([0.0, -1.0, 0.0], 8.0)
        .plane([0.0, 0.0, 1.0], 8.0)
        .plane([0.0, 0.0, -1.0], 8.0)
        .brush(0, 6, 0)
        .brush_side(0, 0)
        .brush_side(1, 0)
        .brush_side(2, 0)
        .brush_side(3, 0)
        .brush_side(4, 0)
        .brush_side(5, 0)
        .leaf(0, [-8, -8, -8], [8, 8, 8], (0, 0), (0, 1))
        .leaf_brushes(&[0])
        .build();
    let file = Q3BspFile::parse_file(&data, 1.0).unwrap();

    let request = TraceRequest::point(Vector3::new(-20.0, 0.0, 0.0), Vector3::new(20.0, 0.0, 0.0));
    let result = run(&file, &request);

    assert!(!result.collision);
    assert!(result.starts_out);
    assert_eq!(result.fraction, 1.0);
}
