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

//! Small vector helpers shared by the trace and culling code.

use na::Vector3;

/// Normalise `v`, or return `fallback` if it's too short to have a direction.
pub fn safe_normalize(v: &Vector3<f32>, fallback: &Vector3<f32>) -> Vector3<f32> {
    let len = v.norm();
    if len < f32::EPSILON {
        *fallback
    } else {
        v / len
    }
}

/// The part of `v` lying in the plane with unit normal `normal`.
pub fn project_on_plane(normal: &Vector3<f32>, v: &Vector3<f32>) -> Vector3<f32> {
    v - normal * v.dot(normal)
}
