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

//! Helper functions for parsing

use na::{Vector2, Vector3};

use crate::types::{ParseError, Result};

/// Turn a slice into a le i32, the int datatype in a bsp file.
/// # Panics
/// If slice is shorter than 4 bytes
pub fn slice_to_i32(slice: &[u8]) -> i32 {
    i32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]])
}

/// Turn a slice into a le u32, used for some bitflags.
/// # Panics
/// If slice is shorter than 4 bytes.
pub fn slice_to_u32(slice: &[u8]) -> u32 {
    u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]])
}

/// Turn a slice into a le f32, the float datatype in a bsp file.
/// # Panics
/// If slice is shorter than 4 bytes
pub fn slice_to_f32(slice: &[u8]) -> f32 {
    f32::from_bits(slice_to_u32(slice))
}

/// Turn a slice of floats into a 3D vector
/// # Panics
/// If slice is shorter than 12 bytes.
pub fn slice_to_vec3(slice: &[u8]) -> Vector3<f32> {
    Vector3::new(
        slice_to_f32(&slice[0..4]),
        slice_to_f32(&slice[4..8]),
        slice_to_f32(&slice[8..12]),
    )
}

/// Turn a slice of i32s into a 3D float vector.
/// Node and leaf bounds are stored as integers.
/// # Panics
/// If slice is shorter than 12 bytes.
pub fn slice_to_vec3i(slice: &[u8]) -> Vector3<f32> {
    Vector3::new(
        slice_to_i32(&slice[0..4]) as f32,
        slice_to_i32(&slice[4..8]) as f32,
        slice_to_i32(&slice[8..12]) as f32,
    )
}

/// Turn a slice of floats into a 2D vector
/// # Panics
/// If slice is shorter than 8 bytes.
pub fn slice_to_vec2(slice: &[u8]) -> Vector2<f32> {
    Vector2::new(slice_to_f32(&slice[0..4]), slice_to_f32(&slice[4..8]))
}

/// Turn a slice of i32s into a 2D vector
/// # Panics
/// If slice is shorter than 8 bytes.
pub fn slice_to_vec2i(slice: &[u8]) -> Vector2<i32> {
    Vector2::new(slice_to_i32(&slice[0..4]), slice_to_i32(&slice[4..8]))
}

/// Check a lump holds a whole number of `record_size` records, and return how many.
pub fn record_count(lump: &[u8], record_size: usize, what: &'static str) -> Result<usize> {
    if lump.len() % record_size != 0 {
        return Err(ParseError::Invalid(what));
    }

    Ok(lump.len() / record_size)
}

/// Read a signed index, checking it's non-negative and below `len`.
pub fn checked_index(raw: i32, len: usize, what: &'static str) -> Result<u32> {
    if raw < 0 || raw as usize >= len {
        return Err(ParseError::Invalid(what));
    }

    Ok(raw as u32)
}

/// Read a signed `(start, count)` pair, checking the range fits inside `len`.
pub fn checked_range(
    start: i32,
    count: i32,
    len: usize,
    what: &'static str,
) -> Result<std::ops::Range<u32>> {
    if start < 0 || count < 0 || start as usize + count as usize > len {
        return Err(ParseError::Invalid(what));
    }

    Ok(start as u32..start as u32 + count as u32)
}
