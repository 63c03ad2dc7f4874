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

use std::iter::Iterator;

pub type ClusterId = u32;

pub trait HasVisData {
    /// The iterator returned from all_visible_from
    type VisibleIterator<'a>: Iterator<Item = ClusterId>
    where
        Self: 'a;

    /// Whether the level carries visibility data at all.
    fn has_visdata(&self) -> bool;

    /// Number of clusters the visibility data covers.
    fn clusters_len(&self) -> u32;

    /// Returns an iterator of all clusters visible from the given Cluster ID
    fn all_visible_from(&self, from: ClusterId) -> Self::VisibleIterator<'_>;

    /// Returns true if `dest` is visible from `from`.
    fn cluster_visible_from(&self, from: ClusterId, dest: ClusterId) -> bool;

    /// Visibility between two optional clusters. Without visdata everything is
    /// visible, as is anything outside the playable area.
    fn clusters_mutually_visible(&self, from: Option<ClusterId>, dest: Option<ClusterId>) -> bool {
        if !self.has_visdata() {
            return true;
        }

        match (from, dest) {
            (Some(from), Some(dest)) => self.cluster_visible_from(from, dest),
            _ => true,
        }
    }
}
