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

//! A complete BSP file

// Trait implementations are stored in their own files.

use log::debug;
use std::marker::PhantomData;

use super::faces::FaceRefs;
use super::header::{lump, Header};
use super::tree::{TreeLumps, TreeRefs};
use super::visdata::VisRows;
use super::*;
use crate::coords::*;
use crate::types::Result;

use crate::traits::brushes::Brush;
use crate::traits::effects::Effect;
use crate::traits::entities::Entity;
use crate::traits::faces::Face;
use crate::traits::light_maps::LightMap;
use crate::traits::light_vols::LightVol;
use crate::traits::models::Model;
use crate::traits::planes::Plane;
use crate::traits::textures::Texture;
use crate::traits::tree::{BspLeaf, BspNode};
use crate::traits::vertices::{MeshVert, Vertex};

/// A parsed Quake 3 BSP File.
pub struct Q3BspFile<T: CoordSystem> {
    pub(crate) visdata: VisRows,
    pub(crate) textures: Box<[Texture]>,
    pub(crate) entities: Box<[Entity]>,
    pub(crate) planes: Box<[Plane]>,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) meshverts: Vec<MeshVert>,
    pub(crate) light_maps: Box<[LightMap]>,
    pub(crate) light_vols: Box<[LightVol]>,
    pub(crate) brushes: Box<[Brush]>,
    pub(crate) effects: Box<[Effect]>,
    pub(crate) faces: Vec<Face>,
    pub(crate) models: Box<[Model]>,
    pub(crate) nodes: Box<[BspNode]>,
    pub(crate) leaves: Box<[BspLeaf]>,
    _phantom: PhantomData<T>,
}

impl Q3BspFile<Q3System> {
    /// Parse `data` as a quake 3 bsp file, multiplying every position and
    /// distance by `scale`.
    pub fn parse_file(data: &[u8], scale: f32) -> Result<Q3BspFile<Q3System>> {
        let header = Header::from(data)?;
        let get_lump = |index| header.get_lump(data, index);

        let entities = entities::from_data(get_lump(lump::ENTITIES)?)?;
        let textures = textures::from_data(get_lump(lump::TEXTURES)?)?;
        let planes = planes::from_data(get_lump(lump::PLANES)?, scale)?;
        let vertices = vertices::verts_from_data(get_lump(lump::VERTICES)?, scale)?;
        let meshverts = vertices::meshverts_from_data(get_lump(lump::MESH_VERTS)?)?;
        let light_maps = light_maps::from_data(get_lump(lump::LIGHT_MAPS)?)?;
        let light_vols = light_vols::from_data(get_lump(lump::LIGHT_VOLS)?)?;
        let visdata = visdata::from_data(get_lump(lump::VIS_DATA)?)?;
        let brushes = brushes::from_data(
            get_lump(lump::BRUSHES)?,
            get_lump(lump::BRUSH_SIDES)?,
            textures.len(),
            planes.len(),
        )?;
        let effects = effects::from_data(get_lump(lump::EFFECTS)?, brushes.len())?;
        let faces = faces::from_data(
            get_lump(lump::FACES)?,
            &FaceRefs {
                n_textures: textures.len(),
                n_effects: effects.len(),
                n_vertices: vertices.len(),
                n_lightmaps: light_maps.len(),
                meshverts: &meshverts,
            },
            scale,
        )?;

        let (nodes, leaves) = tree::from_data(
            &TreeLumps {
                nodes: get_lump(lump::NODES)?,
                leaves: get_lump(lump::LEAVES)?,
                leaf_faces: get_lump(lump::LEAF_FACES)?,
                leaf_brushes: get_lump(lump::LEAF_BRUSHES)?,
            },
            &TreeRefs {
                n_planes: planes.len(),
                n_faces: faces.len(),
                n_brushes: brushes.len(),
                n_clusters: if visdata.is_empty() {
                    None
                } else {
                    Some(visdata.len())
                },
            },
            scale,
        )?;

        let models = models::from_data(
            get_lump(lump::MODELS)?,
            faces.len(),
            brushes.len(),
            scale,
        )?;

        debug!(
            "Parsed {} textures, {} planes, {} nodes, {} leaves, {} brushes, {} faces, {} vertices, {} clusters",
            textures.len(),
            planes.len(),
            nodes.len(),
            leaves.len(),
            brushes.len(),
            faces.len(),
            vertices.len(),
            visdata.len()
        );

        Ok(Q3BspFile {
            visdata,
            textures,
            entities,
            planes,
            vertices,
            meshverts,
            light_maps,
            light_vols,
            brushes,
            effects,
            faces,
            models,
            nodes,
            leaves,
            _phantom: PhantomData,
        })
    }
}

impl<T: CoordSystem> Q3BspFile<T> {
    pub fn swizzle_to<D: CoordSystem>(mut self) -> Q3BspFile<D>
    where
        Swizzler: SwizzleFromTo<T, D>,
    {
        for vertex in self.vertices.iter_mut() {
            <Swizzler as SwizzleFromTo<T, D>>::swizzle(&mut vertex.normal);
            <Swizzler as SwizzleFromTo<T, D>>::swizzle(&mut vertex.position);
        }

        for model in self.models.iter_mut() {
            <Swizzler as SwizzleFromTo<T, D>>::swizzle_bounds(&mut model.mins, &mut model.maxs);
        }

        for node in self.nodes.iter_mut() {
            <Swizzler as SwizzleFromTo<T, D>>::swizzle_bounds(&mut node.min, &mut node.max);
        }

        for leaf in self.leaves.iter_mut() {
            <Swizzler as SwizzleFromTo<T, D>>::swizzle_bounds(&mut leaf.min, &mut leaf.max);
        }

        for face in self.faces.iter_mut() {
            <Swizzler as SwizzleFromTo<T, D>>::swizzle(&mut face.normal);
        }

        for plane in self.planes.iter_mut() {
            <Swizzler as SwizzleFromTo<T, D>>::swizzle(&mut plane.normal);
        }

        Q3BspFile {
            visdata: self.visdata,
            textures: self.textures,
            entities: self.entities,
            planes: self.planes,
            vertices: self.vertices,
            meshverts: self.meshverts,
            light_maps: self.light_maps,
            light_vols: self.light_vols,
            brushes: self.brushes,
            effects: self.effects,
            faces: self.faces,
            models: self.models,
            nodes: self.nodes,
            leaves: self.leaves,
            _phantom: PhantomData,
        }
    }

    /// Reverse the order of every triangle in the mesh vert list.
    pub fn flip_winding(&mut self) {
        for tri in self.meshverts.chunks_exact_mut(3) {
            tri.swap(0, 2);
        }
    }

    /// True if parsing left nothing to query.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() || self.vertices.is_empty()
    }
}
