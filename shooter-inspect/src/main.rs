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

//! Loads a level and logs what's in it. Optionally runs a trace or a
//! visibility query against it.
//!
//! ```text
//! shooter-inspect <level.pk3|level.bsp> [--config map.ini]
//!     [--trace sx sy sz ex ey ez] [--radius r]
//!     [--look px py pz tx ty tz]
//! ```

extern crate nalgebra as na;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use na::{Matrix4, Point3, Vector3};
use std::path::PathBuf;
use structopt::StructOpt;

use shooter_levels::map::full_error_display;
use shooter_levels::prelude::*;

/// Command line options
#[derive(Debug, StructOpt)]
#[structopt(name = "shooter-inspect", about = "Loads a level and logs what's in it.")]
struct Opt {
    /// Level archive (.pk3) or bare .bsp file
    #[structopt(parse(from_os_str))]
    level: PathBuf,

    /// Ini file with a [map] section
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Sweep from (sx sy sz) to (ex ey ez)
    #[structopt(long, number_of_values = 6, allow_hyphen_values = true)]
    trace: Option<Vec<f32>>,

    /// Sweep a sphere of this radius instead of a point
    #[structopt(long)]
    radius: Option<f32>,

    /// Cull from (px py pz) looking at (tx ty tz)
    #[structopt(long, number_of_values = 6, allow_hyphen_values = true)]
    look: Option<Vec<f32>>,
}

/// Split six numbers into two points.
fn vec_pair(vals: &[f32]) -> Option<(Vector3<f32>, Vector3<f32>)> {
    match vals {
        [a, b, c, d, e, f] => Some((Vector3::new(*a, *b, *c), Vector3::new(*d, *e, *f))),
        _ => None,
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", full_error_display(&*err));
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_max_level(log::LevelFilter::Debug)
            .set_thread_mode(simplelog::ThreadLogMode::Names)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("Error initialising logger")?;

    let opt = Opt::from_args();

    let config = match &opt.config {
        Some(path) => LoadConfig::from_ini_file(path)
            .with_context(|| format!("Error reading config {}", path.display()))?,
        None => LoadConfig::default(),
    };

    let map = Q3Map::open(&opt.level, &config)
        .with_context(|| format!("Error loading {}", opt.level.display()))?;
    if map.is_empty() {
        bail!("{} has no leaves or vertices", opt.level.display());
    }

    log_summary(&map);

    if let Some((start, end)) = opt.trace.as_deref().and_then(vec_pair) {
        let request = match opt.radius {
            Some(r) => TraceRequest::sphere(start, end, r),
            None => TraceRequest::point(start, end),
        };
        let result = map.trace(&request);

        info!(
            "Trace: collision {}, fraction {:.4}, plane {:?}, end {:?}, slide {:?}, all solid {}",
            result.collision,
            result.fraction,
            result.plane_idx,
            result.end_position(&request),
            result.plane_proj,
            result.all_solid
        );
    }

    if let Some((eye, target)) = opt.look.as_deref().and_then(vec_pair) {
        let view = Matrix4::look_at_rh(&Point3::from(eye), &Point3::from(target), &Vector3::y());
        let proj = Matrix4::new_perspective(16.0 / 9.0, std::f32::consts::FRAC_PI_3, 0.1, 1000.0);
        let visible = map.find_visible_faces(&eye, &(proj * view));

        if visible.is_empty() {
            warn!("Nothing visible from {:?}", eye);
        }
        for technique in RenderTechnique::DRAW_ORDER.iter() {
            info!("{:?}: {} faces", technique, visible.get(*technique).len());
        }
    }

    Ok(())
}

/// Log the size of every part of the level.
fn log_summary(map: &Q3Map) {
    let file = map.file();

    info!("Entities: {}", file.entities_iter().count());
    for entity in file.entities_iter().take(1) {
        if let Some(msg) = entity.get("message") {
            info!("Level message: {}", msg);
        }
    }

    info!("Textures: {}", file.textures_len());
    for (i, tex) in file.textures_iter().enumerate() {
        info!(
            "  {} {} ({:?}, {})",
            i,
            tex.name,
            map.texture_class(i as u32),
            if map.texture_image(i as u32).is_some() { "found" } else { "missing" }
        );
    }

    info!("Planes: {}", file.planes_iter().count());
    info!("Nodes: {}, leaves: {}", file.nodes_len(), file.leaves_len());
    info!("Models: {}", file.models_iter().count());
    info!("Brushes: {}, effects: {}", file.brushes_len(), file.effects_len());
    info!(
        "Faces: {}, vertices: {}, mesh verts: {}",
        file.faces_len(),
        file.vertices_len(),
        file.meshverts_len()
    );
    info!(
        "Light maps: {}, light volumes: {}",
        file.lightmaps_len(),
        file.lightvols_iter().count()
    );

    if file.has_visdata() {
        info!("Clusters: {}", file.clusters_len());
    } else {
        info!("No visibility data, everything is visible");
    }

    let geometry = map.solid_geometry();
    info!(
        "Solid geometry: {} triangles, bounds {:?} to {:?}",
        geometry.indices.len() / 3,
        geometry.bounds_min,
        geometry.bounds_max
    );
}
