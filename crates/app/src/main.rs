//! Entry point: load a mesh, prepare viewer state and report what a
//! renderer would receive.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{GeometryData, MeshVertex, SurfaceMaps};
use corelib::{controls::RenderMode, viewer::Viewer};

fn parse_path_arg(args: &[String], prefix: &str) -> Option<PathBuf> {
    args.iter()
        .rev()
        .find_map(|arg| arg.strip_prefix(prefix))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_render_mode_arg(args: &[String]) -> RenderMode {
    // Accept: --render-mode=mesh|plain|textured|bump
    let mut mode = RenderMode::default();
    for arg in args {
        if let Some(val) = arg.strip_prefix("--render-mode=") {
            mode = match val.parse::<RenderMode>() {
                Ok(parsed) => parsed,
                Err(err) => {
                    log::warn!("{err}, falling back to {}", RenderMode::default());
                    RenderMode::default()
                }
            };
        }
    }
    mode
}

fn parse_frames_arg(args: &[String]) -> u32 {
    let mut frames = 0;
    for arg in args {
        if let Some(val) = arg.strip_prefix("--frames=") {
            match val.parse::<u32>() {
                Ok(n) => frames = n,
                Err(_) => log::warn!("Ignoring invalid frame count '{}'", val),
            }
        }
    }
    frames
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(800).max(1);
    let hh = h.unwrap_or(600).max(1);
    (ww, hh)
}

fn load_mesh(path: &Path, role: &str) -> Result<GeometryData> {
    let geometry = GeometryData::from_obj_file(path)
        .with_context(|| format!("Failed to load {} mesh {}", role, path.display()))?;
    let dims = geometry.find_max_dimensions();
    log::info!(
        "{} mesh: {} vertices, {} normals, {} texcoords, {} tangents, {} bitangents; max |xyz| = ({:.3}, {:.3}, {:.3})",
        role,
        geometry.vertex_count(),
        geometry.normal_count(),
        geometry.texture_coord_count(),
        geometry.tangent_count(),
        geometry.bitangent_count(),
        dims.x,
        dims.y,
        dims.z
    );
    Ok(geometry)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let obj_path = parse_path_arg(&args, "--obj=").context("Missing required --obj=PATH")?;
    let light_path = parse_path_arg(&args, "--light-obj=");
    let texture_path = parse_path_arg(&args, "--texture=");
    let bump_path = parse_path_arg(&args, "--bump=");
    let requested_mode = parse_render_mode_arg(&args);
    let frames = parse_frames_arg(&args);
    let (width, height) = parse_size_args(&args);
    log::info!(
        "Starting viewer. Model: {}, render_mode={}, frames={}, window_size={}x{}",
        obj_path.display(),
        requested_mode,
        frames,
        width,
        height
    );

    let model = load_mesh(&obj_path, "Model")?;
    if let Some(path) = &light_path {
        load_mesh(path, "Light")?;
    }

    let maps = SurfaceMaps::load(texture_path.as_deref(), bump_path.as_deref())?;
    log::info!(
        "Surface maps: diffuse {}x{}, bump {}x{}",
        maps.diffuse.width,
        maps.diffuse.height,
        maps.bump.width,
        maps.bump.height
    );

    let mut viewer = Viewer::new(model.has_texture_coords(), width, height);
    viewer
        .camera
        .frame_bounds(model.find_max_dimensions(), viewer.model.transform.scale.max_element());
    let mode = viewer.set_render_mode(requested_mode);

    for _ in 0..frames {
        viewer.tick();
    }

    let vertices = model.interleaved();
    let uniforms = viewer.uniforms();
    log::info!(
        "Render mode {}: {} interleaved vertices ({} bytes), uniform block {} bytes",
        mode,
        vertices.len(),
        vertices.len() * MeshVertex::STRIDE,
        uniforms.as_bytes().len()
    );
    log::info!("{}", viewer.lighting);

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn size_defaults_and_overrides() {
        assert_eq!(parse_size_args(&args(&[])), (800, 600));
        assert_eq!(parse_size_args(&args(&["--size=1024x768"])), (1024, 768));
        assert_eq!(parse_size_args(&args(&["--width=0", "--height=300"])), (1, 300));
    }

    #[test]
    fn render_mode_falls_back_on_unknown() {
        assert_eq!(parse_render_mode_arg(&args(&["--render-mode=plain"])), RenderMode::Plain);
        assert_eq!(
            parse_render_mode_arg(&args(&["--render-mode=glossy"])),
            RenderMode::BumpMapped
        );
    }

    #[test]
    fn paths_and_frames() {
        let a = args(&["--obj=planet.obj", "--frames=12", "--bump="]);
        assert_eq!(parse_path_arg(&a, "--obj="), Some(PathBuf::from("planet.obj")));
        assert_eq!(parse_path_arg(&a, "--bump="), None);
        assert_eq!(parse_frames_arg(&a), 12);
    }
}
