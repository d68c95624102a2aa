//! Wavetour - headless driver
//!
//! Runs the navigation simulation without a window, and exports the
//! generated ocean shader and wave heightmaps for the rendering side.

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec2;
use log::info;

use wavetour::cli::{Args, Command, HeightmapArgs, RunArgs};
use wavetour::islands::IslandRegistry;
use wavetour::logging;
use wavetour::navigation::NavAction;
use wavetour::ocean::{ocean_shader_source, render_heightmap, OceanGrid, WaveField};
use wavetour::params::OceanParams;
use wavetour::vessel::InputSnapshot;
use wavetour::Session;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    match args.command {
        Command::Run(run) => run_session(&run),
        Command::Shader { output } => {
            let field = WaveField::from_params(&OceanParams::default())?;
            let source = ocean_shader_source(&field);
            match output {
                Some(path) => {
                    fs::write(&path, source)
                        .with_context(|| format!("writing shader to {}", path.display()))?;
                    info!("Wrote ocean shader to {}", path.display());
                }
                None => print!("{source}"),
            }
            Ok(())
        }
        Command::Heightmap(heightmap) => write_heightmap(&heightmap),
    }
}

fn run_session(run: &RunArgs) -> Result<()> {
    let registry = IslandRegistry::default();
    let mut session = Session::new(run.simulation_params(), registry)?;

    if run.free {
        session.dispatch(NavAction::StartFreeExploration);
    } else {
        session.dispatch(NavAction::StartGuidedTour);
    }
    if let Some(name) = &run.goto {
        let Some(id) = session.registry().find(name) else {
            let known: Vec<_> = session.registry().iter().map(|i| i.id.as_str()).collect();
            bail!("unknown island '{name}' (known: {})", known.join(", "));
        };
        session.dispatch(NavAction::NavigateTo(id));
    }

    let mut grid = run
        .cpu_mesh
        .then(|| OceanGrid::new(&session.params().ocean));

    let ticks = run.tick_count();
    let delta_s = run.tick_delta_s();
    info!(
        "Running {} ticks at {} fps ({:.1}s simulated)",
        ticks,
        run.fps,
        ticks as f32 * delta_s
    );

    for _ in 0..ticks {
        session.tick(InputSnapshot::IDLE, delta_s);

        if let Some(grid) = grid.as_mut() {
            let v = session.vessel();
            grid.displace(
                session.wave_field(),
                session.wave_time_s(),
                Vec2::new(v.position.x, v.position.z),
            );
        }
    }

    let nav = session.navigation();
    let vessel = session.vessel();
    let visited: Vec<_> = nav.visited.iter().map(|id| id.as_str()).collect();
    println!("time      {:.2}s ({} ticks)", session.time_s(), session.ticks());
    println!(
        "vessel    ({:.2}, {:.2}, {:.2}) heading {:.3} rad, {:.2} m/s",
        vessel.position.x,
        vessel.position.y,
        vessel.position.z,
        vessel.heading,
        vessel.speed()
    );
    println!("mode      {:?}", nav.mode);
    println!("tour      stop {} of {}", nav.tour_index, session.registry().len());
    println!("visited   [{}]", visited.join(", "));
    if let Some(target) = nav.autopilot_target {
        println!("heading   {target}");
    }
    if let Some(grid) = &grid {
        let (lo, hi) = grid
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        println!("mesh      {} vertices, y in [{lo:.2}, {hi:.2}]", grid.vertices.len());
    }
    Ok(())
}

fn write_heightmap(args: &HeightmapArgs) -> Result<()> {
    let config = args.config();
    if config.size_px == 0 || config.extent_m.is_nan() || config.extent_m <= 0.0 {
        bail!("heightmap size and extent must be positive");
    }
    let field = WaveField::from_params(&OceanParams::default())?;
    let image = render_heightmap(&field, &config);
    image
        .save(&args.output)
        .with_context(|| format!("saving heightmap to {}", args.output.display()))?;
    info!(
        "Wrote {}x{} heightmap ({}m, t={}s) to {}",
        config.size_px,
        config.size_px,
        config.extent_m,
        config.time_s,
        args.output.display()
    );
    Ok(())
}
