//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::params::{HeightmapConfig, SimulationParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavetour")]
#[command(about = "Headless driver for the wavetour ocean navigation simulation", long_about = None)]
pub struct Args {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulation at a fixed frame rate with no window
    Run(RunArgs),

    /// Print or write the generated ocean WGSL shader
    Shader {
        /// Write to this file instead of stdout
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write a grayscale PNG of wave heights
    Heightmap(HeightmapArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Simulated duration (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "120")]
    pub duration: f32,

    /// Ticks per simulated second
    #[arg(long, value_name = "N", default_value = "60")]
    pub fps: u32,

    /// Start in free exploration instead of the guided tour
    #[arg(long)]
    pub free: bool,

    /// Sail straight to this island first
    #[arg(long, value_name = "ISLAND")]
    pub goto: Option<String>,

    /// Pause at each tour stop (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub dwell: Option<f32>,

    /// Also displace the CPU ocean grid every tick
    #[arg(long)]
    pub cpu_mesh: bool,
}

impl RunArgs {
    /// Simulation parameters with command-line overrides applied
    pub fn simulation_params(&self) -> SimulationParams {
        let mut params = SimulationParams::default();
        if let Some(dwell) = self.dwell {
            params.navigation.dwell_delay_s = dwell;
        }
        params
    }

    /// Number of ticks to run
    pub fn tick_count(&self) -> u32 {
        (self.duration.max(0.0) * self.fps as f32).round() as u32
    }

    /// Fixed tick length (seconds)
    pub fn tick_delta_s(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

#[derive(clap::Args, Debug)]
pub struct HeightmapArgs {
    /// Image size (pixels per side)
    #[arg(long, value_name = "PIXELS", default_value = "256")]
    pub size: u32,

    /// World extent covered (meters per side)
    #[arg(long, value_name = "METERS", default_value = "100")]
    pub extent: f32,

    /// Wave time to sample (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub time: f32,

    /// Output PNG path
    #[arg(long, short, value_name = "PATH")]
    pub output: PathBuf,
}

impl HeightmapArgs {
    pub fn config(&self) -> HeightmapConfig {
        HeightmapConfig {
            size_px: self.size,
            extent_m: self.extent,
            time_s: self.time,
        }
    }
}
