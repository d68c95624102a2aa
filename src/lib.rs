//! Wavetour library - vessel navigation over a procedural ocean
//!
//! A small boat rides a closed-form wave field between islands, either under
//! manual control or steered by an autopilot that runs a guided tour.

pub mod camera;
pub mod cli;
pub mod error;
pub mod islands;
pub mod logging;
pub mod navigation;
pub mod ocean;
pub mod params;
pub mod session;
pub mod vessel;

pub use error::ConfigError;
pub use session::{Session, TickReport};
