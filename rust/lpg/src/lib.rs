//! A model of the Buchla low pass gate, a filter and amplifier that share a
//! single vactrol as their control element.
//!
//! Each sample runs through three stages:
//!
//!  - [`current`] turns the control voltage into an LED drive current.
//!  - [`vactrol`] smooths that current with a fast attack and a slow,
//!    light-dependent decay, and maps the light level to a resistance.
//!  - [`network`] uses the resistance to filter and attenuate the audio.
//!
//! [`Lpg`] wires the stages together and is what most hosts need.
//!
//! ```
//! use buchla_lpg::Lpg;
//!
//! let mut lpg = Lpg::new(48000.0);
//! let mut cv = [5.0f32; 64];
//! let input = [0.25f32; 64];
//! let mut output = [0.0f32; 64];
//! lpg.process_block(&mut cv, &input, &mut output);
//! ```

pub mod current;
pub mod network;
mod processor;
mod timing;
pub mod vactrol;

pub use processor::{ConfigError, Lpg, Mode, Solver};
pub use timing::Timing;
