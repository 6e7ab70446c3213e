//! Phase Beam Engine - headless host for the Phase Beam animated background.
//!
//! This crate plays the role of the wallpaper service: it loads the
//! configuration, owns the kernel through the wallpaper lifecycle, feeds it
//! a synthetic parallax input and paces frames by the kernel's hints.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod input;
pub mod renderer;
pub mod timing;
