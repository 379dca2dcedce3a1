//! A window that draws four triangles whose green channel pulses with time.
//!
//! [`abs`] wraps the OpenGL objects, [`frame`] holds the per-frame sequence, and the
//! binary in `main.rs` ties them to an SDL2 window.

pub mod abs;
pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod quad;
