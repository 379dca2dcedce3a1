//! This module contains the OpenGL building blocks of the renderer,
//! including application setup, shader management and mesh handling.

pub mod app;
pub mod device;
pub mod mesh;
pub mod shader;
#[cfg(test)]
pub(crate) mod testing;

pub use app::*;
pub use device::*;
pub use mesh::*;
pub use shader::*;
