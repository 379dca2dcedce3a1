use std::path::PathBuf;

use crate::abs::{BuildStep, MeshError};

/// Errors that stop the renderer before the first frame.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL function `{0}`")]
    LoadFunction(&'static str),
    #[error("failed to create event pump: {0}")]
    EventPump(String),
    #[error("failed to read config {}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}", .path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to read shader {}", .path.display())]
    ReadShader {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader program is not usable, {step} failed")]
    ProgramNotReady { step: BuildStep },
    #[error("failed to upload mesh")]
    Mesh(#[from] MeshError),
}
