//! Renderer settings.
//!
//! Settings are read from `config.json` in the platform configuration directory
//! (`~/.config/learnopengl/config.json` on Linux). Every field is optional; a missing
//! file means all defaults.

use std::path::{Path, PathBuf};

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::abs::ShaderSources;
use crate::error::InitError;

const VERTEX_SHADER: &str = include_str!("shaders/quad/vert.glsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/quad/frag.glsl");

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL core-profile version as `[major, minor]`.
    pub gl_version: [u8; 2],
    pub clear_color: [f32; 4],
    /// Name of the vec4 uniform that receives the animated color.
    pub color_uniform: String,
    /// Overrides the bundled vertex shader.
    pub vertex_shader: Option<PathBuf>,
    /// Overrides the bundled fragment shader.
    pub fragment_shader: Option<PathBuf>,
    /// Exit instead of running with a shader program that failed to build.
    pub strict_shaders: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            gl_version: [3, 3],
            clear_color: [0.2, 0.5, 0.1, 1.0],
            color_uniform: "vertexColor".to_string(),
            vertex_shader: None,
            fragment_shader: None,
            strict_shaders: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// The default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("learnopengl").join("config.json"))
    }

    /// Loads the configuration from [`Config::default_path`].
    pub fn load() -> Result<Self, InitError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, InitError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(InitError::ReadConfig {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_json(&text).map_err(|source| InitError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn clear_color(&self) -> Vec4 {
        Vec4::from_array(self.clear_color)
    }

    /// Resolves the shader sources, reading any configured override files.
    pub fn shader_sources(&self) -> Result<ShaderSources, InitError> {
        Ok(ShaderSources {
            vertex: read_source(self.vertex_shader.as_deref(), VERTEX_SHADER)?,
            fragment: read_source(self.fragment_shader.as_deref(), FRAGMENT_SHADER)?,
        })
    }
}

fn read_source(path: Option<&Path>, bundled: &str) -> Result<String, InitError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| InitError::ReadShader {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(bundled.to_string()),
    }
}
