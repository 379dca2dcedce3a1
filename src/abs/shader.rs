//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! A [`ShaderProgram`] tracks how far its build got in a [`ProgramState`], and refuses to bind
//! itself unless it reached [`ProgramState::Ready`].

use std::rc::Rc;

use glam::Vec4;

use super::device::{Device, ShaderStage};

/// Represents an individual OpenGL shader stage.
pub struct Shader<D: Device> {
    gl: Rc<D>,
    id: D::Shader,
}

impl<D: Device> Shader<D> {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the shader object is deleted and the driver's info log is returned.
    pub fn new(gl: &Rc<D>, stage: ShaderStage, source: &str) -> Result<Self, String> {
        let shader = gl.create_shader(stage)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(log);
        }

        Ok(Self {
            gl: Rc::clone(gl),
            id: shader,
        })
    }
}

impl<D: Device> Drop for Shader<D> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// The step of a program build that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Compile(ShaderStage),
    Link,
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStep::Compile(stage) => write!(f, "{stage} shader compilation"),
            BuildStep::Link => f.write_str("program linking"),
        }
    }
}

/// Readiness of a [`ShaderProgram`].
///
/// A build moves `Uncompiled -> Compiled -> Linked -> Ready`, or ends in `Failed` at the first
/// step that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramState {
    Uncompiled,
    Compiled,
    Linked,
    Ready,
    Failed { step: BuildStep, log: String },
}

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// Represents an OpenGL shader program composed of a vertex and a fragment stage.
pub struct ShaderProgram<D: Device> {
    gl: Rc<D>,
    id: Option<D::Program>,
    state: ProgramState,
}

impl<D: Device> ShaderProgram<D> {
    /// Links the given shaders. The result is `Linked`; [`ShaderProgram::build`] promotes it
    /// to `Ready` once the stages are released.
    fn link(gl: &Rc<D>, shaders: &[&Shader<D>]) -> Result<Self, String> {
        let program = gl.create_program()?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(log);
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        Ok(Self {
            gl: Rc::clone(gl),
            id: Some(program),
            state: ProgramState::Linked,
        })
    }

    /// Compiles both stages, links them and releases the stage objects.
    ///
    /// Never fails outright: every step is logged and the outcome is recorded in
    /// [`ShaderProgram::state`]. Both stages are always compiled so that each one reports
    /// its own diagnostics.
    pub fn build(gl: &Rc<D>, sources: &ShaderSources) -> Self {
        let mut pending = Self {
            gl: Rc::clone(gl),
            id: None,
            state: ProgramState::Uncompiled,
        };

        let vertex = compile_logged(gl, ShaderStage::Vertex, &sources.vertex);
        let fragment = compile_logged(gl, ShaderStage::Fragment, &sources.fragment);

        let (vertex, fragment) = match (vertex, fragment) {
            (Ok(vertex), Ok(fragment)) => (vertex, fragment),
            (Err(state), _) | (_, Err(state)) => {
                log::warn!("skipping program link, a shader stage did not compile");
                pending.state = state;
                return pending;
            }
        };
        pending.state = ProgramState::Compiled;

        let mut program = match Self::link(gl, &[&vertex, &fragment]) {
            Ok(program) => {
                log::info!("shader program linked");
                program
            }
            Err(log) => {
                log::error!("shader program linking failed:\n{log}");
                pending.state = ProgramState::Failed {
                    step: BuildStep::Link,
                    log,
                };
                return pending;
            }
        };

        drop(vertex);
        drop(fragment);
        program.state = ProgramState::Ready;
        program
    }

    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ProgramState::Ready
    }

    /// Binds the shader program for use. Returns `false`, binding nothing, unless the program
    /// is ready.
    pub fn use_program(&self) -> bool {
        match self.ready_id() {
            Some(id) => {
                self.gl.use_program(Some(id));
                true
            }
            None => false,
        }
    }

    /// Looks up a uniform location by name.
    pub fn uniform_location(&self, name: &str) -> Option<D::UniformLocation> {
        self.ready_id()
            .and_then(|id| self.gl.uniform_location(id, name))
    }

    /// Sets a vec4 uniform on the bound program, looking the location up by name on every call.
    /// An unknown name is a no-op.
    pub fn set_uniform(&self, name: &str, value: Vec4) {
        let location = self.uniform_location(name);
        self.gl.uniform_4_f32(location.as_ref(), value);
    }

    /// Reads a vec4 uniform back through the driver.
    pub fn get_uniform(&self, name: &str) -> Option<Vec4> {
        let id = self.ready_id()?;
        let location = self.gl.uniform_location(id, name)?;
        Some(self.gl.get_uniform_4_f32(id, &location))
    }

    fn ready_id(&self) -> Option<D::Program> {
        if self.is_ready() { self.id } else { None }
    }
}

fn compile_logged<D: Device>(
    gl: &Rc<D>,
    stage: ShaderStage,
    source: &str,
) -> Result<Shader<D>, ProgramState> {
    match Shader::new(gl, stage, source) {
        Ok(shader) => {
            log::info!("{stage} shader compiled");
            Ok(shader)
        }
        Err(log) => {
            log::error!("{stage} shader compilation failed:\n{log}");
            Err(ProgramState::Failed {
                step: BuildStep::Compile(stage),
                log,
            })
        }
    }
}

impl<D: Device> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.gl.delete_program(id);
        }
    }
}
