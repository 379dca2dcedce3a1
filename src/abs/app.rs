//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::rc::Rc;

use crate::config::Config;
use crate::error::InitError;

/// Entry points that must resolve before the context counts as loaded.
const REQUIRED_FUNCTIONS: [&str; 4] = [
    "glCreateShader",
    "glCreateProgram",
    "glGenVertexArrays",
    "glDrawElements",
];

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Rc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a resizable window with a core-profile context of the configured version and
    /// loads the OpenGL functions.
    pub fn new(config: &Config) -> Result<Self, InitError> {
        let sdl = sdl2::init().map_err(InitError::Sdl)?;
        let video_subsystem = sdl.video().map_err(InitError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        let [major, minor] = config.gl_version;
        gl_attr.set_context_version(major, minor);
        #[cfg(target_os = "macos")]
        gl_attr.set_context_flags().forward_compatible().set();

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| InitError::Window(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(InitError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(InitError::Context)?;

        if let Some(name) = REQUIRED_FUNCTIONS
            .into_iter()
            .find(|name| video_subsystem.gl_get_proc_address(name).is_null())
        {
            return Err(InitError::LoadFunction(name));
        }
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        log::info!(
            "created {}x{} window with OpenGL {major}.{minor} core context",
            config.width,
            config.height
        );

        let event_pump = sdl.event_pump().map_err(InitError::EventPump)?;

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Rc::new(gl),
            event_pump,
        })
    }

    /// The size of the drawable area in pixels, which differs from the window size on
    /// high-DPI displays.
    pub fn drawable_size(&self) -> (i32, i32) {
        let (width, height) = self.window.drawable_size();
        (width as i32, height as i32)
    }
}
