//! The per-frame sequence: input, clear, animated uniform, indexed draw.

use std::rc::Rc;

use glam::Vec4;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use crate::abs::{Device, Mesh, ShaderProgram};

/// Green channel for the given elapsed time, oscillating in `[0, 1]`.
pub fn green_for_elapsed(elapsed_seconds: f32) -> f32 {
    elapsed_seconds.sin() / 2.0 + 0.5
}

/// The color uploaded each frame.
pub fn uniform_color(elapsed_seconds: f32) -> Vec4 {
    Vec4::new(0.0, green_for_elapsed(elapsed_seconds), 0.0, 1.0)
}

/// A viewport rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// A viewport at the origin covering `width` x `height`.
    pub fn covering(width: i32, height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Input gathered from the events of one frame.
#[derive(Debug, Default)]
pub struct FrameInput {
    close_requested: bool,
    resized: Option<(i32, i32)>,
}

impl FrameInput {
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.close_requested = true,
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } if *keycode == Keycode::Escape => self.close_requested = true,
            Event::Window {
                win_event: WindowEvent::SizeChanged(width, height),
                ..
            } => self.resized = Some((*width, *height)),
            _ => {}
        }
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Returns the latest size change since the last call, if any.
    pub fn take_resize(&mut self) -> Option<(i32, i32)> {
        self.resized.take()
    }
}

/// Owns the program and mesh and issues the draw calls for one frame.
pub struct FrameRenderer<D: Device> {
    gl: Rc<D>,
    program: ShaderProgram<D>,
    mesh: Mesh<D>,
    clear_color: Vec4,
    color_uniform: String,
    viewport: Option<Viewport>,
}

impl<D: Device> FrameRenderer<D> {
    pub fn new(
        gl: &Rc<D>,
        program: ShaderProgram<D>,
        mesh: Mesh<D>,
        clear_color: Vec4,
        color_uniform: impl Into<String>,
    ) -> Self {
        if !program.is_ready() {
            log::warn!("shader program is not ready, frames will only show the clear color");
        }
        Self {
            gl: Rc::clone(gl),
            program,
            mesh,
            clear_color,
            color_uniform: color_uniform.into(),
            viewport: None,
        }
    }

    /// Points the viewport at the whole drawable area.
    pub fn resize(&mut self, width: i32, height: i32) -> Viewport {
        let viewport = Viewport::covering(width, height);
        self.gl
            .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        log::debug!("viewport set to {width}x{height}");
        self.viewport = Some(viewport);
        viewport
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn program(&self) -> &ShaderProgram<D> {
        &self.program
    }

    /// Renders one frame. Without a ready program only the clear happens.
    pub fn render(&self, elapsed_seconds: f32) {
        self.gl.clear_to(self.clear_color);

        if !self.program.use_program() {
            return;
        }
        self.program
            .set_uniform(&self.color_uniform, uniform_color(elapsed_seconds));
        self.mesh.draw();
    }
}
