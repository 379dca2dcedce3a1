//! A recording [`Device`] for unit tests.
//!
//! Shaders "compile" when their source contains `void main` and no `#error` directive.
//! Linking collects `uniform vec4 <name>;` declarations from the attached sources so
//! that uniform lookups behave like a real driver's.

use std::cell::RefCell;
use std::collections::HashMap;

use glam::Vec4;

use super::device::{BufferTarget, Device, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformLocation(String),
    Uniform4f(Option<u32>, Vec4),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, Vec<u8>),
    DeleteBuffer(u32),
    VertexAttribPointer {
        location: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    DrawTriangles { count: i32, offset: i32 },
    Viewport(i32, i32, i32, i32),
    Clear(Vec4),
}

#[derive(Default)]
struct State {
    next_id: u32,
    calls: Vec<Call>,
    shaders: HashMap<u32, (ShaderStage, String, bool)>,
    attached: HashMap<u32, Vec<u32>>,
    linked: HashMap<u32, Vec<String>>,
    bound_program: Option<u32>,
    uniforms: HashMap<(u32, u32), Vec4>,
    fail_link: bool,
    buffers_before_failure: Option<usize>,
}

#[derive(Default)]
pub struct FakeDevice {
    state: RefCell<State>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent link fail with a driver-style message.
    pub fn failing_link() -> Self {
        let device = Self::default();
        device.state.borrow_mut().fail_link = true;
        device
    }

    /// Lets `count` buffers be created, then fails every later `create_buffer`.
    pub fn fail_buffer_after(&self, count: usize) {
        self.state.borrow_mut().buffers_before_failure = Some(count);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn next_id(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

fn declared_vec4_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let rest = line.trim().strip_prefix("uniform vec4 ")?;
        Some(rest.trim_end_matches(';').trim().to_string())
    })
}

impl Device for FakeDevice {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.next_id();
        self.record(Call::CreateShader(stage));
        self.state
            .borrow_mut()
            .shaders
            .insert(id, (stage, String::new(), false));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.1 = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.2 = entry.1.contains("void main") && !entry.1.contains("#error");
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|entry| entry.2)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        match self.state.borrow().shaders.get(&shader) {
            Some((stage, _, false)) => format!("0:1(1): error: {stage} shader failed to compile"),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.next_id();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
        self.state
            .borrow_mut()
            .attached
            .entry(program)
            .or_default()
            .push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
        if let Some(list) = self.state.borrow_mut().attached.get_mut(&program) {
            list.retain(|s| *s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        if state.fail_link {
            return;
        }
        let attached = state.attached.get(&program).cloned().unwrap_or_default();
        let mut uniforms = Vec::new();
        for id in attached {
            match state.shaders.get(&id) {
                Some((_, source, true)) => uniforms.extend(declared_vec4_uniforms(source)),
                _ => return,
            }
        }
        state.linked.insert(program, uniforms);
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().linked.contains_key(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled shader".to_string()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
        self.state.borrow_mut().bound_program = program;
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.state.borrow_mut().linked.remove(&program);
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.record(Call::UniformLocation(name.to_string()));
        let state = self.state.borrow();
        let uniforms = state.linked.get(&program)?;
        uniforms.iter().position(|u| u == name).map(|i| i as u32)
    }

    fn uniform_4_f32(&self, location: Option<&u32>, value: Vec4) {
        self.record(Call::Uniform4f(location.copied(), value));
        let mut state = self.state.borrow_mut();
        if let (Some(loc), Some(program)) = (location, state.bound_program) {
            state.uniforms.insert((program, *loc), value);
        }
    }

    fn get_uniform_4_f32(&self, program: u32, location: &u32) -> Vec4 {
        self.state
            .borrow()
            .uniforms
            .get(&(program, *location))
            .copied()
            .unwrap_or(Vec4::ZERO)
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.next_id();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vao: Option<u32>) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.record(Call::DeleteVertexArray(vao));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if let Some(remaining) = self.state.borrow_mut().buffers_before_failure.as_mut() {
            if *remaining == 0 {
                return Err("out of memory".to_string());
            }
            *remaining -= 1;
        }
        let id = self.next_id();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer {
            location,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::EnableVertexAttribArray(location));
    }

    fn draw_triangles_u32(&self, count: i32, offset: i32) {
        self.record(Call::DrawTriangles { count, offset });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_to(&self, color: Vec4) {
        self.record(Call::Clear(color));
    }
}
