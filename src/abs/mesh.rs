//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait. Mesh data is uploaded once and never
//! changed afterwards.

use std::rc::Rc;

use super::device::{BufferTarget, Device};

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: bytemuck::Pod {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs<D: Device>(gl: &D);
}

/// A vertex holding only a position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Position {
    pub position: [f32; 3],
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

impl Vertex for Position {
    fn vertex_attribs<D: Device>(gl: &D) {
        gl.vertex_attrib_pointer_f32(0, 3, std::mem::size_of::<Self>() as i32, 0);
        gl.enable_vertex_attrib_array(0);
    }
}

/// Returned when an index points past the end of the vertex data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
pub struct IndexOutOfRange {
    pub position: usize,
    pub index: u32,
    pub vertex_count: usize,
}

/// Checks that every index addresses one of `vertex_count` vertices.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<(), IndexOutOfRange> {
    match indices
        .iter()
        .position(|&index| index as usize >= vertex_count)
    {
        Some(position) => Err(IndexOutOfRange {
            position,
            index: indices[position],
            vertex_count,
        }),
        None => Ok(()),
    }
}

/// Errors from [`Mesh::new`].
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error(transparent)]
    Index(#[from] IndexOutOfRange),
    #[error("failed to create GPU object: {0}")]
    Create(String),
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh<D: Device> {
    gl: Rc<D>,
    vao: D::VertexArray,
    vbo: D::Buffer,
    ebo: D::Buffer,
    index_count: usize,
}

impl<D: Device> Mesh<D> {
    /// Creates a new mesh from the given vertex and index data.
    ///
    /// The element buffer stays bound to the vertex array; the array buffer and the vertex
    /// array are unbound afterwards.
    pub fn new<V: Vertex>(gl: &Rc<D>, vertices: &[V], indices: &[u32]) -> Result<Self, MeshError> {
        validate_indices(indices, vertices.len())?;

        let vao = gl.create_vertex_array().map_err(MeshError::Create)?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(MeshError::Create(e));
            }
        };
        let ebo = match gl.create_buffer() {
            Ok(ebo) => ebo,
            Err(e) => {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
                return Err(MeshError::Create(e));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(BufferTarget::Array, Some(vbo));
        gl.buffer_data_static(BufferTarget::Array, bytemuck::cast_slice(vertices));

        gl.bind_buffer(BufferTarget::ElementArray, Some(ebo));
        gl.buffer_data_static(BufferTarget::ElementArray, bytemuck::cast_slice(indices));

        V::vertex_attribs::<D>(gl);

        gl.bind_buffer(BufferTarget::Array, None);
        gl.bind_vertex_array(None);

        Ok(Self {
            gl: Rc::clone(gl),
            vao,
            vbo,
            ebo,
            index_count: indices.len(),
        })
    }

    /// Binds the vertex array and draws every index as triangles.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
        self.gl.draw_triangles_u32(self.index_count as i32, 0);
    }

    /// Returns the amount of indices used in the mesh.
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl<D: Device> Drop for Mesh<D> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vbo);
        self.gl.delete_buffer(self.ebo);
        self.gl.delete_vertex_array(self.vao);
    }
}
