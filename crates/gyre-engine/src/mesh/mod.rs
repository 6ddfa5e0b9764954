//! Vertex/index buffer setup and draw submission.
//!
//! One `Mesh` per drawable object: interleaved `f32` vertex data, an
//! optional `u32` index buffer, and the attribute layout captured in a
//! vertex array object. Topology is always triangles.

use anyhow::{anyhow, ensure, Result};
use glow::HasContext;

/// One interleaved vertex attribute: `components` consecutive `f32`s bound
/// to shader `location`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
}

impl VertexAttribute {
    pub const fn new(location: u32, components: i32) -> Self {
        Self { location, components }
    }
}

/// GPU-resident geometry: VAO + VBO (+ optional EBO) and the draw count.
pub struct Mesh {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ebo: Option<glow::NativeBuffer>,
    draw_count: i32,
}

impl Mesh {
    /// Uploads interleaved vertex data (and indices, when given) and
    /// records the attribute layout.
    ///
    /// `vertices.len()` must be a multiple of the layout's floats per
    /// vertex; mismatches are setup bugs and are reported, not truncated.
    pub fn new(
        gl: &glow::Context,
        vertices: &[f32],
        indices: Option<&[u32]>,
        attributes: &[VertexAttribute],
    ) -> Result<Mesh> {
        let per_vertex = floats_per_vertex(attributes);
        ensure!(per_vertex > 0, "mesh needs at least one vertex attribute");
        ensure!(
            vertices.len() % per_vertex == 0,
            "vertex data length {} is not a multiple of the layout's {} floats per vertex",
            vertices.len(),
            per_vertex,
        );

        let stride = (per_vertex * size_of::<f32>()) as i32;
        let vertex_count = (vertices.len() / per_vertex) as i32;

        unsafe {
            let vao = gl.create_vertex_array().map_err(|e| anyhow!("create VAO: {e}"))?;
            let vbo = gl.create_buffer().map_err(|e| anyhow!("create VBO: {e}"))?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            let ebo = match indices {
                Some(indices) => {
                    let ebo = gl.create_buffer().map_err(|e| anyhow!("create EBO: {e}"))?;
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            let mut offset = 0i32;
            for attr in attributes {
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    stride,
                    offset,
                );
                gl.enable_vertex_attrib_array(attr.location);
                offset += attr.components * size_of::<f32>() as i32;
            }

            gl.bind_vertex_array(None);

            let draw_count = indices.map_or(vertex_count, |i| i.len() as i32);
            Ok(Mesh { vao, vbo, ebo, draw_count })
        }
    }

    /// Binds the mesh and issues one triangle draw call.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            match self.ebo {
                Some(_) => {
                    gl.draw_elements(glow::TRIANGLES, self.draw_count, glow::UNSIGNED_INT, 0)
                }
                None => gl.draw_arrays(glow::TRIANGLES, 0, self.draw_count),
            }
        }
    }

    /// Deletes the underlying GL objects. The value must not be used
    /// afterwards.
    pub fn destroy(self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }
        }
    }
}

fn floats_per_vertex(attributes: &[VertexAttribute]) -> usize {
    attributes.iter().map(|a| a.components.max(0) as usize).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_arithmetic() {
        // position + color
        let attrs = [VertexAttribute::new(0, 3), VertexAttribute::new(1, 3)];
        assert_eq!(floats_per_vertex(&attrs), 6);

        // position + color + texcoord + flag
        let attrs = [
            VertexAttribute::new(0, 3),
            VertexAttribute::new(1, 3),
            VertexAttribute::new(2, 2),
            VertexAttribute::new(3, 1),
        ];
        assert_eq!(floats_per_vertex(&attrs), 9);
    }

    #[test]
    fn empty_layout_is_zero() {
        assert_eq!(floats_per_vertex(&[]), 0);
    }
}
