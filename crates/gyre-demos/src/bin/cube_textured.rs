//! Rotating cube with one textured face.
//!
//! The front face samples a texture; the remaining faces fall back to
//! per-vertex color, selected by a per-vertex flag attribute.

use anyhow::Result;
use winit::dpi::LogicalSize;

use gyre_engine::core::{App, AppControl, FrameCtx};
use gyre_engine::device::{Gl, GlInit};
use gyre_engine::logging::{init_logging, LoggingConfig};
use gyre_engine::mesh::{Mesh, VertexAttribute};
use gyre_engine::shader::ShaderProgram;
use gyre_engine::texture::{decode_bmp, Texture};
use gyre_engine::transform::Transforms;
use gyre_engine::window::{Runtime, RuntimeConfig};

const VERTEX_SHADER: &str = r#"
#version 330 core
layout(location = 0) in vec3 aPos;
layout(location = 1) in vec3 aColor;
layout(location = 2) in vec2 aTexCoord;
layout(location = 3) in float aIsTextured;
out vec3 vColor;
out vec2 vTexCoord;
out float vIsTextured;
uniform mat4 MVP;
void main() {
    gl_Position = MVP * vec4(aPos, 1.0);
    vColor = aColor;
    vTexCoord = aTexCoord;
    vIsTextured = aIsTextured;
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 330 core
in vec3 vColor;
in vec2 vTexCoord;
in float vIsTextured;
out vec4 FragColor;
uniform sampler2D texSampler;
void main() {
    if (vIsTextured > 0.5)
        FragColor = texture(texSampler, vTexCoord);
    else
        FragColor = vec4(vColor, 1.0);
}
"#;

// Interleaved position, color, texcoord, textured-flag.
#[rustfmt::skip]
const VERTICES: [f32; 72] = [
    // front face, textured
    -1.0, -1.0,  1.0,  1.0, 1.0, 1.0,  0.0, 0.0,  1.0,
     1.0, -1.0,  1.0,  1.0, 1.0, 1.0,  1.0, 0.0,  1.0,
     1.0,  1.0,  1.0,  1.0, 1.0, 1.0,  1.0, 1.0,  1.0,
    -1.0,  1.0,  1.0,  1.0, 1.0, 1.0,  0.0, 1.0,  1.0,
    // back face, colored only
    -1.0, -1.0, -1.0,  1.0, 0.0, 0.0,  0.0, 0.0,  0.0,
     1.0, -1.0, -1.0,  0.0, 1.0, 0.0,  0.0, 0.0,  0.0,
     1.0,  1.0, -1.0,  0.0, 0.0, 1.0,  0.0, 0.0,  0.0,
    -1.0,  1.0, -1.0,  1.0, 1.0, 0.0,  0.0, 0.0,  0.0,
];

#[rustfmt::skip]
const INDICES: [u32; 36] = [
    0, 1, 2,  2, 3, 0,   // front (textured)
    4, 5, 6,  6, 7, 4,   // back
    3, 2, 6,  6, 7, 3,   // top
    0, 1, 5,  5, 4, 0,   // bottom
    1, 2, 6,  6, 5, 1,   // right
    0, 3, 7,  7, 4, 0,   // left
];

/// Builds an uncompressed 24-bpp BMP of a two-tone checkerboard in memory,
/// bottom-up BGR rows with a 54-byte header.
fn checkerboard_bmp(size: u32, cell: u32) -> Vec<u8> {
    let image_size = size * size * 3;
    let mut out = vec![0u8; 54];
    out[0] = b'B';
    out[1] = b'M';
    out[0x02..0x06].copy_from_slice(&(54 + image_size).to_le_bytes());
    out[0x0A..0x0E].copy_from_slice(&54u32.to_le_bytes());
    out[0x0E..0x12].copy_from_slice(&40u32.to_le_bytes());
    out[0x12..0x16].copy_from_slice(&size.to_le_bytes());
    out[0x16..0x1A].copy_from_slice(&size.to_le_bytes());
    out[0x1A..0x1C].copy_from_slice(&1u16.to_le_bytes());
    out[0x1C..0x1E].copy_from_slice(&24u16.to_le_bytes());
    out[0x22..0x26].copy_from_slice(&image_size.to_le_bytes());

    for y in 0..size {
        for x in 0..size {
            let dark = ((x / cell) + (y / cell)) % 2 == 0;
            if dark {
                out.extend_from_slice(&[40, 40, 40]);
            } else {
                out.extend_from_slice(&[30, 90, 230]);
            }
        }
    }
    out
}

struct Scene {
    program: ShaderProgram,
    mesh: Mesh,
    texture: Texture,
}

#[derive(Default)]
struct TexturedCubeApp {
    scene: Option<Scene>,
    transforms: Transforms,
}

impl App for TexturedCubeApp {
    fn on_ready(&mut self, gl: &mut Gl) -> Result<()> {
        let gl = gl.gl();
        let mut program = ShaderProgram::from_sources(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let mesh = Mesh::new(
            gl,
            &VERTICES,
            Some(&INDICES),
            &[
                VertexAttribute::new(0, 3),
                VertexAttribute::new(1, 3),
                VertexAttribute::new(2, 2),
                VertexAttribute::new(3, 1),
            ],
        )?;

        let image = decode_bmp(&checkerboard_bmp(64, 8))?;
        let texture = Texture::from_bmp(gl, &image)?;

        // The sampler binding never changes; resolve and set it once.
        program.bind(gl);
        program.set_i32(gl, "texSampler", 0);

        self.scene = Some(Scene { program, mesh, texture });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Exit;
        };

        self.transforms.aspect = ctx.window.aspect_ratio();
        let mvp = self.transforms.mvp(ctx.time.elapsed);

        ctx.render([0.2, 0.2, 0.2, 1.0], |gl| {
            scene.program.bind(gl);
            scene.program.set_mat4(gl, "MVP", &mvp);
            scene.texture.bind(gl, 0);
            scene.mesh.draw(gl);
        })
    }

    fn on_shutdown(&mut self, gl: &mut Gl) {
        if let Some(scene) = self.scene.take() {
            let gl = gl.gl();
            scene.texture.destroy(gl);
            scene.mesh.destroy(gl);
            scene.program.destroy(gl);
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Cube - One Textured Face".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    if let Err(e) = Runtime::run(config, GlInit::default(), TexturedCubeApp::default()) {
        log::error!("textured cube demo failed: {e:#}");
        std::process::exit(1);
    }
}
