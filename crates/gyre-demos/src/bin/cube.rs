//! Rotating cube with per-vertex colors.

use anyhow::Result;
use winit::dpi::LogicalSize;

use gyre_engine::core::{App, AppControl, FrameCtx};
use gyre_engine::device::{Gl, GlInit};
use gyre_engine::logging::{init_logging, LoggingConfig};
use gyre_engine::mesh::{Mesh, VertexAttribute};
use gyre_engine::shader::ShaderProgram;
use gyre_engine::transform::Transforms;
use gyre_engine::window::{Runtime, RuntimeConfig};

const VERTEX_SHADER: &str = r#"
#version 330 core
layout(location = 0) in vec3 aPos;
layout(location = 1) in vec3 aColor;
out vec3 vColor;
uniform mat4 MVP;
void main() {
    gl_Position = MVP * vec4(aPos, 1.0);
    vColor = aColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 330 core
in vec3 vColor;
out vec4 FragColor;
void main() {
    FragColor = vec4(vColor, 1.0);
}
"#;

// Eight corners, interleaved position + color.
#[rustfmt::skip]
const VERTICES: [f32; 48] = [
    -1.0, -1.0, -1.0,  1.0, 0.0, 0.0,
     1.0, -1.0, -1.0,  0.0, 1.0, 0.0,
     1.0,  1.0, -1.0,  0.0, 0.0, 1.0,
    -1.0,  1.0, -1.0,  1.0, 1.0, 0.0,
    -1.0, -1.0,  1.0,  1.0, 0.0, 1.0,
     1.0, -1.0,  1.0,  0.0, 1.0, 1.0,
     1.0,  1.0,  1.0,  1.0, 1.0, 1.0,
    -1.0,  1.0,  1.0,  0.0, 0.0, 0.0,
];

#[rustfmt::skip]
const INDICES: [u32; 36] = [
    0, 1, 2,  2, 3, 0,   1, 5, 6,  6, 2, 1,
    5, 4, 7,  7, 6, 5,   4, 0, 3,  3, 7, 4,
    3, 2, 6,  6, 7, 3,   4, 5, 1,  1, 0, 4,
];

struct Scene {
    program: ShaderProgram,
    mesh: Mesh,
}

#[derive(Default)]
struct CubeApp {
    scene: Option<Scene>,
    transforms: Transforms,
}

impl App for CubeApp {
    fn on_ready(&mut self, gl: &mut Gl) -> Result<()> {
        let gl = gl.gl();
        let program = ShaderProgram::from_sources(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let mesh = Mesh::new(
            gl,
            &VERTICES,
            Some(&INDICES),
            &[VertexAttribute::new(0, 3), VertexAttribute::new(1, 3)],
        )?;

        self.scene = Some(Scene { program, mesh });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Exit;
        };

        self.transforms.aspect = ctx.window.aspect_ratio();
        let mvp = self.transforms.mvp(ctx.time.elapsed);

        ctx.render([0.1, 0.1, 0.1, 1.0], |gl| {
            scene.program.bind(gl);
            scene.program.set_mat4(gl, "MVP", &mvp);
            scene.mesh.draw(gl);
        })
    }

    fn on_shutdown(&mut self, gl: &mut Gl) {
        if let Some(scene) = self.scene.take() {
            let gl = gl.gl();
            scene.mesh.destroy(gl);
            scene.program.destroy(gl);
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Rotating Cube".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    if let Err(e) = Runtime::run(config, GlInit::default(), CubeApp::default()) {
        log::error!("cube demo failed: {e:#}");
        std::process::exit(1);
    }
}
