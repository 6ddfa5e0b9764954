//! Static triangle, shader sources loaded from files.
//!
//! The simplest modern-pipeline driver: non-indexed draw, no uniforms,
//! no per-frame transform work.

use anyhow::Result;
use winit::dpi::LogicalSize;

use gyre_engine::core::{App, AppControl, FrameCtx};
use gyre_engine::device::{Gl, GlInit};
use gyre_engine::logging::{init_logging, LoggingConfig};
use gyre_engine::mesh::{Mesh, VertexAttribute};
use gyre_engine::shader::ShaderProgram;
use gyre_engine::window::{Runtime, RuntimeConfig};

const VERTEX_SHADER: &str = include_str!("../../shaders/triangle.vert");
const FRAGMENT_SHADER: &str = include_str!("../../shaders/triangle.frag");

#[rustfmt::skip]
const VERTICES: [f32; 18] = [
    -0.5, -0.5, 0.0,  1.0, 0.0, 0.0,
     0.5, -0.5, 0.0,  0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,  0.0, 0.0, 1.0,
];

struct Scene {
    program: ShaderProgram,
    mesh: Mesh,
}

#[derive(Default)]
struct TriangleApp {
    scene: Option<Scene>,
}

impl App for TriangleApp {
    fn on_ready(&mut self, gl: &mut Gl) -> Result<()> {
        let gl = gl.gl();
        let program = ShaderProgram::from_sources(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let mesh = Mesh::new(
            gl,
            &VERTICES,
            None,
            &[VertexAttribute::new(0, 3), VertexAttribute::new(1, 3)],
        )?;

        self.scene = Some(Scene { program, mesh });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = self.scene.as_ref() else {
            return AppControl::Exit;
        };

        ctx.render([0.2, 0.2, 0.2, 1.0], |gl| {
            scene.program.bind(gl);
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
        title: "Modern Triangle".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    let gl_init = GlInit { depth_test: false, ..GlInit::default() };

    if let Err(e) = Runtime::run(config, gl_init, TriangleApp::default()) {
        log::error!("triangle demo failed: {e:#}");
        std::process::exit(1);
    }
}
