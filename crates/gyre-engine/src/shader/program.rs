use std::collections::HashMap;
use std::fmt;

use glow::HasContext;

use crate::math::Mat4;

use super::ShaderError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A single compiled stage, the intermediate between source and program.
///
/// Exists only between `compile` and `ShaderProgram::link`, which consumes
/// it and releases the underlying object.
pub struct CompiledShader {
    raw: glow::NativeShader,
    stage: ShaderStage,
}

impl CompiledShader {
    /// Compiles one stage from GLSL source.
    ///
    /// On failure the driver's info log is returned in the error; the
    /// caller decides whether that is fatal for its render path.
    pub fn compile(
        gl: &glow::Context,
        stage: ShaderStage,
        source: &str,
    ) -> Result<CompiledShader, ShaderError> {
        unsafe {
            let raw = gl
                .create_shader(stage.gl_type())
                .map_err(|reason| ShaderError::CreateShader { stage, reason })?;
            gl.shader_source(raw, source);
            gl.compile_shader(raw);

            if !gl.get_shader_compile_status(raw) {
                let log = gl.get_shader_info_log(raw);
                gl.delete_shader(raw);
                return Err(ShaderError::Compile { stage, log });
            }

            Ok(CompiledShader { raw, stage })
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// A linked shader program plus its resolved-uniform cache.
///
/// Constructed only through [`ShaderProgram::link`], so a value of this
/// type always refers to a successfully linked program. Owners must call
/// [`ShaderProgram::destroy`] at shutdown; the type holds no `Drop` glue
/// because deletion needs the GL context.
pub struct ShaderProgram {
    raw: glow::NativeProgram,
    // Uniform locations are stable for the program's lifetime; absent
    // names cache the None sentinel so uploads through them no-op.
    uniforms: HashMap<String, Option<glow::NativeUniformLocation>>,
}

impl ShaderProgram {
    /// Links a vertex + fragment pair into a program.
    ///
    /// Both stage objects are consumed: detached and deleted on success
    /// (they are not needed once the program exists) and deleted on
    /// failure as well, so no path leaks them.
    pub fn link(
        gl: &glow::Context,
        vertex: CompiledShader,
        fragment: CompiledShader,
    ) -> Result<ShaderProgram, ShaderError> {
        unsafe {
            let raw = match gl.create_program() {
                Ok(raw) => raw,
                Err(reason) => {
                    gl.delete_shader(vertex.raw);
                    gl.delete_shader(fragment.raw);
                    return Err(ShaderError::CreateProgram { reason });
                }
            };

            gl.attach_shader(raw, vertex.raw);
            gl.attach_shader(raw, fragment.raw);
            gl.link_program(raw);

            let linked = gl.get_program_link_status(raw);
            let log = if linked { String::new() } else { gl.get_program_info_log(raw) };

            gl.detach_shader(raw, vertex.raw);
            gl.detach_shader(raw, fragment.raw);
            gl.delete_shader(vertex.raw);
            gl.delete_shader(fragment.raw);

            if !linked {
                gl.delete_program(raw);
                return Err(ShaderError::Link { log });
            }

            Ok(ShaderProgram { raw, uniforms: HashMap::new() })
        }
    }

    /// Compiles both stages and links them; the usual driver entry point.
    pub fn from_sources(
        gl: &glow::Context,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram, ShaderError> {
        let vs = CompiledShader::compile(gl, ShaderStage::Vertex, vertex_source)?;
        let fs = match CompiledShader::compile(gl, ShaderStage::Fragment, fragment_source) {
            Ok(fs) => fs,
            Err(e) => {
                unsafe { gl.delete_shader(vs.raw) };
                return Err(e);
            }
        };
        ShaderProgram::link(gl, vs, fs)
    }

    /// Makes this program the active one.
    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.raw)) };
    }

    /// Resolves a uniform location by name, caching the result.
    ///
    /// Absent names resolve to `None` and stay that way for the program's
    /// lifetime; uploads through them are silently ignored so a driver can
    /// keep uploading a uniform its active shader variant does not use.
    pub fn uniform_location(
        &mut self,
        gl: &glow::Context,
        name: &str,
    ) -> Option<glow::NativeUniformLocation> {
        if let Some(cached) = self.uniforms.get(name) {
            return cached.clone();
        }

        let location = unsafe { gl.get_uniform_location(self.raw, name) };
        if location.is_none() {
            log::debug!("uniform '{name}' not found in program; uploads will be ignored");
        }
        self.uniforms.insert(name.to_string(), location.clone());
        location
    }

    /// Uploads a column-major matrix to the named uniform slot.
    pub fn set_mat4(&mut self, gl: &glow::Context, name: &str, value: &Mat4) {
        if let Some(location) = self.uniform_location(gl, name) {
            unsafe { gl.uniform_matrix_4_f32_slice(Some(&location), false, value.as_slice()) };
        }
    }

    /// Uploads an integer uniform (sampler bindings, flags).
    pub fn set_i32(&mut self, gl: &glow::Context, name: &str, value: i32) {
        if let Some(location) = self.uniform_location(gl, name) {
            unsafe { gl.uniform_1_i32(Some(&location), value) };
        }
    }

    /// Deletes the underlying program object. The value must not be used
    /// afterwards; owners call this once at shutdown.
    pub fn destroy(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.raw) };
    }
}
