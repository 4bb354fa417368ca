// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `glow-triangle`.
//
// `glow-triangle` is free software: you can redistribute it and/or modify it under the terms of
// either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `glow-triangle` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Lesser General Public License or the Mozilla Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `glow-triangle`. If not, see <https://www.gnu.org/licenses/> or
// <https://www.mozilla.org/en-US/MPL/2.0/>.

//! Draws the scene with a linked program and a static vertex buffer.

use crate::error::{Error, ResultExt};
use crate::program::Program;
use crate::scene::{self, SceneLocations};
use crate::shader::{FragmentShader, GlslDialect, Shader, ShaderStage, VertexShader};

use glow::HasContext;

use std::fmt;
use std::rc::Rc;

/// Everything needed to draw the triangle.
pub struct TriangleRenderer<H: HasContext + ?Sized> {
    /// The linked scene program.
    program: Program<H>,

    /// Resolved shader variables.
    locations: SceneLocations<H>,

    /// Holds [`scene::TRIANGLE`].
    vertex_buffer: H::Buffer,

    /// Only created when the context has vertex array objects.
    vertex_array: Option<H::VertexArray>,

    /// The underlying context.
    context: Rc<H>,
}

impl<H: HasContext + ?Sized> fmt::Debug for TriangleRenderer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriangleRenderer")
            .field("locations", &self.locations)
            .finish_non_exhaustive()
    }
}

impl<H: HasContext + ?Sized> TriangleRenderer<H> {
    /// Compile the scene, link it and upload the triangle.
    ///
    /// # Safety
    ///
    /// `context` must be current, both now and when this renderer is dropped.
    pub unsafe fn new(context: Rc<H>) -> Result<Self, Error> {
        let version = context.version();
        let dialect = GlslDialect::for_version(version);
        let has_vertex_arrays = version.major >= 3;

        let fragment: FragmentShader<H> =
            compile_stage(&context, &dialect.format(scene::FRAGMENT_SHADER))?;
        let vertex: VertexShader<H> =
            compile_stage(&context, &dialect.format(scene::VERTEX_SHADER))?;

        let program = Program::new(context.clone())?;
        program.attach(&vertex);
        program.attach(&fragment);
        program.link();

        if !program.is_linked() {
            return Err(Error::Link(program.info()));
        }

        program.activate();
        let locations = SceneLocations::resolve(&program)?;
        context.uniform_4_f32(Some(&locations.offset), 0.0, 0.0, 0.0, 0.0);

        let vertex_array = if has_vertex_arrays {
            let vao = context.create_vertex_array().gl_err()?;
            context.bind_vertex_array(Some(vao));
            Some(vao)
        } else {
            None
        };

        let vertex_buffer = match context.create_buffer().gl_err() {
            Ok(buffer) => buffer,
            Err(err) => {
                if let Some(vao) = vertex_array {
                    context.delete_vertex_array(vao);
                }
                return Err(err);
            }
        };

        context.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        context.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&scene::TRIANGLE),
            glow::STATIC_DRAW,
        );

        if let Err(err) = gl_error(&*context) {
            tracing::error!("{err}");
        }

        Ok(Self {
            program,
            locations,
            vertex_buffer,
            vertex_array,
            context,
        })
    }

    /// The resolved shader variables.
    pub fn locations(&self) -> &SceneLocations<H> {
        &self.locations
    }

    /// Draw one frame into a framebuffer of `width` by `height` pixels.
    ///
    /// Returns the GL error the frame raised, if any. The frame is still submitted.
    pub fn draw_frame(&self, (width, height): (u32, u32), phase: f32) -> Result<(), Error> {
        let gl = &*self.context;
        let [r, g, b, a] = scene::CLEAR_COLOR;

        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);

            self.program.activate();
            gl.uniform_1_f32(Some(&self.locations.phase), phase);

            if let Some(vao) = self.vertex_array {
                gl.bind_vertex_array(Some(vao));
            }
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vertex_buffer));
            gl.vertex_attrib_pointer_f32(
                self.locations.position,
                scene::VERTEX_COMPONENTS,
                glow::FLOAT,
                false,
                0,
                0,
            );
            gl.enable_vertex_attrib_array(self.locations.position);

            gl.draw_arrays(glow::TRIANGLES, 0, scene::VERTEX_COUNT);
        }

        gl_error(gl)
    }
}

impl<H: HasContext + ?Sized> Drop for TriangleRenderer<H> {
    fn drop(&mut self) {
        unsafe {
            self.context.delete_buffer(self.vertex_buffer);
            if let Some(vao) = self.vertex_array {
                self.context.delete_vertex_array(vao);
            }
        }
    }
}

/// Create and compile one stage, turning a failed compile into [`Error::Compile`].
unsafe fn compile_stage<H: HasContext + ?Sized, S: ShaderStage>(
    context: &Rc<H>,
    source: &str,
) -> Result<Shader<H, S>, Error> {
    let shader = Shader::<H, S>::new(context.clone(), source)?;

    if !shader.compile() {
        return Err(Error::Compile {
            stage: S::NAME,
            log: shader.info(),
        });
    }

    Ok(shader)
}

fn gl_error(h: &(impl HasContext + ?Sized)) -> Result<(), Error> {
    match unsafe { h.get_error() } {
        glow::NO_ERROR => Ok(()),
        err => Err(Error::Gl(gl_error_name(err).into())),
    }
}

fn gl_error_name(err: u32) -> &'static str {
    match err {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "Unknown GL error",
    }
}

#[cfg(test)]
mod tests {
    use super::gl_error_name;

    #[test]
    fn names_known_errors() {
        assert_eq!(gl_error_name(glow::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(gl_error_name(glow::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(gl_error_name(0xdead), "Unknown GL error");
    }
}
