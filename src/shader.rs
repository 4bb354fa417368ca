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

//! Shader objects.

use crate::error::{Error, ResultExt};

use glow::HasContext;

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// A pipeline stage a shader can be compiled for.
pub trait ShaderStage {
    /// The GL enum for this stage.
    const GL_TYPE: u32;

    /// A human readable name, used in errors.
    const NAME: &'static str;
}

/// The vertex stage.
#[derive(Debug, Clone, Copy)]
pub struct Vertex;

/// The fragment stage.
#[derive(Debug, Clone, Copy)]
pub struct Fragment;

impl ShaderStage for Vertex {
    const GL_TYPE: u32 = glow::VERTEX_SHADER;
    const NAME: &'static str = "vertex";
}

impl ShaderStage for Fragment {
    const GL_TYPE: u32 = glow::FRAGMENT_SHADER;
    const NAME: &'static str = "fragment";
}

/// A shader object with its source already submitted.
pub struct Shader<H: HasContext + ?Sized, S: ShaderStage> {
    context: Rc<H>,
    shader: H::Shader,
    _stage: PhantomData<S>,
}

/// A vertex shader.
pub type VertexShader<H> = Shader<H, Vertex>;

/// A fragment shader.
pub type FragmentShader<H> = Shader<H, Fragment>;

impl<H: HasContext + ?Sized, S: ShaderStage> fmt::Debug for Shader<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("stage", &S::NAME)
            .finish_non_exhaustive()
    }
}

impl<H: HasContext + ?Sized, S: ShaderStage> Shader<H, S> {
    /// Create a new shader object and hand it `source`.
    ///
    /// # Safety
    ///
    /// `context` must be current, both now and when this shader is dropped.
    pub unsafe fn new(context: Rc<H>, source: &str) -> Result<Self, Error> {
        let shader = context.create_shader(S::GL_TYPE).gl_err()?;
        context.shader_source(shader, source);

        Ok(Self {
            context,
            shader,
            _stage: PhantomData,
        })
    }

    /// Compile the submitted source, returning whether it succeeded.
    pub fn compile(&self) -> bool {
        unsafe {
            self.context.compile_shader(self.shader);
            self.context.get_shader_compile_status(self.shader)
        }
    }

    /// The driver's diagnostic log for this shader, empty if there is none.
    pub fn info(&self) -> String {
        let log = unsafe { self.context.get_shader_info_log(self.shader) };

        if !log.trim().is_empty() {
            tracing::debug!("{} shader log: {}", S::NAME, log.trim_end());
        }

        log
    }

    /// The raw shader handle.
    pub fn raw(&self) -> H::Shader {
        self.shader
    }
}

impl<H: HasContext + ?Sized, S: ShaderStage> Drop for Shader<H, S> {
    fn drop(&mut self) {
        unsafe {
            self.context.delete_shader(self.shader);
        }
    }
}

/// The flavor of GLSL the current context accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlslDialect {
    /// GLSL ES 1.00, for OpenGL ES 2.0 and up.
    Es100,

    /// GLSL 1.20, for desktop OpenGL.
    Glsl120,
}

impl GlslDialect {
    /// Pick the dialect for a context version.
    pub fn for_version(version: &glow::Version) -> Self {
        Self::new(version.is_embedded)
    }

    /// Pick the dialect for an embedded or a desktop context.
    pub fn new(is_embedded: bool) -> Self {
        if is_embedded {
            GlslDialect::Es100
        } else {
            GlslDialect::Glsl120
        }
    }

    /// The lines that need to go before a shader body.
    pub fn header(self) -> &'static str {
        match self {
            GlslDialect::Es100 => "#version 100\n",

            // Desktop GLSL before 1.30 has no precision qualifiers.
            GlslDialect::Glsl120 => "#version 120\n#define lowp\n#define mediump\n#define highp\n",
        }
    }

    /// Prefix `body` with this dialect's header.
    pub fn format(self, body: &str) -> String {
        format!("{}{}", self.header(), body)
    }
}
