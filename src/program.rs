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

//! Program objects.

use crate::error::{Error, ResultExt};
use crate::shader::{Shader, ShaderStage};

use glow::HasContext;

use std::fmt;
use std::rc::Rc;

/// A program object that shaders are attached to and linked into.
pub struct Program<H: HasContext + ?Sized> {
    context: Rc<H>,
    program: H::Program,
}

impl<H: HasContext + ?Sized> fmt::Debug for Program<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program").finish_non_exhaustive()
    }
}

impl<H: HasContext + ?Sized> Program<H> {
    /// Create a new, empty program.
    ///
    /// # Safety
    ///
    /// `context` must be current, both now and when this program is dropped.
    pub unsafe fn new(context: Rc<H>) -> Result<Self, Error> {
        let program = context.create_program().gl_err()?;
        Ok(Self { context, program })
    }

    /// Attach a shader.
    ///
    /// Nothing checks that the shader compiled or that a stage is only attached once.
    pub fn attach<S: ShaderStage>(&self, shader: &Shader<H, S>) {
        unsafe {
            self.context.attach_shader(self.program, shader.raw());
        }
    }

    /// Link the attached shaders.
    ///
    /// Use [`Program::is_linked`] to find out whether it worked.
    pub fn link(&self) {
        unsafe {
            self.context.link_program(self.program);
        }
    }

    /// Whether the last link succeeded.
    pub fn is_linked(&self) -> bool {
        unsafe { self.context.get_program_link_status(self.program) }
    }

    /// The driver's link log, empty if there is none.
    pub fn info(&self) -> String {
        unsafe { self.context.get_program_info_log(self.program) }
    }

    /// Make this the current program for draw calls.
    pub fn activate(&self) {
        unsafe {
            self.context.use_program(Some(self.program));
        }
    }

    /// Look up a vertex attribute by name.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        unsafe { self.context.get_attrib_location(self.program, name) }
    }

    /// Look up a uniform by name.
    pub fn uniform_location(&self, name: &str) -> Option<H::UniformLocation> {
        unsafe { self.context.get_uniform_location(self.program, name) }
    }
}

impl<H: HasContext + ?Sized> Drop for Program<H> {
    fn drop(&mut self) {
        unsafe {
            self.context.delete_program(self.program);
        }
    }
}
