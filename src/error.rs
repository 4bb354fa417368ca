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

//! The error type for this crate.

use thiserror::Error;

/// Everything that can go wrong while setting up or driving the scene.
#[derive(Debug, Error)]
pub enum Error {
    /// The display connection or the window could not be set up.
    #[error("cannot connect to the display: {0}")]
    Display(#[source] Box<dyn std::error::Error>),

    /// The display was built, but no window came with it.
    #[error("the display was created without a window")]
    NoWindow,

    /// None of the requested context APIs could be created.
    #[error("unable to create a rendering context: {0}")]
    Context(#[source] glutin::error::Error),

    /// The window surface could not be created.
    #[error("unable to create a window surface: {0}")]
    Surface(#[source] glutin::error::Error),

    /// The context could not be bound to the surface.
    #[error("unable to make the context current: {0}")]
    MakeCurrent(#[source] glutin::error::Error),

    /// Presenting a frame failed.
    #[error("unable to swap buffers: {0}")]
    SwapBuffers(#[source] glutin::error::Error),

    /// A raw GL call reported a failure.
    #[error("gl error: {0}")]
    Gl(String),

    /// A shader stage failed to compile.
    #[error("{stage} shader failed to compile: {log}")]
    Compile {
        /// The stage that failed, `vertex` or `fragment`.
        stage: &'static str,

        /// The driver's info log.
        log: String,
    },

    /// The program failed to link.
    #[error("program failed to link: {0}")]
    Link(String),

    /// A shader variable the scene relies on was not found in the linked program.
    #[error("unable to get location of `{0}`")]
    MissingLocation(&'static str),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Gl(s)
    }
}

/// Converts the `String` errors that [`glow`] reports.
pub(crate) trait ResultExt<T> {
    fn gl_err(self) -> Result<T, Error>;
}

impl<T, E: Into<Error>> ResultExt<T> for Result<T, E> {
    fn gl_err(self) -> Result<T, Error> {
        self.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_strings_become_gl_errors() {
        let result: Result<(), String> = Err("out of handles".to_string());
        let err = result.gl_err().unwrap_err();

        assert!(matches!(err, Error::Gl(ref msg) if msg == "out of handles"));
        assert_eq!(err.to_string(), "gl error: out of handles");
    }

    #[test]
    fn missing_location_names_the_variable() {
        let err = Error::MissingLocation("phase");
        assert_eq!(err.to_string(), "unable to get location of `phase`");
    }

    #[test]
    fn compile_error_mentions_stage_and_log() {
        let err = Error::Compile {
            stage: "fragment",
            log: "0:1: syntax error".into(),
        };

        assert_eq!(
            err.to_string(),
            "fragment shader failed to compile: 0:1: syntax error"
        );
    }
}
