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

//! Draws a single shaded triangle through an OpenGL (ES) context.
//!
//! The pieces follow the order they are set up in:
//!
//! - [`RenderContext`] opens a window with [`winit`] and makes a [`glutin`] context current
//!   on it. Dropping it releases everything in the reverse order.
//! - [`Shader`] and [`Program`] are thin owners of GL shader and program objects, driven
//!   through [`glow`].
//! - [`TriangleRenderer`] compiles the scene, resolves its variables and draws one frame at
//!   a time.
//! - [`app::run`] ties it together in an event loop that exits on close, on Escape or after
//!   a configured number of frames.
//!
//! [`winit`]: https://crates.io/crates/winit
//! [`glutin`]: https://crates.io/crates/glutin
//! [`glow`]: https://crates.io/crates/glow

pub mod app;
pub mod config;
pub mod logging;
pub mod scene;

mod context;
mod error;
mod program;
mod renderer;
mod shader;

pub use config::Config;
pub use context::RenderContext;
pub use error::Error;
pub use program::Program;
pub use renderer::TriangleRenderer;
pub use scene::SceneLocations;
pub use shader::{
    Fragment, FragmentShader, GlslDialect, Shader, ShaderStage, Vertex, VertexShader,
};
