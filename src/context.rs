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

//! The window, surface and GL context the scene renders into.

use crate::config::Config;
use crate::error::Error;

use glow::HasContext;

use glutin::config::{Api, Config as GlutinConfig, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributes, ContextAttributesBuilder, NotCurrentContext,
    PossiblyCurrentContext, Version,
};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};

use raw_window_handle::HasRawWindowHandle;

use std::fmt;
use std::num::NonZeroU32;
use std::rc::Rc;

use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

/// A window with a current GL context bound to it.
///
/// Fields are declared in release order: dropping this releases the loader, the context,
/// the surface, the display and finally the window. The event loop that owns the
/// connection to the windowing system must outlive it.
pub struct RenderContext {
    /// Function loader for the current context.
    gl: Rc<glow::Context>,

    /// The rendering context, current on `surface`.
    context: PossiblyCurrentContext,

    /// The surface backing `window`.
    surface: Surface<WindowSurface>,

    /// The GL display.
    display: Display,

    /// The window being drawn into.
    window: Window,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("window", &self.window.id())
            .finish_non_exhaustive()
    }
}

impl RenderContext {
    /// Open a window and make a GL context current on it.
    ///
    /// If any step fails, everything acquired before it is released again.
    pub fn new<T>(event_loop: &EventLoopWindowTarget<T>, config: &Config) -> Result<Self, Error> {
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_visible(!config.hidden);

        // Connect to the display, pick a config and create the window for it.
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(Error::Display)?;
        let window = window.ok_or(Error::NoWindow)?;

        tracing::debug!("Config: {:?}", &gl_config);
        tracing::debug!("Api: {:?}", gl_config.api());
        tracing::debug!("Samples: {:?}", gl_config.num_samples());
        tracing::debug!(
            "Hardware Accelerated: {:?}",
            gl_config.hardware_accelerated()
        );

        let display = gl_config.display();
        let not_current = create_context(&display, &gl_config, &window)?;

        let attrs = window.build_surface_attributes(<_>::default());
        let surface = unsafe {
            display
                .create_window_surface(&gl_config, &attrs)
                .map_err(Error::Surface)?
        };

        let context = not_current
            .make_current(&surface)
            .map_err(Error::MakeCurrent)?;

        if config.vsync() {
            if let Err(err) = surface.set_swap_interval(
                &context,
                SwapInterval::Wait(NonZeroU32::MIN),
            ) {
                tracing::warn!("Error setting vsync: {err:?}");
            }
        }

        // SAFETY: The context was just made current.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s) as *const _)
        };

        if gl.supported_extensions().contains("GL_KHR_debug") {
            unsafe {
                gl.enable(glow::DEBUG_OUTPUT);
                gl.debug_message_callback(debug_message_callback);
            }
        }

        let version = gl.version();
        tracing::info!(
            "Running on {} {}.{} ({})",
            if version.is_embedded {
                "OpenGL ES"
            } else {
                "OpenGL"
            },
            version.major,
            version.minor,
            version.vendor_info
        );

        Ok(Self {
            gl: Rc::new(gl),
            context,
            surface,
            display,
            window,
        })
    }

    /// The function loader for this context.
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    /// The GL display this context was created on.
    pub fn display(&self) -> &Display {
        &self.display
    }

    /// The window being drawn into.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The current size of the window, in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Resize the surface to match the window.
    ///
    /// Zero-sized requests are ignored.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            // Only some platforms need this, but it's a no-op elsewhere.
            self.surface.resize(&self.context, width, height);
        }
    }

    /// Present the frame that was just drawn.
    pub fn swap_buffers(&self) -> Result<(), Error> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(Error::SwapBuffers)
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        tracing::debug!("releasing render context for {:?}", self.window.id());
    }
}

/// Prefer a config that can render OpenGL ES 2.0, then one with fewer samples.
fn pick_config(configs: Box<dyn Iterator<Item = GlutinConfig> + '_>) -> GlutinConfig {
    configs
        .reduce(|accum, config| {
            let gles_check =
                config.api().contains(Api::GLES2) & !accum.api().contains(Api::GLES2);
            let same_api = config.api().contains(Api::GLES2) == accum.api().contains(Api::GLES2);

            if gles_check || (same_api && config.num_samples() < accum.num_samples()) {
                config
            } else {
                accum
            }
        })
        .expect("the display reports an error when it has no configs")
}

/// Try the context APIs in order of preference, keeping the first that works.
fn create_context(
    display: &Display,
    gl_config: &GlutinConfig,
    window: &Window,
) -> Result<NotCurrentContext, Error> {
    let window_handle = Some(window.raw_window_handle());
    let [gles2, gles, default]: [ContextAttributes; 3] = [
        ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(window_handle),
        ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(window_handle),
        ContextAttributesBuilder::new().build(window_handle),
    ];

    let mut result = unsafe { display.create_context(gl_config, &gles2) };
    for attrs in [gles, default] {
        let Err(err) = &result else { break };
        tracing::debug!("context creation failed: {err}");
        result = unsafe { display.create_context(gl_config, &attrs) };
    }

    result.map_err(Error::Context)
}

fn debug_message_callback(source: u32, ty: u32, id: u32, severity: u32, message: &str) {
    let source = match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        glow::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    };

    let ty = match ty {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        glow::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    };

    match severity {
        glow::DEBUG_SEVERITY_HIGH => tracing::error!("{ty}-{id} ({source}): {message}"),
        glow::DEBUG_SEVERITY_MEDIUM => tracing::warn!("{ty}-{id} ({source}): {message}"),
        glow::DEBUG_SEVERITY_LOW => tracing::info!("{ty}-{id} ({source}): {message}"),
        glow::DEBUG_SEVERITY_NOTIFICATION => tracing::debug!("{ty}-{id} ({source}): {message}"),
        _ => (),
    }
}
