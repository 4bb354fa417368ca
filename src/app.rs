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

//! The render loop.

use crate::config::Config;
use crate::context::RenderContext;
use crate::error::Error;
use crate::renderer::TriangleRenderer;
use crate::scene;

use std::time::Instant;

use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;

/// Counts frames towards an optional limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimit {
    remaining: Option<u64>,
}

impl FrameLimit {
    /// Stop after `limit` frames, or never if `None`.
    pub fn new(limit: Option<u64>) -> Self {
        Self { remaining: limit }
    }

    /// Whether the limit has already been reached.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Count one drawn frame. Returns `true` once the limit has been reached.
    pub fn tick(&mut self) -> bool {
        match &mut self.remaining {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        }
    }
}

/// Open the window and draw the scene until asked to stop.
pub fn run(config: &Config) -> Result<(), Error> {
    let mut event_loop = EventLoop::new();
    let context = RenderContext::new(&event_loop, config)?;

    // SAFETY: `RenderContext::new` left the context current, and `renderer` is dropped
    // before `context`.
    let renderer = unsafe { TriangleRenderer::new(context.gl().clone())? };

    let mut frames = FrameLimit::new(config.frames);
    let mut failure = None;
    let started = Instant::now();

    if frames.is_exhausted() {
        return Ok(());
    }

    let code = event_loop.run_return(|event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => context.resize(size.width, size.height),
                WindowEvent::CloseRequested => control_flow.set_exit(),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } if config.exit_on_escape() => control_flow.set_exit(),
                _ => (),
            },
            Event::RedrawEventsCleared => {
                let phase = scene::phase_at(started.elapsed(), config.phase_speed);
                if let Err(err) = renderer.draw_frame(context.size(), phase) {
                    tracing::error!("{err}");
                }

                if let Err(err) = context.swap_buffers() {
                    failure = Some(err);
                    control_flow.set_exit_with_code(1);
                } else if frames.tick() {
                    control_flow.set_exit();
                }
            }
            _ => (),
        }
    });

    tracing::debug!("event loop exited with code {code}");

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::FrameLimit;

    #[test]
    fn unlimited_never_stops() {
        let mut frames = FrameLimit::new(None);
        assert!(!frames.is_exhausted());
        assert!((0..1000).all(|_| !frames.tick()));
    }

    #[test]
    fn stops_on_the_last_frame() {
        let mut frames = FrameLimit::new(Some(3));
        assert!(!frames.tick());
        assert!(!frames.tick());
        assert!(frames.tick());
        assert!(frames.is_exhausted());

        // Further ticks stay exhausted.
        assert!(frames.tick());
    }

    #[test]
    fn zero_is_exhausted_up_front() {
        assert!(FrameLimit::new(Some(0)).is_exhausted());
    }
}
