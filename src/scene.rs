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

//! The fixed scene: one triangle with a rotating radial pattern.

use crate::error::Error;
use crate::program::Program;

use glow::HasContext;

use std::f64::consts::TAU;
use std::fmt;
use std::time::Duration;

/// Body of the vertex shader, without a version header.
pub const VERTEX_SHADER: &str = include_str!("./shaders/triangle.v.glsl");

/// Body of the fragment shader, without a version header.
pub const FRAGMENT_SHADER: &str = include_str!("./shaders/triangle.f.glsl");

/// Name of the vertex position attribute.
pub const POSITION: &str = "position";

/// Name of the pattern phase uniform.
pub const PHASE: &str = "phase";

/// Name of the vertex offset uniform.
pub const OFFSET: &str = "offset";

/// Components per vertex.
pub const VERTEX_COMPONENTS: i32 = 3;

/// The triangle, as `x, y, z` triples in clip space.
#[rustfmt::skip]
pub const TRIANGLE: [f32; 9] = [
     0.0,  0.5, 0.0,
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
];

/// Number of vertices in [`TRIANGLE`].
pub const VERTEX_COUNT: i32 = TRIANGLE.len() as i32 / VERTEX_COMPONENTS;

/// The background color.
pub const CLEAR_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// The shader variables the scene writes to.
pub struct SceneLocations<H: HasContext + ?Sized> {
    /// The `position` attribute slot.
    pub position: u32,

    /// The `phase` uniform.
    pub phase: H::UniformLocation,

    /// The `offset` uniform.
    pub offset: H::UniformLocation,
}

impl<H: HasContext + ?Sized> fmt::Debug for SceneLocations<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneLocations")
            .field("position", &self.position)
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<H: HasContext + ?Sized> SceneLocations<H> {
    /// Resolve every variable in a linked program.
    pub fn resolve(program: &Program<H>) -> Result<Self, Error> {
        let position = program
            .attrib_location(POSITION)
            .ok_or(Error::MissingLocation(POSITION))?;
        let phase = program
            .uniform_location(PHASE)
            .ok_or(Error::MissingLocation(PHASE))?;
        let offset = program
            .uniform_location(OFFSET)
            .ok_or(Error::MissingLocation(OFFSET))?;

        Ok(Self {
            position,
            phase,
            offset,
        })
    }
}

/// The pattern phase `elapsed` into the animation, in `[0, 2π)`.
///
/// `speed` is in radians per second. A speed of zero keeps the pattern still.
pub fn phase_at(elapsed: Duration, speed: f32) -> f32 {
    let phase = (elapsed.as_secs_f64() * speed as f64).rem_euclid(TAU) as f32;

    // Both the wrap and the narrowing can round up to exactly one full turn.
    if phase >= TAU as f32 {
        0.0
    } else {
        phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_three_vertices() {
        assert_eq!(VERTEX_COUNT, 3);
        assert_eq!(&TRIANGLE[..3], &[0.0, 0.5, 0.0]);
    }

    #[test]
    fn shaders_declare_scene_variables() {
        assert!(VERTEX_SHADER.contains("attribute vec4 position;"));
        assert!(VERTEX_SHADER.contains("uniform vec4 offset;"));
        assert!(FRAGMENT_SHADER.contains("uniform mediump float phase;"));
        assert!(!VERTEX_SHADER.contains("#version"));
        assert!(!FRAGMENT_SHADER.contains("#version"));
    }

    #[test]
    fn still_pattern_at_zero_speed() {
        assert_eq!(phase_at(Duration::from_secs(90), 0.0), 0.0);
    }

    #[test]
    fn phase_advances_with_time() {
        let phase = phase_at(Duration::from_millis(1500), 1.0);
        assert!((phase - 1.5).abs() < 1e-6);
    }

    #[test]
    fn phase_wraps_around_a_full_turn() {
        let phase = phase_at(Duration::from_secs_f64(TAU + 0.25), 1.0);
        assert!((phase - 0.25).abs() < 1e-5);

        let backwards = phase_at(Duration::from_secs(1), -1.0);
        assert!((0.0..TAU as f32).contains(&backwards));
        assert!((backwards - (TAU as f32 - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn phase_never_reaches_a_full_turn() {
        let tiny_negative = phase_at(Duration::from_nanos(1), -1e-9);
        assert!((0.0..TAU as f32).contains(&tiny_negative), "{tiny_negative}");

        let just_below = phase_at(Duration::from_secs_f64(TAU - 1e-8), 1.0);
        assert!((0.0..TAU as f32).contains(&just_below), "{just_below}");
    }
}
