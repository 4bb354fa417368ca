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

//! Command-line configuration.

use clap::Parser;

/// Default window width, in physical pixels.
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default window height, in physical pixels.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// How the window and the render loop are set up.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "glow-triangle", version, about = "Draws a shaded triangle with OpenGL ES")]
pub struct Config {
    /// Window width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Window title.
    #[arg(long, default_value = "glow-triangle")]
    pub title: String,

    /// Exit after drawing this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// How fast the color pattern rotates, in radians per second.
    #[arg(long, default_value_t = 1.0)]
    pub phase_speed: f32,

    /// Do not wait for vertical sync when presenting.
    #[arg(long)]
    pub no_vsync: bool,

    /// Keep the window open when Escape is pressed.
    #[arg(long)]
    pub no_escape: bool,

    /// Create the window without showing it.
    #[arg(long)]
    pub hidden: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: "glow-triangle".into(),
            frames: None,
            phase_speed: 1.0,
            no_vsync: false,
            no_escape: false,
            hidden: false,
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// Whether pressing Escape should close the window.
    pub fn exit_on_escape(&self) -> bool {
        !self.no_escape
    }

    /// Whether to request a swap interval of one frame.
    pub fn vsync(&self) -> bool {
        !self.no_vsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_line_matches_default() {
        let parsed = Config::try_parse_from(["glow-triangle"]).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.exit_on_escape());
        assert!(parsed.vsync());
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = Config::try_parse_from([
            "glow-triangle",
            "--width",
            "640",
            "--height",
            "480",
            "--frames",
            "10",
            "--phase-speed",
            "0",
            "--no-vsync",
            "--no-escape",
            "--hidden",
        ])
        .unwrap();

        assert_eq!((parsed.width, parsed.height), (640, 480));
        assert_eq!(parsed.frames, Some(10));
        assert_eq!(parsed.phase_speed, 0.0);
        assert!(!parsed.vsync());
        assert!(!parsed.exit_on_escape());
        assert!(parsed.hidden);
    }

    #[test]
    fn rejects_non_numeric_size() {
        assert!(Config::try_parse_from(["glow-triangle", "--width", "wide"]).is_err());
    }
}
