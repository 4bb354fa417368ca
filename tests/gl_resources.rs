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

//! Exercises the GL wrappers against a real context.
//!
//! This runs without the test harness so the event loop lives on the main thread. It skips
//! itself when no display is reachable.

use glow::HasContext;
use glow_triangle::scene::{self, SceneLocations};
use glow_triangle::{
    Config, Error, FragmentShader, GlslDialect, Program, RenderContext, TriangleRenderer,
    VertexShader,
};

use std::rc::Rc;

use winit::event_loop::EventLoop;

const BROKEN_SHADER: &str = "void main() { gl_Position = not_declared; }";

const FRAGMENT_WITHOUT_PHASE: &str = "
#ifdef GL_ES
precision mediump float;
#endif

varying mediump vec2 pos;

void main() {
    gl_FragColor = vec4(pos, 0.0, 1.0);
}
";

fn main() {
    if std::env::var_os("DISPLAY").is_none() {
        println!("skipping gl_resources: no X11 display");
        return;
    }

    let event_loop = EventLoop::new();
    let config = Config {
        width: 64,
        height: 64,
        hidden: true,
        no_vsync: true,
        ..Config::default()
    };

    let context = match RenderContext::new(&event_loop, &config) {
        Ok(context) => context,
        Err(err) => {
            println!("skipping gl_resources: {err}");
            return;
        }
    };

    let gl = context.gl().clone();
    let dialect = GlslDialect::for_version(gl.version());

    run("valid_shader_compiles", || valid_shader_compiles(&gl, dialect));
    run("invalid_shader_reports_log", || {
        invalid_shader_reports_log(&gl, dialect)
    });
    run("program_resolves_declared_names", || {
        program_resolves_declared_names(&gl, dialect)
    });
    run("missing_phase_is_reported", || {
        missing_phase_is_reported(&gl, dialect)
    });
    run("renderer_draws_a_frame", || {
        renderer_draws_a_frame(&gl, &context)
    });

    // Everything created above is gone; releasing the context must not fail.
    drop(gl);
    drop(context);
    println!("test context_releases_cleanly ... ok");
}

fn run(name: &str, test: impl FnOnce()) {
    test();
    println!("test {name} ... ok");
}

fn valid_shader_compiles(gl: &Rc<glow::Context>, dialect: GlslDialect) {
    let vertex: VertexShader<glow::Context> =
        unsafe { VertexShader::new(gl.clone(), &dialect.format(scene::VERTEX_SHADER)) }
            .expect("create vertex shader");
    assert!(vertex.compile(), "vertex log: {}", vertex.info());

    let fragment: FragmentShader<glow::Context> =
        unsafe { FragmentShader::new(gl.clone(), &dialect.format(scene::FRAGMENT_SHADER)) }
            .expect("create fragment shader");
    assert!(fragment.compile(), "fragment log: {}", fragment.info());
}

fn invalid_shader_reports_log(gl: &Rc<glow::Context>, dialect: GlslDialect) {
    let vertex: VertexShader<glow::Context> =
        unsafe { VertexShader::new(gl.clone(), &dialect.format(BROKEN_SHADER)) }
            .expect("create vertex shader");

    assert!(!vertex.compile());
    assert!(!vertex.info().trim().is_empty());
}

fn link(gl: &Rc<glow::Context>, dialect: GlslDialect, fragment: &str) -> Program<glow::Context> {
    let vertex: VertexShader<glow::Context> =
        unsafe { VertexShader::new(gl.clone(), &dialect.format(scene::VERTEX_SHADER)) }
            .expect("create vertex shader");
    let fragment: FragmentShader<glow::Context> =
        unsafe { FragmentShader::new(gl.clone(), &dialect.format(fragment)) }
            .expect("create fragment shader");
    assert!(vertex.compile(), "vertex log: {}", vertex.info());
    assert!(fragment.compile(), "fragment log: {}", fragment.info());

    let program = unsafe { Program::new(gl.clone()) }.expect("create program");
    program.attach(&vertex);
    program.attach(&fragment);
    program.link();
    assert!(program.is_linked(), "link log: {}", program.info());

    program
}

fn program_resolves_declared_names(gl: &Rc<glow::Context>, dialect: GlslDialect) {
    let program = link(gl, dialect, scene::FRAGMENT_SHADER);
    program.activate();

    assert!(program.attrib_location(scene::POSITION).is_some());
    assert!(program.attrib_location("not_an_attribute").is_none());
    assert!(program.uniform_location(scene::PHASE).is_some());
    assert!(program.uniform_location(scene::OFFSET).is_some());
    assert!(program.uniform_location("not_a_uniform").is_none());

    SceneLocations::resolve(&program).expect("resolve scene locations");
}

fn missing_phase_is_reported(gl: &Rc<glow::Context>, dialect: GlslDialect) {
    let program = link(gl, dialect, FRAGMENT_WITHOUT_PHASE);

    match SceneLocations::resolve(&program) {
        Err(Error::MissingLocation(name)) => assert_eq!(name, scene::PHASE),
        other => panic!("expected a missing `phase`, got {other:?}"),
    }
}

fn renderer_draws_a_frame(gl: &Rc<glow::Context>, context: &RenderContext) {
    let renderer = unsafe { TriangleRenderer::new(gl.clone()) }.expect("create renderer");

    // Drain anything left over from earlier checks.
    for _ in 0..16 {
        if unsafe { gl.get_error() } == glow::NO_ERROR {
            break;
        }
    }

    renderer
        .draw_frame(context.size(), 1.0)
        .expect("frame raised a GL error");
    assert!(renderer.locations().position < 16);
    context.swap_buffers().expect("swap buffers");
}
