use std::time::Instant;

use anyhow::Context;

use learnopengl::{
    abs::{App, Mesh, ProgramState, ShaderProgram},
    config::{Config, DEFAULT_LOG_LEVEL},
    error::InitError,
    frame::{FrameInput, FrameRenderer},
    logging, quad,
};

fn main() {
    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(-1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::load();
    let level = config
        .as_ref()
        .map(|c| c.log_level.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    logging::init(logging::resolve_level(
        std::env::var("RUST_LOG").ok().as_deref(),
        level,
    ));
    let config = config.context("failed to load configuration")?;

    let mut app = App::new(&config)?;
    let sources = config.shader_sources()?;

    let shader_program = ShaderProgram::build(&app.gl, &sources);
    if config.strict_shaders
        && let ProgramState::Failed { step, .. } = shader_program.state()
    {
        return Err(InitError::ProgramNotReady { step: *step }.into());
    }

    let mesh = Mesh::new(&app.gl, &quad::VERTICES, &quad::INDICES).map_err(InitError::from)?;
    let mut renderer = FrameRenderer::new(
        &app.gl,
        shader_program,
        mesh,
        config.clear_color(),
        config.color_uniform.as_str(),
    );
    let (width, height) = app.drawable_size();
    renderer.resize(width, height);

    let start = Instant::now();
    let mut input = FrameInput::default();
    while !input.close_requested() {
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
        }
        if input.take_resize().is_some() {
            let (width, height) = app.drawable_size();
            renderer.resize(width, height);
        }

        renderer.render(start.elapsed().as_secs_f32());
        app.window.gl_swap_window();
    }

    log::info!("window closed");
    Ok(())
}
