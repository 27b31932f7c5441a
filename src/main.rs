use std::error::Error;
use std::path::PathBuf;

use rastery::prelude::*;

const USAGE: &str = "usage: rastery [--config file.ron] [--output frame.png] [model.obj [texture.png]]";
const DEFAULT_CONFIG: &str = "rastery.ron";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    model: Option<String>,
    texture: Option<String>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                parsed.config = Some(args.next().ok_or("--config needs a path")?.into());
            }
            "--output" | "-o" => {
                parsed.output = Some(args.next().ok_or("--output needs a path")?.into());
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag}\n{USAGE}")),
            _ => positional.push(arg),
        }
    }

    if positional.len() > 2 {
        return Err(USAGE.to_string());
    }
    let mut positional = positional.into_iter();
    parsed.model = positional.next();
    parsed.texture = positional.next();
    Ok(parsed)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::load_or_default(DEFAULT_CONFIG)?,
    };

    let mut engine = Engine::from_config(&config)?;
    match &args.model {
        Some(model) => {
            let count = engine.load_obj(model, args.texture.as_deref())?;
            log::info!("loaded {} mesh(es) from {}", count, model);
        }
        None => engine.load_cube_mesh(),
    }

    #[cfg(feature = "window")]
    if args.output.is_none() {
        return run_window(&config, engine);
    }

    let output = args.output.unwrap_or_else(|| PathBuf::from("frame.png"));
    render_to_file(&mut engine, &output)
}

/// Render a single frame (meshes posed one second into their spin) and save it.
fn render_to_file(engine: &mut Engine, output: &std::path::Path) -> Result<(), Box<dyn Error>> {
    engine.update(&InputState::default(), 1.0);
    let stats = engine.render();
    engine.frame().save_png(output)?;
    log::info!(
        "wrote {} ({} of {} faces drawn, {} pixels)",
        output.display(),
        stats.drawn,
        stats.faces,
        stats.pixels
    );
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(config: &RenderConfig, mut engine: Engine) -> Result<(), Box<dyn Error>> {
    let mut window = Window::new("rastery", config.width, config.height, config.window_scale)?;
    let mut limiter = FrameLimiter::new(&window, config.target_fps);
    let mut fps = FpsCounter::new();

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::CycleRenderMode => engine.set_render_mode(engine.render_mode().next()),
            WindowEvent::CycleCullMode => engine.set_cull_mode(engine.cull_mode().next()),
            WindowEvent::ToggleAxes => engine.toggle_axes(),
            WindowEvent::None => {}
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        engine.update(window.input(), delta_ms as f32 / 1000.0);
        window.end_frame();

        engine.render();
        window.present(engine.frame_bytes(), engine.width(), engine.height())?;

        if let Some(rate) = fps.tick(delta_ms) {
            window.set_title(&format!(
                "rastery - {:.0} fps - {} - {:?}",
                rate,
                engine.render_mode(),
                engine.cull_mode()
            ))?;
        }
    }
    Ok(())
}
