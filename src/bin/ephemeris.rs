use std::path::PathBuf;
use std::process;

use anyhow::{ensure, Result};
use clap::Parser;

use solar_scene::config::SceneConfig;
use solar_scene::model::{Clock, ManualClock, SceneAnimator, SystemClock, Viewport};

/// Prints where every body is at the given times, without opening a window.
#[derive(Debug, Parser)]
struct Args {
    /// Scene configuration file (TOML). Built-in defaults if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start time in milliseconds since the Unix epoch. Defaults to now.
    #[arg(short, long)]
    time: Option<f64>,

    /// Number of samples to print.
    #[arg(short, long, default_value_t = 1)]
    steps: usize,

    /// Milliseconds between samples.
    #[arg(short, long, default_value_t = 1000.0)]
    interval: f64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Args::parse()) {
        log::error!("{:#}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    ensure!(args.interval.is_finite(), "interval must be finite");

    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let system = config.build_system()?;
    let viewport = Viewport::new(config.window.width as f64, config.window.height as f64);
    let animator = SceneAnimator::new(system, viewport, config.camera.tilt_sensitivity);
    let mut state = animator.initial_state();

    let start = args.time.unwrap_or_else(|| SystemClock.now_millis());
    let clock = ManualClock::new(start);

    for step in 0..args.steps {
        if step > 0 {
            clock.advance(args.interval);
            println!();
        }
        let now = clock.now_millis();
        animator.update_frame(&mut state, now);

        println!("t = {} ms", now);
        let system = animator.system();
        for body in system.bodies() {
            let local = state.local_position(body.id);
            let world = state.world_position(system, body.id);
            let parent = match body.parent {
                Some(id) => system.get_body(id).info.name.as_str(),
                None => "<root>",
            };
            print!(
                "  {:<10} local ({:>8.3}, {:>8.3}, {:>8.3}) in {:<8} world ({:>8.3}, {:>8.3}, {:>8.3})",
                body.info.name, local.x, local.y, local.z, parent, world.x, world.y, world.z,
            );
            match &body.orbit {
                Some(orbit) => println!("  angle {:>7.2} deg", orbit.angle_at(now).to_degrees()),
                None => println!(),
            }
        }
    }

    Ok(())
}
