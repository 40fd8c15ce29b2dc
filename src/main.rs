use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;

use solar_scene::config::SceneConfig;
use solar_scene::gui::SolarScene;
use solar_scene::model::{SceneAnimator, SystemClock};

/// Animated sun, earth and moon. Drag to orbit, scroll to zoom, move the
/// mouse to tilt the camera. O/G/H toggle orbits, grid and HUD.
#[derive(Debug, Parser)]
#[command(name = "solar-scene", version)]
struct Args {
    /// Scene configuration file (TOML). Built-in defaults if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to load textures from, overriding the config.
    #[arg(short, long)]
    assets: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(args) {
        log::error!("{:#}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Reading scene from {:?}", path);
            SceneConfig::load(path)?
        }
        None => {
            log::info!("Using the built-in scene");
            SceneConfig::default()
        }
    };

    if let Some(assets) = args.assets {
        config.assets = assets;
    }
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let system = config.build_system()?;
    log::info!(
        "{} bodies, textures from {:?}",
        system.len(),
        config.assets
    );

    let mut window =
        Window::new_with_size(&config.window.title, config.window.width, config.window.height);
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(config.window.framerate_limit);
    let background = config.background_color()?;
    window.set_background_color(background.x, background.y, background.z);

    let viewport = SolarScene::viewport_of(&window);
    let animator = SceneAnimator::new(system, viewport, config.camera.tilt_sensitivity);
    let scene = SolarScene::new(animator, Box::new(SystemClock), &config, &mut window);

    window.render_loop(scene);
    log::info!("Window closed");
    Ok(())
}
