use std::path::PathBuf;

use glyph_galaxy::{Galaxy, GalaxyConfig, RunError};

fn run() -> Result<(), RunError> {
    // Optional first argument: path to a JSON config, also used by "Save config"
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let mut galaxy = Galaxy::new();
    if let Some(path) = config_path {
        galaxy = galaxy
            .with_config(GalaxyConfig::load_or_default(&path)?)
            .with_config_path(path);
    }
    galaxy.run()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
