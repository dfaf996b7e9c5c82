use clap::Parser;

use ec_placer::app::run_preview;
use ec_placer::backend::{list_devices, HighGuiWindow, OpenCvCamera};
use ec_placer::camera::{CameraSettings, VideoSource};
use ec_placer::cli::{handle_config_action, print_cameras, Args, Command};
use ec_placer::config::{default_path, Config};
use ec_placer::error::AppError;
use ec_placer::event_loop::{ctrlc_flag, setup_ctrlc_handler};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config_path = args.config.clone().unwrap_or_else(default_path);
    let mut config = Config::load(Some(&config_path))?;
    args.apply_overrides(&mut config);

    match args.command {
        Some(Command::ListCameras { probe }) => {
            print_cameras(&list_devices(probe));
            Ok(())
        }
        Some(Command::Config { action }) => handle_config_action(action, &config, &config_path),
        None => {
            setup_ctrlc_handler()?;
            let open = |settings: &CameraSettings| {
                OpenCvCamera::open(settings).map(|camera| Box::new(camera) as Box<dyn VideoSource>)
            };
            run_preview(&config, open, HighGuiWindow::create, ctrlc_flag())?;
            Ok(())
        }
    }
}
