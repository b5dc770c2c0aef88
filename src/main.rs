use clap::Parser;
use relm4::prelude::*;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use weightpicker::config::{self, ConfigError, RangeOverrides};
use weightpicker::gui::app::{AppInit, AppModel};
use weightpicker::gui::scale::ScaleState;
use weightpicker::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "weightpicker", version, about, long_about = None)]
struct Cli {
    /// Smallest selectable weight (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    min: Option<i32>,

    /// Largest selectable weight (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i32>,

    /// Weight shown at the top of the dial on start (overrides the config file)
    #[arg(short = 'i', long, allow_negative_numbers = true)]
    initial: Option<i32>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the default configuration file if missing, print its path and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn overrides(&self) -> RangeOverrides {
        RangeOverrides {
            min: self.min,
            max: self.max,
            initial: self.initial,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match config::resolve_config_path(cli.config.as_deref()) {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };

    if cli.init_config {
        let path = config_path.ok_or(ConfigError::ConfigDirNotFound)?;
        let path = config::write_default_config(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = cli.overrides();
    let mut config = config::load_or_default(config_path.as_deref());
    overrides.apply(&mut config);

    // Reject bad ranges before any window shows up
    let state = ScaleState::from_config(&config)?;
    let selection = Rc::new(Cell::new(state.selected_weight()));

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services; nothing to watch without a config file
    if let Some(path) = &config_path {
        runtime::start_background_services(path.clone(), tx);
    }

    // GTK must not see our own flags
    let app = RelmApp::new("org.example.weightpicker").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        overrides,
        state,
        selection: selection.clone(),
        events: rx,
    });

    println!("{}", selection.get());
    Ok(())
}
