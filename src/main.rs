//! Farmstead demo binary: opens the interactive farm-scene viewer.

use std::{io::Write, path::Path, process::ExitCode};

use farmstead::{FarmsteadError, Options, Viewer};

fn usage() {
    log::error!(
        "Usage: farmstead [--schema | --presets <dir> | <options.toml>]"
    );
}

fn write_schema() -> Result<(), FarmsteadError> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| FarmsteadError::OptionsParse(e.to_string()))?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{schema}")?;
    Ok(())
}

fn write_presets(dir: &Path) -> Result<(), FarmsteadError> {
    let mut out = std::io::stdout().lock();
    for name in Options::list_presets(dir) {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn run() -> Result<(), FarmsteadError> {
    let mut args = std::env::args().skip(1);
    let options = match args.next().as_deref() {
        Some("--schema") => return write_schema(),
        Some("--presets") => {
            let dir = args.next().unwrap_or_else(|| ".".to_owned());
            return write_presets(Path::new(&dir));
        }
        Some("-h" | "--help") => {
            usage();
            return Ok(());
        }
        Some(path) => Options::load(Path::new(path))?,
        None => Options::default(),
    };

    Viewer::builder().with_options(options).build().run()
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
