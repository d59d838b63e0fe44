use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use iconc_core::BmpEncoder;
use log::{error, info};

use crate::compiler::CompileConfig;

mod compiler;
mod error;
mod normalize;

/// Compile the icon directories into a PROGMEM header for the panel firmware.
#[derive(argh::FromArgs)]
struct Args {
    /// directory of 64x64 widget icons
    #[argh(option, default = "CompileConfig::default().widget_dir")]
    widget_dir: PathBuf,

    /// directory of 256x256 UI icons
    #[argh(option, default = "CompileConfig::default().ui_dir")]
    ui_dir: PathBuf,

    /// generated header path
    #[argh(option, short = 'o', default = "CompileConfig::default().output")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let config = CompileConfig {
        widget_dir: args.widget_dir,
        ui_dir: args.ui_dir,
        output: args.output,
    };

    match compiler::run(&config, &BmpEncoder) {
        Ok(report) => {
            info!(
                "Wrote {} widget and {} UI icons ({} bytes) to {}",
                report.widget_icons,
                report.ui_icons,
                report.bitmap_bytes,
                config.output.display()
            );
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{} stage failed: {}", err.stage(), err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
