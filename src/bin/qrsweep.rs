use clap::Parser;
use qr_block_sweep::config::MAX_UPSCALE;
use qr_block_sweep::tools::resolve_input_path;
use qr_block_sweep::{SweepConfig, SweepError, run};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "qrsweep",
    version,
    about = "Try every order of the non-corner blocks of a 3x3 tiled image until a QR code scans"
)]
struct Cli {
    /// Scrambled source image (prompts, then falls back to file.png)
    image: Option<PathBuf>,
    /// Output directory (default: qr_combinations, or $QR_SWEEP_OUTPUT)
    output: Option<PathBuf>,
    /// Upscale factor applied before scanning (1 to 32)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_UPSCALE)))]
    upscale: Option<u32>,
    /// Save and scan candidates on all cores
    #[arg(long)]
    parallel: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = SweepConfig::from_env();
    config.input = resolve_input_path(cli.image, &config.input);
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(factor) = cli.upscale {
        config.decode.upscale = factor;
    }
    config.parallel |= cli.parallel;

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(SweepError::InputNotFound(path)) => {
            eprintln!("Error: File '{}' not found.", path.display());
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
