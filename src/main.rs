use std::process::ExitCode as ProcessExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use heif_p010::cli::Cli;
use heif_p010::image_pipeline::{ConversionError, ExitCode, HeifToP010Pipeline};
use heif_p010::logger;

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::Success.to_exit_code(),
        Err(e) => {
            error!("Conversion failed: {:#}", e);
            e.downcast_ref::<ConversionError>()
                .map(ConversionError::exit_code)
                .unwrap_or(ExitCode::GeneralError)
                .to_exit_code()
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.conversion_config()?;
    let output_path = cli.output_path();

    info!("Output target: {:?}", config.target);
    info!(
        "Color: gamut {}, range {}, transfer {}",
        config.color.gamut, config.color.range, config.color.transfer
    );

    let pipeline = HeifToP010Pipeline::new(config);
    let timings = pipeline
        .convert_file_with_timings(&cli.input_file, &output_path)
        .with_context(|| format!("converting {}", cli.input_file.display()))?;

    if cli.verbose {
        timings.log_summary();
    }
    info!("Wrote {}", output_path.display());
    Ok(())
}
