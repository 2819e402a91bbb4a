use std::process::ExitCode;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info};

use storepick::config::Config;
use storepick::runner::{self, RunError};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // stdout carries the outcome lines; logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = Config::from_env();
    let metrics = storepick::observability::init(config.metrics_port, config.metrics_file.clone())?;

    info!("storepick starting");
    info!("  input: {}", config.input.as_ref().map_or("stdin".to_string(), |p| p.display().to_string()));
    info!("  output: {}", config.output.as_ref().map_or("stdout".to_string(), |p| p.display().to_string()));

    let input: Box<dyn AsyncRead + Unpin> = match &config.input {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    };

    // The output file is only created once the batch has parsed, so rejected
    // input leaves an existing file as it was.
    let outcome = match runner::read_batch(input).await {
        Ok(batch) => {
            let output: Box<dyn AsyncWrite + Unpin> = match &config.output {
                Some(path) => Box::new(tokio::fs::File::create(path).await?),
                None => Box::new(tokio::io::stdout()),
            };
            runner::run_batch(&batch, output).await
        }
        Err(e) => Err(e),
    };

    let finished = match outcome {
        Ok(finished) => finished,
        Err(RunError::Input(e)) => {
            error!("rejected input: {e}");
            return Ok(ExitCode::from(2));
        }
        Err(e @ RunError::Io(_)) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(path) = &config.report {
        let json = finished.summary().to_json()?;
        tokio::fs::write(path, json).await?;
        info!("summary report written to {}", path.display());
    }
    metrics.flush().await?;

    info!("storepick done: {} admitted", finished.report.success_count);
    Ok(ExitCode::SUCCESS)
}
