use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::engine::ReservationProcessor;
use crate::input::{self, InputError};
use crate::model::{BatchInput, BatchReport};
use crate::report::{self, SummaryReport};

/// A processed batch together with the state it left behind.
pub struct Finished {
    pub report: BatchReport,
    pub processor: ReservationProcessor,
}

impl Finished {
    pub fn summary(&self) -> SummaryReport<'_> {
        SummaryReport::new(&self.report, &self.processor)
    }
}

/// Read a whole batch from `input`, process it, and write the outcome lines
/// to `output`.
///
/// Parsing finishes before anything is written, so a malformed batch leaves
/// `output` untouched.
pub async fn run<R, W>(input: R, output: W) -> Result<Finished, RunError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let batch = read_batch(input).await?;
    run_batch(&batch, output).await
}

/// Read `input` to the end and parse it.
pub async fn read_batch<R: AsyncRead + Unpin>(mut input: R) -> Result<BatchInput, RunError> {
    let mut text = String::new();
    input.read_to_string(&mut text).await?;
    info!("read {} byte(s) of input", text.len());

    let batch = input::parse_batch(&text)?;
    info!(
        "parsed {} store(s), {} request(s)",
        batch.stores.len(),
        batch.requests.len()
    );
    Ok(batch)
}

/// Process an already parsed batch and write its outcome lines.
pub async fn run_batch<W: AsyncWrite + Unpin>(
    batch: &BatchInput,
    mut output: W,
) -> Result<Finished, RunError> {
    let mut processor = ReservationProcessor::load(batch);
    let report = processor.run(&batch.requests);

    output.write_all(report::render_text(&report).as_bytes()).await?;
    output.flush().await?;

    Ok(Finished { report, processor })
}

// ── Errors ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum RunError {
    Io(std::io::Error),
    Input(InputError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Io(e) => write!(f, "I/O error: {e}"),
            RunError::Input(e) => write!(f, "invalid input: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Io(e) => Some(e),
            RunError::Input(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        RunError::Io(e)
    }
}

impl From<InputError> for RunError {
    fn from(e: InputError) -> Self {
        RunError::Input(e)
    }
}
