//! Log streaming operations

use bollard::container::{LogOutput, LogsOptions};
use futures::stream::{self, BoxStream, StreamExt};
use tracing::debug;

use crate::core::{DockerError, LogMode, Result};
use crate::docker::DockerClient;

/// Lazily produced log lines; unbounded under `LogMode::Follow`
pub type LogStream = BoxStream<'static, Result<String>>;

impl DockerClient {
    /// Stream logs from a container in the given mode
    pub fn stream_logs(&self, id: &str, mode: LogMode) -> LogStream {
        debug!("Streaming logs for container {} ({})", id, mode);

        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            timestamps: false,
            follow: mode.follows(),
            tail: mode.tail_param(),
            ..Default::default()
        };

        let frames = self.inner().logs(id, Some(options)).boxed();
        stream::unfold(Some((frames, LineSplitter::default())), |state| async move {
            let Some((mut frames, mut splitter)) = state else {
                return None;
            };
            match frames.next().await {
                Some(Ok(output)) => {
                    let lines: Vec<Result<String>> =
                        splitter.push(output).into_iter().map(Ok).collect();
                    Some((lines, Some((frames, splitter))))
                }
                Some(Err(e)) => {
                    let failure = DockerError::Logs(format!("Failed to read logs: {}", e));
                    Some((vec![Err(failure.into())], None))
                }
                None => {
                    let rest: Vec<Result<String>> =
                        splitter.finish().into_iter().map(Ok).collect();
                    (!rest.is_empty()).then_some((rest, None))
                }
            }
        })
        .flat_map(stream::iter)
        .boxed()
    }
}

/// Reassembles lines from log frames
///
/// Frames carry arbitrary byte chunks (always so for TTY containers), so an
/// incomplete trailing line is held until its newline arrives. Stdout and
/// stderr are buffered separately.
#[derive(Debug, Default)]
struct LineSplitter {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl LineSplitter {
    /// Complete lines in arrival order; empty lines included
    fn push(&mut self, output: LogOutput) -> Vec<String> {
        let (buffer, bytes) = match output {
            LogOutput::StdOut { message } | LogOutput::Console { message } => {
                (&mut self.stdout, message)
            }
            LogOutput::StdErr { message } => (&mut self.stderr, message),
            LogOutput::StdIn { .. } => return Vec::new(),
        };
        buffer.extend_from_slice(&bytes);

        let mut lines = Vec::new();
        while let Some(end) = buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = buffer.drain(..=end).collect();
            lines.push(decode_line(&line[..end]));
        }
        lines
    }

    /// Whatever is left without a trailing newline once the stream ends
    fn finish(&mut self) -> Vec<String> {
        [&mut self.stdout, &mut self.stderr]
            .into_iter()
            .filter(|buffer| !buffer.is_empty())
            .map(|buffer| decode_line(&std::mem::take(buffer)))
            .collect()
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
