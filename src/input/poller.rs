//! Fixed-rate polling loop that drives the frame translator.

use std::{
    fmt::Display,
    future::Future,
    time::{Duration, Instant},
};

use thiserror::Error;

use crate::config::DriftConfig;

use super::{
    frame::RawFrame,
    source::{InputError, InputSource},
    target::{OutputError, OutputSink},
    translator::FrameTranslator,
};

/// Exit code after an interrupt
pub const EXIT_INTERRUPTED: i32 = 0;
/// Exit code when no physical device was found
pub const EXIT_DEVICE_NOT_FOUND: i32 = 1;
/// Exit code when a run ends because of a device failure
pub const EXIT_FAILED: i32 = 2;

/// Possible errors that end a polling run
#[derive(Error, Debug)]
pub enum PollError {
    #[error("input device error: {0}")]
    Input(#[from] InputError),
    #[error("output device error: {0}")]
    Output(#[from] OutputError),
    #[error("poller has already run")]
    NotIdle,
}

/// Lifecycle of a [Poller]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Running,
    Stopping,
    Terminated,
}

/// Why a polling run ended
#[derive(Debug)]
pub enum StopReason {
    Interrupted,
    Failed(PollError),
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Interrupted => write!(f, "interrupted"),
            StopReason::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Result of a polling run
#[derive(Debug)]
pub struct RunSummary {
    pub ticks: u64,
    pub reason: StopReason,
}

impl RunSummary {
    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        match self.reason {
            StopReason::Interrupted => EXIT_INTERRUPTED,
            StopReason::Failed(_) => EXIT_FAILED,
        }
    }
}

/// The [Poller] owns the physical and virtual devices and runs the frame
/// translator once per tick until it is interrupted or a device fails.
#[derive(Debug)]
pub struct Poller<S: InputSource, T: OutputSink> {
    source: S,
    sink: T,
    translator: FrameTranslator,
    interval: Duration,
    max_read_retries: u32,
    state: PollerState,
    ticks: u64,
    read_failures: u32,
    last_frame: Option<RawFrame>,
}

impl<S: InputSource, T: OutputSink> Poller<S, T> {
    pub fn new(source: S, sink: T, config: &DriftConfig) -> Self {
        let interval = Duration::from_secs_f64(1.0 / config.poll_rate.max(1) as f64);
        Self {
            source,
            sink,
            translator: FrameTranslator::from_config(config),
            interval,
            max_read_retries: config.max_read_retries,
            state: PollerState::Idle,
            ticks: 0,
            read_failures: 0,
            last_frame: None,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Number of frames written to the sink
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }

    /// Time between the start of two ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read one frame from the source, correct it and write it to the sink
    pub fn tick(&mut self) -> Result<(), PollError> {
        let raw = match self.source.read_frame() {
            Ok(frame) => {
                self.read_failures = 0;
                frame
            }
            Err(err) if err.is_transient() && self.read_failures < self.max_read_retries => {
                self.read_failures += 1;
                log::warn!(
                    "Failed to read device ({}/{}): {err}",
                    self.read_failures,
                    self.max_read_retries
                );
                let Some(frame) = self.last_frame.clone() else {
                    return Ok(());
                };
                frame
            }
            Err(err) => return Err(err.into()),
        };

        self.translator.translate(&raw, &mut self.sink)?;
        self.last_frame = Some(raw);
        self.ticks += 1;

        Ok(())
    }

    /// Run until the process receives an interrupt or a device fails
    pub async fn run(&mut self) -> RunSummary {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Unable to listen for interrupt: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until the given future completes or a device fails. The stop
    /// future is only checked between ticks, so a started tick always
    /// finishes. The target device is torn down on every exit path.
    pub async fn run_until<F>(&mut self, stop: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        if self.state != PollerState::Idle {
            return RunSummary {
                ticks: self.ticks,
                reason: StopReason::Failed(PollError::NotIdle),
            };
        }

        self.set_state(PollerState::Running);
        tokio::pin!(stop);

        let reason = loop {
            let start = Instant::now();
            if let Err(e) = self.tick() {
                log::error!("Stopping after device error: {e}");
                break StopReason::Failed(e);
            }

            let wait = self.interval.saturating_sub(start.elapsed());
            tokio::select! {
                _ = &mut stop => {
                    log::info!("Exiting...");
                    break StopReason::Interrupted;
                }
                _ = tokio::time::sleep(wait) => {}
            }
        };

        self.set_state(PollerState::Stopping);
        self.teardown();
        self.set_state(PollerState::Terminated);

        log::info!("Clean exit after {} ticks ({reason})", self.ticks);
        RunSummary {
            ticks: self.ticks,
            reason,
        }
    }

    /// Release all held state and destroy the target device. Errors are
    /// logged since the device may already be gone.
    fn teardown(&mut self) {
        if let Err(e) = self.sink.reset() {
            log::warn!("Unable to reset target device: {e}");
        }
        if let Err(e) = self.sink.close() {
            log::warn!("Unable to close target device: {e}");
        }
    }

    fn set_state(&mut self, state: PollerState) {
        log::debug!("Poller state: {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
