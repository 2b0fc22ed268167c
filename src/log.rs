// src/log.rs
use std::io::{self, Write};

use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Verbosity picked on the command line. `RUST_LOG` wins when set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            _ => Verbosity::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Install the global subscriber writing to `writer` (stderr, or a
/// [`BarWriter`] over it, so stdout stays clean for `--list-spots`).
/// Safe to call twice; the second call is a no-op.
pub fn init<W>(verbosity: Verbosity, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .try_init();
}

/// Writer that hides a progress bar while each log line is printed, so the
/// bar is redrawn below the line instead of being torn by it.
pub struct BarWriter<M> {
    bar: ProgressBar,
    inner: M,
}

impl BarWriter<fn() -> io::Stderr> {
    pub fn stderr(bar: ProgressBar) -> Self {
        Self::new(bar, io::stderr)
    }
}

impl<M> BarWriter<M> {
    pub fn new(bar: ProgressBar, inner: M) -> Self {
        Self { bar, inner }
    }
}

impl<'a, M> MakeWriter<'a> for BarWriter<M>
where
    M: MakeWriter<'a> + 'a,
{
    type Writer = BarLine<'a, M>;

    fn make_writer(&'a self) -> Self::Writer {
        BarLine { owner: self, buf: Vec::new() }
    }
}

/// One formatted event, held until flush or drop.
pub struct BarLine<'a, M>
where
    M: MakeWriter<'a>,
{
    owner: &'a BarWriter<M>,
    buf: Vec<u8>,
}

impl<'a, M> BarLine<'a, M>
where
    M: MakeWriter<'a>,
{
    fn emit(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let buf = std::mem::take(&mut self.buf);
        let owner = self.owner;
        owner.bar.suspend(|| {
            let mut out = owner.inner.make_writer();
            out.write_all(&buf)?;
            out.flush()
        })
    }
}

impl<'a, M> Write for BarLine<'a, M>
where
    M: MakeWriter<'a>,
{
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit()
    }
}

impl<'a, M> Drop for BarLine<'a, M>
where
    M: MakeWriter<'a>,
{
    fn drop(&mut self) {
        let _ = self.emit();
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
