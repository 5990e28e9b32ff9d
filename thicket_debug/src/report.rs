// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error reporting to a text destination.
//!
//! [`WriterReporter`] implements [`ErrorReporter`]. Uncaught errors get a
//! one-line header; every captured error is followed by its component stack
//! and a hint about which boundary handled it.

use std::io::Write;

use thicket_core::captured::CapturedValue;
use thicket_core::host::{CapturedErrorLog, ErrorReporter};

/// Writes reported errors to a [`Write`](std::io::Write) destination.
pub struct WriterReporter<W: Write = Box<dyn Write>> {
    writer: W,
}

/// A [`WriterReporter`] on stderr.
pub type StderrReporter = WriterReporter<std::io::Stderr>;

impl<W: Write> std::fmt::Debug for WriterReporter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterReporter").finish_non_exhaustive()
    }
}

impl StderrReporter {
    /// Creates a reporter that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: std::io::stderr(),
        }
    }
}

impl<W: Write> WriterReporter<W> {
    /// Creates a reporter that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the reporter and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ErrorReporter for WriterReporter<W> {
    fn report_uncaught(&mut self, error: &CapturedValue) {
        let _ = writeln!(self.writer, "Uncaught error: {}", error.value());
    }

    fn log_captured(&mut self, log: &CapturedErrorLog<'_>) {
        let stack = log.error.stack().unwrap_or("");
        let advice = match log.boundary {
            Some(name) if !log.uncaught => format!(
                "Recreating this component tree from scratch using the error boundary \
                 you provided, {name}."
            ),
            _ => String::from(
                "Consider adding an error boundary to your tree to customize error \
                 handling behavior.",
            ),
        };
        let _ = writeln!(
            self.writer,
            "The above error occurred in a component:{stack}\n\n{advice}"
        );
    }
}
