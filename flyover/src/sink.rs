//! Output sinks for per-cycle flight reports.
//!
//! The display hardware is out of scope; anything that wants the current
//! flight implements [`FlightSink`].

use std::io::{self, Write};

use tracing::info;

use crate::tracker::FlightReport;

/// Receives the tracker state once per poll cycle.
pub trait FlightSink {
    fn emit(&mut self, report: &FlightReport);
}

impl<S: FlightSink + ?Sized> FlightSink for &mut S {
    fn emit(&mut self, report: &FlightReport) {
        (**self).emit(report)
    }
}

/// Logs each report and prints it to a writer (stdout by default).
pub struct LogSink<W: Write> {
    out: W,
}

impl LogSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> LogSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FlightSink for LogSink<W> {
    fn emit(&mut self, report: &FlightReport) {
        info!(
            ident = %report.ident,
            origin = %report.origin,
            observed_at = %report.observed_at.to_rfc3339(),
            "Current flight"
        );

        // a broken stdout must not take the loop down
        let _ = writeln!(self.out, "{}", report);
        let _ = self.out.flush();
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Vec<FlightReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[FlightReport] {
        &self.reports
    }

    pub fn last(&self) -> Option<&FlightReport> {
        self.reports.last()
    }
}

impl FlightSink for MemorySink {
    fn emit(&mut self, report: &FlightReport) {
        self.reports.push(report.clone());
    }
}
