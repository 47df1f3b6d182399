use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::adapters::report_render::{ReportFormat, render_report};
use crate::domain::{AllocationReport, AppError};
use crate::ports::ReportSink;

/// Writes a rendered report to a file, or to stdout when no path is set.
#[derive(Debug, Clone)]
pub struct RenderedReportSink {
    format: ReportFormat,
    output: Option<PathBuf>,
}

impl RenderedReportSink {
    pub fn new(format: ReportFormat, output: Option<PathBuf>) -> Self {
        Self { format, output }
    }
}

impl ReportSink for RenderedReportSink {
    fn emit(&self, report: &AllocationReport) -> Result<(), AppError> {
        let rendered = render_report(report, self.format)?;

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty())
                {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, rendered)?;
                tracing::info!(path = %path.display(), "report written");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}
