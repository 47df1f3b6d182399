//! Report sink port definition.

use crate::domain::{AllocationReport, AppError};

/// Port receiving the finished allocation for presentation or export.
pub trait ReportSink {
    fn emit(&self, report: &AllocationReport) -> Result<(), AppError>;
}
