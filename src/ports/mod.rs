mod proposal_source;
mod report_sink;

pub use proposal_source::ProposalSource;
pub use report_sink::ReportSink;
