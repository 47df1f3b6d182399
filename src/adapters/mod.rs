pub mod delimited;
pub mod lcd_client_http;
pub mod lcd_client_retrying;
pub mod report_render;
pub mod report_sink_rendered;
pub mod snapshot_file;
pub mod venue_table;

pub use lcd_client_http::HttpLcdClient;
pub use lcd_client_retrying::{RetryPolicy, RetryingProposalSource};
pub use report_render::{ReportFormat, render_report};
pub use report_sink_rendered::RenderedReportSink;
