//! Text, JSON and CSV renderings of an allocation report.

use clap::ValueEnum;
use minijinja::{Environment, context};

use crate::adapters::delimited::write_record;
use crate::domain::{AllocationReport, AppError, SATURATION_TOLERANCE};

const TEXT_TEMPLATE_NAME: &str = "report.txt";

const TEXT_TEMPLATE: &str = "\
{% for p in proposals %}
Proposal {{ p.proposal_id }}: {{ p.title }} received {{ p.percentage }} percent of votes and receives {{ p.allocated|amount }} {{ symbol }}
{% for v in p.venues %}
  Venue {{ v.contract_address }}: {{ v.allocated|amount }} {{ symbol }} (capacity {{ v.capacity|amount }})
{% endfor %}
{% if p.unplaced is positive %}
  Unplaced: {{ p.unplaced|amount }} {{ symbol }}
{% endif %}
{% endfor %}
Total allocated: {{ total_allocated|amount }} {{ symbol }} of {{ total_budget|amount }} {{ symbol }} (placed {{ total_placed|amount }}, unplaced {{ total_unplaced|amount }})
";

const CSV_HEADER: &[&str] = &[
    "proposal_id",
    "title",
    "percentage",
    "allocated",
    "placed",
    "unplaced",
    "contract_address",
    "deployment_type",
    "capacity",
    "venue_allocated",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render_report(report: &AllocationReport, format: ReportFormat) -> Result<String, AppError> {
    match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => render_json(report),
        ReportFormat::Csv => Ok(render_csv(report)),
    }
}

fn amount(value: f64) -> String {
    format!("{value:.6}")
}

fn text_environment() -> Result<Environment<'static>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("amount", amount);
    env.add_test("positive", |value: f64| value > SATURATION_TOLERANCE);
    env.add_template(TEXT_TEMPLATE_NAME, TEXT_TEMPLATE)
        .map_err(|e| AppError::Render(format!("template registration: {}", e)))?;
    Ok(env)
}

fn render_text(report: &AllocationReport) -> Result<String, AppError> {
    let env = text_environment()?;
    let template = env
        .get_template(TEXT_TEMPLATE_NAME)
        .map_err(|e| AppError::Render(format!("template lookup: {}", e)))?;

    template
        .render(context! {
            proposals => &report.proposals,
            symbol => &report.asset_symbol,
            total_budget => report.total_budget,
            total_allocated => report.total_allocated,
            total_placed => report.total_placed,
            total_unplaced => report.total_unplaced,
        })
        .map_err(|e| AppError::Render(e.to_string()))
}

fn render_json(report: &AllocationReport) -> Result<String, AppError> {
    let mut rendered = serde_json::to_string_pretty(report)?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_csv(report: &AllocationReport) -> String {
    let mut out = write_record(CSV_HEADER);
    out.push('\n');

    for proposal in &report.proposals {
        let leading = [
            proposal.proposal_id.to_string(),
            proposal.title.clone(),
            proposal.percentage.clone(),
            amount(proposal.allocated),
            amount(proposal.placed),
            amount(proposal.unplaced),
        ];

        if proposal.venues.is_empty() {
            let mut fields = leading.to_vec();
            fields.extend(std::iter::repeat_n(String::new(), 4));
            out.push_str(&write_record(&fields));
            out.push('\n');
            continue;
        }

        for venue in &proposal.venues {
            let mut fields = leading.to_vec();
            fields.extend([
                venue.contract_address.clone(),
                venue.deployment_type.clone(),
                amount(venue.capacity),
                amount(venue.allocated),
            ]);
            out.push_str(&write_record(&fields));
            out.push('\n');
        }
    }

    out
}
