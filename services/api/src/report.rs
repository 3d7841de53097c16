use crate::infra::{build_api, seed};
use clap::Args;
use departments::config::SeedConfig;
use departments::departments::DepartmentId;
use departments::error::AppError;
use departments::reports::{ReportEnvelope, ReportError, ReportType};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Department to report on (ids follow row order in the departments export)
    #[arg(long)]
    pub(crate) department_id: u64,
    /// Report kind: headcount, payroll or budget
    #[arg(long)]
    pub(crate) report_type: String,
    /// CSV export with `name,address` rows
    #[arg(long)]
    pub(crate) departments_csv: Option<PathBuf>,
    /// CSV export with `id,department_id,name,position,salary` rows
    #[arg(long)]
    pub(crate) employees_csv: Option<PathBuf>,
    /// CSV export with `id,department_id,category,allocated,spent,owner_employee_id` rows
    #[arg(long)]
    pub(crate) budget_csv: Option<PathBuf>,
    /// Print the raw JSON envelope instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        department_id,
        report_type,
        departments_csv,
        employees_csv,
        budget_csv,
        json,
    } = args;

    let kind = ReportType::parse(&report_type).map_err(ReportError::from)?;
    let (store, roster) = seed(&SeedConfig {
        departments_csv,
        employees_csv,
        budget_csv,
    })?;
    let api = build_api(store, roster)?;
    let envelope = api
        .reports
        .generate(DepartmentId(department_id), kind.as_str())?;

    if json {
        let rendered = serde_json::to_string_pretty(&envelope).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        println!("{}", render_report(kind, &envelope));
    }

    Ok(())
}

fn render_report(kind: ReportType, envelope: &ReportEnvelope) -> String {
    let mut out = format!(
        "{} report for department #{} ({})\n",
        kind.label(),
        envelope.department.id,
        envelope.department.name
    );

    out.push_str("Summary:\n");
    if let Ok(serde_json::Value::Object(summary)) = serde_json::to_value(&envelope.summary) {
        for (metric, value) in summary {
            out.push_str(&format!("  - {metric}: {value}\n"));
        }
    }

    out.push_str(&format!("Rows ({}):\n", envelope.rows.len()));
    for row in &envelope.rows {
        if let Ok(rendered) = serde_json::to_string(row) {
            out.push_str(&format!("  {rendered}\n"));
        }
    }

    out
}
