use std::path::PathBuf;
use std::sync::Arc;

use boiler_kpi::error::AppError;
use boiler_kpi::review::{
    catalog, validate, EmployeeInfo, EvaluationState, RatingLevel, RatingsCsvImporter,
    ReviewReport, ReviewService, ReviewServiceError, ScoringEngine,
};
use chrono::{Local, NaiveDate};
use clap::Args;

use crate::infra::InMemorySessionStore;

#[derive(Args, Debug)]
pub(crate) struct ReviewReportArgs {
    /// Review period (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub(crate) period: Option<String>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) report_date: Option<NaiveDate>,
    /// Ratings CSV (Item,Rating,Notes) to hydrate the evaluation
    #[arg(long)]
    pub(crate) ratings_csv: Option<PathBuf>,
    /// Include the per-item breakdown in the output
    #[arg(long)]
    pub(crate) list_items: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Review period (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub(crate) period: Option<String>,
    /// Optional ratings CSV; without it the demo rates a built-in scenario
    #[arg(long)]
    pub(crate) ratings_csv: Option<PathBuf>,
}

pub(crate) fn run_review_report(args: ReviewReportArgs) -> Result<(), AppError> {
    let ReviewReportArgs {
        period,
        report_date,
        ratings_csv,
        list_items,
    } = args;

    let period = period.unwrap_or_else(current_period);
    let report_date = report_date.unwrap_or_else(|| Local::now().date_naive());

    let rubric = catalog::boiler_shift_manager();
    let defects = validate(&rubric);
    if !defects.is_empty() {
        return Err(AppError::Rubric(defects));
    }

    let (state, imported) = match ratings_csv {
        Some(path) => (RatingsCsvImporter::from_path(path, &rubric)?, true),
        None => (EvaluationState::new(), false),
    };

    let engine = ScoringEngine::new(rubric);
    let report = ReviewReport::build(&engine, &state).map_err(ReviewServiceError::from)?;
    render_report(&report, &period, report_date, imported, list_items);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        period,
        ratings_csv,
    } = args;

    let period = period.unwrap_or_else(current_period);
    let today = Local::now().date_naive();

    println!("Boiler KPI review demo");
    let rubric = catalog::boiler_shift_manager();
    let defects = validate(&rubric);
    if !defects.is_empty() {
        return Err(AppError::Rubric(defects));
    }

    let store = Arc::new(InMemorySessionStore::seeded());
    let service = ReviewService::new(store, rubric);

    let account = service.login("quandoc@nhamay.vn", "vanhanh123")?;
    println!(
        "- Signed in {} ({}, {})",
        account.full_name, account.role, account.department
    );

    service.set_employee(
        EmployeeInfo {
            name: account.full_name.clone(),
            id: account.id.clone(),
            position: account.role.clone(),
            department: account.department.clone(),
            report_date: today,
        },
        period.clone(),
    )?;

    match ratings_csv {
        Some(path) => {
            let imported = RatingsCsvImporter::from_path(path, service.engine().rubric())?;
            let entries: Vec<(String, RatingLevel, String)> = imported
                .iter()
                .map(|(item_id, rating)| {
                    (item_id.to_string(), rating.level, rating.notes.clone())
                })
                .collect();
            for (item_id, level, notes) in entries {
                service.rate(&item_id, level)?;
                if !notes.is_empty() {
                    service.set_note(&item_id, &notes)?;
                }
            }
            println!("- Ratings hydrated from CSV");
        }
        None => {
            // A plausible month: solid operations with fuel overconsumption
            // and a repeated 5S miss.
            for category in &service.engine().rubric().categories {
                for item in &category.items {
                    let level = match item.id.as_str() {
                        "1.4" => RatingLevel::Average,
                        "3.3" => RatingLevel::Weak,
                        _ => RatingLevel::Good,
                    };
                    service.rate(&item.id, level)?;
                }
            }
            service.set_note("1.4", "tiêu hao dầu vượt 3% định mức tuần cuối")?;
            println!("- Rated the built-in demo scenario");
        }
    }

    let report = service.report()?;
    println!("\nCategory scores (period {period})");
    for row in &report.categories {
        println!(
            "- {}: {}/{} ({}%)",
            row.short_name, row.score, row.max, row.percentage
        );
    }

    let summary = &report.summary;
    println!(
        "\nTotal: {}/{} ({}%) -> {}",
        summary.total_points,
        summary.total_max,
        summary.percent,
        summary.ranking.label()
    );
    println!("\n{}", report.text());

    let session = service.current()?;
    let employee = session.as_ref().and_then(|session| session.employee.clone());
    let view = report.view(employee.as_ref(), Some(&period), false);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("\nPublic report payload:\n{json}"),
        Err(err) => println!("\nPublic report payload unavailable: {err}"),
    }

    service.logout()?;
    println!("\nSession cleared; ratings reset for the next review.");

    Ok(())
}

fn render_report(
    report: &ReviewReport,
    period: &str,
    report_date: NaiveDate,
    imported: bool,
    list_items: bool,
) {
    println!("KPI review report");
    println!("Period {period} (reported {report_date})");

    if imported {
        println!("Data source: ratings CSV import");
    } else {
        println!("Data source: no ratings recorded (all items score 0)");
    }

    println!("\nCategory scores");
    for row in &report.categories {
        println!(
            "- {}: {}/{} ({}%)",
            row.short_name, row.score, row.max, row.percentage
        );
    }

    let summary = &report.summary;
    println!(
        "\nTotal: {}/{} ({}%) -> {}",
        summary.total_points,
        summary.total_max,
        summary.percent,
        summary.ranking.label()
    );

    println!("\n{}", report.text());

    if list_items {
        println!("\nItem breakdown");
        for item in &report.items {
            let note = if item.notes.is_empty() {
                String::new()
            } else {
                format!(" | {}", item.notes)
            };
            println!(
                "- {} | {} | {} | {}/{}{}",
                item.code,
                item.name,
                item.level_label.unwrap_or("chưa đánh giá"),
                item.score,
                item.max_points,
                note
            );
        }
    }
}

fn current_period() -> String {
    Local::now().format("%Y-%m").to_string()
}
