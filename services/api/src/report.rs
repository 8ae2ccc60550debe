use crate::infra::federal_assembler;
use clap::Args;
use envhealth::config::AppConfig;
use envhealth::error::AppError;
use envhealth::telemetry;
use envhealth::workflows::assessment::{EnvironmentalReport, Location};
use std::fmt::Write as _;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Five-digit ZIP code to assess
    #[arg(long)]
    pub(crate) zip: String,
    /// County name used for the natural hazard lookup
    #[arg(long)]
    pub(crate) county: Option<String>,
    /// Two-letter state code used for the natural hazard lookup
    #[arg(long)]
    pub(crate) state_code: Option<String>,
    /// Latitude, used for hazards when no county is given
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub(crate) lat: Option<f64>,
    /// Longitude, used for hazards when no county is given
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub(crate) lng: Option<f64>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ReportArgs {
    fn location(&self) -> Location {
        Location {
            zip: self.zip.clone(),
            county: self.county.clone().unwrap_or_default(),
            state_code: self.state_code.clone().unwrap_or_default(),
            lat: self.lat.unwrap_or_default(),
            lng: self.lng.unwrap_or_default(),
            ..Location::default()
        }
    }
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;

    let assembler = federal_assembler(&config)?;
    let report = assembler.generate(args.location()).await?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report JSON unavailable: {err}"),
        }
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

pub(crate) fn render_report(report: &EnvironmentalReport) -> String {
    let mut out = String::new();
    let overall = &report.overall_score;

    let _ = writeln!(out, "Environmental health report for ZIP {}", report.location.zip);
    let _ = writeln!(
        out,
        "Grade {} ({}/100), generated {}",
        overall.grade.label(),
        overall.score,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "{}", overall.summary);

    let _ = writeln!(out, "\nCategory scores");
    for category in &overall.category_scores {
        let _ = writeln!(
            out,
            "- {} {}: {} ({}) {}",
            category.icon,
            category.name,
            category.score,
            category.color.status_label(),
            category.detail
        );
    }

    if report.unavailable_sources.is_empty() {
        let _ = writeln!(out, "\nAll data sources responded");
    } else {
        let names: Vec<&str> = report
            .unavailable_sources
            .iter()
            .map(|domain| domain.label())
            .collect();
        let _ = writeln!(out, "\nUnavailable data: {}", names.join(", "));
    }

    if report.recommendations.is_empty() {
        let _ = writeln!(out, "\nRecommendations: none");
    } else {
        let _ = writeln!(out, "\nRecommendations");
        for recommendation in &report.recommendations {
            let _ = writeln!(
                out,
                "- [{}] {} {}: {}",
                recommendation.priority.label(),
                recommendation.icon,
                recommendation.title,
                recommendation.description
            );
            for action in &recommendation.actions {
                let _ = writeln!(out, "    -> {}", action.replace("**", ""));
            }
        }
    }

    out
}
