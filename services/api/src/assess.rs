use clap::Args;
use coverage_advisor::config::AppConfig;
use coverage_advisor::error::AppError;
use coverage_advisor::insurance::{
    AssessmentConfig, AssessmentEngine, InsuranceRecommendation, PolicyAssessment, ProfileGuard,
    Score, UserProfile,
};
use serde_json::Value;
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Profile JSON file to score (`-` reads from stdin)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Pin the scoring year instead of using the configured or calendar year
    #[arg(long, value_parser = crate::infra::parse_year)]
    pub(crate) current_year: Option<i32>,
    /// Print every score adjustment applied per product
    #[arg(long)]
    pub(crate) audit: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        profile,
        current_year,
        audit,
    } = args;

    let mut config = AppConfig::load()?.assessment;
    if current_year.is_some() {
        config.current_year = current_year;
    }

    let raw = read_profile(&profile)?;
    let (recommendation, assessments) = assess_raw(&raw, config)?;

    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    if audit {
        print!("{}", render_audit(&assessments, config.effective_year()));
    }

    Ok(())
}

fn read_profile(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }

    Ok(std::fs::read_to_string(path)?)
}

pub(crate) fn assess_raw(
    raw: &str,
    config: AssessmentConfig,
) -> Result<(InsuranceRecommendation, Vec<PolicyAssessment>), AppError> {
    let payload: Value = serde_json::from_str(raw)?;
    let profile: UserProfile = ProfileGuard.profile_from_payload(&payload)?;

    let engine = AssessmentEngine::new(config);
    let assessments = engine.audit(&profile);
    let recommendation = InsuranceRecommendation::from_assessments(&assessments);

    Ok((recommendation, assessments))
}

pub(crate) fn render_audit(assessments: &[PolicyAssessment], current_year: i32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nScore adjustments (scoring year {current_year})");

    for assessment in assessments {
        let gate = if assessment.eligible {
            "eligible"
        } else {
            "ineligible"
        };
        let _ = writeln!(
            out,
            "- {} ({gate}), final score {}",
            assessment.product.label(),
            format_score(assessment.ledger.score())
        );

        for event in assessment.ledger.events() {
            let _ = writeln!(out, "    {} {}", event.label, event.delta);
        }
    }

    out
}

fn format_score(score: &Score) -> String {
    match score {
        Score::Scalar(value) => value.to_string(),
        Score::Items(values) => {
            let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}
