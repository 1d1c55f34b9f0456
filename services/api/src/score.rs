use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{
    validate, PointsBreakdown, PointsEngine, ReceiptSubmission, ValidationError,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) path: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let breakdown = score_file(&args.path)?;
    let rendered = serde_json::to_string_pretty(&breakdown)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn score_file(path: &Path) -> Result<PointsBreakdown, AppError> {
    let raw = fs::read_to_string(path)?;
    let submission: ReceiptSubmission = serde_json::from_str(&raw)?;
    let receipt = validate(submission)?;
    let breakdown = PointsEngine::new()
        .breakdown(&receipt)
        .map_err(ValidationError::from)?;
    Ok(breakdown)
}
