//! Pipeline run command handler.

use super::OutputFormat;
use reel::{ReelResult, StudioConfig, build_orchestrator};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Run the pipeline for `concept` and report the outcome.
///
/// A failed phase is reported and turned into a non-zero exit.
pub async fn produce(
    config: StudioConfig,
    concept: &str,
    max_shots: Option<usize>,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
) -> ReelResult<()> {
    let config = match output_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    };

    let studio = build_orchestrator(&config).await?;
    info!(concept, "Starting production");
    let outcome = studio.run_pipeline(concept, max_shots).await;

    let shots = outcome.shot_list().as_ref().map_or(0, |s| s.shots().len());

    match format {
        OutputFormat::Json => {
            let produced: Vec<_> = outcome
                .produced()
                .iter()
                .map(|shot| {
                    json!({
                        "shot_id": shot.shot_id(),
                        "anchor_frame": shot.anchor_frame(),
                        "video_clip": shot.video_clip(),
                    })
                })
                .collect();
            let summary = json!({
                "run_id": outcome.run_id(),
                "title": outcome.title(),
                "identities": outcome.state().identities().len(),
                "shots_planned": shots,
                "approved": outcome.approved(),
                "critique_rounds": outcome.critique_rounds(),
                "produced": produced,
                "failure": outcome.failure().as_ref().map(|f| json!({
                    "phase": f.phase().to_string(),
                    "reason": f.reason(),
                })),
                "output_dir": studio.output_dir(),
            });
            let text = serde_json::to_string_pretty(&summary)
                .map_err(|e| reel::JsonError::new(e.to_string()))?;
            println!("{}", text);
        }
        OutputFormat::Human => {
            println!("Title: {}", outcome.title());
            println!("  Run: {}", outcome.run_id());
            println!("  Identities: {}", outcome.state().identities().len());
            println!(
                "  Shots planned: {} ({} after {} critique round(s))",
                shots,
                if *outcome.approved() { "approved" } else { "not approved" },
                outcome.critique_rounds()
            );
            println!("  Shots produced: {}", outcome.produced().len());
            for shot in outcome.produced() {
                let clip = shot
                    .video_clip()
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                let anchor = shot
                    .anchor_frame()
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("    shot {:<6} {}  {}", shot.shot_id(), anchor, clip);
            }
            println!("  Artifacts: {}", studio.output_dir().display());
            if let Some(failure) = outcome.failure() {
                eprintln!("Pipeline stopped: {}", failure);
            }
        }
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
