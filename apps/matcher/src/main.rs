use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::config::Config;
use matcher::{Job, MatchEngine};

const USAGE: &str = "usage: matcher <jobs.json> <resume-file>...";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries one JSON result per resume.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let jobs_path = PathBuf::from(args.next().context(USAGE)?);
    let resumes: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if resumes.is_empty() {
        bail!(USAGE);
    }

    let raw_jobs = tokio::fs::read_to_string(&jobs_path)
        .await
        .with_context(|| format!("Failed to read jobs from {}", jobs_path.display()))?;
    let jobs: Vec<Job> = serde_json::from_str(&raw_jobs)
        .with_context(|| format!("{} is not a JSON array of jobs", jobs_path.display()))?;
    info!("Loaded {} jobs", jobs.len());

    let engine = MatchEngine::from_config(&config)?;

    // One blocking task per document; no ordering between them.
    let tasks: Vec<_> = resumes
        .into_iter()
        .map(|path| {
            let engine = engine.clone();
            tokio::task::spawn_blocking(move || {
                let declared = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default()
                    .to_string();
                let skills = engine.skills_from_file(&path, &declared);
                (path, skills)
            })
        })
        .collect();

    let mut failures = 0usize;
    for task in tasks {
        let (path, skills) = task.await.context("Extraction task panicked")?;
        match skills {
            Ok(skills) => {
                info!(path = %path.display(), skills = skills.len(), "Resume processed");
                let ranked = engine.rank(&skills, jobs.clone());
                let line = json!({
                    "path": path.display().to_string(),
                    "skills": skills,
                    "jobs": ranked,
                });
                println!("{line}");
            }
            Err(e) => {
                warn!(path = %path.display(), code = e.code(), "Could not process resume: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} resume(s) could not be processed");
    }

    Ok(())
}
