#[macro_use]
mod cli;
mod config;
mod db;
mod index;
mod render;
mod types;

use config::{Config, Opts};
use db::RepoDb;
use index::DistIndex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Exit codes:
/// 1 => program screwed up
fn main() {
    if let Err(err) = try_main() {
        error!("{}", err.to_string());
        err.chain().skip(1).for_each(|cause| {
            due_to!("{}", cause);
        });
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let opts = Opts::parse();
    let config = Config::load(&opts)?;

    // Running as a web request: the header goes out before anything can fail
    if std::env::var_os("REQUEST_METHOD").is_some() {
        println!("Content-Type: text/html; charset=utf-8\n");
    }

    let db = RepoDb::new(opts.root.clone(), &config.component);
    let dists = db.list_dists()?;
    if dists.is_empty() {
        warn!("Repository has no distributions");
    }

    // One timestamp for the whole run, so ages stay comparable across rows
    // and distributions
    let now = chrono::Utc::now().timestamp();

    let results: Vec<(String, Result<DistIndex>)> = dists
        .into_par_iter()
        .map(|dist| {
            let result = build_dist(&db, &dist, now, &config);
            (dist, result)
        })
        .collect();

    // Distributions fail independently; a broken one is dropped from the
    // page with a diagnostic instead of rendering a half-filled table
    let mut indexes = Vec::new();
    let mut failed = 0;
    for (dist, result) in results {
        match result {
            Ok(index) => indexes.push(index),
            Err(err) => {
                failed += 1;
                error!("Skipping distribution {}: {}", dist, err);
                err.chain().skip(1).for_each(|cause| {
                    due_to!("{}", cause);
                });
            }
        }
    }

    let html = render::render(&config.title, &indexes)?;
    println!("{html}");

    if failed > 0 {
        bail!("Failed to index {failed} distribution(s)");
    }
    Ok(())
}

fn build_dist(db: &RepoDb, dist: &str, now: i64, config: &Config) -> Result<DistIndex> {
    let records = db.load_records(dist)?;
    let archs: BTreeSet<&str> = records.iter().map(|r| r.source_arch.as_str()).collect();
    info!(
        "{}: {} records across {} architecture(s)",
        dist,
        records.len(),
        archs.len()
    );
    DistIndex::build(dist, records, now, &config.fast_arch, |path| {
        db.artifact_mtime(path)
    })
    .with_context(|| format!("Failed to build index for distribution {dist}"))
}
