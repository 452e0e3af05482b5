mod deb;
mod freshness;
mod select;

pub use deb::read_packages_db;

use crate::types::PkgRecord;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One row of a per-distribution table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PkgRow {
    pub name: String,
    /// Link target for the package name
    pub pool_dir: String,
    pub newest: String,
    /// Freshness tier 1..5 of the newest build
    pub tier: u8,
    /// Age description plus UTC build time, shown on hover
    pub tooltip: String,
    /// (arch, filename) link pairs for the newest version
    pub artifacts: Vec<(String, String)>,
    pub delayed: bool,
    /// Remaining versions, descending
    pub older: Vec<String>,
}

/// Finished, renderer-agnostic model for one distribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistIndex {
    pub name: String,
    pub rows: Vec<PkgRow>,
}

/// Group records by package name; BTreeMap gives the ascending name order
/// the table is rendered in.
fn group_by_name(records: Vec<PkgRecord>) -> BTreeMap<String, Vec<PkgRecord>> {
    let mut groups: BTreeMap<String, Vec<PkgRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.name.clone()).or_default().push(record);
    }
    groups
}

impl DistIndex {
    /// Assemble the table for one distribution.
    ///
    /// `now` is captured once per run so ages stay comparable across all
    /// rows and distributions. `mtime_of` resolves an artifact path to its
    /// last-modified unix timestamp; a failed lookup fails the whole
    /// distribution since the freshness signal must not silently default.
    pub fn build<F>(
        name: &str,
        records: Vec<PkgRecord>,
        now: i64,
        fast_arch: &str,
        mtime_of: F,
    ) -> Result<DistIndex>
    where
        F: Fn(&str) -> Result<i64>,
    {
        let mut rows = Vec::new();
        for (pkg, group) in group_by_name(records) {
            let sel = select::select(&group)
                .with_context(|| format!("Failed to pick versions for package {pkg}"))?;

            // Timestamp of the first artifact stands in for the whole row;
            // a lagging architecture makes this surprising, which is what
            // the delayed flag is there to point out
            let mtime = mtime_of(&sel.artifacts[0].1)
                .with_context(|| format!("Failed to read build time for package {pkg}"))?;
            let fresh = freshness::classify(now - mtime);
            let built_at = match DateTime::<Utc>::from_timestamp(mtime, 0) {
                Some(t) => t.format("%Y-%m-%d %H:%M:%SZ").to_string(),
                None => "unknown".to_string(),
            };

            rows.push(PkgRow {
                name: pkg,
                pool_dir: sel.pool_dir,
                newest: sel.newest.to_string(),
                tier: fresh.tier,
                tooltip: format!("{}\n{}", fresh.desc, built_at),
                delayed: freshness::is_delayed(&sel.artifacts, fast_arch),
                artifacts: sel.artifacts,
                older: sel.older.into_iter().map(|v| v.to_string()).collect(),
            });
        }

        Ok(DistIndex {
            name: name.to_string(),
            rows,
        })
    }
}
