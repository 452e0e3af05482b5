use crate::types::{PkgRecord, PkgVersion};

use anyhow::{bail, Result};
use std::collections::BTreeSet;

/// Everything the index shows about a single package.
#[derive(Clone, Debug)]
pub struct VersionSelection {
    pub newest: PkgVersion,
    /// Strictly descending, newest excluded
    pub older: Vec<PkgVersion>,
    /// Unique (arch, filename) pairs for the newest version, sorted by arch
    pub artifacts: Vec<(String, String)>,
    /// Parent directory of the newest artifacts in the pool
    pub pool_dir: String,
}

/// Pick the newest version of a package group and assemble its artifact
/// listing.
pub fn select(records: &[PkgRecord]) -> Result<VersionSelection> {
    // Distinct version strings; duplicates across architectures collapse here
    let distinct: BTreeSet<&str> = records.iter().map(|r| r.version.as_str()).collect();
    let mut versions: Vec<PkgVersion> = distinct.into_iter().map(PkgVersion::from).collect();
    // Descending; distinct spellings of the same version ("1.0" vs "0:1.0")
    // tie-break on the raw string to keep the order deterministic
    versions.sort_unstable_by(|a, b| b.cmp(a).then_with(|| b.as_str().cmp(a.as_str())));

    let mut versions = versions.into_iter();
    let newest = match versions.next() {
        Some(v) => v,
        // Groups are built from existing records, so only an empty slice
        // ends up here
        None => bail!("Empty package group"),
    };
    let older: Vec<PkgVersion> = versions.collect();

    let artifacts: BTreeSet<(String, String)> = records
        .iter()
        .filter(|r| r.version.as_str() == newest.as_str())
        .map(|r| (r.arch.clone(), r.filename.clone()))
        .collect();
    let artifacts: Vec<(String, String)> = artifacts.into_iter().collect();

    // Dirname of the first matching artifact; assumes all builds of one
    // version share a pool directory
    let pool_dir = match artifacts[0].1.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => artifacts[0].1.clone(),
    };

    Ok(VersionSelection {
        newest,
        older,
        artifacts,
        pool_dir,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(name: &str, version: &str, arch: &str, filename: &str) -> PkgRecord {
        PkgRecord {
            source_arch: arch.to_string(),
            name: name.to_string(),
            version: PkgVersion::from(version),
            arch: arch.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn newest_and_older() {
        let records = vec![
            record("foo", "1.0", "amd64", "pool/f/foo/foo_1.0_amd64.deb"),
            record("foo", "1.1", "amd64", "pool/f/foo/foo_1.1_amd64.deb"),
            record("foo", "0.9", "amd64", "pool/f/foo/foo_0.9_amd64.deb"),
        ];
        let sel = select(&records).unwrap();
        assert_eq!(sel.newest.as_str(), "1.1");
        let older: Vec<&str> = sel.older.iter().map(|v| v.as_str()).collect();
        assert_eq!(older, vec!["1.0", "0.9"]);
        assert_eq!(sel.pool_dir, "pool/f/foo");
    }

    #[test]
    fn single_version_has_no_older() {
        let records = vec![record("foo", "1.0", "amd64", "pool/f/foo/foo_1.0_amd64.deb")];
        let sel = select(&records).unwrap();
        assert_eq!(sel.newest.as_str(), "1.0");
        assert!(sel.older.is_empty());
    }

    #[test]
    fn artifacts_dedup_and_sort() {
        // Same artifact scanned twice plus a second architecture
        let records = vec![
            record("foo", "1.0", "arm64", "pool/f/foo/foo_1.0_arm64.deb"),
            record("foo", "1.0", "amd64", "pool/f/foo/foo_1.0_amd64.deb"),
            record("foo", "1.0", "amd64", "pool/f/foo/foo_1.0_amd64.deb"),
        ];
        let sel = select(&records).unwrap();
        assert_eq!(
            sel.artifacts,
            vec![
                (
                    "amd64".to_string(),
                    "pool/f/foo/foo_1.0_amd64.deb".to_string()
                ),
                (
                    "arm64".to_string(),
                    "pool/f/foo/foo_1.0_arm64.deb".to_string()
                ),
            ]
        );
    }

    #[test]
    fn older_versions_exclude_newest_artifacts() {
        let records = vec![
            record("foo", "1.0", "amd64", "pool/f/foo/foo_1.0_amd64.deb"),
            record("foo", "0.9", "amd64", "pool/f/foo/foo_0.9_amd64.deb"),
        ];
        let sel = select(&records).unwrap();
        assert_eq!(sel.artifacts.len(), 1);
        assert_eq!(sel.artifacts[0].1, "pool/f/foo/foo_1.0_amd64.deb");
    }

    #[test]
    fn pool_dir_without_slash_stays() {
        let records = vec![record("foo", "1.0", "amd64", "foo_1.0_amd64.deb")];
        let sel = select(&records).unwrap();
        assert_eq!(sel.pool_dir, "foo_1.0_amd64.deb");
    }

    #[test]
    fn empty_group_is_an_error() {
        assert!(select(&[]).is_err());
    }
}
