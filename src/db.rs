use crate::index;
use crate::types::PkgRecord;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::path::PathBuf;

/// Filesystem layout of an aptly-style repository snapshot.
///
/// Everything the index needs is reachable from the repository root:
/// `dists/<dist>/<component>/binary-<arch>/Packages` for the catalogs, and
/// the stanza Filename fields for the artifacts themselves.
#[derive(Debug)]
pub struct RepoDb {
    root: PathBuf,
    component: String,
}

impl RepoDb {
    pub fn new(root: PathBuf, component: &str) -> Self {
        RepoDb {
            root,
            component: component.to_owned(),
        }
    }

    /// All distributions under dists/, sorted.
    pub fn list_dists(&self) -> Result<Vec<String>> {
        let dists_dir = self.root.join("dists");
        let entries = std::fs::read_dir(&dists_dir)
            .with_context(|| format!("Failed to list distributions in {}", dists_dir.display()))?;

        let mut dists = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => dists.push(name),
                Err(name) => bail!("Distribution directory {:?} is not valid UTF-8", name),
            }
        }
        dists.sort_unstable();
        Ok(dists)
    }

    /// Architectures with a package index in this distribution, sorted.
    pub fn list_archs(&self, dist: &str) -> Result<Vec<String>> {
        lazy_static! {
            static ref BINARY_DIR: Regex =
                Regex::new("^binary-([A-Za-z0-9][A-Za-z0-9-]*)$").unwrap();
        }

        let component_dir = self.root.join("dists").join(dist).join(&self.component);
        let entries = std::fs::read_dir(&component_dir).with_context(|| {
            format!("Failed to list architectures in {}", component_dir.display())
        })?;

        let mut archs = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if let Some(segments) = BINARY_DIR.captures(name) {
                    archs.push(segments[1].to_string());
                }
            }
        }
        archs.sort_unstable();
        Ok(archs)
    }

    /// Load every record of a distribution, all architectures at once, so
    /// aggregation runs over an immutable snapshot.
    pub fn load_records(&self, dist: &str) -> Result<Vec<PkgRecord>> {
        let mut records = Vec::new();
        for arch in self.list_archs(dist)? {
            let path = self
                .root
                .join("dists")
                .join(dist)
                .join(&self.component)
                .join(format!("binary-{arch}"))
                .join("Packages");
            let mut file = File::open(&path)
                .with_context(|| format!("Failed to open package index {}", path.display()))?;
            index::read_packages_db(&mut file, &arch, &mut records)
                .with_context(|| format!("Failed to read package index {}", path.display()))?;
        }
        Ok(records)
    }

    /// Last-modified time of an artifact as a unix timestamp.
    pub fn artifact_mtime(&self, filename: &str) -> Result<i64> {
        let path = self.root.join(filename);
        let metadata = std::fs::metadata(&path)
            .with_context(|| format!("Failed to stat artifact {}", path.display()))?;
        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to read mtime of {}", path.display()))?;
        Ok(DateTime::<Utc>::from(modified).timestamp())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::path::Path;

    const FOO_AMD64: &str = "\
Package: foo
Version: 1.0
Architecture: amd64
Filename: pool/f/foo/foo_1.0_amd64.deb
";

    const FOO_ARM64: &str = "\
Package: foo
Version: 1.0
Architecture: arm64
Filename: pool/f/foo/foo_1.0_arm64.deb
";

    fn write_index(root: &Path, dist: &str, arch: &str, contents: &str) {
        let dir = root.join(format!("dists/{dist}/main/binary-{arch}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Packages"), contents).unwrap();
    }

    #[test]
    fn scan_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_index(tmp.path(), "stable", "amd64", FOO_AMD64);
        write_index(tmp.path(), "stable", "arm64", FOO_ARM64);
        write_index(tmp.path(), "unstable", "amd64", FOO_AMD64);

        let db = RepoDb::new(tmp.path().to_path_buf(), "main");
        assert_eq!(db.list_dists().unwrap(), vec!["stable", "unstable"]);
        assert_eq!(db.list_archs("stable").unwrap(), vec!["amd64", "arm64"]);

        let records = db.load_records("stable").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_arch, "amd64");
        assert_eq!(records[1].source_arch, "arm64");
    }

    #[test]
    fn missing_dists_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let db = RepoDb::new(tmp.path().to_path_buf(), "main");
        assert!(db.list_dists().is_err());
    }

    #[test]
    fn missing_component_fails_the_dist() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("dists/stable")).unwrap();
        let db = RepoDb::new(tmp.path().to_path_buf(), "main");
        assert!(db.list_archs("stable").is_err());
    }

    #[test]
    fn non_binary_dirs_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_index(tmp.path(), "stable", "amd64", FOO_AMD64);
        fs::create_dir_all(tmp.path().join("dists/stable/main/source")).unwrap();
        let db = RepoDb::new(tmp.path().to_path_buf(), "main");
        assert_eq!(db.list_archs("stable").unwrap(), vec!["amd64"]);
    }

    #[test]
    fn artifact_mtime_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let pool = tmp.path().join("pool/f/foo");
        fs::create_dir_all(&pool).unwrap();
        let deb = pool.join("foo_1.0_amd64.deb");
        fs::write(&deb, b"not really a deb").unwrap();
        filetime::set_file_mtime(&deb, filetime::FileTime::from_unix_time(1_600_000_000, 0))
            .unwrap();

        let db = RepoDb::new(tmp.path().to_path_buf(), "main");
        assert_eq!(
            db.artifact_mtime("pool/f/foo/foo_1.0_amd64.deb").unwrap(),
            1_600_000_000
        );
        assert!(db.artifact_mtime("pool/f/foo/missing.deb").is_err());
    }
}
