mod version;

pub use version::PkgVersion;

/// One architecture-specific build entry from a Packages index.
#[derive(Clone, Debug)]
pub struct PkgRecord {
    /// Architecture directory the stanza was read from
    pub source_arch: String,
    pub name: String,
    pub version: PkgVersion,
    /// Declared architecture of the artifact, e.g. "amd64" or "all"
    pub arch: String,
    /// Repository-relative path to the .deb
    pub filename: String,
}
