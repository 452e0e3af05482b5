//! Utilities to deal with deb package db

use crate::types::{PkgRecord, PkgVersion};

use anyhow::{format_err, Result};
use debcontrol::{BufParse, Streaming};
use std::collections::HashMap;

/// Stream one Packages index into `records`.
///
/// A stanza missing any of the required fields aborts the whole load; a
/// partial record cannot be aggregated safely.
pub fn read_packages_db(
    db: &mut dyn std::io::Read,
    source_arch: &str,
    records: &mut Vec<PkgRecord>,
) -> Result<()> {
    let mut buf_parse = BufParse::new(db, 4096);
    while let Some(result) = buf_parse
        .try_next()
        .map_err(|e| format_err!("Malformed package index: {e:?}"))?
    {
        match result {
            Streaming::Item(paragraph) => {
                let mut fields = HashMap::new();
                for field in paragraph.fields {
                    fields.insert(field.name, field.value);
                }
                records.push(fields_to_record(source_arch, &fields)?);
            }
            Streaming::Incomplete => buf_parse
                .buffer()
                .map_err(|e| format_err!("Failed to read package index: {e:?}"))?,
        }
    }
    Ok(())
}

#[inline]
fn fields_to_record(source_arch: &str, f: &HashMap<&str, String>) -> Result<PkgRecord> {
    Ok(PkgRecord {
        source_arch: source_arch.to_string(),
        name: f
            .get("Package")
            .ok_or_else(|| format_err!("Package without name"))?
            .to_string(),
        version: PkgVersion::from(
            f.get("Version")
                .ok_or_else(|| format_err!("Package without version"))?
                .as_str(),
        ),
        arch: f
            .get("Architecture")
            .ok_or_else(|| format_err!("Package without architecture"))?
            .to_string(),
        filename: f
            .get("Filename")
            .ok_or_else(|| format_err!("Package without filename"))?
            .to_string(),
    })
}
