//! Rewriting of `chr_pos[_...]` variant identifiers to `prefix:contig_chr:pos`.

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    vep::VepRecord,
};

/// Split the comma-separated `--rename` argument. Only the first token is
/// used for renaming; three are expected.
pub fn parse_prefix(raw: &str) -> Result<Vec<String>> {
    let words = raw
        .split(',')
        .map(|x| x.trim().to_string())
        .collect::<Vec<_>>();
    if words.first().map_or(true, |w| w.is_empty()) {
        return Err(Error::InvalidPrefix);
    }
    if words.len() != 3 {
        warn!(
            count = words.len(),
            "Expected three rename tokens, only the first is used"
        );
    }
    Ok(words)
}

pub fn rename_id(prefix: &str, id: &str) -> Result<String> {
    let mut parts = id.split('_');
    match (parts.next(), parts.next()) {
        (Some(contig), Some(pos)) => Ok(format!("{prefix}:contig_{contig}:{pos}")),
        _ => Err(Error::RenameFailed(id.to_string())),
    }
}

#[tracing::instrument(skip(records), fields(len = records.len()))]
pub fn rename_variants(prefix: &[String], records: &mut [VepRecord]) -> Result<()> {
    let prefix = prefix.first().ok_or(Error::InvalidPrefix)?;
    for r in records.iter_mut() {
        r.uploaded_variation = rename_id(prefix, &r.uploaded_variation)?;
    }
    debug!(prefix = %prefix, "Renamed variants");
    Ok(())
}
