//! Plain-text pair list output.
//!
//! One EIP-55 checksummed address per line, every line `\n`-terminated,
//! no header.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use anyhow::{Context, Result};

/// Write `addresses` to `path`, replacing any previous file.
///
/// Uses atomic write (temp file + rename) so an interrupted run never
/// leaves a truncated list behind.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// file cannot be written.
pub fn write_addresses(path: &Path, addresses: &[Address]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let tmp = tmp_path(path);
    let file = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    let mut writer = BufWriter::new(file);
    for address in addresses {
        writeln!(writer, "{}", address.to_checksum(None))
            .with_context(|| format!("writing {}", tmp.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", tmp.display()))?;
    drop(writer);

    std::fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} → {}", tmp.display(), path.display()))?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
