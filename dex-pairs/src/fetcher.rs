//! Fetch-and-dump for factory pair histories.
//!
//! For each factory the fetcher:
//! 1. Reads the chain head.
//! 2. Queries the factory's creation event from its start block to the
//!    head in a single request.
//! 3. Decodes the created exchange/pair address from every log.
//! 4. Rewrites the factory's output file atomically.
//!
//! Factories run one after another; the first failure stops the run and
//! files already written stay on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dex_factories::{Factory, FactoryDescriptor};

use crate::config::Settings;
use crate::output;
use crate::source::{LogQuery, LogSource};

/// Outcome of dumping one factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    /// File the pair list was written to.
    pub path: PathBuf,
    /// Number of addresses written.
    pub pairs: usize,
    /// First block scanned.
    pub from_block: u64,
    /// Chain head at the time of the query.
    pub to_block: u64,
}

/// Dump every pair `descriptor`'s factory created since `from_block` to `path`.
///
/// When `from_block` is past the chain head no query is made and an empty
/// file is written.
///
/// # Errors
///
/// Returns an error if the source fails, a log does not decode as the
/// factory's event, or the file cannot be written. Nothing is written in
/// the first two cases.
pub async fn dump_factory<S: LogSource>(
    source: &S,
    descriptor: &FactoryDescriptor,
    from_block: u64,
    path: &Path,
) -> Result<DumpReport> {
    let event = descriptor.event;
    let latest = source.block_number().await?;

    let pairs = if from_block > latest {
        tracing::warn!(address = %descriptor.address, from_block, latest, "start block is past chain head");
        Vec::new()
    } else {
        tracing::info!(
            address = %descriptor.address,
            event = event.name(),
            from = from_block,
            to = latest,
            "fetching logs"
        );

        let query = LogQuery {
            address: descriptor.address,
            topic0: event.signature_hash(),
            from_block,
            to_block: latest,
        };
        let logs = source.logs(&query).await?;

        logs.iter()
            .map(|log| event.created_address(log))
            .collect::<Result<Vec<_>, _>>()?
    };

    output::write_addresses(path, &pairs)?;

    tracing::info!(address = %descriptor.address, pairs = pairs.len(), path = %path.display(), "written");

    Ok(DumpReport {
        path: path.to_path_buf(),
        pairs: pairs.len(),
        from_block,
        to_block: latest,
    })
}

/// Dump each of `factories` in order into `output_dir`.
///
/// # Errors
///
/// Returns the first factory's error; later factories are not attempted.
pub async fn dump_all<S: LogSource>(
    source: &S,
    factories: &[Factory],
    settings: &Settings,
    output_dir: &Path,
) -> Result<Vec<DumpReport>> {
    let mut reports = Vec::with_capacity(factories.len());

    for &factory in factories {
        let descriptor = factory.descriptor();
        let path = output_dir.join(descriptor.output_file);
        let start = settings.start_block(factory);

        let report = dump_factory(source, &descriptor, start, &path)
            .await
            .with_context(|| format!("dumping {factory}"))?;
        tracing::info!(%factory, pairs = report.pairs, "dump complete");
        reports.push(report);
    }

    Ok(reports)
}
