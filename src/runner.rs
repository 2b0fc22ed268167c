// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::{AppOptions, SpotErrorPolicy, SpotSelector},
    conversation::{Conversation, ConversationWriter},
    core::net::Fetch,
    csv::DatasetWriter,
    dataset::{self, DatasetRow},
    error::Result,
    file::resolve_table_path,
    progress::Progress,
    scrape::{Downloader, Paginator},
    specs,
    types::{DownloadedImage, SpotId},
};

/// Summary of what was produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub spots_seen: usize,
    pub spots_skipped: usize,
    pub images_found: usize,
    pub images_written: usize,
    pub rows_written: usize,
    pub files_written: Vec<PathBuf>,
}

/// What one spot contributed.
pub struct SpotReport {
    pub rows: Vec<DatasetRow>,
    pub images: Vec<DownloadedImage>,
    pub images_found: usize,
}

/// Spot ids to process: the explicit list, or whatever the listing page names.
pub fn resolve_spots(opts: &AppOptions, fetch: &dyn Fetch) -> Result<Vec<SpotId>> {
    match &opts.scrape.spots {
        SpotSelector::Ids(ids) => Ok(ids.clone()),
        SpotSelector::Collection => specs::collection::fetch(fetch, &opts.scrape.collection_url),
    }
}

/// Metadata, feed, images, rows for a single spot. Nothing is written to
/// the table here.
pub fn process_spot(opts: &AppOptions, fetch: &dyn Fetch, id: &SpotId) -> Result<SpotReport> {
    let spot = specs::spot::fetch(fetch, &opts.scrape, id)?;
    logf!("Metadata: {} {} {}", spot.name, spot.kana, spot.area);

    let harvest = Paginator::new(fetch, &opts.scrape).harvest(id)?;
    logf!("Got {} images for spot {id}", harvest.len());

    let prefix = opts.export.prefix_spot_id.then_some(id);
    let images = Downloader::new(fetch, opts.export.verify_images)
        .download_all(&harvest.posts, &opts.export.image_dir, prefix)?;

    let rows = dataset::assemble(&spot, &images);
    Ok(SpotReport { rows, images, images_found: harvest.len() })
}

/// Top-level run: enumerate spots, collect each, append rows as we go.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    fetch: &dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let ids = resolve_spots(opts, fetch)?;

    let table_path = resolve_table_path(&opts.export);
    let mut table = DatasetWriter::create(&table_path, opts.export.format)?;
    let mut conversations = match &opts.export.conversations {
        Some(path) => Some((ConversationWriter::create(path)?, path.clone())),
        None => None,
    };

    let mut summary = RunSummary { spots_seen: ids.len(), ..Default::default() };

    if ids.is_empty() {
        logw!("No spot IDs to process.");
    }
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
        if ids.is_empty() {
            p.log("No spot IDs to process.");
        }
    }

    for id in &ids {
        let report = match process_spot(opts, fetch, id) {
            Ok(r) => r,
            Err(e) => match opts.scrape.on_spot_error {
                SpotErrorPolicy::Abort => {
                    loge!("Spot {id}: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("aborting at spot {id}: {e}"));
                        p.finish();
                    }
                    return Err(e);
                }
                SpotErrorPolicy::Skip => {
                    logw!("Skipping spot {id}: {e}");
                    summary.spots_skipped += 1;
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(id, &e.to_string());
                    }
                    continue;
                }
            },
        };

        table.append(&report.rows)?;
        if let Some((writer, _)) = conversations.as_mut() {
            let items = report
                .rows
                .iter()
                .zip(&report.images)
                .map(|(row, img)| Conversation::from_row(row, &img.path))
                .collect::<Result<Vec<_>>>()?;
            writer.append(&items)?;
        }

        summary.images_found += report.images_found;
        summary.images_written += report.images.len();
        summary.rows_written += report.rows.len();
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(id, report.images.len());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    summary.files_written.push(table_path);
    if let Some((_, path)) = conversations {
        summary.files_written.push(path);
    }
    logf!(
        "Done: {} rows from {} spots ({} skipped), {}/{} images",
        summary.rows_written,
        summary.spots_seen,
        summary.spots_skipped,
        summary.images_written,
        summary.images_found
    );
    Ok(summary)
}
