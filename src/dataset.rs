// src/dataset.rs
use serde::Serialize;

use crate::types::{DownloadedImage, Spot};

pub const HEADERS: [&str; 7] = ["file_name", "spot_id", "name", "kana", "area", "background", "date"];

/// One line of the output table: an image joined with its spot's metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetRow {
    pub file_name: String,
    pub spot_id: String,
    pub name: String,
    pub kana: String,
    pub area: String,
    pub background: String,
    /// Empty when the post had no date.
    pub date: String,
}

/// One row per downloaded image, in image order. Spot fields are repeated
/// verbatim on every row.
pub fn assemble(spot: &Spot, images: &[DownloadedImage]) -> Vec<DatasetRow> {
    let spot_id = spot.id.to_string();
    images
        .iter()
        .map(|img| DatasetRow {
            file_name: img.file_name(),
            spot_id: spot_id.clone(),
            name: spot.name.clone(),
            kana: spot.kana.clone(),
            area: spot.area.clone(),
            background: spot.description.clone(),
            date: img.date.clone().unwrap_or_default(),
        })
        .collect()
}
