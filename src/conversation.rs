// src/conversation.rs
//! Chat-style fine-tuning samples: one JSON object per line, each pairing
//! the fixed instruction plus an image with a JSON caption of the spot.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::dataset::DatasetRow;
use crate::error::Result;
use crate::file::ensure_parent;

/// "From the goshuin below, give the shrine/temple name, location and origin as JSON."
pub const INSTRUCTION: &str = "以下の御朱印情報から、神社名・所在地・由来をJSON形式で教えてください。";

#[derive(Debug, PartialEq, Serialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: Vec<Content>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
    Image { image: String },
}

#[derive(Serialize)]
struct Caption<'a> {
    name: &'a str,
    kana: &'a str,
    area: &'a str,
    background: &'a str,
}

impl Conversation {
    pub fn from_row(row: &DatasetRow, image_path: &Path) -> Result<Self> {
        let caption = serde_json::to_string(&Caption {
            name: &row.name,
            kana: &row.kana,
            area: &row.area,
            background: &row.background,
        })?;

        Ok(Self {
            messages: vec![
                Message {
                    role: "user",
                    content: vec![
                        Content::Text { text: s!(INSTRUCTION) },
                        Content::Image { image: image_path.to_string_lossy().into_owned() },
                    ],
                },
                Message {
                    role: "assistant",
                    content: vec![Content::Text { text: caption }],
                },
            ],
        })
    }
}

/// JSON Lines sink, flushed after every batch.
pub struct ConversationWriter<W: Write> {
    out: BufWriter<W>,
    written: usize,
}

impl ConversationWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent(path)?;
        Ok(Self::from_writer(File::create(path)?))
    }
}

impl<W: Write> ConversationWriter<W> {
    pub fn from_writer(w: W) -> Self {
        Self { out: BufWriter::new(w), written: 0 }
    }

    pub fn append(&mut self, items: &[Conversation]) -> Result<()> {
        for c in items {
            serde_json::to_writer(&mut self.out, c)?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        self.written += items.len();
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }
}
