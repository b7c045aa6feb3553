//! Parallel batch parsing of many documents into one NDJSON file.
//!
//! Each input file is read and parsed on the rayon pool; results are written in
//! input order (files in the given order, lines in file order). A file that cannot
//! be read, or an NDJSON line that is not valid JSON, becomes a `{source, error}`
//! line instead of failing the batch.

use crate::ndjson::NdjsonWriter;
use crate::pipeline::{ParsedDocument, TalosParser};
use crate::progress::make_count_progress;
use crate::source::{for_each_document_line, load_document, InputFormat};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One output line.
#[derive(Clone, Debug, Serialize)]
pub struct BatchRecord {
    /// `path` for single-document files, `path:LINE` for a line of an NDJSON input.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ParsedDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: u64,
    pub listings: u64,
    pub posts: u64,
    /// Failed listings/posts plus unreadable files and malformed lines.
    pub failures: u64,
}

impl BatchSummary {
    fn tally(&mut self, rec: &BatchRecord) {
        match &rec.result {
            Some(doc) => {
                self.documents += 1;
                match doc {
                    ParsedDocument::Listing(_) => self.listings += 1,
                    ParsedDocument::Post(_) => self.posts += 1,
                }
                if !doc.is_success() {
                    self.failures += 1;
                }
            }
            None => self.failures += 1,
        }
    }
}

impl TalosParser {
    /// Parse every document in `inputs` (files only; expand directories with
    /// [`crate::expand_inputs`] first) and write one [`BatchRecord`] per document to `out`.
    pub fn parse_files<I>(&self, inputs: I, out: &Path) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        init_tracing_once();
        let paths: Vec<PathBuf> = inputs.into_iter().collect();
        if paths.is_empty() {
            tracing::warn!("No input documents given.");
        } else {
            tracing::info!("Parsing {} input files.", paths.len());
        }

        let pb = if self.opts.progress {
            Some(make_count_progress(paths.len() as u64, self.opts.progress_label.as_deref()))
        } else {
            None
        };

        let run = || -> Vec<Vec<BatchRecord>> {
            paths
                .par_iter()
                .map(|p| {
                    let recs = self.parse_one_file(p);
                    if let Some(pb) = &pb { pb.inc(1); }
                    recs
                })
                .collect()
        };
        let per_file = match self.opts.parallelism.filter(|n| *n > 0) {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("build rayon pool")?
                .install(run),
            None => run(),
        };

        let mut writer = NdjsonWriter::create(out, self.opts.write_buffer_bytes)?;
        let mut summary = BatchSummary::default();
        for rec in per_file.iter().flatten() {
            summary.tally(rec);
            writer.write_record(rec)?;
        }
        let out_path = writer.finish_atomic()?;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }
        tracing::info!(
            "Wrote {} documents to {} ({} listings, {} posts, {} failures).",
            summary.documents,
            out_path.display(),
            summary.listings,
            summary.posts,
            summary.failures
        );
        Ok(summary)
    }

    fn parse_one_file(&self, path: &Path) -> Vec<BatchRecord> {
        let source = path.display().to_string();
        let is_lines = InputFormat::from_path(path).is_some_and(InputFormat::is_lines);

        if !is_lines {
            return vec![match load_document(path) {
                Ok(doc) => BatchRecord { source, result: Some(self.parse(&doc)), error: None },
                Err(e) => unreadable(source, &e),
            }];
        }

        let mut recs = Vec::new();
        let streamed = for_each_document_line(path, self.opts.read_buffer_bytes, |line, parsed| {
            let source = format!("{source}:{line}");
            recs.push(match parsed {
                Ok(doc) => BatchRecord { source, result: Some(self.parse(&doc)), error: None },
                Err(e) => BatchRecord { source, result: None, error: Some(format!("invalid JSON: {e}")) },
            });
            Ok(())
        });
        if let Err(e) = streamed {
            recs.push(unreadable(source, &e));
        }
        recs
    }
}

fn unreadable(source: String, e: &anyhow::Error) -> BatchRecord {
    tracing::warn!("Skipping unreadable input {}: {:#}", source, e);
    BatchRecord { source, result: None, error: Some(format!("{e:#}")) }
}
