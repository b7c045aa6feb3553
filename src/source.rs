//! Reading documents from disk: single `.json` pages, NDJSON batches, and their
//! zstd-compressed forms.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zstd::stream::read::Decoder;

/// How a file on disk holds its documents, decided from the file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Json,         // page.json
    JsonZst,      // page.json.zst, page.zst
    Ndjson,       // pages.jsonl, pages.ndjson
    NdjsonZst,    // pages.jsonl.zst, pages.ndjson.zst
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let (stem, compressed) = match name.strip_suffix(".zst") {
            Some(stem) => (stem.to_string(), true),
            None => (name, false),
        };
        let lines = stem.ends_with(".jsonl") || stem.ends_with(".ndjson");
        match (lines, compressed) {
            (true, false) => Some(InputFormat::Ndjson),
            (true, true) => Some(InputFormat::NdjsonZst),
            (false, false) if stem.ends_with(".json") => Some(InputFormat::Json),
            (false, true) => Some(InputFormat::JsonZst),
            (false, false) => None,
        }
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, InputFormat::JsonZst | InputFormat::NdjsonZst)
    }

    pub fn is_lines(self) -> bool {
        matches!(self, InputFormat::Ndjson | InputFormat::NdjsonZst)
    }
}

fn open_reader(path: &Path, compressed: bool, buf_bytes: usize) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let cap = buf_bytes.max(8 * 1024);
    if compressed {
        let mut decoder = Decoder::new(file).with_context(|| format!("zstd decoder {}", path.display()))?;
        // Large frames otherwise fail with "Frame requires too much memory".
        decoder.window_log_max(31)?;
        Ok(Box::new(BufReader::with_capacity(cap, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(cap, file)))
    }
}

/// Load a single document. Unrecognized extensions are read as plain JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    let compressed = InputFormat::from_path(path).is_some_and(InputFormat::is_compressed);
    let mut reader = open_reader(path, compressed, 64 * 1024)?;
    let mut raw = String::new();
    reader.read_to_string(&mut raw).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Stream one document per non-empty line. `on_line` gets the 1-based file line
/// number and the parse outcome, so malformed lines reach the caller instead of
/// vanishing; returns the number of non-empty lines seen.
pub fn for_each_document_line(
    path: &Path,
    read_buf_bytes: usize,
    mut on_line: impl FnMut(u64, Result<Value, serde_json::Error>) -> Result<()>,
) -> Result<u64> {
    let compressed = InputFormat::from_path(path).is_some_and(InputFormat::is_compressed);
    let mut reader = open_reader(path, compressed, read_buf_bytes)?;

    let mut buf = String::with_capacity(64 * 1024);
    let mut line_no = 0u64;
    let mut seen = 0u64;
    loop {
        buf.clear();
        let n = reader.read_line(&mut buf).with_context(|| format!("read {}", path.display()))?;
        if n == 0 { break; }
        line_no += 1;
        let line = buf.trim();
        if line.is_empty() { continue; }
        seen += 1;
        let parsed = serde_json::from_str::<Value>(line);
        if let Err(e) = &parsed {
            tracing::warn!("{}:{}: malformed line: {}", path.display(), line_no, e);
        }
        on_line(line_no, parsed)?;
    }
    Ok(seen)
}

/// Recursively collect recognized input files under `dir`, sorted by path.
pub fn discover_documents(dir: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| InputFormat::from_path(e.path()).is_some())
        .map(|e| e.into_path())
        .collect();
    out.sort();
    out
}

/// Expand a mix of files and directories into input files (directories via
/// [`discover_documents`]), keeping the caller's order.
pub fn expand_inputs<I, P>(inputs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut out = Vec::new();
    for p in inputs {
        let p = p.as_ref();
        if p.is_dir() {
            out.extend(discover_documents(p));
        } else {
            out.push(p.to_path_buf());
        }
    }
    out
}
