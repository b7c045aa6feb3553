use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered NDJSON writer. Writes land in `<final>.tmp` and are promoted to the
/// final path by [`NdjsonWriter::finish_atomic`], so readers never see a half file.
pub struct NdjsonWriter {
    tmp_path: PathBuf,
    final_path: PathBuf,
    w: Option<BufWriter<File>>,
}

impl NdjsonWriter {
    pub fn create(final_path: &Path, buf_bytes: usize) -> Result<Self> {
        if let Some(dir) = final_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
        }
        let mut tmp = final_path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);
        let f = File::create(&tmp_path).with_context(|| format!("create {}", tmp_path.display()))?;
        Ok(Self {
            tmp_path,
            final_path: final_path.to_path_buf(),
            w: Some(BufWriter::with_capacity(buf_bytes.max(8 * 1024), f)),
        })
    }

    /// Serialize `value` as one compact JSON line.
    pub fn write_record<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if let Some(w) = &mut self.w {
            serde_json::to_writer(&mut *w, value)?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flush and rename the temp file onto the final path.
    pub fn finish_atomic(mut self) -> Result<PathBuf> {
        if let Some(mut w) = self.w.take() {
            w.flush().with_context(|| format!("flush {}", self.tmp_path.display()))?;
        }
        if self.final_path.exists() {
            fs::remove_file(&self.final_path)
                .with_context(|| format!("remove {}", self.final_path.display()))?;
        }
        fs::rename(&self.tmp_path, &self.final_path).with_context(|| {
            format!("rename {} -> {}", self.tmp_path.display(), self.final_path.display())
        })?;
        Ok(self.final_path.clone())
    }
}
