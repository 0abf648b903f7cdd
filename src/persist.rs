use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::table::TabularPayload;

/// Writes retrieved payloads into the raw-artifact directory. Artifacts are
/// serialized fully in memory and written with a single `fs::write`, so a
/// successful write overwrites the previous artifact wholesale and a failed
/// one leaves no partial rows behind.
pub struct RawSink {
    raw_dir: PathBuf,
}

impl RawSink {
    /// Open a sink at `raw_dir`, creating the directory if needed.
    pub fn new(raw_dir: impl Into<PathBuf>) -> Result<Self> {
        let raw_dir = raw_dir.into();
        fs::create_dir_all(&raw_dir).map_err(|source| ScrapeError::Persistence {
            path: raw_dir.clone(),
            source: Box::new(source),
        })?;
        Ok(Self { raw_dir })
    }

    /// Persist `payload` as `<raw_dir>/<artifact>.csv`, overwriting any
    /// previous version. Returns the written path.
    pub fn write(&self, artifact: &str, payload: &TabularPayload) -> Result<PathBuf> {
        let path = self.raw_dir.join(format!("{artifact}.csv"));
        let bytes = payload
            .to_latin1_csv()
            .map_err(|source| ScrapeError::Persistence {
                path: path.clone(),
                source: Box::new(source),
            })?;
        fs::write(&path, &bytes).map_err(|source| ScrapeError::Persistence {
            path: path.clone(),
            source: Box::new(source),
        })?;
        debug!(path = %path.display(), rows = payload.row_count(), "wrote artifact");
        Ok(path)
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TabularPayload {
        TabularPayload::new(
            vec!["CNPJ_FUNDO".into(), "VL_QUOTA".into()],
            vec![
                vec!["00.017.024/0001-53".into(), "27,2251570".into()],
                vec!["00.068.305/0001-35".into(), "1,0000000".into()],
            ],
        )
    }

    #[test]
    fn writing_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RawSink::new(dir.path()).unwrap();

        let first = sink.write("inf_diario_fi_202108", &sample()).unwrap();
        let first_bytes = fs::read(&first).unwrap();
        let second = sink.write("inf_diario_fi_202108", &sample()).unwrap();
        let second_bytes = fs::read(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn overwrites_a_stale_artifact_completely() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RawSink::new(dir.path()).unwrap();

        let stale = TabularPayload::new(
            vec!["A".into()],
            vec![vec!["old and much longer than the replacement".into()]],
        );
        sink.write("cad_fi", &stale).unwrap();

        let fresh = TabularPayload::new(vec!["A".into()], vec![vec!["new".into()]]);
        let path = sink.write("cad_fi", &fresh).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"A\nnew\n");
    }

    #[test]
    fn sink_creates_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("raw");
        let sink = RawSink::new(&nested).unwrap();
        sink.write("cad_fi", &sample()).unwrap();
        assert!(nested.join("cad_fi.csv").is_file());
    }
}
