// Artifact persistence: two bincode files under one model directory.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::info;

use crate::builder::HybridModel;
use crate::matrix::Matrix;

pub const DESTINATION_INDEX_FILE: &str = "destination_index.bin";
pub const HYBRID_SIMILARITY_FILE: &str = "hybrid_similarity.bin";

/// Reads and writes the offline artifacts for one model directory.
///
/// The two files are an opaque pair: the index maps names to rows of the
/// similarity matrix, so they are only meaningful together and `load`
/// refuses a pair that disagrees.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Persist both artifacts. Each file is written to a temp path and
    /// renamed into place so a concurrent reader never sees a torn file.
    pub fn save(&self, model: &HybridModel) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let index = bincode::serialize(&model.destination_index)
            .map_err(|e| anyhow!("Serialization error: {}", e))?;
        let similarity = bincode::serialize(&model.similarity)
            .map_err(|e| anyhow!("Serialization error: {}", e))?;
        self.write_atomic(DESTINATION_INDEX_FILE, &index)?;
        self.write_atomic(HYBRID_SIMILARITY_FILE, &similarity)?;
        info!(
            "Saved similarity model for {} destinations to {:?}",
            model.len(),
            self.dir
        );
        Ok(())
    }

    /// Load the artifact pair, or `None` when either file is missing (a
    /// catalog that has never been indexed).
    pub fn load(&self) -> Result<Option<HybridModel>> {
        let index_path = self.dir.join(DESTINATION_INDEX_FILE);
        let similarity_path = self.dir.join(HYBRID_SIMILARITY_FILE);
        if !index_path.exists() || !similarity_path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&index_path)?;
        let destination_index = bincode::deserialize(&bytes)
            .map_err(|e| anyhow!("Deserialization error: {}", e))?;
        let bytes = std::fs::read(&similarity_path)?;
        let similarity: Matrix = bincode::deserialize(&bytes)
            .map_err(|e| anyhow!("Deserialization error: {}", e))?;

        let model = HybridModel {
            destination_index,
            similarity,
        };
        // A stale or mixed pair would otherwise panic at lookup time
        if model.similarity.rows() != model.similarity.cols() {
            return Err(anyhow!(
                "Corrupt similarity matrix: {} rows by {} cols",
                model.similarity.rows(),
                model.similarity.cols()
            ));
        }
        if let Some(row) = model
            .destination_index
            .values()
            .find(|&&row| row >= model.similarity.rows())
        {
            return Err(anyhow!(
                "Artifact mismatch: index row {} outside a {}-row matrix",
                row,
                model.similarity.rows()
            ));
        }
        Ok(Some(model))
    }

    fn write_atomic(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(filename);
        let temp = path.with_extension("tmp");
        std::fs::write(&temp, bytes)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}
