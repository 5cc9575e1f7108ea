//! Model artifact store.
//!
//! One artifact at a fixed path, JSON-serialized. Saves go through a temp
//! file in the same directory followed by a rename, so a concurrent reader
//! never observes a half-written artifact. Loading validates the schema
//! stamp before handing the model out.

use std::fs;
use std::path::PathBuf;

use super::pipeline::FittedModel;
use super::schema::{validate_stamp, SchemaMismatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),
}

#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Whether an artifact currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted model, or `None` when no artifact exists.
    pub fn load(&self) -> Result<Option<FittedModel>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let model: FittedModel = serde_json::from_slice(&data)?;
        validate_stamp(&model.schema)?;
        Ok(Some(model))
    }

    /// Persist the model, replacing any prior artifact atomically.
    pub fn save(&self, model: &FittedModel) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(model)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::dataset::LabeledRow;
    use crate::ml::pipeline::{train, FeatureRecord};

    fn trained_model() -> FittedModel {
        let mut rows = Vec::new();
        for i in 0..10 {
            rows.push(LabeledRow {
                followers: 10.0 + i as f64,
                following: 500.0,
                posts: 2.0,
                account_age_days: 0.0,
                bio: "buy followers now".into(),
                sample_post: String::new(),
                target: 1,
            });
            rows.push(LabeledRow {
                followers: 5000.0,
                following: 300.0,
                posts: 800.0 + i as f64,
                account_age_days: 0.0,
                bio: "photographer".into(),
                sample_post: String::new(),
                target: 0,
            });
        }
        train(rows).unwrap().0
    }

    #[test]
    fn load_missing_artifact_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_load_cycle_preserves_scores() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("nested").join("model.json"));

        let model = trained_model();
        store.save(&model).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap().unwrap();
        let record = FeatureRecord {
            followers: 10.0,
            bio: "buy followers now".into(),
            ..Default::default()
        };
        assert_eq!(model.score(&record), loaded.score(&record));
    }

    #[test]
    fn save_overwrites_prior_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));

        let first = trained_model();
        store.save(&first).unwrap();
        let second = trained_model();
        store.save(&second).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.trained_at, second.trained_at);
    }

    #[test]
    fn corrupt_artifact_is_an_error_not_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = ModelStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn stale_schema_stamp_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = ModelStore::new(&path);

        let model = trained_model();
        store.save(&model).unwrap();

        // Tamper with the persisted stamp to simulate an old artifact.
        let mut value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        value["schema"]["version"] = serde_json::json!(99);
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        assert!(matches!(store.load(), Err(StoreError::SchemaMismatch(_))));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));
        store.save(&trained_model()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("model.json")]);
    }
}
