//! Feature Schema - the contract between training and prediction
//!
//! The model consumes a fixed, ordered set of fields. Training stamps the
//! schema version and layout hash into the artifact; prediction validates
//! them on load. Any change to the field set or its order must increment
//! `FEATURE_VERSION`.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Current feature layout version.
pub const FEATURE_VERSION: u8 = 1;

/// Field names in the exact order they enter the model vector.
///
/// The four numeric fields come first (scaled), followed by the two text
/// fields (TF-IDF vectorized, bio before sample_post).
pub const FEATURE_LAYOUT: &[&str] = &[
    "Followers",
    "Following",
    "Posts",
    "account_age_days",
    "Bio",
    "sample_post",
];

/// Number of numeric fields at the front of the layout.
pub const NUMERIC_FEATURE_COUNT: usize = 4;

/// CRC32 over version + ordered field names.
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Schema stamp persisted inside every model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaStamp {
    pub version: u8,
    pub hash: u32,
}

impl SchemaStamp {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "feature schema mismatch: artifact has v{actual_version} (hash {actual_hash:08x}), \
     service expects v{expected_version} (hash {expected_hash:08x}); retrain the model"
)]
pub struct SchemaMismatch {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that a persisted stamp matches the current layout.
pub fn validate_stamp(stamp: &SchemaStamp) -> Result<(), SchemaMismatch> {
    if stamp.version != FEATURE_VERSION || stamp.hash != layout_hash() {
        return Err(SchemaMismatch {
            expected_version: FEATURE_VERSION,
            expected_hash: layout_hash(),
            actual_version: stamp.version,
            actual_hash: stamp.hash,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_hash_is_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn current_stamp_validates() {
        assert!(validate_stamp(&SchemaStamp::current()).is_ok());
    }

    #[test]
    fn version_mismatch_rejected() {
        let stamp = SchemaStamp {
            version: FEATURE_VERSION + 1,
            hash: layout_hash(),
        };
        let err = validate_stamp(&stamp).unwrap_err();
        assert_eq!(err.actual_version, FEATURE_VERSION + 1);
    }

    #[test]
    fn hash_mismatch_rejected() {
        let stamp = SchemaStamp {
            version: FEATURE_VERSION,
            hash: !layout_hash(),
        };
        assert!(validate_stamp(&stamp).is_err());
    }

    #[test]
    fn numeric_fields_lead_the_layout() {
        assert_eq!(FEATURE_LAYOUT.len(), 6);
        assert_eq!(FEATURE_LAYOUT[NUMERIC_FEATURE_COUNT - 1], "account_age_days");
        assert_eq!(FEATURE_LAYOUT[4], "Bio");
        assert_eq!(FEATURE_LAYOUT[5], "sample_post");
    }
}
