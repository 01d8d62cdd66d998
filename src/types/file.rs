//! File resource types.

use serde::{Deserialize, Serialize};

/// A document uploaded to the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileObject {
    pub id: String,
    pub object: String,
    pub bytes: u64,
    pub created_at: i64,
    pub filename: String,
    pub purpose: String,
}

/// Parameters for uploading a file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub purpose: String,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, purpose: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            purpose: purpose.into(),
        }
    }
}
