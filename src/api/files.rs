//! File operations: upload, metadata, content download.

use std::path::Path;

use uuid::Uuid;

use crate::client::Client;
use crate::error::{Result, TychoError};
use crate::types::{Deleted, FileObject, FileUpload, Page};

use super::{multipart::build_file_multipart, require_id, Collection};

/// Operations on uploaded files.
pub struct Files<'a> {
    client: &'a Client,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<'a, FileObject> {
        Collection::new(self.client, "files")
    }

    /// Upload a file via the multipart path.
    pub async fn upload(&self, upload: FileUpload) -> Result<FileObject> {
        require_id("filename", &upload.filename)?;
        require_id("purpose", &upload.purpose)?;

        let boundary = format!("tycho-{}", Uuid::new_v4().simple());
        let body = build_file_multipart(&boundary, &upload);
        self.client.post_multipart("files", body, &boundary).await
    }

    /// Read a file from disk and upload it.
    pub async fn upload_path(
        &self,
        path: impl AsRef<Path>,
        purpose: impl Into<String>,
    ) -> Result<FileObject> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                TychoError::InvalidArgument(format!("path has no usable file name: {path:?}"))
            })?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        self.upload(FileUpload::new(filename, bytes, purpose)).await
    }

    pub async fn retrieve(&self, file_id: &str) -> Result<FileObject> {
        require_id("file ID", file_id)?;
        self.collection().retrieve(file_id).await
    }

    /// List files, optionally filtered by purpose.
    pub async fn list(&self, purpose: Option<&str>) -> Result<Page<FileObject>> {
        match purpose {
            Some(purpose) if !purpose.is_empty() => {
                self.client
                    .get_json_query("files", &[("purpose", purpose)])
                    .await
            }
            _ => self.client.get_json("files").await,
        }
    }

    pub async fn delete(&self, file_id: &str) -> Result<Option<Deleted>> {
        require_id("file ID", file_id)?;
        self.collection().delete(file_id).await
    }

    /// Download the raw contents of a file.
    pub async fn content(&self, file_id: &str) -> Result<Vec<u8>> {
        require_id("file ID", file_id)?;
        self.client.get_bytes(&format!("files/{file_id}/content")).await
    }
}
