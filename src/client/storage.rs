//! Storage zone operations: upload, download, list, delete

use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use super::{failed, StorageClient};
use crate::domain::StorageObject;
use crate::error::{BunnyError, BunnyResult};

/// Header carrying the upload checksum
const CHECKSUM_HEADER: &str = "Checksum";

impl StorageClient {
    /// Upload a local file to `remote_path`
    ///
    /// The whole file is read into memory before the request is sent.
    #[instrument(skip(self, local_file), fields(local = %local_file.as_ref().display()))]
    pub async fn upload(&self, local_file: impl AsRef<Path>, remote_path: &str) -> BunnyResult<()> {
        let data = tokio::fs::read(local_file.as_ref())
            .await
            .map_err(|e| failed("upload", BunnyError::Io(e)))?;

        self.upload_bytes(remote_path, data).await
    }

    /// Upload an in-memory buffer to `remote_path`
    #[instrument(skip(self, data))]
    pub async fn upload_bytes(&self, remote_path: &str, data: impl Into<Bytes>) -> BunnyResult<()> {
        let data: Bytes = data.into();
        let size = data.len();
        let url = self
            .storage_url(remote_path)
            .map_err(|e| failed("upload", e))?;

        debug!(url = %url, size, "Uploading to BunnyCDN");

        let mut request = self
            .http
            .put(&url)
            .header(CONTENT_TYPE, "application/octet-stream");

        if self.config.checksum_uploads {
            request = request.header(CHECKSUM_HEADER, sha256_hex(&data));
        }

        self.execute("upload", request.body(data)).await?;

        info!(remote_path, size, "File uploaded successfully");
        Ok(())
    }

    /// Download `remote_path` into a local file, streaming chunks to disk
    ///
    /// The local file is only created once the server has answered with a
    /// success status. Returns the number of bytes written.
    #[instrument(skip(self, local_file), fields(local = %local_file.as_ref().display()))]
    pub async fn download(&self, remote_path: &str, local_file: impl AsRef<Path>) -> BunnyResult<u64> {
        let url = self
            .storage_url(remote_path)
            .map_err(|e| failed("download", e))?;
        debug!(url = %url, "Downloading from BunnyCDN");

        let response = self.execute("download", self.http.get(&url)).await?;

        let mut file = tokio::fs::File::create(local_file.as_ref())
            .await
            .map_err(|e| failed("download", BunnyError::Io(e)))?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| failed("download", BunnyError::Http(e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| failed("download", BunnyError::Io(e)))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| failed("download", BunnyError::Io(e)))?;

        info!(remote_path, bytes = written, "File downloaded successfully");
        Ok(written)
    }

    /// Download `remote_path` into memory
    #[instrument(skip(self))]
    pub async fn download_bytes(&self, remote_path: &str) -> BunnyResult<Bytes> {
        let url = self
            .storage_url(remote_path)
            .map_err(|e| failed("download", e))?;
        let response = self.execute("download", self.http.get(&url)).await?;

        let data = response
            .bytes()
            .await
            .map_err(|e| failed("download", BunnyError::Http(e)))?;

        debug!(remote_path, bytes = data.len(), "Downloaded from BunnyCDN");
        Ok(data)
    }

    /// List a directory of the storage zone, in the order the API returns it
    ///
    /// An empty `directory` lists the zone root. Directory paths should end in `/`.
    #[instrument(skip(self))]
    pub async fn list(&self, directory: &str) -> BunnyResult<Vec<StorageObject>> {
        let url = self
            .storage_url(directory)
            .map_err(|e| failed("list", e))?;
        debug!(url = %url, "Listing BunnyCDN directory");

        let entries: Vec<StorageObject> = self.execute_json("list", self.http.get(&url)).await?;

        debug!(directory, count = entries.len(), "Listed BunnyCDN directory");
        Ok(entries)
    }

    /// Delete an object (or directory) from the storage zone
    #[instrument(skip(self))]
    pub async fn delete(&self, remote_path: &str) -> BunnyResult<()> {
        let url = self
            .storage_url(remote_path)
            .map_err(|e| failed("delete", e))?;
        debug!(url = %url, "Deleting from BunnyCDN");

        self.execute("delete", self.http.delete(&url)).await?;

        info!(remote_path, "File deleted successfully");
        Ok(())
    }
}

/// Uppercase hex SHA-256, the format the storage API expects in `Checksum`
fn sha256_hex(data: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"hello"),
            "2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824"
        );
    }
}
