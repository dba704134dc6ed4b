//! MinIO/S3-compatible storage client
//!
//! Backs the remote content backend's image storage. Uses rust-s3 for object operations
//! and a hand-signed (SigV4) request for the bucket policy, which rust-s3 does not expose.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};
use crate::modules::storage::object_store::{
    ensure_upload_path, ensure_valid_path, folder_prefix, public_url_for, FileDescriptor,
    ObjectStore, StoredFile, UploadOptions,
};

type HmacSha256 = Hmac<Sha256>;

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    bucket: Box<Bucket>,
    bucket_name: String,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    /// Access key for AWS Signature v4 signing
    access_key: String,
    /// Secret key for AWS Signature v4 signing
    secret_key: String,
    /// Region name for AWS Signature v4 signing
    region_name: String,
    /// HTTP client for bucket policy operations
    http_client: Client,
}

impl MinIOClient {
    /// Create a new MinIO client for `bucket_name`.
    ///
    /// Creates the bucket if needed and makes it publicly readable, since every stored
    /// image is served straight from its public URL.
    pub async fn new(config: MinIOConfig, bucket_name: &str) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(bucket_name, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            bucket_name: bucket_name.to_string(),
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        client.ensure_bucket_exists().await?;
        client.set_public_read_policy().await?;

        info!(
            "MinIO client initialized for endpoint: {}, bucket: {}, public endpoint: {}",
            client.endpoint, client.bucket_name, client.public_endpoint
        );

        Ok(client)
    }

    /// Ensure the bucket exists, create if not
    async fn ensure_bucket_exists(&self) -> Result<()> {
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket_name);
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket_name);
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket_name, e
                    );
                }
                Ok(())
            }
        }
    }

    async fn create_bucket(&self) -> Result<()> {
        Bucket::create_with_path_style(
            &self.bucket_name,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| {
            AppError::Backend(format!(
                "Failed to create bucket '{}': {}",
                self.bucket_name, e
            ))
        })?;

        Ok(())
    }

    /// Allow anonymous `GetObject` on the whole bucket
    async fn set_public_read_policy(&self) -> Result<()> {
        let bucket_name = &self.bucket_name;

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/*")]
                }
            ]
        });

        match self
            .put_bucket_policy_with_sigv4(bucket_name, &policy.to_string())
            .await
        {
            Ok(_) => {
                info!("Set public read policy for {}/*", bucket_name);
            }
            Err(e) => {
                // Startup continues; the policy can be applied with `mc anonymous set download`
                warn!(
                    "Failed to set bucket policy for '{}': {}. \
                    You may need to set it manually: mc anonymous set download minio/{}",
                    bucket_name, e, bucket_name
                );
            }
        }
        Ok(())
    }

    /// Put bucket policy using AWS Signature v4
    async fn put_bucket_policy_with_sigv4(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let now = Utc::now();
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let host_header = match endpoint_url.port() {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        let url = format!("{}/{}?policy", self.endpoint, bucket_name);
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

        let canonical_uri = format!("/{}", bucket_name);
        let canonical_querystring = "policy=";
        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host_header, payload_hash, amz_date
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";

        let canonical_request = format!(
            "PUT\n{}\n{}\n{}\n{}\n{}",
            canonical_uri, canonical_querystring, canonical_headers, signed_headers, payload_hash
        );

        let algorithm = "AWS4-HMAC-SHA256";
        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region_name);
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            algorithm, amz_date, credential_scope, canonical_request_hash
        );

        let signature = self.calculate_signature(&date_stamp, &string_to_sign)?;

        let authorization_header = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        );

        let response = self
            .http_client
            .put(&url)
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization_header)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Backend(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }

    fn calculate_signature(&self, date_stamp: &str, string_to_sign: &str) -> Result<String> {
        let k_date = Self::hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = Self::hmac_sha256(&k_date, self.region_name.as_bytes())?;
        let k_service = Self::hmac_sha256(&k_region, b"s3")?;
        let k_signing = Self::hmac_sha256(&k_service, b"aws4_request")?;

        let signature = Self::hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }

    fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Check if a file exists in the storage
    async fn exists(&self, path: &str) -> Result<bool> {
        match self.bucket.head_object(path).await {
            Ok((_, code)) if (200..300).contains(&code) => Ok(true),
            Ok((_, 404)) => Ok(false),
            Ok((_, code)) => Err(AppError::Backend(format!(
                "Failed to check if file '{}' exists: status {}",
                path, code
            ))),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::Backend(format!(
                        "Failed to check if file '{}' exists: {}",
                        path, e
                    )))
                }
            }
        }
    }
}

fn check_status(code: u16, action: &str, path: &str) -> Result<()> {
    match code {
        200..=299 => Ok(()),
        404 => Err(AppError::NotFound(format!("File '{}' not found", path))),
        other => Err(AppError::Backend(format!(
            "Failed to {} '{}': status {}",
            action, path, other
        ))),
    }
}

#[async_trait]
impl ObjectStore for MinIOClient {
    fn bucket(&self) -> &str {
        &self.bucket_name
    }

    fn public_url(&self, path: &str) -> String {
        public_url_for(&self.public_endpoint, &self.bucket_name, path)
    }

    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        options: UploadOptions,
    ) -> Result<StoredFile> {
        ensure_upload_path(path)?;

        // Not atomic: a concurrent upload to the same path between the check and the put wins.
        if !options.overwrite && self.exists(path).await? {
            return Err(AppError::Conflict(format!(
                "File '{}' already exists",
                path
            )));
        }

        let size = data.len() as u64;
        let response = self
            .bucket
            .put_object_with_content_type(path, &data, content_type)
            .await
            .map_err(|e| AppError::Backend(format!("Failed to upload file '{}': {}", path, e)))?;
        check_status(response.status_code(), "upload file", path)?;

        debug!("Uploaded file '{}' to bucket '{}'", path, self.bucket_name);

        Ok(StoredFile {
            path: path.to_string(),
            public_url: self.public_url(path),
            bucket: self.bucket_name.clone(),
            size,
            content_type: content_type.to_string(),
        })
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        ensure_valid_path(path)?;

        let response = self.bucket.get_object(path).await.map_err(|e| {
            AppError::Backend(format!("Failed to download file '{}': {}", path, e))
        })?;
        check_status(response.status_code(), "download file", path)?;

        debug!("Downloaded file '{}' from bucket '{}'", path, self.bucket_name);
        Ok(response.bytes().to_vec())
    }

    async fn list(&self, folder: &str) -> Result<Vec<FileDescriptor>> {
        let prefix = folder_prefix(folder)?;

        let pages = self
            .bucket
            .list(prefix.clone(), Some("/".to_string()))
            .await
            .map_err(|e| AppError::Backend(format!("Failed to list folder '{}': {}", folder, e)))?;

        let mut files: Vec<FileDescriptor> = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .filter_map(|object| {
                let name = object.key.strip_prefix(&prefix)?.to_string();
                if name.is_empty() || name.contains('/') {
                    return None;
                }
                Some(FileDescriptor {
                    name,
                    modified: DateTime::parse_from_rfc3339(&object.last_modified)
                        .ok()
                        .map(|t| t.with_timezone(&Utc)),
                    size: object.size,
                    path: object.key,
                })
            })
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(files)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        ensure_valid_path(path)?;

        let response = self
            .bucket
            .delete_object(path)
            .await
            .map_err(|e| AppError::Backend(format!("Failed to delete file '{}': {}", path, e)))?;

        // S3 answers 204 for missing keys as well; a 404 here still means "already gone".
        match check_status(response.status_code(), "delete file", path) {
            Ok(()) | Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        debug!("Deleted file '{}' from bucket '{}'", path, self.bucket_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(check_status(200, "upload file", "a.png").is_ok());
        assert!(check_status(204, "delete file", "a.png").is_ok());
        assert!(matches!(
            check_status(404, "download file", "a.png"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            check_status(403, "upload file", "a.png"),
            Err(AppError::Backend(_))
        ));
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        // RFC 4231 test case 2
        let mac = MinIOClient::hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
