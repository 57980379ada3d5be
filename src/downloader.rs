use crate::config::StorageConfig;
use crate::error::{Result, SyncError};
use crate::models::Movie;
use crate::utils::HttpClient;
use futures::future::join_all;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Downloads every asset referenced by a movie, one concurrent task per
/// asset. Presence of the target file on disk is the only completion
/// marker, which makes re-runs idempotent.
#[derive(Clone)]
pub struct AssetDownloader {
    client: HttpClient,
    config: StorageConfig,
}

impl AssetDownloader {
    pub fn new(client: HttpClient, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Maps an asset URL to its on-disk target: the configured URL prefix
    /// is stripped and the rest is joined under the asset root. Torrent
    /// download URLs carry no extension, so `.torrent` is appended;
    /// image URLs keep their own extension.
    pub fn target_path(&self, url: &str) -> PathBuf {
        let relative = url.strip_prefix(&self.config.url_prefix).unwrap_or(url);
        let mut path = PathBuf::from(&self.config.asset_root).join(relative);
        if path.extension().is_none() {
            path.set_extension("torrent");
        }
        path
    }

    /// Fetches all assets of one movie concurrently and returns once
    /// every task has finished. Failures are logged per asset and never
    /// abort siblings; the benign "already on disk" outcome is demoted
    /// to debug.
    pub async fn download_assets(&self, movie: &Movie) {
        let mut tasks = Vec::new();
        for url in movie.asset_urls() {
            let downloader = self.clone();
            let url = url.to_string();
            tasks.push(tokio::spawn(async move {
                let result = downloader.fetch(&url).await;
                (url, result)
            }));
        }

        for joined in join_all(tasks).await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((url, Err(e))) if e.is_already_exists() => {
                    debug!("skipping {}: {}", url, e);
                }
                Ok((url, Err(e))) => {
                    warn!("unable to download asset {}: {}", url, e);
                }
                Err(e) => {
                    warn!("download task failed: {}", e);
                }
            }
        }
    }

    /// Single-attempt fetch of one asset. The body is streamed to a
    /// `.part` file and renamed onto the target on success, so an
    /// interrupted download never masquerades as a complete file on the
    /// next run.
    pub async fn fetch(&self, url: &str) -> Result<()> {
        let target = self.target_path(url);

        if fs::try_exists(&target).await? {
            return Err(SyncError::AlreadyExists(target));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut response = self.client.get_raw(url).await?;

        let mut part = target.clone().into_os_string();
        part.push(".part");
        let part = PathBuf::from(part);

        let mut file = fs::File::create(&part).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);

        fs::rename(&part, &target).await?;
        Ok(())
    }
}
