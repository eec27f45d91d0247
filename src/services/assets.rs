//! Asset store and QR rendering
//!
//! QR codes are rendered to SVG at link creation time and handed to the
//! asset store, which returns an opaque reference kept on the link document.

use async_trait::async_trait;
use dashmap::DashMap;
use qrcode::QrCode;
use qrcode::render::svg;
use uuid::Uuid;

use crate::errors::{Result, TrimmrrError};

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store an asset and return an opaque reference to it.
    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// In-memory asset store addressed by generated UUIDs.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: DashMap<String, StoredAsset>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset_ref: &str) -> Option<StoredAsset> {
        self.assets.get(asset_ref).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let asset_ref = Uuid::new_v4().to_string();
        self.assets.insert(
            asset_ref.clone(),
            StoredAsset {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(asset_ref)
    }
}

/// Render a QR code for the given URL as an SVG document.
pub fn render_qr_svg(url: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| TrimmrrError::asset_store(format!("QR encoding failed: {}", e)))?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .build();
    Ok(image.into_bytes())
}
