use bevy::{
    app::{App, Plugin},
    asset::{io::Reader, Asset, AssetApp, AssetLoader, AsyncReadExt, LoadContext},
    log::info,
    reflect::TypePath,
};
use bevy_math::DVec3;
use thiserror::Error;

use crate::{
    stats::{analyze_with, Report},
    stl::{read_bytes, StlFormat},
    AnalysisError, AnalysisSettings,
};

/// A decoded STL mesh together with its statistics.
#[derive(Asset, TypePath, Debug)]
pub struct StlAsset {
    pub format: StlFormat,
    pub vertices: Vec<DVec3>,
    pub report: Report,
}

impl StlAsset {
    pub fn from_bytes(bytes: &[u8], settings: &AnalysisSettings) -> Result<Self, AnalysisError> {
        let geometry = read_bytes(bytes)?;
        let report = analyze_with(&geometry.vertices, settings)?;
        Ok(StlAsset {
            format: geometry.format,
            vertices: geometry.vertices,
            report,
        })
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StlAssetLoaderError {
    /// An [IO](std::io) Error
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not analyze STL: {0}")]
    Analysis(#[from] AnalysisError),
}

#[derive(Default)]
pub struct StlAssetLoader;

impl AssetLoader for StlAssetLoader {
    type Asset = StlAsset;
    type Settings = AnalysisSettings;
    type Error = StlAssetLoaderError;

    async fn load<'a>(
        &'a self,
        reader: &'a mut Reader<'_>,
        settings: &'a AnalysisSettings,
        load_context: &'a mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let asset = StlAsset::from_bytes(&bytes, settings)?;
        info!(
            "Loaded {:?} STL {}: {} vertices",
            asset.format,
            load_context.path().display(),
            asset.vertices.len()
        );
        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["stl"]
    }
}

/// Registers [`StlAsset`] and its loader.
pub struct StlPlugin;

impl Plugin for StlPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<StlAsset>()
            .init_asset_loader::<StlAssetLoader>();
    }
}
