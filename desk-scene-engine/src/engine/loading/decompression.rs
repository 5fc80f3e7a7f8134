use constants::model_catalogue::{SUPERCOMPRESSED_SUFFIX, SUPERCOMPRESSED_VARIANT_IDS, find_variant};

/// A decode step that can serve a request from an encoded twin of the asset.
///
/// Stages only run for requests whose geometry detail allows it; weak tiers
/// load the plain asset.
pub trait DecompressionStage: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Path of the encoded twin this stage decodes for `path`, if any. The
    /// loader falls back to `path` when the twin cannot be loaded.
    fn encoded_source(&self, path: &str) -> Option<String>;
}

/// Serves catalogue models that ship KTX2 textures with zstd supercompression.
pub struct SupercompressedTextureStage {
    eligible_paths: Vec<&'static str>,
}

impl SupercompressedTextureStage {
    pub fn from_catalogue() -> Self {
        Self {
            eligible_paths: SUPERCOMPRESSED_VARIANT_IDS
                .iter()
                .filter_map(|id| find_variant(id))
                .map(|variant| variant.path)
                .collect(),
        }
    }
}

impl DecompressionStage for SupercompressedTextureStage {
    fn name(&self) -> &'static str {
        "ktx2-zstd"
    }

    fn encoded_source(&self, path: &str) -> Option<String> {
        if !self.eligible_paths.contains(&path) {
            return None;
        }
        path.strip_suffix(".glb")
            .map(|stem| format!("{stem}{SUPERCOMPRESSED_SUFFIX}"))
    }
}
