use std::collections::HashMap;
use thiserror::Error;
use crate::assets::manifest::TextureManifest;

/// Handle to a texture known to the host renderer.
/// The value is the texture's index in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("texture `{0}` is not in the manifest")]
    Missing(String),
    #[error("texture `{name}` failed to load from {path}")]
    FailedToLoad { name: String, path: String },
}

#[derive(Debug, Clone)]
struct TextureEntry {
    id: TextureId,
    path: String,
    loaded: bool,
}

/// Registry of named textures, built from a TextureManifest.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed TextureManifest.
    pub fn from_manifest(manifest: &TextureManifest) -> Self {
        let mut textures = HashMap::with_capacity(manifest.textures.len());
        for (index, desc) in manifest.textures.iter().enumerate() {
            textures.insert(desc.name.clone(), TextureEntry {
                id: TextureId(index as u32),
                path: desc.path.clone(),
                loaded: desc.loaded,
            });
        }
        Self { textures }
    }

    /// Resolve a texture by name. Fails if the host never listed it or
    /// could not load it.
    pub fn resolve(&self, name: &str) -> Result<TextureId, AssetError> {
        let entry = self
            .textures
            .get(name)
            .ok_or_else(|| AssetError::Missing(name.to_string()))?;
        if !entry.loaded {
            return Err(AssetError::FailedToLoad {
                name: name.to_string(),
                path: entry.path.clone(),
            });
        }
        Ok(entry.id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::TextureDescriptor;

    fn manifest() -> TextureManifest {
        TextureManifest {
            textures: vec![
                TextureDescriptor { name: "sun".into(), path: "sun.jpg".into(), loaded: true },
                TextureDescriptor { name: "ring".into(), path: "ring.png".into(), loaded: false },
            ],
        }
    }

    #[test]
    fn resolves_loaded_texture() {
        let reg = TextureRegistry::from_manifest(&manifest());
        assert_eq!(reg.resolve("sun"), Ok(TextureId(0)));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn failed_texture_is_an_error() {
        let reg = TextureRegistry::from_manifest(&manifest());
        match reg.resolve("ring") {
            Err(AssetError::FailedToLoad { name, path }) => {
                assert_eq!(name, "ring");
                assert_eq!(path, "ring.png");
            }
            other => panic!("expected FailedToLoad, got {other:?}"),
        }
    }

    #[test]
    fn unknown_texture_is_missing() {
        let reg = TextureRegistry::new();
        assert_eq!(reg.resolve("pluto"), Err(AssetError::Missing("pluto".into())));
        assert!(reg.is_empty());
    }
}
