use serde::{Deserialize, Serialize};

/// Texture manifest handed over by the host at init.
///
/// The host decodes images itself; the manifest only reports which named
/// textures exist and whether each one finished loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureManifest {
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
}

/// A single texture as the host sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Name game code refers to (e.g., "earth").
    pub name: String,
    /// Path the host loaded from (e.g., "textures/earth.jpg").
    pub path: String,
    /// False when the host failed to fetch or decode the image.
    #[serde(default = "default_loaded")]
    pub loaded: bool,
}

fn default_loaded() -> bool {
    true
}

impl TextureManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a manifest, logging and falling back to an empty one on malformed input.
    pub fn from_json_or_empty(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(json) {
            Ok(manifest) => manifest,
            Err(err) => {
                log::warn!("malformed texture manifest, using none: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "textures": [
                { "name": "earth", "path": "textures/earth.jpg", "loaded": true },
                { "name": "saturn_ring", "path": "textures/saturn_ring.png", "loaded": false },
                { "name": "mars", "path": "textures/mars.jpg" }
            ]
        }"#;
        let manifest = TextureManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 3);
        assert_eq!(manifest.textures[0].name, "earth");
        assert!(!manifest.textures[1].loaded);
        assert!(manifest.textures[2].loaded);
    }

    #[test]
    fn malformed_manifest_is_empty() {
        let manifest = TextureManifest::from_json_or_empty("{ not json");
        assert!(manifest.textures.is_empty());
        assert!(TextureManifest::from_json_or_empty("").textures.is_empty());
    }

    #[test]
    fn missing_textures_key_is_empty() {
        let manifest = TextureManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
    }
}
