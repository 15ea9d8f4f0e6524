use serde::Serialize;

use super::ContentType;

/// Stremio addon manifest served at `/manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<ContentType>,
    /// Always empty: the addon only provides streams.
    pub catalogs: Vec<serde_json::Value>,
    pub id_prefixes: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            id: "community.nyaa.scraper".to_string(),
            version: "1.0.1".to_string(),
            name: "Nyaa.si Scraper".to_string(),
            description: "Stream anime torrents from nyaa.si with French subtitles".to_string(),
            resources: vec!["stream".to_string()],
            types: vec![ContentType::Movie, ContentType::Series],
            catalogs: Vec::new(),
            id_prefixes: vec!["tt".to_string(), "kitsu".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json_shape() {
        let json = serde_json::to_value(Manifest::default()).unwrap();

        assert_eq!(json["id"], "community.nyaa.scraper");
        assert_eq!(json["version"], "1.0.1");
        assert_eq!(json["resources"], serde_json::json!(["stream"]));
        assert_eq!(json["types"], serde_json::json!(["movie", "series"]));
        assert_eq!(json["catalogs"], serde_json::json!([]));
        assert_eq!(json["idPrefixes"], serde_json::json!(["tt", "kitsu"]));
    }
}
