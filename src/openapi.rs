use std::{fs, path::Path};

use anyhow::{Context, Result};
use utoipa::OpenApi;

use crate::routes::ApiDoc;

pub fn openapi_json() -> Result<String> {
    ApiDoc::openapi()
        .to_pretty_json()
        .context("error serializing OpenAPI document")
}

pub fn generate_openapi(path: &Path) -> Result<()> {
    let openapi = openapi_json()?;
    fs::write(path, openapi).with_context(|| format!("error writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let doc: Value = serde_json::from_str(&openapi_json().unwrap()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in ["/health", "/upload", "/files", "/download/{name}"] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_generate_openapi_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.json");
        generate_openapi(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("/download/{name}"));
    }
}
