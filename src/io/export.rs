//! Read/write result JSON files.
//!
//! JSON files are the "portable" representation of a run: the result plus
//! the configuration that produced it, so downstream fragility tooling can
//! consume fields by name and batches can be re-combined later. Schemas
//! are defined by `domain::FitFile` / `domain::HazardFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{BilinearFit, FitConfig, FitFile, HazardConfig, HazardFile, HazardResult};
use crate::error::AppError;

const TOOL_NAME: &str = "scour";

/// Write a fit result JSON file.
pub fn write_fit_json(path: &Path, fit: &BilinearFit, config: &FitConfig) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::internal(format!("Failed to create fit JSON '{}': {e}", path.display()))
    })?;
    let doc = FitFile {
        tool: TOOL_NAME.to_string(),
        config: config.clone(),
        fit: fit.clone(),
    };
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::internal(format!("Failed to write fit JSON: {e}")))?;
    Ok(())
}

/// Write a hazard result JSON file.
pub fn write_hazard_json(
    path: &Path,
    result: &HazardResult,
    config: Option<&HazardConfig>,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::internal(format!(
            "Failed to create hazard JSON '{}': {e}",
            path.display()
        ))
    })?;
    let doc = HazardFile {
        tool: TOOL_NAME.to_string(),
        config: config.cloned(),
        result: result.clone(),
    };
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::internal(format!("Failed to write hazard JSON: {e}")))?;
    Ok(())
}

/// Read a hazard result JSON file (for `scour combine`).
pub fn read_hazard_json(path: &Path) -> Result<HazardFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::invalid_argument(format!(
            "Failed to open hazard JSON '{}': {e}",
            path.display()
        ))
    })?;
    let doc: HazardFile = serde_json::from_reader(file).map_err(|e| {
        AppError::invalid_argument(format!("Invalid hazard JSON '{}': {e}", path.display()))
    })?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::sample_hazard;

    #[test]
    fn hazard_json_round_trips() {
        let config = HazardConfig {
            sample_count: 50,
            seed: 9,
            ..HazardConfig::default()
        };
        let result = sample_hazard(&config).unwrap();

        let path = std::env::temp_dir().join("scour_curves_hazard_roundtrip.json");
        write_hazard_json(&path, &result, Some(&config)).unwrap();
        let doc = read_hazard_json(&path).unwrap();

        assert_eq!(doc.tool, "scour");
        assert_eq!(doc.result.depths, result.depths);
        assert_eq!(doc.config.unwrap().seed, 9);
    }

    #[test]
    fn unreadable_hazard_json_is_invalid_argument() {
        let path = std::env::temp_dir().join("scour_curves_hazard_missing.json");
        let _ = std::fs::remove_file(&path);
        let err = read_hazard_json(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
    }
}
