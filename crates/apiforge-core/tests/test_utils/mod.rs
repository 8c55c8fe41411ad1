//! Test utilities for apiforge integration tests

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use tempfile::TempDir;

/// Workspace-level fixture directory for endpoint exports
pub fn fixtures_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .map(|root| root.join("tests/fixtures/endpoints"))
        .expect("crate lives two levels below the workspace root")
}

/// Read an endpoint export by file name
pub fn read_fixture(name: &str) -> anyhow::Result<String> {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture: {}", path.display()))
}

/// Creates a temporary directory for test outputs
pub fn create_temp_dir() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let temp_path = temp_dir.path().to_path_buf();
    Ok((temp_dir, temp_path))
}

/// Asserts that `text` contains every expected snippet
pub fn assert_contains_all(text: &str, expected: &[&str]) -> anyhow::Result<()> {
    let missing: Vec<_> = expected.iter().filter(|e| !text.contains(**e)).collect();
    if !missing.is_empty() {
        return Err(anyhow::anyhow!(
            "text is missing expected content:\n  {}",
            missing
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("\n  ")
        ));
    }
    Ok(())
}
