//! properties 파일 기반 시퀀스 카운터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{PropertyMap, SequenceStore};
use crate::infrastructure::output::properties::{parse_properties, render_properties};

/// 포트 구현: `buildNumber.properties` 형식 파일에 카운터를 유지한다.
pub struct PropertiesSequenceStore;

impl SequenceStore for PropertiesSequenceStore {
    fn next(&self, file: &Path, key: &str) -> Result<u64> {
        let mut properties = load_or_create(file)?;

        let current = properties.get(key).map(String::as_str).unwrap_or("0");
        let current: u64 = current.parse().with_context(|| {
            format!(
                "couldn't parse the '{key}' counter in {} to an integer: '{current}'",
                file.display()
            )
        })?;

        let next = current + 1;
        properties.insert(key.to_string(), next.to_string());
        fs::write(file, render_properties(&properties))
            .with_context(|| format!("couldn't store the sequence file {}", file.display()))?;

        Ok(next)
    }
}

fn load_or_create(file: &Path) -> Result<PropertyMap> {
    if !file.exists() {
        if let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(file, render_properties(&PropertyMap::new()))
            .with_context(|| format!("couldn't create the sequence file {}", file.display()))?;
        return Ok(PropertyMap::new());
    }

    let raw = fs::read_to_string(file)
        .with_context(|| format!("couldn't load the sequence file {}", file.display()))?;
    parse_properties(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_calls_produce_strictly_increasing_values() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("buildNumber.properties");

        let store = PropertiesSequenceStore;
        let values: Vec<u64> = (0..5).map(|_| store.next(&file, "buildNumber0").unwrap()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn counters_are_independent_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("buildNumber.properties");

        let store = PropertiesSequenceStore;
        assert_eq!(store.next(&file, "buildNumber0").unwrap(), 1);
        assert_eq!(store.next(&file, "buildNumber1").unwrap(), 1);
        assert_eq!(store.next(&file, "buildNumber0").unwrap(), 2);
    }

    #[test]
    fn missing_file_is_created_with_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested/dir/buildNumber.properties");

        assert_eq!(PropertiesSequenceStore.next(&file, "buildNumber").unwrap(), 1);
        assert!(file.exists());
    }

    #[test]
    fn non_numeric_counter_is_a_fatal_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("buildNumber.properties");
        fs::write(&file, "buildNumber0=not-a-number\n").unwrap();

        assert!(PropertiesSequenceStore.next(&file, "buildNumber0").is_err());
    }
}
