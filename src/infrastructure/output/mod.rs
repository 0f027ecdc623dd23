//! 출력 포맷 선택과 파일 기록.

pub mod properties;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::{PropertyMap, StampWriter};

use properties::{parse_properties, render_properties};

/// 지원 출력 포맷. 알 수 없는 확장자는 properties로 처리한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Properties,
    Json,
}

impl OutputFormat {
    /// 파일 이름의 확장자로 포맷을 고른다.
    pub fn for_file_name(name: &str) -> Self {
        if name.ends_with(".json") {
            Self::Json
        } else {
            Self::Properties
        }
    }

    pub fn render(self, properties: &PropertyMap) -> Result<String> {
        match self {
            Self::Properties => Ok(render_properties(properties)),
            Self::Json => {
                let rendered = serde_json::to_string_pretty(properties)?;
                Ok(format!("{rendered}\n"))
            }
        }
    }

    pub fn parse(self, input: &str) -> Result<PropertyMap> {
        match self {
            Self::Properties => parse_properties(input),
            Self::Json => serde_json::from_str(input).context("invalid JSON property file"),
        }
    }
}

/// 포트 구현: 파일시스템에 키/값 출력을 기록한다.
pub struct FileStampWriter;

impl StampWriter for FileStampWriter {
    fn write(&self, properties: &PropertyMap, file: &Path, auto_detect: bool) -> Result<()> {
        let format = if auto_detect {
            file.file_name()
                .and_then(|name| name.to_str())
                .map(OutputFormat::for_file_name)
                .unwrap_or(OutputFormat::Properties)
        } else {
            OutputFormat::Properties
        };

        if let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        debug!("writing {:?} output to {}", format, file.display());
        let rendered = format.render(properties)?;
        fs::write(file, rendered)
            .with_context(|| format!("unable to store output to {}", file.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyMap {
        PropertyMap::from([
            ("name".to_string(), "demo".to_string()),
            ("revision".to_string(), "abc123".to_string()),
            ("version".to_string(), "1.0-SNAPSHOT".to_string()),
        ])
    }

    #[test]
    fn detects_format_by_extension() {
        assert_eq!(
            OutputFormat::for_file_name("build.properties"),
            OutputFormat::Properties
        );
        assert_eq!(OutputFormat::for_file_name("build.json"), OutputFormat::Json);
        // 알 수 없는 확장자는 기본 포맷으로.
        assert_eq!(
            OutputFormat::for_file_name("build.txt"),
            OutputFormat::Properties
        );
    }

    #[test]
    fn json_round_trip_preserves_mapping() {
        let rendered = OutputFormat::Json.render(&sample()).unwrap();
        let parsed = OutputFormat::Json.parse(&rendered).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn properties_round_trip_preserves_mapping() {
        let rendered = OutputFormat::Properties.render(&sample()).unwrap();
        let parsed = OutputFormat::Properties.parse(&rendered).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("generated/build-metadata/build.json");

        FileStampWriter.write(&sample(), &target, true).unwrap();

        let raw = std::fs::read_to_string(&target).unwrap();
        let parsed = OutputFormat::Json.parse(&raw).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn writer_defaults_to_properties_without_auto_detect() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("build.json");

        FileStampWriter.write(&sample(), &target, false).unwrap();

        let raw = std::fs::read_to_string(&target).unwrap();
        assert!(raw.starts_with('#'));
    }
}
