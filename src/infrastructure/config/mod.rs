//! 자격 증명 설정 파일 탐색/병합 로더.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 병합이 끝난 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// 호스트("host" 또는 "host:port")별 서버 항목.
    #[serde(default)]
    pub servers: BTreeMap<String, ServerConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// 평문 대신 환경 변수에서 비밀번호를 읽게 한다.
    pub password_env: Option<String>,
}

impl Config {
    /// 높은 우선순위 설정이 기존 항목을 덮어쓴다.
    pub fn merge_from(&mut self, other: Config) {
        for (host, server) in other.servers {
            self.servers.insert(host, server);
        }
    }
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub fn load_merged_config() -> Result<Config> {
    // 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
    let mut merged = Config::default();

    for path in config_paths() {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
    }

    Ok(merged)
}

/// 기본 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/buildstamp/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("buildstamp").join("config.json"));
    }

    paths.push(PathBuf::from(".buildstamp/config.json"));

    if let Ok(path) = env::var("BUILDSTAMP_CONFIG") {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_higher_priority_entries() {
        let mut base = Config::default();
        base.servers.insert(
            "svn.example.com".to_string(),
            ServerConfig {
                username: Some("low".to_string()),
                ..ServerConfig::default()
            },
        );

        let mut overlay = Config::default();
        overlay.servers.insert(
            "svn.example.com".to_string(),
            ServerConfig {
                username: Some("high".to_string()),
                ..ServerConfig::default()
            },
        );

        base.merge_from(overlay);
        assert_eq!(
            base.servers["svn.example.com"].username.as_deref(),
            Some("high")
        );
    }

    #[test]
    fn parses_server_entries_from_json() {
        let raw = r#"{"servers": {"svn.example.com:8443": {"username": "ci", "password_env": "SVN_PASSWORD"}}}"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        let server = &config.servers["svn.example.com:8443"];
        assert_eq!(server.username.as_deref(), Some("ci"));
        assert_eq!(server.password_env.as_deref(), Some("SVN_PASSWORD"));
        assert_eq!(server.password, None);
    }
}
