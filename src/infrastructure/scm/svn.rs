//! Subversion 백엔드 구현.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::ScmGateway;
use crate::domain::scm::{ChangedFile, Credentials, ScmInfo, UpdateOutcome};

use super::runner::run_scm_command;

pub struct SvnProvider {
    pub directory: PathBuf,
    pub credentials: Option<Credentials>,
}

impl SvnProvider {
    /// 비대화식 실행 공통 인자. 자격 증명이 있으면 함께 넘긴다.
    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "--non-interactive".to_string(),
            "--no-auth-cache".to_string(),
        ];
        if let Some(creds) = &self.credentials {
            if let Some(username) = &creds.username {
                args.push("--username".to_string());
                args.push(username.clone());
            }
            if let Some(password) = &creds.password {
                args.push("--password".to_string());
                args.push(password.clone());
            }
        }
        args
    }

    async fn run(&self, subcommand: &str) -> Result<String> {
        let mut args = vec![subcommand.to_string()];
        args.extend(self.base_args());
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = run_scm_command("svn", &arg_refs, &self.directory).await?;
        Ok(output.stdout)
    }
}

#[async_trait]
impl ScmGateway for SvnProvider {
    async fn info(&self) -> Result<ScmInfo> {
        let stdout = self.run("info").await?;
        parse_info(&stdout)
    }

    async fn branch(&self) -> Result<Option<String>> {
        // svn은 브랜치 개념이 URL 구조에 들어 있으므로 직접 질의가 없다.
        Ok(None)
    }

    async fn status(&self) -> Result<Vec<ChangedFile>> {
        let stdout = self.run("status").await?;
        Ok(parse_status(&stdout))
    }

    async fn update(&self) -> Result<UpdateOutcome> {
        let stdout = self.run("update").await?;
        Ok(parse_update(&stdout))
    }
}

/// `svn info` 키/값 출력에서 리비전과 저장소 URL을 읽는다.
fn parse_info(output: &str) -> Result<ScmInfo> {
    let mut info = ScmInfo::default();
    for line in output.lines() {
        if let Some(value) = line.strip_prefix("Revision: ") {
            info.revision = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("Last Changed Rev: ") {
            info.last_changed_revision = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("URL: ") {
            info.url = Some(value.trim().to_string());
        }
    }

    info.revision
        .as_ref()
        .context("svn info output did not contain a 'Revision:' line")?;
    Ok(info)
}

/// `svn status` 항목 줄 파싱. 첫 컬럼이 상태, 8번째 컬럼부터 경로.
fn parse_status(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with("Status against"))
        .filter_map(|line| {
            let (status, path) = if line.len() > 8 {
                line.split_at(8)
            } else {
                return None;
            };
            let status = status.trim();
            if status.is_empty() {
                return None;
            }
            Some(ChangedFile {
                status: status.to_string(),
                path: path.trim().to_string(),
            })
        })
        .collect()
}

/// `svn update` 출력에서 갱신 파일과 "Updated to revision N." 리비전을 읽는다.
fn parse_update(output: &str) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::default();
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("Updated to revision ") {
            outcome.revision = Some(rest.trim_end_matches('.').trim().to_string());
        } else if let Some(rest) = line.strip_prefix("At revision ") {
            outcome.revision = Some(rest.trim_end_matches('.').trim().to_string());
        } else if let Some((status, path)) = line.split_once("    ") {
            let status = status.trim();
            if matches!(status, "A" | "D" | "U" | "C" | "G" | "E") {
                outcome.files.push(ChangedFile {
                    status: status.to_string(),
                    path: path.trim().to_string(),
                });
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO_OUTPUT: &str = "Path: .\n\
        Working Copy Root Path: /work/checkout\n\
        URL: https://svn.example.com/repo/branches/1.x\n\
        Repository Root: https://svn.example.com/repo\n\
        Revision: 1504\n\
        Node Kind: directory\n\
        Last Changed Author: dev\n\
        Last Changed Rev: 1491\n\
        Last Changed Date: 2026-08-01 10:00:00 +0900";

    #[test]
    fn parses_info_output() {
        let info = parse_info(INFO_OUTPUT).unwrap();
        assert_eq!(info.revision.as_deref(), Some("1504"));
        assert_eq!(info.last_changed_revision.as_deref(), Some("1491"));
        assert_eq!(
            info.url.as_deref(),
            Some("https://svn.example.com/repo/branches/1.x")
        );
    }

    #[test]
    fn info_without_revision_is_an_error() {
        assert!(parse_info("Path: .\nNode Kind: directory").is_err());
    }

    #[test]
    fn parses_status_items() {
        let output = "M       src/main/App.java\n?       notes.txt\nA  +    src/new/Module.java";
        let files = parse_status(output);
        assert_eq!(files.len(), 3);
        assert_eq!(files[0], ChangedFile {
            status: "M".to_string(),
            path: "src/main/App.java".to_string(),
        });
        assert_eq!(files[2].status, "A  +");
    }

    #[test]
    fn clean_status_output_is_empty() {
        assert!(parse_status("").is_empty());
    }

    #[test]
    fn parses_update_revision_and_files() {
        let output = "Updating '.':\nU    src/main/App.java\nA    src/new/Module.java\nUpdated to revision 1505.";
        let outcome = parse_update(output);
        assert_eq!(outcome.revision.as_deref(), Some("1505"));
        assert_eq!(outcome.files.len(), 2);
        assert_eq!(outcome.files[0].status, "U");
    }

    #[test]
    fn parses_already_current_update() {
        let outcome = parse_update("Updating '.':\nAt revision 1505.");
        assert_eq!(outcome.revision.as_deref(), Some("1505"));
        assert!(outcome.files.is_empty());
    }
}
