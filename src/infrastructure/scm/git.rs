//! Git 백엔드 구현.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::application::ports::ScmGateway;
use crate::domain::scm::{ChangedFile, ScmInfo, UpdateOutcome};

use super::runner::run_scm_command;

pub struct GitProvider {
    pub directory: PathBuf,
    pub short_revision_length: u32,
}

impl GitProvider {
    async fn head_revision(&self) -> Result<String> {
        // git rev-parse --short의 최소 길이는 4다.
        let short_arg;
        let mut args = vec!["rev-parse"];
        if self.short_revision_length > 0 {
            if self.short_revision_length < 4 {
                warn!(
                    "short revision length {} is below the git minimum of 4",
                    self.short_revision_length
                );
            }
            short_arg = format!("--short={}", self.short_revision_length);
            args.push(&short_arg);
        }
        args.push("HEAD");

        let output = run_scm_command("git", &args, &self.directory).await?;
        Ok(output.stdout)
    }
}

#[async_trait]
impl ScmGateway for GitProvider {
    async fn info(&self) -> Result<ScmInfo> {
        let revision = self.head_revision().await?;
        Ok(ScmInfo {
            last_changed_revision: Some(revision.clone()),
            revision: Some(revision),
            url: None,
        })
    }

    async fn branch(&self) -> Result<Option<String>> {
        let output =
            run_scm_command("git", &["rev-parse", "--abbrev-ref", "HEAD"], &self.directory).await?;
        // detached HEAD에서는 심볼릭 이름 대신 "HEAD"가 나온다.
        if output.stdout == "HEAD" || output.stdout.is_empty() {
            return Ok(None);
        }
        Ok(Some(output.stdout))
    }

    async fn status(&self) -> Result<Vec<ChangedFile>> {
        let output =
            run_scm_command("git", &["status", "--porcelain"], &self.directory).await?;
        Ok(parse_porcelain_status(&output.stdout))
    }

    async fn update(&self) -> Result<UpdateOutcome> {
        let before = self.head_revision().await?;
        run_scm_command("git", &["pull", "--ff-only"], &self.directory).await?;
        let after = self.head_revision().await?;

        let files = if before == after {
            Vec::new()
        } else {
            let diff = run_scm_command(
                "git",
                &["diff", "--name-status", &before, &after],
                &self.directory,
            )
            .await?;
            parse_name_status(&diff.stdout)
        };

        Ok(UpdateOutcome {
            revision: Some(after),
            files,
        })
    }
}

/// `git status --porcelain` 출력 파싱. 형식: `XY path`.
fn parse_porcelain_status(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter_map(|line| {
            let (status, path) = line.split_at_checked(2)?;
            let path = path.trim_start();
            if path.is_empty() {
                return None;
            }
            Some(ChangedFile {
                status: status.trim().to_string(),
                path: path.to_string(),
            })
        })
        .collect()
}

/// `git diff --name-status` 출력 파싱. 형식: `X\tpath`.
fn parse_name_status(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter_map(|line| {
            let (status, path) = line.split_once('\t')?;
            Some(ChangedFile {
                status: status.trim().to_string(),
                path: path.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_porcelain_status_lines() {
        let output = " M src/main.rs\n?? notes.txt\nA  src/new.rs";
        let files = parse_porcelain_status(output);
        assert_eq!(files.len(), 3);
        assert_eq!(files[0], ChangedFile {
            status: "M".to_string(),
            path: "src/main.rs".to_string(),
        });
        assert_eq!(files[1].status, "??");
        assert_eq!(files[2].path, "src/new.rs");
    }

    #[test]
    fn empty_porcelain_output_means_clean() {
        assert!(parse_porcelain_status("").is_empty());
    }

    #[test]
    fn parses_name_status_lines() {
        let files = parse_name_status("M\tsrc/lib.rs\nD\told.rs");
        assert_eq!(files.len(), 2);
        assert_eq!(files[1], ChangedFile {
            status: "D".to_string(),
            path: "old.rs".to_string(),
        });
    }
}
