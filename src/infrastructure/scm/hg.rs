//! Mercurial 백엔드 구현.

use std::path::PathBuf;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::application::ports::{ChangesetGateway, ScmGateway};
use crate::domain::scm::{ChangedFile, ScmInfo, UpdateOutcome};

use super::runner::run_scm_command;

pub struct HgProvider {
    pub directory: PathBuf,
}

impl HgProvider {
    async fn identify(&self) -> Result<String> {
        let output = run_scm_command("hg", &["id", "-i"], &self.directory).await?;
        let revision = strip_dirty_marker(&output.stdout);
        if revision.is_empty() {
            bail!("hg id returned an empty changeset id");
        }
        Ok(revision.to_string())
    }
}

#[async_trait]
impl ScmGateway for HgProvider {
    async fn info(&self) -> Result<ScmInfo> {
        let revision = self.identify().await?;
        Ok(ScmInfo {
            last_changed_revision: Some(revision.clone()),
            revision: Some(revision),
            url: None,
        })
    }

    async fn branch(&self) -> Result<Option<String>> {
        let output = run_scm_command("hg", &["id", "-b"], &self.directory).await?;
        if output.stdout.is_empty() {
            return Ok(None);
        }
        Ok(Some(output.stdout))
    }

    async fn status(&self) -> Result<Vec<ChangedFile>> {
        let output = run_scm_command("hg", &["status"], &self.directory).await?;
        Ok(parse_status(&output.stdout))
    }

    async fn update(&self) -> Result<UpdateOutcome> {
        run_scm_command("hg", &["pull", "--update"], &self.directory).await?;
        let revision = self.identify().await?;
        Ok(UpdateOutcome {
            revision: Some(revision),
            files: Vec::new(),
        })
    }
}

#[async_trait]
impl ChangesetGateway for HgProvider {
    async fn changeset(&self) -> Result<String> {
        self.identify().await
    }

    async fn changeset_date(&self) -> Result<String> {
        let output = run_scm_command(
            "hg",
            &["log", "-r", ".", "--template", "{date|isodate}"],
            &self.directory,
        )
        .await?;
        Ok(output.stdout)
    }
}

/// 로컬 변경이 있으면 `hg id -i`가 끝에 `+`를 붙인다.
fn strip_dirty_marker(id: &str) -> &str {
    id.trim_end_matches('+')
}

/// `hg status` 출력 파싱. 형식: `X path`.
fn parse_status(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter_map(|line| {
            let (status, path) = line.split_once(' ')?;
            if status.is_empty() || path.is_empty() {
                return None;
            }
            Some(ChangedFile {
                status: status.to_string(),
                path: path.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_dirty_marker_from_changeset_id() {
        assert_eq!(strip_dirty_marker("24b186ac4a4a+"), "24b186ac4a4a");
        assert_eq!(strip_dirty_marker("24b186ac4a4a"), "24b186ac4a4a");
    }

    #[test]
    fn parses_status_lines() {
        let files = parse_status("M src/lib.rs\n? scratch.txt\nA src/new.rs");
        assert_eq!(files.len(), 3);
        assert_eq!(files[0], ChangedFile {
            status: "M".to_string(),
            path: "src/lib.rs".to_string(),
        });
    }

    #[test]
    fn clean_status_is_empty() {
        assert!(parse_status("").is_empty());
    }
}
