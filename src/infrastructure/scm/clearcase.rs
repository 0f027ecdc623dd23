//! ClearCase 백엔드 구현.
//! cleartool 기반의 최소 질의만 지원한다.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::ScmGateway;
use crate::domain::scm::{ChangedFile, ScmInfo, UpdateOutcome};

use super::runner::run_scm_command;

pub struct ClearCaseProvider {
    pub directory: PathBuf,
}

#[async_trait]
impl ScmGateway for ClearCaseProvider {
    async fn info(&self) -> Result<ScmInfo> {
        // 현재 디렉터리 요소의 버전 문자열(예: /main/7)을 리비전으로 쓴다.
        let output =
            run_scm_command("cleartool", &["describe", "-fmt", "%Vn", "."], &self.directory)
                .await?;
        Ok(ScmInfo {
            last_changed_revision: Some(output.stdout.clone()),
            revision: Some(output.stdout),
            url: None,
        })
    }

    async fn branch(&self) -> Result<Option<String>> {
        let output = run_scm_command("cleartool", &["pwv", "-short"], &self.directory).await?;
        // 뷰 밖에서 실행하면 "** NONE **"이 나온다.
        if output.stdout.is_empty() || output.stdout.contains("NONE") {
            return Ok(None);
        }
        Ok(Some(output.stdout))
    }

    async fn status(&self) -> Result<Vec<ChangedFile>> {
        let output = run_scm_command(
            "cleartool",
            &["lscheckout", "-short", "-recurse"],
            &self.directory,
        )
        .await?;
        Ok(output
            .stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| ChangedFile {
                status: "CO".to_string(),
                path: line.trim().to_string(),
            })
            .collect())
    }

    async fn update(&self) -> Result<UpdateOutcome> {
        run_scm_command("cleartool", &["update", "."], &self.directory).await?;
        Ok(UpdateOutcome::default())
    }
}
