//! SCM 질의 세션.
//! 게이트웨이 생성, 자격 증명 해석, 실패 폴백 규칙을 한 곳에 모은다.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::application::ports::{CredentialStore, ScmFactory, ScmGateway};
use crate::domain::options::ScmConnection;
use crate::domain::scm::{
    ChangedFile, Credentials, DEFAULT_BRANCH_NAME, ScmUrl, UpdateOutcome, classify_branch_url,
};

/// 한 번의 명령 실행 동안 유지되는 SCM 접근 컨텍스트.
pub struct ScmSession {
    gateway: Box<dyn ScmGateway>,
    fallback: Option<String>,
    use_last_committed: bool,
    fallback_engaged: AtomicBool,
}

impl ScmSession {
    /// 연결 옵션으로 세션을 연다. URL이 없으면 None.
    pub fn open(
        factory: &dyn ScmFactory,
        credentials: &dyn CredentialStore,
        connection: &ScmConnection,
    ) -> Result<Option<Self>> {
        let Some(url) = connection.url.as_deref() else {
            return Ok(None);
        };

        let scm_url = ScmUrl::parse(url)?;
        let creds = resolve_credentials(credentials, connection, &scm_url)?;
        let gateway = factory.build(
            &scm_url,
            &connection.directory,
            creds,
            connection.short_revision_length,
        );

        Ok(Some(Self {
            gateway,
            fallback: connection.revision_on_failure.clone(),
            use_last_committed: connection.use_last_committed,
            fallback_engaged: AtomicBool::new(false),
        }))
    }

    /// 폴백이 이미 발동되었으면 이후 check/update는 건너뛴다.
    pub fn fallback_engaged(&self) -> bool {
        self.fallback_engaged.load(Ordering::Relaxed)
    }

    /// 리비전을 조회한다. 실패 시 폴백 문자열이 있으면 경고 후 그 값을 쓴다.
    pub async fn revision(&self) -> Result<String> {
        let looked_up = match self.gateway.info().await {
            Ok(info) => info
                .pick_revision(self.use_last_committed)
                .map(str::to_string)
                .context("SCM info returned no revision"),
            Err(err) => Err(err),
        };

        match looked_up {
            Ok(revision) => Ok(revision),
            Err(err) => match &self.fallback {
                Some(fallback) => {
                    warn!(
                        "cannot get the revision from the SCM repository, proceeding with '{fallback}': {err:#}"
                    );
                    self.fallback_engaged.store(true, Ordering::Relaxed);
                    Ok(fallback.clone())
                }
                None => {
                    Err(err.context("cannot get the revision information from the scm repository"))
                }
            },
        }
    }

    /// 브랜치를 결정한다.
    /// 백엔드가 직접 알려주면 그 값을, 아니면 저장소 URL을 분류한다.
    pub async fn branch(&self) -> Result<String> {
        if self.fallback_engaged() {
            return Ok(DEFAULT_BRANCH_NAME.to_string());
        }

        match self.gateway.branch().await {
            Ok(Some(branch)) => return Ok(branch),
            Ok(None) => {}
            Err(err) => warn!("cannot get the branch directly from the repository: {err:#}"),
        }

        match self.gateway.info().await {
            Ok(info) => match info.url {
                Some(url) => Ok(classify_branch_url(&url)),
                None => Ok(DEFAULT_BRANCH_NAME.to_string()),
            },
            Err(err) => {
                if self.fallback.is_some() {
                    warn!(
                        "cannot get the branch from the SCM repository, proceeding with {DEFAULT_BRANCH_NAME}: {err:#}"
                    );
                    self.fallback_engaged.store(true, Ordering::Relaxed);
                    Ok(DEFAULT_BRANCH_NAME.to_string())
                } else {
                    Err(err.context("cannot get the branch information from the scm repository"))
                }
            }
        }
    }

    /// 로컬 변경이 있으면 변경 경로 목록과 함께 실패한다.
    pub async fn check_local_modifications(&self) -> Result<()> {
        debug!("verifying there are no local modifications");
        let changed = self
            .gateway
            .status()
            .await
            .context("an error has occurred while checking scm status")?;

        if !changed.is_empty() {
            bail!(
                "cannot create the build number because you have local modifications:\n{}",
                format_changed_files(&changed)
            );
        }
        Ok(())
    }

    pub async fn update(&self) -> Result<UpdateOutcome> {
        self.gateway
            .update()
            .await
            .context("couldn't update the working copy")
    }
}

fn resolve_credentials(
    store: &dyn CredentialStore,
    connection: &ScmConnection,
    scm_url: &ScmUrl,
) -> Result<Option<Credentials>> {
    // 명시 플래그가 설정 파일보다 우선한다.
    if connection.username.is_some() || connection.password.is_some() {
        return Ok(Some(Credentials {
            username: connection.username.clone(),
            password: connection.password.clone(),
        }));
    }

    let Some(host) = scm_url.host() else {
        return Ok(None);
    };
    store.lookup(&host)
}

fn format_changed_files(files: &[ChangedFile]) -> String {
    files
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
