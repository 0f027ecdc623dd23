//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::scm::{ChangedFile, Credentials, ScmInfo, ScmUrl, UpdateOutcome};

/// 출력 파일에 쓰이는 키/값 집합.
pub type PropertyMap = BTreeMap<String, String>;

/// SCM 백엔드 연동 추상화 포트.
#[async_trait]
pub trait ScmGateway: Send + Sync {
    /// 리비전/저장소 URL 질의.
    async fn info(&self) -> Result<ScmInfo>;
    /// 백엔드가 직접 브랜치를 알려줄 수 있으면 반환한다(git/hg).
    async fn branch(&self) -> Result<Option<String>>;
    /// 로컬 변경 파일 목록.
    async fn status(&self) -> Result<Vec<ChangedFile>>;
    /// 워킹카피 업데이트.
    async fn update(&self) -> Result<UpdateOutcome>;
}

/// Mercurial 체인지셋 전용 포트.
#[async_trait]
pub trait ChangesetGateway: Send + Sync {
    async fn changeset(&self) -> Result<String>;
    async fn changeset_date(&self) -> Result<String>;
}

/// 연결 URL에 맞는 SCM 게이트웨이를 생성하는 팩토리 포트.
pub trait ScmFactory: Send + Sync {
    fn build(
        &self,
        url: &ScmUrl,
        directory: &Path,
        credentials: Option<Credentials>,
        short_revision_length: u32,
    ) -> Box<dyn ScmGateway>;

    fn build_changeset(&self, directory: &Path) -> Box<dyn ChangesetGateway>;
}

/// 호스트별 자격 증명 저장소 포트.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, host: &str) -> Result<Option<Credentials>>;
}

/// 단조 증가 시퀀스 카운터 포트.
pub trait SequenceStore: Send + Sync {
    /// 파일의 `key` 카운터를 1 증가시키고 새 값을 돌려준다.
    fn next(&self, file: &Path, key: &str) -> Result<u64>;
}

/// 키/값 출력 파일 기록 포트.
pub trait StampWriter: Send + Sync {
    /// auto_detect가 켜지면 확장자로 포맷을 고르고, 꺼지면 properties로 쓴다.
    fn write(&self, properties: &PropertyMap, file: &Path, auto_detect: bool) -> Result<()>;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
}
