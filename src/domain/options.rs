//! 명령별 실행 옵션 값 객체.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// 모든 SCM 명령이 공유하는 접속 옵션.
#[derive(Debug, Clone, Default)]
pub struct ScmConnection {
    /// `scm:<type>:<url>` 연결 문자열. 템플릿 전용 실행에서는 생략 가능.
    pub url: Option<String>,
    /// SCM 명령을 실행할 워킹카피 디렉터리.
    pub directory: PathBuf,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 설정 시 SCM 실패를 경고로 낮추고 이 값을 리비전으로 사용한다.
    pub revision_on_failure: Option<String>,
    /// 리비전 축약 길이(git 전용, 0이면 축약 없음).
    pub short_revision_length: u32,
    /// 저장소 최신 리비전 대신 마지막 커밋 리비전을 사용한다.
    pub use_last_committed: bool,
}

#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub scm: ScmConnection,
    pub check: bool,
    pub update: bool,
    pub offline: bool,
    pub format: Option<String>,
    pub sequence_file: PathBuf,
    pub timestamp_format: Option<String>,
    pub build_number_property: String,
    pub timestamp_property: String,
    pub branch_property: String,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MetadataOptions {
    pub scm: ScmConnection,
    pub application_name: String,
    pub application_property: String,
    pub version: String,
    pub version_property: String,
    pub revision_property: String,
    pub timestamp_property: String,
    pub timestamp_format: Option<String>,
    pub timezone: Option<String>,
    pub output_directory: PathBuf,
    pub output_name: String,
    pub output_files: Vec<PathBuf>,
    pub properties: BTreeMap<String, String>,
    pub auto_detect_format: bool,
}

#[derive(Debug, Clone)]
pub struct TimestampOptions {
    pub timestamp_property: String,
    pub timestamp_format: Option<String>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ChangesetOptions {
    pub directory: PathBuf,
    pub changeset_property: String,
    pub changeset_date_property: String,
    pub output: Option<PathBuf>,
}
