//! SCM 연결 URL과 리비전/브랜치 도메인 값 객체.

use anyhow::{Result, bail};
use url::Url;

/// SCM 실패 시 브랜치 이름으로 사용하는 기본값.
pub const DEFAULT_BRANCH_NAME: &str = "UNKNOWN_BRANCH";

/// 지원하는 SCM 백엔드 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScmKind {
    Subversion,
    Git,
    Mercurial,
    ClearCase,
}

impl ScmKind {
    fn from_type(value: &str) -> Option<Self> {
        match value {
            "svn" => Some(Self::Subversion),
            "git" => Some(Self::Git),
            "hg" => Some(Self::Mercurial),
            "clearcase" => Some(Self::ClearCase),
            _ => None,
        }
    }

    /// 해당 백엔드의 네이티브 클라이언트 실행 파일 이름.
    pub fn tool(self) -> &'static str {
        match self {
            Self::Subversion => "svn",
            Self::Git => "git",
            Self::Mercurial => "hg",
            Self::ClearCase => "cleartool",
        }
    }
}

/// `scm:<type>:<url>` 형식의 연결 문자열.
#[derive(Debug, Clone)]
pub struct ScmUrl {
    pub kind: ScmKind,
    pub url: String,
}

impl ScmUrl {
    /// 연결 문자열을 파싱한다. 지원 타입: svn, git, hg, clearcase.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = match input.strip_prefix("scm:") {
            Some(rest) => rest,
            None => bail!("SCM connection URL must start with 'scm:': {input}"),
        };

        let Some((provider_type, url)) = rest.split_once(':') else {
            bail!("SCM connection URL is missing a provider type: {input}");
        };

        let Some(kind) = ScmKind::from_type(provider_type) else {
            bail!("unsupported SCM provider type '{provider_type}' in {input}");
        };

        if url.is_empty() {
            bail!("SCM connection URL has an empty repository URL: {input}");
        }

        Ok(Self {
            kind,
            url: url.to_string(),
        })
    }

    /// 자격 증명 조회용 호스트. 로컬 경로 URL이면 None.
    pub fn host(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        match parsed.port() {
            Some(port) => Some(format!("{host}:{port}")),
            None => Some(host.to_string()),
        }
    }
}

/// SCM 접속 자격 증명.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// `info` 질의 결과.
#[derive(Debug, Clone, Default)]
pub struct ScmInfo {
    pub revision: Option<String>,
    pub last_changed_revision: Option<String>,
    pub url: Option<String>,
}

impl ScmInfo {
    /// 저장소 최신 리비전 또는 마지막 커밋 리비전을 선택한다.
    pub fn pick_revision(&self, use_last_committed: bool) -> Option<&str> {
        if use_last_committed {
            self.last_changed_revision
                .as_deref()
                .or(self.revision.as_deref())
        } else {
            self.revision.as_deref()
        }
    }
}

/// 로컬 변경 파일 한 건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub status: String,
    pub path: String,
}

impl std::fmt::Display for ChangedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.path)
    }
}

/// 워킹카피 업데이트 결과.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    pub revision: Option<String>,
    pub files: Vec<ChangedFile>,
}

/// 저장소 URL에서 브랜치를 분류한다.
/// `/trunk` -> "trunk", `/branches/X` -> "branches/X", `/tags/X` -> "tags/X",
/// 그 외는 "UNKNOWN".
pub fn classify_branch_url(url: &str) -> String {
    if url.contains("/trunk") {
        return "trunk".to_string();
    }

    if url.contains("/branches") || url.contains("/tags") {
        // 마지막 branches/tags 마커 이후 한 세그먼트까지만 취한다.
        let branches = url.rfind("branches/");
        let tags = url.rfind("tags/");
        let start = match (branches, tags) {
            (Some(b), Some(t)) => Some(b.max(t)),
            (Some(b), None) => Some(b),
            (None, Some(t)) => Some(t),
            (None, None) => None,
        };
        if let Some(start) = start {
            let rest = &url[start..];
            let marker_len = rest.find('/').map(|i| i + 1).unwrap_or(rest.len());
            let tail = &rest[marker_len..];
            let end = marker_len + tail.find('/').unwrap_or(tail.len());
            return rest[..end].to_string();
        }
    }

    "UNKNOWN".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_git_connection_url() {
        let scm = ScmUrl::parse("scm:git:https://example.com/repo.git").unwrap();
        assert_eq!(scm.kind, ScmKind::Git);
        assert_eq!(scm.url, "https://example.com/repo.git");
    }

    #[test]
    fn parses_svn_connection_url_with_host_and_port() {
        let scm = ScmUrl::parse("scm:svn:https://svn.example.com:8443/repo/trunk").unwrap();
        assert_eq!(scm.kind, ScmKind::Subversion);
        assert_eq!(scm.host().as_deref(), Some("svn.example.com:8443"));
    }

    #[test]
    fn rejects_url_without_scm_prefix() {
        assert!(ScmUrl::parse("https://example.com/repo.git").is_err());
    }

    #[test]
    fn rejects_unknown_provider_type() {
        assert!(ScmUrl::parse("scm:cvs:pserver:anonymous@host:/cvsroot").is_err());
    }

    #[test]
    fn rejects_empty_repository_url() {
        assert!(ScmUrl::parse("scm:git:").is_err());
    }

    #[test]
    fn local_path_url_has_no_host() {
        let scm = ScmUrl::parse("scm:hg:/var/repos/project").unwrap();
        assert_eq!(scm.host(), None);
    }

    #[test]
    fn classifies_trunk() {
        assert_eq!(classify_branch_url("https://host/repo/trunk/module"), "trunk");
    }

    #[test]
    fn classifies_branch_segment() {
        assert_eq!(
            classify_branch_url("https://host/repo/branches/1.x/module"),
            "branches/1.x"
        );
    }

    #[test]
    fn classifies_tag_segment() {
        assert_eq!(classify_branch_url("https://host/repo/tags/v1.0"), "tags/v1.0");
    }

    #[test]
    fn unknown_layout_classifies_as_unknown() {
        assert_eq!(classify_branch_url("https://host/repo/main"), "UNKNOWN");
    }
}
