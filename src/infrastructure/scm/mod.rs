//! SCM 백엔드 구현과 디스패치.

pub mod clearcase;
pub mod git;
pub mod hg;
pub mod runner;
pub mod svn;

use std::path::Path;

use crate::application::ports::{ChangesetGateway, ScmGateway};
use crate::domain::scm::{Credentials, ScmKind, ScmUrl};

use clearcase::ClearCaseProvider;
use git::GitProvider;
use hg::HgProvider;
use svn::SvnProvider;

/// 연결 URL 종류에 맞는 백엔드 구현을 생성한다.
pub fn build_scm_provider(
    url: &ScmUrl,
    directory: &Path,
    credentials: Option<Credentials>,
    short_revision_length: u32,
) -> Box<dyn ScmGateway> {
    match url.kind {
        ScmKind::Git => Box::new(GitProvider {
            directory: directory.to_path_buf(),
            short_revision_length,
        }),
        ScmKind::Subversion => Box::new(SvnProvider {
            directory: directory.to_path_buf(),
            credentials,
        }),
        ScmKind::Mercurial => Box::new(HgProvider {
            directory: directory.to_path_buf(),
        }),
        ScmKind::ClearCase => Box::new(ClearCaseProvider {
            directory: directory.to_path_buf(),
        }),
    }
}

/// hg-changeset 명령 전용 게이트웨이를 생성한다.
pub fn build_changeset_provider(directory: &Path) -> Box<dyn ChangesetGateway> {
    Box::new(HgProvider {
        directory: directory.to_path_buf(),
    })
}
