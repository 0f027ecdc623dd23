//! SCM 게이트웨이 팩토리 어댑터.

use std::path::Path;

use crate::application::ports::{ChangesetGateway, ScmFactory, ScmGateway};
use crate::domain::scm::{Credentials, ScmUrl};
use crate::infrastructure::scm;

pub struct ScmFactoryAdapter;

impl ScmFactory for ScmFactoryAdapter {
    fn build(
        &self,
        url: &ScmUrl,
        directory: &Path,
        credentials: Option<Credentials>,
        short_revision_length: u32,
    ) -> Box<dyn ScmGateway> {
        scm::build_scm_provider(url, directory, credentials, short_revision_length)
    }

    fn build_changeset(&self, directory: &Path) -> Box<dyn ChangesetGateway> {
        scm::build_changeset_provider(directory)
    }
}
