//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::create::CreateUseCase;
use crate::application::usecases::create_metadata::CreateMetadataUseCase;
use crate::application::usecases::create_timestamp::CreateTimestampUseCase;
use crate::application::usecases::hg_changeset::HgChangesetUseCase;
use crate::infrastructure::adapters::{ConfigCredentialStore, ConsoleReporter, ScmFactoryAdapter};
use crate::infrastructure::output::FileStampWriter;
use crate::infrastructure::sequence::PropertiesSequenceStore;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    scm_factory: ScmFactoryAdapter,
    credential_store: ConfigCredentialStore,
    sequence_store: PropertiesSequenceStore,
    writer: FileStampWriter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            scm_factory: ScmFactoryAdapter,
            credential_store: ConfigCredentialStore,
            sequence_store: PropertiesSequenceStore,
            writer: FileStampWriter,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    pub fn create_usecase(&self) -> CreateUseCase<'_> {
        CreateUseCase {
            scm_factory: &self.scm_factory,
            credential_store: &self.credential_store,
            sequence_store: &self.sequence_store,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }

    pub fn create_metadata_usecase(&self) -> CreateMetadataUseCase<'_> {
        CreateMetadataUseCase {
            scm_factory: &self.scm_factory,
            credential_store: &self.credential_store,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }

    pub fn create_timestamp_usecase(&self) -> CreateTimestampUseCase<'_> {
        CreateTimestampUseCase {
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }

    pub fn hg_changeset_usecase(&self) -> HgChangesetUseCase<'_> {
        HgChangesetUseCase {
            scm_factory: &self.scm_factory,
            writer: &self.writer,
            reporter: &self.reporter,
        }
    }
}
