//! 빌드 메타데이터 생성 유스케이스.
//! 이름/버전/리비전/타임스탬프와 사용자 속성을 모아 출력 파일들에 기록한다.

use anyhow::{Result, bail};
use chrono::Local;

use crate::application::ports::{
    CredentialStore, PropertyMap, Reporter, ScmFactory, StampWriter,
};
use crate::application::usecases::session::ScmSession;
use crate::domain::options::MetadataOptions;
use crate::domain::timestamp::format_timestamp;

pub struct CreateMetadataUseCase<'a> {
    pub scm_factory: &'a dyn ScmFactory,
    pub credential_store: &'a dyn CredentialStore,
    pub writer: &'a dyn StampWriter,
    pub reporter: &'a dyn Reporter,
}

impl CreateMetadataUseCase<'_> {
    pub async fn execute(&self, options: MetadataOptions) -> Result<()> {
        let Some(session) =
            ScmSession::open(self.scm_factory, self.credential_store, &options.scm)?
        else {
            bail!("--scm-url is required");
        };

        let revision = session.revision().await?;
        let timestamp = format_timestamp(
            Local::now(),
            options.timestamp_format.as_deref(),
            options.timezone.as_deref(),
        )?;

        let mut properties = PropertyMap::new();
        properties.insert(options.application_property.clone(), options.application_name.clone());
        properties.insert(options.version_property.clone(), options.version.clone());
        properties.insert(options.timestamp_property.clone(), timestamp);
        properties.insert(options.revision_property.clone(), revision);
        // 사용자 속성이 기본 속성을 덮어쓸 수 있다.
        for (key, value) in &options.properties {
            properties.insert(key.clone(), value.clone());
        }

        self.reporter.section("Build Metadata");
        for (key, value) in &properties {
            self.reporter.kv(key, value);
        }

        let mut outputs = vec![options.output_directory.join(&options.output_name)];
        outputs.extend(options.output_files.iter().cloned());

        for file in &outputs {
            self.writer
                .write(&properties, file, options.auto_detect_format)?;
            self.reporter
                .status("output", &format!("wrote {}", file.display()));
        }

        Ok(())
    }
}
