//! 빌드 넘버 생성 유스케이스.
//! SCM 리비전 또는 메시지 템플릿으로 빌드 넘버를 만들고,
//! 타임스탬프/브랜치와 함께 출력 파일에 기록한다.

use anyhow::{Result, bail};
use chrono::Local;
use tracing::{debug, info};

use crate::application::ports::{
    CredentialStore, PropertyMap, Reporter, ScmFactory, SequenceStore, StampWriter,
};
use crate::application::usecases::session::ScmSession;
use crate::domain::buildnumber::{MessageTemplate, TemplateValues};
use crate::domain::options::CreateOptions;
use crate::domain::scm::DEFAULT_BRANCH_NAME;
use crate::domain::timestamp::format_timestamp;

/// `create` 명령의 전체 흐름을 조율한다.
pub struct CreateUseCase<'a> {
    pub scm_factory: &'a dyn ScmFactory,
    pub credential_store: &'a dyn CredentialStore,
    pub sequence_store: &'a dyn SequenceStore,
    pub writer: &'a dyn StampWriter,
    pub reporter: &'a dyn Reporter,
}

impl CreateUseCase<'_> {
    pub async fn execute(&self, options: CreateOptions) -> Result<()> {
        let now = Local::now();
        let session = ScmSession::open(self.scm_factory, self.credential_store, &options.scm)?;

        let revision = match &options.format {
            Some(format) => {
                self.render_template(format, now, session.as_ref(), &options)
                    .await?
            }
            None => {
                let Some(session) = session.as_ref() else {
                    bail!("--scm-url is required unless a format template is given");
                };

                if options.check {
                    session.check_local_modifications().await?;
                } else {
                    debug!("checking for local modifications: skipped");
                }

                if options.offline {
                    info!("offline mode, updating the working copy from SCM: skipped");
                } else if options.update {
                    let outcome = session.update().await?;
                    for file in &outcome.files {
                        debug!("updated: {file}");
                    }
                    if outcome.files.is_empty() {
                        debug!("no files needed updating");
                    }
                    if let Some(revision) = &outcome.revision {
                        info!("got a revision during update: {revision}");
                    }
                } else {
                    debug!("updating the working copy from SCM: skipped");
                }

                session.revision().await?
            }
        };

        let timestamp = format_timestamp(now, options.timestamp_format.as_deref(), None)?;
        let branch = match session.as_ref() {
            Some(session) => session.branch().await?,
            None => DEFAULT_BRANCH_NAME.to_string(),
        };

        self.reporter.section("Build Number");
        self.reporter.kv(&options.build_number_property, &revision);
        self.reporter.kv(&options.timestamp_property, &timestamp);
        self.reporter.kv(&options.branch_property, &branch);

        let mut properties = PropertyMap::new();
        properties.insert(options.build_number_property.clone(), revision);
        properties.insert(options.timestamp_property.clone(), timestamp);
        properties.insert(options.branch_property.clone(), branch);

        self.writer.write(&properties, &options.output, true)?;
        self.reporter
            .status("output", &format!("wrote {}", options.output.display()));

        Ok(())
    }

    /// 템플릿 토큰(timestamp/scmVersion/buildNumberN)을 값으로 치환한다.
    async fn render_template(
        &self,
        format: &str,
        now: chrono::DateTime<Local>,
        session: Option<&ScmSession>,
        options: &CreateOptions,
    ) -> Result<String> {
        let template = MessageTemplate::parse(format)?;

        let mut values = TemplateValues {
            timestamp: format_timestamp(now, options.timestamp_format.as_deref(), None)?,
            ..TemplateValues::default()
        };

        if template.uses_scm_version() {
            let Some(session) = session else {
                bail!("--scm-url is required because the template uses {{scmVersion}}");
            };
            values.scm_version = Some(session.revision().await?);
        }

        for token in template.build_number_tokens() {
            if values.build_numbers.contains_key(token) {
                continue;
            }
            let next = self.sequence_store.next(&options.sequence_file, token)?;
            values.build_numbers.insert(token.to_string(), next);
        }

        template.render(&values)
    }
}
