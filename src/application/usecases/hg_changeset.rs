//! Mercurial 체인지셋/체인지셋 날짜 기록 유스케이스.

use anyhow::Result;

use crate::application::ports::{PropertyMap, Reporter, ScmFactory, StampWriter};
use crate::domain::options::ChangesetOptions;

pub struct HgChangesetUseCase<'a> {
    pub scm_factory: &'a dyn ScmFactory,
    pub writer: &'a dyn StampWriter,
    pub reporter: &'a dyn Reporter,
}

impl HgChangesetUseCase<'_> {
    pub async fn execute(&self, options: ChangesetOptions) -> Result<()> {
        let gateway = self.scm_factory.build_changeset(&options.directory);

        let changeset = gateway.changeset().await?;
        let changeset_date = gateway.changeset_date().await?;

        self.reporter.section("Mercurial Changeset");
        self.reporter.kv(&options.changeset_property, &changeset);
        self.reporter
            .kv(&options.changeset_date_property, &changeset_date);

        if let Some(output) = &options.output {
            let mut properties = PropertyMap::new();
            properties.insert(options.changeset_property.clone(), changeset);
            properties.insert(options.changeset_date_property.clone(), changeset_date);
            self.writer.write(&properties, output, true)?;
            self.reporter
                .status("output", &format!("wrote {}", output.display()));
        }

        Ok(())
    }
}
