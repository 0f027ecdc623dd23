//! 타임스탬프 단독 생성 유스케이스.

use anyhow::Result;
use chrono::Local;

use crate::application::ports::{PropertyMap, Reporter, StampWriter};
use crate::domain::options::TimestampOptions;
use crate::domain::timestamp::format_timestamp;

pub struct CreateTimestampUseCase<'a> {
    pub writer: &'a dyn StampWriter,
    pub reporter: &'a dyn Reporter,
}

impl CreateTimestampUseCase<'_> {
    pub fn execute(&self, options: TimestampOptions) -> Result<()> {
        let timestamp =
            format_timestamp(Local::now(), options.timestamp_format.as_deref(), None)?;

        self.reporter.section("Timestamp");
        self.reporter.kv(&options.timestamp_property, &timestamp);

        if let Some(output) = &options.output {
            let mut properties = PropertyMap::new();
            properties.insert(options.timestamp_property.clone(), timestamp);
            self.writer.write(&properties, output, true)?;
            self.reporter
                .status("output", &format!("wrote {}", output.display()));
        }

        Ok(())
    }
}
