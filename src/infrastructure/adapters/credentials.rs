//! 설정 파일 기반 자격 증명 저장소 어댑터.

use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::CredentialStore;
use crate::domain::scm::Credentials;
use crate::infrastructure::config::load_merged_config;

/// 병합된 JSON 설정에서 호스트별 자격 증명을 찾는다.
pub struct ConfigCredentialStore;

impl CredentialStore for ConfigCredentialStore {
    fn lookup(&self, host: &str) -> Result<Option<Credentials>> {
        let config = load_merged_config()?;
        let Some(server) = config.servers.get(host) else {
            debug!("no server entry for host '{host}'");
            return Ok(None);
        };

        let password = match (&server.password, &server.password_env) {
            (Some(password), _) => Some(password.clone()),
            (None, Some(var)) => Some(env::var(var).with_context(|| {
                format!("server entry for '{host}' points at unset environment variable '{var}'")
            })?),
            (None, None) => None,
        };

        Ok(Some(Credentials {
            username: server.username.clone(),
            password,
        }))
    }
}
