//! 애플리케이션 포트 구현 어댑터 모음.

mod credentials;
mod reporter;
mod scm_factory;

pub use credentials::ConfigCredentialStore;
pub use reporter::ConsoleReporter;
pub use scm_factory::ScmFactoryAdapter;
