//! 명령(mojo 대응) 유스케이스 모음.

pub mod create;
pub mod create_metadata;
pub mod create_timestamp;
pub mod hg_changeset;
pub mod session;
