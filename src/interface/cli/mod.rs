//! CLI 인터페이스 모듈.

mod command;

pub use command::{Cli, CliAction};
