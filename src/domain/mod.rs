//! Domain layer
//! SCM/빌드넘버 도메인 규칙을 외부 의존성 없이 표현한다.

pub mod buildnumber;
pub mod options;
pub mod scm;
pub mod timestamp;
