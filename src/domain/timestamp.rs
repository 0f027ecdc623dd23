//! 빌드 타임스탬프 생성/포매팅.

use std::fmt::Write as _;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, FixedOffset, Local, Utc};

/// 타임스탬프 문자열을 만든다.
/// 포맷이 없으면 에포크 밀리초, 있으면 strftime 패턴으로 렌더링한다.
/// 타임존은 "UTC"/"Z" 또는 "+HH:MM" 오프셋을 지원하며, 생략 시 로컬 시간대.
pub fn format_timestamp(
    now: DateTime<Local>,
    format: Option<&str>,
    timezone: Option<&str>,
) -> Result<String> {
    let Some(format) = format else {
        return Ok(now.timestamp_millis().to_string());
    };

    match timezone {
        None => render(now.format(format), format),
        Some("UTC") | Some("Z") => render(now.with_timezone(&Utc).format(format), format),
        Some(offset) => {
            let offset = parse_offset(offset)
                .ok_or_else(|| anyhow!("unsupported timezone '{offset}'; use UTC or +HH:MM"))?;
            render(now.with_timezone(&offset).format(format), format)
        }
    }
}

fn render(formatted: impl std::fmt::Display, format: &str) -> Result<String> {
    let mut out = String::new();
    if write!(out, "{formatted}").is_err() {
        bail!("invalid timestamp format '{format}'");
    }
    Ok(out)
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn default_is_epoch_millis() {
        assert_eq!(
            format_timestamp(fixed_now(), None, None).unwrap(),
            "1700000000123"
        );
    }

    #[test]
    fn formats_in_utc() {
        assert_eq!(
            format_timestamp(fixed_now(), Some("%Y-%m-%d %H:%M:%S"), Some("UTC")).unwrap(),
            "2023-11-14 22:13:20"
        );
    }

    #[test]
    fn formats_with_fixed_offset() {
        assert_eq!(
            format_timestamp(fixed_now(), Some("%H:%M"), Some("+09:00")).unwrap(),
            "07:13"
        );
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert!(format_timestamp(fixed_now(), Some("%Y"), Some("Mars/Olympus")).is_err());
    }

    #[test]
    fn rejects_invalid_format_pattern() {
        assert!(format_timestamp(fixed_now(), Some("%Q"), Some("UTC")).is_err());
    }
}
