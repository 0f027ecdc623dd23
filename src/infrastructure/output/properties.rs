//! Java 스타일 `.properties` 직렬화/파싱.

use anyhow::{Result, bail};

use crate::application::ports::PropertyMap;

/// 출력 파일 첫 줄에 들어가는 고정 헤더 주석.
pub const HEADER: &str = "Created by buildstamp. Do not modify";

pub fn render_properties(properties: &PropertyMap) -> String {
    let mut out = String::new();
    out.push('#');
    out.push_str(HEADER);
    out.push('\n');
    for (key, value) in properties {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

pub fn parse_properties(input: &str) -> Result<PropertyMap> {
    let mut properties = PropertyMap::new();
    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let Some(separator) = find_separator(trimmed) else {
            bail!("properties line has no '=' or ':' separator: {line}");
        };
        let key = unescape(trim_unescaped_end(&trimmed[..separator]))?;
        let value = unescape(trimmed[separator + 1..].trim_start())?;
        properties.insert(key, value);
    }
    Ok(properties)
}

/// 이스케이프되지 않은 첫 `=`/`:` 위치를 찾는다.
fn find_separator(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return Some(i),
            _ => {}
        }
    }
    None
}

/// 키 끝의 이스케이프되지 않은 공백만 잘라낸다. `\ `는 키의 일부다.
fn trim_unescaped_end(text: &str) -> &str {
    let mut end = text.len();
    for (i, c) in text.char_indices().rev() {
        if !c.is_whitespace() {
            break;
        }
        let backslashes = text[..i].chars().rev().take_while(|&b| b == '\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        end = i;
    }
    &text[..end]
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            '#' => out.push_str("\\#"),
            '!' => out.push_str("\\!"),
            // 값의 선행 공백만 이스케이프하면 읽기에 충분하다.
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => bail!("dangling escape at end of properties entry: {text}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyMap {
        PropertyMap::from([
            ("buildNumber".to_string(), "1504".to_string()),
            ("scmBranch".to_string(), "branches/1.x".to_string()),
            ("url".to_string(), "https://host:8443/repo".to_string()),
            ("key with spaces".to_string(), " leading and = sign".to_string()),
            ("multi".to_string(), "line one\nline two\ttabbed".to_string()),
        ])
    }

    #[test]
    fn round_trips_escaped_entries() {
        let rendered = render_properties(&sample());
        let parsed = parse_properties(&rendered).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn round_trips_key_with_trailing_space() {
        let original = PropertyMap::from([("buildNumber ".to_string(), "7".to_string())]);
        let rendered = render_properties(&original);
        let parsed = parse_properties(&rendered).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn unescaped_whitespace_around_separator_is_not_part_of_the_key() {
        let parsed = parse_properties("key  =  value").unwrap();
        assert_eq!(parsed.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn rendered_output_starts_with_header_comment() {
        let rendered = render_properties(&PropertyMap::new());
        assert!(rendered.starts_with(&format!("#{HEADER}\n")));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let parsed = parse_properties("# comment\n\n! also comment\nkey=value\n").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn accepts_colon_separator() {
        let parsed = parse_properties("key: value").unwrap();
        assert_eq!(parsed.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn rejects_line_without_separator() {
        assert!(parse_properties("no separator here").is_err());
    }
}
