//! 빌드 넘버 메시지 템플릿 파싱/렌더링.

use std::collections::BTreeMap;

use anyhow::{Result, bail};

/// 템플릿 토큰. `{timestamp}`, `{scmVersion}`, `{buildNumberN}` 지원.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Timestamp,
    ScmVersion,
    /// 토큰 전체 이름을 시퀀스 파일 키로 사용한다(예: "buildNumber0").
    BuildNumber(String),
}

/// 파싱된 메시지 템플릿.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    tokens: Vec<Token>,
}

/// 렌더링에 필요한 토큰 값 모음.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    pub timestamp: String,
    pub scm_version: Option<String>,
    pub build_numbers: BTreeMap<String, u64>,
}

impl MessageTemplate {
    /// `{token}` 구문을 파싱한다. `{{`/`}}`는 리터럴 중괄호.
    pub fn parse(format: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        bail!("unclosed '{{' in format template: {format}");
                    }

                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(parse_token_name(&name)?);
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self { tokens })
    }

    /// scmVersion 토큰 사용 여부. SCM 접근이 필요한지 판단에 쓰인다.
    pub fn uses_scm_version(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::ScmVersion))
    }

    /// 템플릿에 등장하는 buildNumber 토큰 이름 목록.
    pub fn build_number_tokens(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::BuildNumber(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn render(&self, values: &TemplateValues) -> Result<String> {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Timestamp => out.push_str(&values.timestamp),
                Token::ScmVersion => match &values.scm_version {
                    Some(version) => out.push_str(version),
                    None => bail!("template uses {{scmVersion}} but no revision was resolved"),
                },
                Token::BuildNumber(name) => match values.build_numbers.get(name) {
                    Some(number) => out.push_str(&number.to_string()),
                    None => bail!("no sequence value resolved for token '{name}'"),
                },
            }
        }
        Ok(out)
    }
}

fn parse_token_name(name: &str) -> Result<Token> {
    if name == "timestamp" {
        return Ok(Token::Timestamp);
    }
    if name == "scmVersion" {
        return Ok(Token::ScmVersion);
    }
    if let Some(suffix) = name.strip_prefix("buildNumber")
        && suffix.chars().all(|c| c.is_ascii_digit())
    {
        return Ok(Token::BuildNumber(name.to_string()));
    }
    bail!("unknown format token '{{{name}}}'; supported: timestamp, scmVersion, buildNumberN")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> TemplateValues {
        TemplateValues {
            timestamp: "1700000000000".to_string(),
            scm_version: Some("abc123".to_string()),
            build_numbers: BTreeMap::from([
                ("buildNumber".to_string(), 7),
                ("buildNumber0".to_string(), 42),
            ]),
        }
    }

    #[test]
    fn renders_named_tokens() {
        let template =
            MessageTemplate::parse("v{buildNumber0}-{scmVersion} at {timestamp}").unwrap();
        assert_eq!(
            template.render(&values()).unwrap(),
            "v42-abc123 at 1700000000000"
        );
    }

    #[test]
    fn build_number_without_digits_is_a_token() {
        let template = MessageTemplate::parse("{buildNumber}").unwrap();
        assert_eq!(template.build_number_tokens(), vec!["buildNumber"]);
        assert_eq!(template.render(&values()).unwrap(), "7");
    }

    #[test]
    fn doubled_braces_are_literals() {
        let template = MessageTemplate::parse("{{literal}} {timestamp}").unwrap();
        assert_eq!(
            template.render(&values()).unwrap(),
            "{literal} 1700000000000"
        );
    }

    #[test]
    fn rejects_unknown_token() {
        assert!(MessageTemplate::parse("{bogus}").is_err());
    }

    #[test]
    fn rejects_build_number_with_trailing_text() {
        assert!(MessageTemplate::parse("{buildNumberX}").is_err());
    }

    #[test]
    fn rejects_unclosed_brace() {
        assert!(MessageTemplate::parse("{timestamp").is_err());
    }

    #[test]
    fn detects_scm_version_usage() {
        assert!(MessageTemplate::parse("{scmVersion}").unwrap().uses_scm_version());
        assert!(!MessageTemplate::parse("{timestamp}").unwrap().uses_scm_version());
    }

    #[test]
    fn render_fails_when_scm_version_missing() {
        let template = MessageTemplate::parse("{scmVersion}").unwrap();
        let mut v = values();
        v.scm_version = None;
        assert!(template.render(&v).is_err());
    }
}
