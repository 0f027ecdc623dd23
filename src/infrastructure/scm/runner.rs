//! SCM 클라이언트 CLI 실행기.

use std::env;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::process::Command;
use tracing::debug;

/// 실행이 끝난 명령의 표준 출력/오류(트리밍됨).
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// 워킹카피 디렉터리에서 SCM 클라이언트 명령을 실행한다.
/// 0이 아닌 종료 코드는 stderr를 담은 오류로 돌려준다.
pub async fn run_scm_command(tool: &str, args: &[&str], directory: &Path) -> Result<CommandOutput> {
    if !command_exists(tool) {
        bail!("scm client not found in PATH: '{tool}'");
    }

    debug!("executing: {tool} {} in {}", args.join(" "), directory.display());

    let output = Command::new(tool)
        .args(args)
        .current_dir(directory)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("failed to spawn '{tool}' command"))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        bail!(
            "{} command failed ({}): {}",
            tool,
            output.status,
            if stderr.is_empty() {
                "no stderr output"
            } else {
                stderr.as_str()
            }
        );
    }

    Ok(CommandOutput { stdout, stderr })
}

/// 로컬 명령이 실행 가능한지 탐지한다.
pub fn command_exists(command: &str) -> bool {
    // 절대/상대 경로가 주어지면 파일 존재만 검사한다.
    if command.trim().is_empty() {
        return false;
    }

    let command_path = Path::new(command);
    if command_path.components().count() > 1 {
        return command_path.is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    // 일반 명령은 PATH를 순회해 탐지한다.
    #[cfg(windows)]
    {
        let has_ext = command_path.extension().is_some();
        let pathext = env::var_os("PATHEXT").unwrap_or_else(|| ".EXE;.CMD;.BAT;.COM".into());
        let exts: Vec<String> = pathext
            .to_string_lossy()
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        for dir in env::split_paths(&path_var) {
            if dir.join(command).is_file() {
                return true;
            }
            if !has_ext {
                for ext in &exts {
                    if dir.join(format!("{command}{ext}")).is_file() {
                        return true;
                    }
                }
            }
        }
        return false;
    }

    #[cfg(not(windows))]
    {
        for dir in env::split_paths(&path_var) {
            if dir.join(command).is_file() {
                return true;
            }
        }
        false
    }
}
