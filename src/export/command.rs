//! Share surface backed by an external command.
//!
//! Desktop hosts have no built-in share sheet, so the user can configure a
//! program (a mail client, a chat uploader, `xdg-open`) that receives the
//! staged PNG. Arguments may contain `{file}`, `{title}` and `{text}`
//! placeholders. The staged copy lives in a per-share temporary directory
//! that is removed once the command returns.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{Builder, TempDir};
use tracing::debug;

use crate::error::{PetalError, Result};
use crate::render::PNG_MIME;

use super::platform::{SharePayload, SharePlatform, ShareOutcome};

/// Exit status conventionally reported when the user aborts (SIGINT).
const CANCELLED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
    staging: PathBuf,
}

impl CommandShare {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            staging: env::temp_dir(),
        }
    }

    /// Parent directory for per-share staging dirs (default: system temp dir).
    pub fn with_staging(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging = dir.into();
        self
    }

    /// Find the program on disk, searching `PATH` for bare names.
    pub fn resolve(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 || program.is_absolute() {
            return program.is_file().then(|| program.to_path_buf());
        }

        let paths = env::var_os("PATH")?;
        env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }

    fn stage_dir(&self) -> Result<TempDir> {
        let staging_error = |e: std::io::Error| PetalError::Delivery {
            message: format!(
                "Failed to create staging directory in {}: {}",
                self.staging.display(),
                e
            ),
            help: None,
        };

        fs::create_dir_all(&self.staging).map_err(staging_error)?;
        Builder::new()
            .prefix("petal-")
            .tempdir_in(&self.staging)
            .map_err(staging_error)
    }

    fn expand_args(&self, file: &Path, payload: &SharePayload) -> Vec<String> {
        let file = file.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{file}", &file)
                    .replace("{title}", &payload.title)
                    .replace("{text}", &payload.text)
            })
            .collect()
    }
}

impl SharePlatform for CommandShare {
    fn can_share(&self, payload: &SharePayload) -> bool {
        let single_png = matches!(payload.files.as_slice(), [file] if file.mime == PNG_MIME);
        single_png && self.resolve().is_some()
    }

    fn share(&self, payload: &SharePayload) -> Result<ShareOutcome> {
        let program = self.resolve().ok_or(PetalError::ShareUnavailable)?;
        let file = payload.files.first().ok_or(PetalError::ShareUnavailable)?;

        let stage = self.stage_dir()?;
        let staged = stage.path().join(&file.name);
        fs::write(&staged, &file.bytes).map_err(|e| PetalError::Delivery {
            message: format!("Failed to stage {}: {}", staged.display(), e),
            help: None,
        })?;

        let args = self.expand_args(&staged, payload);
        debug!(program = %program.display(), ?args, "invoking share command");

        let status = Command::new(&program)
            .args(&args)
            .status()
            .map_err(|e| PetalError::Delivery {
                message: format!("Failed to run {}: {}", self.program, e),
                help: Some("Check the share command in petal.yaml".to_string()),
            })?;

        match status.code() {
            Some(0) => Ok(ShareOutcome::Completed),
            Some(CANCELLED_EXIT_CODE) => Ok(ShareOutcome::Cancelled),
            _ => Err(PetalError::Delivery {
                message: format!("{} exited with {}", self.program, status),
                help: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SharedFile;
    use tempfile::tempdir;

    fn payload(mime: &str) -> SharePayload {
        SharePayload {
            title: "Check out my flower!".to_string(),
            files: vec![SharedFile {
                name: "flower.png".to_string(),
                mime: mime.to_string(),
                bytes: b"png-bytes".to_vec(),
            }],
            text: "hello".to_string(),
        }
    }

    #[test]
    fn test_missing_program_cannot_share() {
        let share = CommandShare::new("petal-no-such-program-xyz", vec![]);
        assert!(share.resolve().is_none());
        assert!(!share.can_share(&payload(PNG_MIME)));
    }

    #[test]
    fn test_expand_args() {
        let share = CommandShare::new(
            "mail",
            vec![
                "--attach={file}".to_string(),
                "--subject".to_string(),
                "{title}".to_string(),
                "{text}".to_string(),
            ],
        );
        let args = share.expand_args(Path::new("/tmp/flower.png"), &payload(PNG_MIME));
        assert_eq!(
            args,
            vec![
                "--attach=/tmp/flower.png",
                "--subject",
                "Check out my flower!",
                "hello"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_requires_single_png() {
        let share = CommandShare::new("sh", vec![]);
        assert!(share.can_share(&payload(PNG_MIME)));
        assert!(!share.can_share(&payload("image/jpeg")));

        let mut two = payload(PNG_MIME);
        two.files.push(two.files[0].clone());
        assert!(!share.can_share(&two));
    }

    #[cfg(unix)]
    #[test]
    fn test_share_passes_staged_file() {
        let dir = tempdir().unwrap();
        let copy = dir.path().join("received.png");
        let share = CommandShare::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"cp "$0" "$1""#.to_string(),
                "{file}".to_string(),
                copy.to_string_lossy().into_owned(),
            ],
        )
        .with_staging(dir.path().join("staging"));

        let outcome = share.share(&payload(PNG_MIME)).unwrap();

        assert_eq!(outcome, ShareOutcome::Completed);
        assert_eq!(fs::read(&copy).unwrap(), b"png-bytes");
    }

    #[cfg(unix)]
    #[test]
    fn test_staged_file_removed_after_share() {
        for script in ["exit 0", "exit 130", "exit 3"] {
            let dir = tempdir().unwrap();
            let staging = dir.path().join("staging");
            let share = CommandShare::new("sh", vec!["-c".to_string(), script.to_string()])
                .with_staging(&staging);

            let _ = share.share(&payload(PNG_MIME));

            assert_eq!(fs::read_dir(&staging).unwrap().count(), 0, "{script}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_staging_failure_is_delivery_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();
        let share = CommandShare::new("sh", vec!["-c".to_string(), "exit 0".to_string()])
            .with_staging(&blocker);

        assert!(matches!(
            share.share(&payload(PNG_MIME)),
            Err(PetalError::Delivery { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_share_cancelled_exit_code() {
        let dir = tempdir().unwrap();
        let share = CommandShare::new("sh", vec!["-c".to_string(), "exit 130".to_string()])
            .with_staging(dir.path());

        assert_eq!(
            share.share(&payload(PNG_MIME)).unwrap(),
            ShareOutcome::Cancelled
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_share_failure_is_delivery_error() {
        let dir = tempdir().unwrap();
        let share = CommandShare::new("sh", vec!["-c".to_string(), "exit 3".to_string()])
            .with_staging(dir.path());

        assert!(matches!(
            share.share(&payload(PNG_MIME)),
            Err(PetalError::Delivery { .. })
        ));
    }
}
