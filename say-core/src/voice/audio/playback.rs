//! Audio playback of encoded (MP3) audio
//! Either piped to an external player or, with the `rodio` feature, decoded in-process

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::super::tts::types::AudioData;

/// Plays audio to completion
#[async_trait]
pub trait Player: Send + Sync {
    fn name(&self) -> &str;

    /// Returns once playback has finished; decode and device failures are errors
    async fn play(&self, audio: &AudioData) -> Result<()>;
}

/// Plays audio by piping it into an external program's stdin
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn ffplay() -> Self {
        Self::new(
            "ffplay",
            &["-autoexit", "-nodisp", "-loglevel", "error", "-i", "-"],
        )
    }

    pub fn mpv() -> Self {
        Self::new("mpv", &["--no-cache", "--no-terminal", "--", "fd://0"])
    }

    /// Pick the first supported player found on PATH
    pub fn detect() -> Result<Self> {
        for player in [Self::ffplay(), Self::mpv()] {
            if executable_in_path(&player.program) {
                return Ok(player);
            }
        }
        anyhow::bail!("no supported audio player found on PATH (tried: ffplay, mpv)")
    }
}

#[async_trait]
impl Player for CommandPlayer {
    fn name(&self) -> &str {
        &self.program
    }

    async fn play(&self, audio: &AudioData) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start audio player '{}'", self.program))?;

        let stdin = child.stdin.take();
        let write = async move {
            match stdin {
                Some(mut stdin) => {
                    let result = stdin.write_all(&audio.bytes).await;
                    // Closing stdin signals end of input
                    drop(stdin);
                    result
                }
                None => Ok(()),
            }
        };

        // Feed stdin while draining stderr, or a chatty player can block on a full pipe
        let (write_result, output) = tokio::join!(write, child.wait_with_output());
        let output = output
            .with_context(|| format!("failed waiting for audio player '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "audio player '{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        write_result
            .with_context(|| format!("failed to send audio to player '{}'", self.program))
    }
}

fn executable_in_path(command: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var).any(|dir| is_executable(&dir.join(command)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Decodes and plays audio on the default output device
#[cfg(feature = "rodio")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioPlayer;

#[cfg(feature = "rodio")]
#[async_trait]
impl Player for RodioPlayer {
    fn name(&self) -> &str {
        "rodio"
    }

    async fn play(&self, audio: &AudioData) -> Result<()> {
        let bytes = audio.bytes.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let (_stream, handle) =
                rodio::OutputStream::try_default().context("no output device available")?;
            let sink = rodio::Sink::try_new(&handle).context("failed to create audio sink")?;
            let source = rodio::Decoder::new(std::io::Cursor::new(bytes))
                .context("failed to decode audio")?;
            sink.append(source);
            sink.sleep_until_end();
            Ok(())
        })
        .await
        .context("playback task panicked")?
    }
}
