use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

static PROGRESS: OnceLock<MultiProgress> = OnceLock::new();

fn multi() -> &'static MultiProgress {
    PROGRESS.get_or_init(MultiProgress::new)
}

/// A bar counting finished page commands.
pub fn pages(len: u64, q_level: u8) -> ProgressBar {
    if q_level > 0 {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template("{spinner:.blue} [{bar:32.green/white}] {pos}/{len} pages")
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let pb = multi().add(ProgressBar::new(len));
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A spinner for a single long-running command.
pub fn spinner(msg: String, q_level: u8) -> ProgressBar {
    if q_level > 0 {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    let pb = multi().add(ProgressBar::new_spinner());
    pb.set_style(style);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Routes log lines above any active progress bar instead of through it.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if multi().is_hidden() {
            return std::io::stderr().write(buf);
        }

        let msg = String::from_utf8_lossy(buf);
        multi().println(msg.trim_end())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
