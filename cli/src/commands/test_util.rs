use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use bookworm_common::config::{Config, Toolchain};

#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber recording everything logged on this thread.
pub fn captured<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result: T = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, output)
}

/// Quiet enough to hide progress bars, loud enough to keep "Nothing to do".
pub fn config(toolchain: Toolchain, dry_run: bool, parallel: bool) -> Config {
    Config {
        toolchain,
        dry_run,
        parallel,
        quiet: 1,
    }
}

/// A stand-in for `convert` that copies its last-but-one operand onto the last.
#[cfg(unix)]
pub fn fake_convert(dir: &Path) -> String {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-convert.sh");
    fs::write(
        &script,
        "#!/bin/sh\nfor last; do :; done\neval src=\\${$(($# - 1))}\ncp \"$src\" \"$last\"\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script.to_string_lossy().into_owned()
}

pub fn pages(dir: &Path, count: usize) {
    for i in 0..count {
        fs::write(dir.join(format!("p{i:02}.tiff")), format!("page {i}")).unwrap();
    }
}
