use std::fs;
use std::path::Path;
use std::process::Command;

/// Creates empty files called `names` inside `dir`.
pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"").unwrap();
    }
}

/// Whether `program` can be spawned at all.
pub fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}
