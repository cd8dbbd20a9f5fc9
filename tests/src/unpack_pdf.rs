use std::fs;
use std::path::PathBuf;

use bookworm_common::args::ArgMap;
use bookworm_common::paths::default_subdirectory;
use bookworm_core::unpack_pdf::{self, UnpackPdf};
use bookworm_core::{CommandError, Lifecycle, Phase, Runner, TerminalCommand};

use crate::util::tool_available;

#[test]
fn image_dir_is_derived_from_the_source() {
    let command: UnpackPdf = unpack_pdf::unpack_pdf("./foo/bar/baz/quux.pdf", None);
    let expected: String = format!("./foo/bar/baz/{}", default_subdirectory());

    assert_eq!(command.image_dir().to_string_lossy(), expected);
    // No filesystem access is needed to know the directory.
    assert!(!command.image_dir().exists());
}

#[test]
fn setup_rejects_a_missing_output_parent() {
    let dir = tempfile::tempdir().unwrap();
    let source: PathBuf = dir.path().join("sample.pdf");
    fs::write(&source, b"%PDF-1.4").unwrap();
    let target: PathBuf = dir.path().join("missing").join("__bookworm__/");

    let args = ArgMap::new(&source).with_output(&target);
    let mut command = unpack_pdf::process_args(&args).unwrap();

    let err = Runner::setup(&mut command).unwrap_err();
    assert!(matches!(err, CommandError::NotFound { phase: Phase::Setup, .. }));
    assert!(!target.exists());
    assert_eq!(command.lifecycle(), Lifecycle::Failed);
}

#[test]
fn setup_rejects_a_missing_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let args = ArgMap::new(dir.path().join("doesnotexist.pdf")).with_output(dir.path());
    let mut command = unpack_pdf::process_args(&args).unwrap();

    assert!(Runner::setup(&mut command).unwrap_err().is_not_found());
}

#[test]
fn terminal_command_matches_ghostscript_usage() {
    let args = ArgMap::new("sample/sample.pdf").with_output(format!("sample/{}", default_subdirectory()));
    let command = unpack_pdf::process_args(&args).unwrap();

    assert_eq!(
        command.as_terminal_command(),
        "gs -q -dNOPAUSE -dBATCH -sDEVICE=tiff24nc -sCompression=lzw -r600x600 \
         -sOutputFile=sample/__bookworm__/_Page_%04d.tiff sample/sample.pdf"
    );
}

#[test]
fn failed_rasterizer_leaves_command_uncommitted() {
    let dir = tempfile::tempdir().unwrap();
    let source: PathBuf = dir.path().join("book.pdf");
    fs::write(&source, b"%PDF-1.4").unwrap();

    let mut command = unpack_pdf::unpack_pdf(&source, None).with_program("false");
    let err = Runner::drive(&mut command).unwrap_err();

    assert_eq!(err.phase(), Phase::Run);
    assert_eq!(command.lifecycle(), Lifecycle::Failed);
    // Setup already ran, so the directory exists, but nothing was committed.
    assert!(command.image_dir().is_dir());
}

#[test]
fn runner_unpacks_a_real_pdf() {
    if !tool_available("gs") || !tool_available("convert") {
        eprintln!("Skipping unpack test: Ghostscript or ImageMagick is not installed.");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let source: PathBuf = dir.path().join("book.pdf");
    let made = std::process::Command::new("convert")
        .args(["-size", "50x50", "xc:white", "xc:black"])
        .arg(&source)
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if !made {
        eprintln!("Skipping unpack test: ImageMagick cannot write PDF files here.");
        return;
    }

    let mut command = unpack_pdf::unpack_pdf(&source, None);
    Runner::drive(&mut command).unwrap();

    assert_eq!(command.lifecycle(), Lifecycle::Committed);
    assert!(command.image_dir().join("_Page_0001.tiff").is_file());
    assert!(command.image_dir().join("_Page_0002.tiff").is_file());
}
