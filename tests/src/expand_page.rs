use std::path::{Path, PathBuf};
use std::process::Command;

use bookworm_common::args::ArgMap;
use bookworm_common::error::ValidationError;
use bookworm_core::expand_page::{self, PageAction};
use bookworm_core::{CommandError, CommandKind, Lifecycle, Phase, Runner, TerminalCommand};

use crate::util::{tool_available, touch};

#[test]
fn single_page_defaults_to_temp_target() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["sample.tiff"]);
    let source: PathBuf = dir.path().join("sample.tiff");

    let action = expand_page::process_args(&ArgMap::new(&source).with_dimensions(2160, 3060)).unwrap();

    let PageAction::Single(command) = action else {
        panic!("expected a single page");
    };
    assert_eq!(command.target(), dir.path().join("sample.bookworm.tiff"));
    assert!(command.as_arg_list().contains(&"-extent 2160x3060".to_string()));
    assert_eq!(command.as_arg_list()[4], source.to_string_lossy());
}

#[test]
fn bad_dimensions_are_rejected_for_any_input() {
    for (width, height) in [("0", "3060"), ("2160", "-4"), ("2160", "Potato"), ("1.5", "2")] {
        let args = ArgMap::new("sample/sample_doesnotexist.tiff").with_dimensions(width, height);

        let err = expand_page::process_args(&args).unwrap_err();
        assert!(
            matches!(err, CommandError::Validation(_)),
            "{width}x{height} produced {err:?}"
        );
    }
}

#[test]
fn missing_dimensions_key() {
    let err = expand_page::process_args(&ArgMap::new("sample.tiff")).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Validation(ValidationError::MissingKey { key: "dimensions" })
    ));
}

#[test]
fn missing_input_directory_is_not_found() {
    let args = ArgMap::new("sample/directory/does/not/exist/").with_dimensions(2160, 3060);
    let err = expand_page::process_args(&args).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.phase(), Phase::Arguments);
}

#[test]
fn directory_yields_one_command_per_tiff() {
    let dir = tempfile::tempdir().unwrap();
    touch(
        dir.path(),
        &["p001.tiff", "p002.tiff", "p003.tiff", "p004.tiff", "cover.jpg", "book.pdf", "p005.tif"],
    );
    let output: PathBuf = dir.path().join("expanded");

    let args = ArgMap::new(dir.path()).with_output(&output).with_dimensions(2160, 3060);
    let PageAction::Batch(commands) = expand_page::process_args(&args).unwrap() else {
        panic!("expected a batch");
    };

    assert_eq!(commands.len(), 4);
    for (source, command) in &commands {
        assert_eq!(source.extension().unwrap(), "tiff");
        assert_eq!(command.source(), source.as_path());
        assert_eq!(command.target().parent(), Some(output.as_path()));
        assert_eq!(command.width(), 2160);
        assert_eq!(command.height(), 3060);
    }
}

#[test]
fn batch_setup_creates_the_shared_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["a.tiff", "b.tiff"]);

    let action = expand_page::process_args(&ArgMap::new(dir.path()).with_dimensions(10, 10)).unwrap();
    let mut commands: Vec<CommandKind> = action.into_commands().into_iter().map(CommandKind::from).collect();

    for command in commands.iter_mut() {
        Runner::setup(command).unwrap();
        assert_eq!(command.lifecycle(), Lifecycle::Ready);
    }
    assert!(dir.path().join("__bookworm__").is_dir());
}

/// Drives a real ImageMagick invocation end to end.
#[test]
fn runner_expands_a_real_page() {
    if !tool_available("convert") {
        eprintln!("Skipping runner test: ImageMagick 'convert' is not installed.");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let source: PathBuf = dir.path().join("sample.tiff");
    let status = Command::new("convert")
        .args(["-size", "200x300", "xc:gray"])
        .arg(&source)
        .status()
        .unwrap();
    assert!(status.success(), "could not create the sample page");

    let target: PathBuf = dir.path().join("sample2.tiff");
    let args = ArgMap::new(&source).with_output(&target).with_dimensions(2160, 3060);
    let mut command = expand_page::process_args(&args).unwrap().into_commands().remove(0);

    Runner::drive(&mut command).unwrap();

    assert_eq!(command.lifecycle(), Lifecycle::Committed);
    assert_eq!(command.target(), target.as_path());
    assert!(Path::new(&target).is_file());
}
