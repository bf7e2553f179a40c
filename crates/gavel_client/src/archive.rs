//! Builds the base64-encoded zip archive for multi-file submissions.
//!
//! The sandbox expects an archive with a `run` entry (execution script),
//! an optional `compile` entry, and the source files under their relative
//! paths. The result goes into [`Submission::additional_files`].
//!
//! [`Submission::additional_files`]: gavel_core::prelude::Submission

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use gavel_core::prelude::{Error, Result};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builds an archive from in-memory file contents, keyed by relative
/// archive path (subdirectories allowed, preserved verbatim).
///
/// # Errors
///
/// [`Error::InvalidArgument`] for an empty file set or a blank run
/// script, before any I/O; [`Error::Archive`] when staging or writing
/// the zip fails.
pub fn from_contents(
    files: &HashMap<String, String>,
    run_script: &str,
    compile_script: Option<&str>,
) -> Result<String> {
    validate(files.len(), run_script)?;

    let contents: Vec<(&str, Vec<u8>)> = files
        .iter()
        .map(|(path, content)| (path.as_str(), content.clone().into_bytes()))
        .collect();

    build(&contents, run_script, compile_script)
}

/// Builds an archive from files on disk, keyed by relative archive path.
///
/// Each referenced path is checked individually before anything is
/// written; the first missing or unreadable path aborts with an
/// [`Error::InvalidArgument`] naming it.
pub fn from_paths(
    files: &HashMap<String, PathBuf>,
    run_script: &str,
    compile_script: Option<&str>,
) -> Result<String> {
    validate(files.len(), run_script)?;

    let mut contents = Vec::with_capacity(files.len());
    for (archive_path, disk_path) in files {
        let metadata = std::fs::metadata(disk_path).map_err(|_| {
            Error::InvalidArgument(format!("file not found: {}", disk_path.display()))
        })?;
        if !metadata.is_file() {
            return Err(Error::InvalidArgument(format!(
                "not a regular file: {}",
                disk_path.display()
            )));
        }

        let mut file = File::open(disk_path).map_err(|_| {
            Error::InvalidArgument(format!("file not readable: {}", disk_path.display()))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            Error::Archive(format!("failed to read {}: {e}", disk_path.display()))
        })?;

        contents.push((archive_path.as_str(), bytes));
    }

    build(&contents, run_script, compile_script)
}

fn validate(file_count: usize, run_script: &str) -> Result<()> {
    if file_count == 0 {
        return Err(Error::InvalidArgument("file set cannot be empty".into()));
    }
    if run_script.trim().is_empty() {
        return Err(Error::InvalidArgument("run script cannot be empty".into()));
    }
    Ok(())
}

/// Stages the zip in an anonymous temporary file (unique per call, the
/// OS reclaims it on drop whatever the exit path) and returns its bytes
/// base64-encoded.
fn build(
    files: &[(&str, Vec<u8>)],
    run_script: &str,
    compile_script: Option<&str>,
) -> Result<String> {
    let staging = tempfile::tempfile()
        .map_err(|e| Error::Archive(format!("failed to create staging file: {e}")))?;

    let mut zip = ZipWriter::new(staging);
    let options = SimpleFileOptions::default();

    add_entry(&mut zip, "run", run_script.as_bytes(), options)?;
    if let Some(script) = compile_script {
        add_entry(&mut zip, "compile", script.as_bytes(), options)?;
    }
    for (path, content) in files {
        add_entry(&mut zip, path, content, options)?;
    }

    let mut file = zip
        .finish()
        .map_err(|e| Error::Archive(format!("failed to finalize archive: {e}")))?;

    file.seek(SeekFrom::Start(0))
        .map_err(|e| Error::Archive(format!("failed to rewind archive: {e}")))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::Archive(format!("failed to read archive back: {e}")))?;

    Ok(BASE64.encode(bytes))
}

fn add_entry(
    zip: &mut ZipWriter<File>,
    path: &str,
    content: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(path, options)
        .map_err(|e| Error::Archive(format!("failed to add entry {path}: {e}")))?;
    zip.write_all(content)
        .map_err(|e| Error::Archive(format!("failed to write entry {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::ZipArchive;

    fn unpack(encoded: &str) -> ZipArchive<Cursor<Vec<u8>>> {
        let bytes = BASE64.decode(encoded).expect("archive is valid base64");
        ZipArchive::new(Cursor::new(bytes)).expect("archive is a valid zip")
    }

    fn entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut file = archive.by_name(name).expect("entry exists");
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn archive_contains_run_and_files() {
        let files = HashMap::from([("main.py".to_string(), "print(1)".to_string())]);
        let encoded = from_contents(&files, "run.sh", None).unwrap();

        let mut archive = unpack(&encoded);
        assert_eq!(archive.len(), 2);
        assert_eq!(entry(&mut archive, "run"), "run.sh");
        assert_eq!(entry(&mut archive, "main.py"), "print(1)");
        assert!(archive.by_name("compile").is_err());
    }

    #[test]
    fn compile_script_adds_exactly_one_entry() {
        let files = HashMap::from([("main.c".to_string(), "int main() {}".to_string())]);
        let encoded = from_contents(&files, "./a.out", Some("gcc main.c")).unwrap();

        let mut archive = unpack(&encoded);
        assert_eq!(archive.len(), 3);
        assert_eq!(entry(&mut archive, "compile"), "gcc main.c");
    }

    #[test]
    fn subdirectory_paths_are_preserved_verbatim() {
        let files = HashMap::from([
            ("src/app.py".to_string(), "import lib.util".to_string()),
            ("lib/util.py".to_string(), "X = 1".to_string()),
        ]);
        let encoded = from_contents(&files, "python3 src/app.py", None).unwrap();

        let mut archive = unpack(&encoded);
        assert_eq!(entry(&mut archive, "src/app.py"), "import lib.util");
        assert_eq!(entry(&mut archive, "lib/util.py"), "X = 1");
    }

    #[test]
    fn empty_file_set_is_rejected() {
        let empty = HashMap::new();
        match from_contents(&empty, "run.sh", None) {
            Err(Error::InvalidArgument(message)) => assert!(message.contains("empty")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }

        let no_paths: HashMap<String, PathBuf> = HashMap::new();
        assert!(matches!(
            from_paths(&no_paths, "run.sh", None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn blank_run_script_is_rejected() {
        let files = HashMap::from([("main.py".to_string(), "print(1)".to_string())]);
        for script in ["", "   ", "\n\t"] {
            assert!(matches!(
                from_contents(&files, script, None),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn missing_disk_path_aborts_with_its_name() {
        let files = HashMap::from([(
            "main.py".to_string(),
            PathBuf::from("/nonexistent/definitely/missing.py"),
        )]);

        match from_paths(&files, "run.sh", None) {
            Err(Error::InvalidArgument(message)) => assert!(message.contains("missing.py")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn disk_paths_are_read_and_archived() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.py");
        std::fs::write(&path, "print(2)").unwrap();

        let files = HashMap::from([("solution.py".to_string(), path)]);
        let encoded = from_paths(&files, "python3 solution.py", None).unwrap();

        let mut archive = unpack(&encoded);
        assert_eq!(entry(&mut archive, "solution.py"), "print(2)");
    }
}
