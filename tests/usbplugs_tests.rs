// tests/usbplugs_tests.rs

//! Tests of _usbplugslib_ through the public API, and of the program
//! _usbplugs_.

#![allow(non_snake_case)]

use std::path::PathBuf;
use std::process::{
    Command,
    Output,
};

use ::tempfile::TempDir;
use ::test_case::test_case;

use ::usbplugslib::common::{
    FPath,
    ResultS3,
};
use ::usbplugslib::data::association::SourceSets;
use ::usbplugslib::printer::graph::GraphDescription;
use ::usbplugslib::readers::helpers::{
    fpath_to_filetype,
    path_to_fpath,
};
use ::usbplugslib::readers::plugprocessor::PlugProcessor;
use ::usbplugslib::readers::recordsplitter::RECORD_SZ_MAX_DEFAULT;

const USBPLUGS: &str = env!("CARGO_BIN_EXE_usbplugs");

fn event(
    event_id: u16,
    computer: &str,
    device_id: &str,
) -> String {
    format!(
        r#"<Event xmlns="http://schemas.microsoft.com/win/2004/08/events/event"><System><Provider Name="Microsoft-Windows-Security-Auditing"/><EventID>{}</EventID><Computer>{}</Computer></System><EventData><Data Name="DeviceId">{}</Data></EventData></Event>"#,
        event_id,
        computer,
        device_id.replace('&', "&amp;"),
    )
}

/// Write `data` to file `name` in `tempdir`.
fn write_file(
    tempdir: &TempDir,
    name: &str,
    data: &str,
) -> FPath {
    let path: PathBuf = tempdir.path().join(name);
    if let Err(err) = std::fs::write(&path, data) {
        panic!("write({:?}) failed {}", path, err);
    }

    path_to_fpath(&path)
}

fn new_tempdir() -> TempDir {
    match tempfile::tempdir() {
        Ok(val) => val,
        Err(err) => panic!("tempdir() failed {}", err),
    }
}

/// Two XML exports; `{(H1,S1),(H2,S1)}` and `{(H3,S2)}`.
fn write_exports(tempdir: &TempDir) -> (FPath, FPath) {
    let export1 = format!(
        "{}\n{}\0\0\n{}\n{}\0\0\0\0",
        event(6416, "H1", r"USB\VID_1234&PID_5678\S1"),
        event(4624, "H1", ""),
        event(6416, "H2", r"USB\VID_1234&PID_5678\S1"),
        event(6416, "H2", r"PCI\VEN_1234"),
    );
    let export2 = format!(
        "{}\r\n{}\r\n",
        event(6416, "H3", r"USB\VID_ABCD&PID_0001\S2"),
        "<Event><System></Event>",
    );

    (
        write_file(tempdir, "Security1.xml", &export1),
        write_file(tempdir, "Security2.xml", &export2),
    )
}

const GRAPH_2: &str = "digraph USBPlugs{
\t\"S1\" [color=Red, fontcolor=Red, shape=box]
\t\"S2\" [color=Red, fontcolor=Red, shape=box]

\t\"S1\" -> \"H1\";
\t\"S1\" -> \"H2\";
\t\"S2\" -> \"H3\";
}";

fn read_file(path: &FPath) -> String {
    match std::fs::read_to_string(path) {
        Ok(val) => val,
        Err(err) => panic!("read_to_string({:?}) failed {}", path, err),
    }
}

fn usbplugs(args: &[&str]) -> Output {
    match Command::new(USBPLUGS).args(args).output() {
        Ok(val) => val,
        Err(err) => panic!("Command::new({:?}) failed {}", USBPLUGS, err),
    }
}

#[test]
fn test_library_two_sources() {
    let tempdir = new_tempdir();
    let (path1, path2) = write_exports(&tempdir);
    let mut sourcesets = SourceSets::new();
    for path in [&path1, &path2] {
        let mut plugprocessor = PlugProcessor::new(path.clone(), fpath_to_filetype(path), RECORD_SZ_MAX_DEFAULT);
        match plugprocessor.process() {
            ResultS3::Found(sourceset) => sourcesets.push(sourceset),
            result => panic!("expected Found for {:?}, got {}", path, result),
        }
    }
    let graph = GraphDescription::from_sets(&sourcesets);
    let dotfile = path_to_fpath(&tempdir.path().join("out.dot"));
    if let Err(err) = graph.write_path(&dotfile) {
        panic!("write_path failed {}", err);
    }
    assert_eq!(read_file(&dotfile), GRAPH_2);
}

#[test_case(&["--summary"]; "summary")]
#[test_case(&["--color", "never"]; "color never")]
#[test_case(&["-m", "0x10000"]; "record size max hex")]
#[test_case(&[]; "no options")]
fn test_usbplugs_two_sources(options: &[&str]) {
    let tempdir = new_tempdir();
    let (path1, path2) = write_exports(&tempdir);
    let dotfile = path_to_fpath(&tempdir.path().join("out.dot"));
    let mut args: Vec<&str> = vec!["--dotfile", dotfile.as_str()];
    args.extend_from_slice(options);
    args.push(path1.as_str());
    args.push(path2.as_str());
    let output = usbplugs(&args);
    assert!(output.status.success(), "stderr {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    assert_eq!(read_file(&dotfile), GRAPH_2);
    // one malformed record in the second export
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: "), "stderr {}", stderr);
}

#[test]
fn test_usbplugs_no_events_not_fatal() {
    let tempdir = new_tempdir();
    let (path1, _) = write_exports(&tempdir);
    let path_none = write_file(&tempdir, "none.xml", &event(4624, "H9", ""));
    let dotfile = path_to_fpath(&tempdir.path().join("out.dot"));
    let output = usbplugs(&["-d", dotfile.as_str(), path_none.as_str(), path1.as_str()]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no USB plug events found"), "stderr {}", stderr);
    assert!(!stderr.contains("failed"), "stderr {}", stderr);
    assert!(read_file(&dotfile).contains("\t\"S1\" -> \"H2\";\n"));
}

#[test]
fn test_usbplugs_missing_input_fatal() {
    let tempdir = new_tempdir();
    let (path1, _) = write_exports(&tempdir);
    let missing = path_to_fpath(&tempdir.path().join("missing.xml"));
    let dotfile = path_to_fpath(&tempdir.path().join("out.dot"));
    let output = usbplugs(&["-d", dotfile.as_str(), path1.as_str(), missing.as_str()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: "), "stderr {}", stderr);
    assert!(!std::path::Path::new(&dotfile).exists());
}

#[test]
fn test_usbplugs_bad_dotfile_fatal() {
    let tempdir = new_tempdir();
    let (path1, _) = write_exports(&tempdir);
    let dotfile = path_to_fpath(&tempdir.path().join("no").join("such").join("out.dot"));
    let output = usbplugs(&["-d", dotfile.as_str(), path1.as_str()]);
    assert!(!output.status.success());
}

#[test]
fn test_usbplugs_record_size_max_exceeded_fatal() {
    let tempdir = new_tempdir();
    let (path1, _) = write_exports(&tempdir);
    let dotfile = path_to_fpath(&tempdir.path().join("out.dot"));
    let output = usbplugs(&["-d", dotfile.as_str(), "--record-size-max", "64", path1.as_str()]);
    assert!(!output.status.success());
}

#[test_case(&["in.xml"]; "no dotfile")]
#[test_case(&["-d", "out.dot"]; "no paths")]
#[test_case(&["-d", "out.dot", "-m", "7", "in.xml"]; "record size max too small")]
#[test_case(&["-d", "out.dot", "-m", "0xZZ", "in.xml"]; "record size max bad hex")]
fn test_usbplugs_bad_arguments(args: &[&str]) {
    let output = usbplugs(args);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2), "clap usage error");
}
