//! End-to-end runs of the check pipeline against stand-in tools.
//!
//! Every external program is a small shell script that records its
//! arguments, so the tests see the exact order of calls and the working
//! directory each one ran in.
#![cfg(unix)]

use indoc::formatdoc;
use pretty_assertions::assert_eq;
use pvscheck::config::{Config, ToolPaths};
use pvscheck::errors::PvsError;
use pvscheck::pipeline::{AnalysisPipeline, CheckOptions, Stage};
use pvscheck::process::ProcessRunner;
use pvscheck::project::{Project, ProjectKind};
use pvscheck::workspace::WorkspaceLayout;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TASKS: &str = "Help: The documentation for all analyzer warnings is available here\n\
main.cpp\t10\terr\tV501 identical sub-expressions\n\
main.cpp\t20\twarn\tV547 expression is always true\n\
main.cpp\t1\tnote\tV1042 copyleft license\n";

struct Fixture {
    _temp: TempDir,
    project: Project,
    layout: WorkspaceLayout,
    calls: PathBuf,
    tools: ToolPaths,
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// A CMake project plus recording stand-ins for every tool.
/// `failing` names the tool that exits with status 1.
fn fixture(failing: Option<&str>) -> Fixture {
    let temp = TempDir::new().unwrap();
    let project_dir = temp.path().join("src").join("app");
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("CMakeLists.txt"), "project(app)\n").unwrap();

    let bin = temp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let calls = temp.path().join("calls.log");

    let record = format!("echo \"$(basename \"$0\")|$(pwd)|$*\" >> '{}'\n", calls.display());
    let script = |name: &str, rest: &str| {
        let path = bin.join(name);
        let fail = if failing == Some(name) {
            "echo boom\nexit 1\n"
        } else {
            ""
        };
        write_script(&path, &format!("{}{}{}", record, fail, rest));
        path.display().to_string()
    };

    let converter_body = formatdoc! {r#"
            out=""
            while [ $# -gt 0 ]; do
                if [ "$1" = "-o" ]; then out="$2"; shift; fi
                shift
            done
            printf '{}' > "$out"
        "#,
        TASKS.replace('\t', "\\t").replace('\n', "\\n")
    };

    let tools = ToolPaths {
        cmake: script("cmake", "echo '[ 50%] Configuring'\n"),
        make: script("make", ""),
        qmake: script("qmake", ""),
        analyzer: script("pvs-studio-analyzer", "echo 'Analyzing main.cpp'\n"),
        converter: script("plog-converter", &converter_body),
        cli: script("pvs-studio", ""),
    };

    Fixture {
        project: Project::new(project_dir, ProjectKind::CMake),
        layout: WorkspaceLayout::new(temp.path().join("tmp")),
        calls,
        tools,
        _temp: temp,
    }
}

fn pipeline(fx: &Fixture, options: CheckOptions) -> AnalysisPipeline<Vec<u8>> {
    let config = Config {
        tools: fx.tools.clone(),
        ..Config::default()
    };
    AnalysisPipeline::with_runner(
        fx.project.clone(),
        fx.layout.derive(&fx.project),
        config,
        options,
        ProcessRunner::new(Vec::new()),
    )
    .unwrap()
    .with_user_config_dir(None)
}

/// One recorded tool call
struct Call {
    tool: String,
    cwd: PathBuf,
    args: String,
}

fn recorded_calls(fx: &Fixture) -> Vec<Call> {
    fs::read_to_string(&fx.calls)
        .unwrap_or_default()
        .lines()
        .map(|line| {
            let mut fields = line.splitn(3, '|');
            Call {
                tool: fields.next().unwrap().to_string(),
                cwd: PathBuf::from(fields.next().unwrap()),
                args: fields.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}

#[test]
fn test_full_run_produces_filtered_report() {
    let fx = fixture(None);
    let workspace = fx.layout.derive(&fx.project);

    let report = pipeline(&fx, CheckOptions::default()).run().unwrap();

    assert_eq!(report.errors, 1);
    assert_eq!(report.warnings, 1);
    assert_eq!(report.notes, 0);
    assert_eq!(report.output_file, fx.project.root().join("PVS.tasks"));
    assert_eq!(
        fs::read_to_string(&report.output_file).unwrap(),
        "main.cpp\t10\terr\tV501 identical sub-expressions\n\
         main.cpp\t20\twarn\tV547 expression is always true\n"
    );

    let calls = recorded_calls(&fx);
    let tools: Vec<&str> = calls.iter().map(|c| c.tool.as_str()).collect();
    assert_eq!(
        tools,
        vec![
            "cmake",
            "make",
            "pvs-studio-analyzer",
            "plog-converter",
            "pvs-studio-analyzer",
        ]
    );

    let build_dir = fs::canonicalize(&workspace.build_dir).unwrap();
    for call in &calls {
        assert_eq!(fs::canonicalize(&call.cwd).unwrap(), build_dir, "{}", call.tool);
    }

    assert!(calls[0].args.starts_with("-DCMAKE_EXPORT_COMPILE_COMMANDS=On -B"));
    assert!(calls[1].args.ends_with("-j 4"));
    assert!(calls[2].args.starts_with("analyze -j 4 --cfg "));
    assert!(calls[2].args.contains(" -R "));
    assert!(!calls[2].args.contains("--incremental"));
    assert!(calls[3].args.starts_with("-a 64:1,2;GA:1,2;OP:1,2 -s "));
    assert!(calls[4].args.starts_with("filter-suppressed "));
}

#[test]
fn test_quiet_run_shows_progress_only() {
    let fx = fixture(None);
    let mut pipeline = pipeline(&fx, CheckOptions::default());

    pipeline.step().unwrap();
    assert_eq!(pipeline.step().unwrap(), Stage::Configured);

    let output = String::from_utf8(pipeline.runner().get_ref().clone()).unwrap();
    assert_eq!(output, "Cmake   50%\r");
}

#[test]
fn test_failure_stops_the_run() {
    let fx = fixture(Some("make"));
    let mut pipeline = pipeline(&fx, CheckOptions::default());

    let mut error = None;
    while pipeline.stage() != Stage::Done {
        if let Err(e) = pipeline.step() {
            error = Some(e);
            break;
        }
    }

    assert_eq!(pipeline.stage(), Stage::Configured);
    match error {
        Some(PvsError::ProcessFailed { program, .. }) => assert_eq!(program, fx.tools.make),
        other => panic!("unexpected result: {:?}", other),
    }

    let calls = recorded_calls(&fx);
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.tool != "pvs-studio-analyzer"));

    // The captured output is replayed after the progress line
    let output = String::from_utf8(pipeline.runner().get_ref().clone()).unwrap();
    assert!(output.ends_with("boom\n"), "{:?}", output);
    assert!(!fx.project.root().join("PVS.tasks").exists());
}

#[test]
fn test_second_run_is_incremental() {
    let fx = fixture(None);
    let clean = CheckOptions {
        clean: true,
        verbose: false,
    };

    pipeline(&fx, CheckOptions::default()).run().unwrap();
    pipeline(&fx, CheckOptions::default()).run().unwrap();
    pipeline(&fx, clean).run().unwrap();

    let incremental: Vec<bool> = recorded_calls(&fx)
        .iter()
        .filter(|c| c.args.starts_with("analyze "))
        .map(|c| c.args.contains("--incremental"))
        .collect();
    assert_eq!(incremental, vec![false, true, false]);
}
