// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Generated bindings driven through the real compiler and interpreter.
//!
//! Each test builds a fixture with the configured C++ compiler (`FERRY_CXX`
//! or `g++`), imports the generated module with `python3` and checks the
//! values that come back. Tests return early when either tool is missing.

use std::fs;
use std::path::Path;
use std::process::Command;

use ferryc::{HandleRecord, Session, SessionConfig, ToolchainConfig};
use pretty_assertions::assert_eq;

const MODEL: &str = "\
#include <vector>

//ferry::export
int add(int a, int b)
{
    return a + b;
}

//ferry::export
std::vector<long long> hq(int n)
{
    std::vector<long long> q;
    for (int i = 0; i < n; ++i) {
        if (i < 2) {
            q.push_back(1);
        } else {
            q.push_back(q[i - q[i - 1]] + q[i - q[i - 2]]);
        }
    }
    return q;
}

//ferry::export
double total(const std::vector<double>& xs)
{
    double s = 0.0;
    for (double x : xs) {
        s += x;
    }
    return s;
}

//ferry::export
double norm1(std::vector<double>& xs)
{
    double s = 0.0;
    for (double& x : xs) {
        if (x < 0) {
            x = -x;
        }
        s += x;
    }
    return s;
}
";

const SEQ: &str = "\
#include <vector>

//ferry::export
int seq(int n)
{
    return 3 * n;
}

//ferry::export
std::vector<int> ramp(int n)
{
    std::vector<int> out;
    for (int i = 0; i < n; ++i) {
        out.push_back(i);
    }
    return out;
}
";

/// Check if a tool is available on the system.
fn tool_available(name: &Path) -> bool {
    Command::new(name)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Toolchain config for the host, or `None` when the tools are missing.
fn host_toolchain() -> Option<ToolchainConfig> {
    let toolchain = ToolchainConfig::from_env();
    if !tool_available(&toolchain.compiler) || !tool_available(Path::new("python3")) {
        eprintln!(
            "skipping: {} or python3 not available",
            toolchain.compiler.display()
        );
        return None;
    }
    Some(toolchain)
}

/// Build `source` into `dir` and return the binding module name.
fn build(dir: &Path, file: &str, source: &str, toolchain: ToolchainConfig) -> String {
    let path = dir.join(file);
    fs::write(&path, source).unwrap();
    let report = Session::new(SessionConfig {
        toolchain,
        ..SessionConfig::default()
    })
    .run(&path)
    .unwrap_or_else(|e| panic!("build of {file} failed: {e}"));
    assert!(report.artifact.is_some());
    report.bindings.module_name().to_string()
}

/// Run `script` with `python3` in `dir` and return its stdout lines.
fn python(dir: &Path, script: &str) -> Vec<String> {
    let output = Command::new("python3")
        .arg("-c")
        .arg(script)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "python3 failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn scalar_proxy_matches_native_arithmetic() {
    let Some(toolchain) = host_toolchain() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let module = build(dir.path(), "model.cpp", MODEL, toolchain);

    let lines = python(
        dir.path(),
        &format!(
            "import sys\nsys.path.insert(0, '.')\nimport {module} as m\n\
             print(m.add(2, 3))\nprint(m.add(-7, 4))\nprint(m.add(2147483647, 0))\n"
        ),
    );
    assert_eq!(lines, vec!["5", "-3", "2147483647"]);
}

#[test]
fn returned_arrays_keep_every_element() {
    let Some(toolchain) = host_toolchain() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let module = build(dir.path(), "model.cpp", MODEL, toolchain);

    let lines = python(
        dir.path(),
        &format!(
            "import sys\nsys.path.insert(0, '.')\nimport {module} as m\n\
             def expected(n):\n\
             \x20   q = []\n\
             \x20   for i in range(n):\n\
             \x20       q.append(1 if i < 2 else q[i - q[i - 1]] + q[i - q[i - 2]])\n\
             \x20   return q\n\
             print([int(v) for v in m.hq(0)])\n\
             print([int(v) for v in m.hq(10)])\n\
             big = [int(v) for v in m.hq(200000)]\n\
             print(len(big))\n\
             print(big == expected(200000))\n"
        ),
    );
    assert_eq!(
        lines,
        vec!["[]", "[1, 1, 2, 3, 3, 4, 5, 5, 6, 6]", "200000", "True"]
    );

    let record = HandleRecord::read(&HandleRecord::path_for(dir.path(), "model")).unwrap();
    assert!(record.is_some());
}

#[test]
fn array_parameters_aggregate_and_accept_empty_input() {
    let Some(toolchain) = host_toolchain() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let module = build(dir.path(), "model.cpp", MODEL, toolchain);

    let lines = python(
        dir.path(),
        &format!(
            "import sys\nsys.path.insert(0, '.')\nimport {module} as m\n\
             print(m.total([1.5, 2.5, 4.0]))\nprint(m.total([]))\n\
             print(m.norm1([-1.0, 2.0, -3.5]))\nprint(m.norm1([]))\n"
        ),
    );
    assert_eq!(lines, vec!["8.0", "0.0", "6.5", "0.0"]);
}

#[test]
fn function_named_after_file_stays_callable() {
    let Some(toolchain) = host_toolchain() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let module = build(dir.path(), "seq.cpp", SEQ, toolchain);
    assert_eq!(module, "seq_lib");

    let lines = python(
        dir.path(),
        "import sys\nsys.path.insert(0, '.')\nimport seq_lib\n\
         print(seq_lib.seq(4))\nprint([int(v) for v in seq_lib.ramp(3)])\n",
    );
    assert_eq!(lines, vec!["12", "[0, 1, 2]"]);
}
