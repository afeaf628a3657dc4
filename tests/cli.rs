/*!
 * Integration tests for the codemd binary
 */

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn codemd() -> Command {
    Command::cargo_bin("codemd").unwrap()
}

#[test]
fn writes_default_output_and_prints_summary() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("v5/a.js"), "let a;\n");
    write_file(&temp.path().join("v5/b.txt"), "dropped\n");
    write_file(&temp.path().join("v5/personal_apis.js"), "secret\n");
    write_file(&temp.path().join("v5/libs/c.js"), "lib\n");

    codemd()
        .current_dir(temp.path())
        .args(["v5", "-e", ".js", "-x", "personal_apis.js", "-f", "libs"])
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "created with 1 code files and 2 excluded files.",
        ));

    let markdown = fs::read_to_string(temp.path().join("v5/code_files.md")).unwrap();
    assert!(markdown.starts_with("## v5/a.js\n\n```js\nlet a;\n\n```\n\n## Excluded Files\n\n"));
    assert!(markdown.contains("- **v5/personal_apis.js**: This file is present"));
    assert!(markdown.contains("- **v5/libs/c.js**: This file is present"));
    assert!(!markdown.contains("b.txt"));
}

#[test]
fn explicit_output_and_base_dir() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let output = temp.path().join("snapshot.md");
    write_file(&root.join("style.css"), "p {}");

    codemd()
        .arg(&root)
        .arg("--output")
        .arg(&output)
        .arg("--base-dir")
        .arg(&root)
        .arg("--no-progress")
        .assert()
        .success();

    let markdown = fs::read_to_string(&output).unwrap();
    assert_eq!(markdown, "## style.css\n\n```css\np {}\n```\n\n");
    assert!(!root.join("code_files.md").exists());
}

#[test]
fn missing_root_exits_non_zero() {
    let temp = tempdir().unwrap();

    codemd()
        .current_dir(temp.path())
        .arg("does-not-exist")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("does-not-exist"));

    assert!(!temp.path().join("does-not-exist/code_files.md").exists());
}

#[test]
fn binary_match_reports_encoding_error() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("image.js"), [0xffu8, 0xd8, 0xff, 0xe0]).unwrap();

    codemd()
        .arg(temp.path())
        .arg("--no-progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("image.js"))
        .stderr(predicate::str::contains("UTF-8"));
}

#[test]
fn table_report_lists_metrics() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("index.html"), "<p>hi</p>\n");

    codemd()
        .arg(temp.path())
        .args(["--report", "table", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Included Files"))
        .stdout(predicate::str::contains("Output Size"));
}

#[test]
fn generates_shell_completions() {
    codemd()
        .args(["--generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codemd"));
}

#[test]
fn relative_root_under_separate_base_dir() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("work/proj/a.js"), "let a;\n");
    write_file(&temp.path().join("work/proj/libs/b.js"), "let b;\n");

    codemd()
        .current_dir(temp.path())
        .args(["work/proj", "--base-dir", "work", "-e", ".js", "-f", "work,libs"])
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "created with 1 code files and 1 excluded files.",
        ));

    let markdown = fs::read_to_string(temp.path().join("work/proj/code_files.md")).unwrap();
    assert!(markdown.starts_with("## proj/a.js\n\n```js\nlet a;\n```\n\n"));
    assert!(markdown.contains("- **proj/libs/b.js**: "));
}

#[test]
fn rerun_lists_output_named_in_exclude_files() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "# a\n");

    for _ in 0..2 {
        codemd()
            .current_dir(temp.path())
            .args(["-e", ".md", "-x", "code_files.md", "--no-progress"])
            .assert()
            .success();
    }

    let markdown = fs::read_to_string(temp.path().join("code_files.md")).unwrap();
    assert!(markdown.starts_with("## a.md\n"));
    assert!(markdown.contains("- **code_files.md**: "));
}
