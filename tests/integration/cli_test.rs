use std::process::Command;
use tempfile::TempDir;

fn aka() -> Command {
    Command::new(env!("CARGO_BIN_EXE_aka"))
}

#[test]
fn gen_writes_launchers_into_the_given_directory() {
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("bin");

    let output = aka()
        .args(["gen", "--out", out_dir.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let ext = if cfg!(windows) { "cmd" } else { "sh" };
    assert!(out_dir.join("git").join(format!("gs.{ext}")).exists());
    assert!(out_dir.join("node").join(format!("nt.{ext}")).exists());
    assert!(out_dir.join("misc").join(format!("ll.{ext}")).exists());
}

#[test]
fn exec_dryrun_prints_each_resolved_command_once() {
    let output = aka()
        .args(["exec", "echo $1", "--", "--al-dryrun", "hello"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "echo hello\n");
}

#[test]
fn exec_dryrun_prints_every_command_of_a_sequence() {
    let output = aka()
        .args([
            "exec",
            "git fetch origin && git rebase origin/${1:master}",
            "--",
            "--al-dryrun",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "git fetch origin\ngit rebase origin/master\n"
    );
}

#[test]
fn exec_forwards_the_child_exit_code() {
    let output = aka().args(["exec", "exit 7"]).output().unwrap();

    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn exec_prints_captured_output() {
    let output = aka()
        .args(["exec", "echo captured", "--", "--al-returnOutput"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "captured\n");
}

#[test]
fn exec_rejects_unknown_control_flags() {
    let output = aka()
        .args(["exec", "echo $1", "--", "--al-nope", "hello"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let printed = String::from_utf8_lossy(&output.stdout);
    assert!(printed.contains("unknown control argument"));
    assert!(printed.contains("--al-nope"));
}

#[test]
fn exec_reports_missing_arguments_without_spawning() {
    let output = aka()
        .args(["exec", "git commit -m $1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("missing required argument $1"));
}

#[test]
fn pick_branch_dryrun_skips_the_prompt() {
    let output = aka()
        .args(["pick-branch", "--al-dryrun"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Pick one from a list of branches.\n"
    );
}

#[test]
fn list_shows_category_aliases() {
    let output = aka().args(["list", "git"]).output().unwrap();

    assert!(output.status.success());
    let printed = String::from_utf8_lossy(&output.stdout);
    assert!(printed.contains("git aliases:"));
    assert!(printed.contains("gs"));
    assert!(printed.contains("gpb"));
    assert!(!printed.contains("node aliases:"));
}

#[test]
fn list_rejects_unknown_categories() {
    let output = aka().args(["list", "rust"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
}
