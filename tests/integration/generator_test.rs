use aka::core::{generator, registry};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LAUNCHER_EXT: &str = if cfg!(windows) { "cmd" } else { "sh" };

fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut tree = BTreeMap::new();
    for category in fs::read_dir(root).unwrap() {
        let category = category.unwrap();
        assert!(category.file_type().unwrap().is_dir());
        for file in fs::read_dir(category.path()).unwrap() {
            let file = file.unwrap();
            let relative = format!(
                "{}/{}",
                category.file_name().to_string_lossy(),
                file.file_name().to_string_lossy()
            );
            tree.insert(relative, fs::read(file.path()).unwrap());
        }
    }
    tree
}

#[test]
fn regenerate_writes_one_launcher_per_alias() {
    let out = TempDir::new().unwrap();
    generator::regenerate(out.path()).unwrap();

    let tree = read_tree(out.path());
    let expected: usize = registry::categories()
        .values()
        .map(|aliases| aliases.len())
        .sum();
    assert_eq!(tree.len(), expected);

    for (category, aliases) in registry::categories() {
        for name in aliases.keys() {
            let relative = format!("{category}/{name}.{LAUNCHER_EXT}");
            assert!(tree.contains_key(&relative), "missing {relative}");
        }
    }
}

#[test]
fn regenerate_is_idempotent() {
    let out = TempDir::new().unwrap();

    generator::regenerate(out.path()).unwrap();
    let first = read_tree(out.path());

    generator::regenerate(out.path()).unwrap();
    let second = read_tree(out.path());

    assert_eq!(first, second);
}

#[test]
fn regenerate_clears_stale_output() {
    let out = TempDir::new().unwrap();
    let stale_dir = out.path().join("git");
    let stale_launcher = stale_dir.join(format!("stale.{LAUNCHER_EXT}"));
    let stray_file = out.path().join("notes.txt");

    fs::create_dir_all(&stale_dir).unwrap();
    fs::write(&stale_launcher, "outdated").unwrap();
    fs::write(&stray_file, "scratch").unwrap();

    generator::regenerate(out.path()).unwrap();

    assert!(!stale_launcher.exists());
    assert!(!stray_file.exists());
}

#[test]
fn launchers_carry_the_current_version_stamp() {
    let out = TempDir::new().unwrap();
    generator::regenerate(out.path()).unwrap();

    assert!(registry::VERSION_STAMP.ends_with(env!("CARGO_PKG_VERSION")));

    for (relative, contents) in read_tree(out.path()) {
        let text = String::from_utf8(contents).unwrap();
        let stamp_line = text.lines().nth(1).unwrap_or_default();
        assert!(
            stamp_line.contains(registry::VERSION_STAMP),
            "stale or missing stamp in {relative}: {stamp_line}"
        );
        assert!(text.ends_with('\n'));
        assert!(!text.contains('\r'));
    }
}

#[cfg(unix)]
#[test]
fn launchers_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let out = TempDir::new().unwrap();
    generator::regenerate(out.path()).unwrap();

    for category in fs::read_dir(out.path()).unwrap() {
        for file in fs::read_dir(category.unwrap().path()).unwrap() {
            let path = file.unwrap().path();
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_ne!(mode & 0o111, 0, "{} is not executable", path.display());
        }
    }
}

#[test]
fn raw_launcher_forwards_to_the_selector() {
    let out = TempDir::new().unwrap();
    generator::regenerate(out.path()).unwrap();

    let launcher = out.path().join("git").join(format!("gpb.{LAUNCHER_EXT}"));
    let contents = fs::read_to_string(launcher).unwrap();
    assert!(contents.contains("pick-branch"));
    // The escape hatch bypasses the runtime entry wrapper entirely.
    assert!(!contents.contains("aka exec"));
}

#[cfg(unix)]
#[test]
fn template_launchers_wrap_the_runtime_entry() {
    let out = TempDir::new().unwrap();
    generator::regenerate(out.path()).unwrap();

    let launcher = out.path().join("git").join(format!("gcm.{LAUNCHER_EXT}"));
    let contents = fs::read_to_string(launcher).unwrap();
    assert!(contents.contains("exec aka exec 'git commit -m $1' -- \"$@\""));
}
