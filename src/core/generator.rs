use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::{registry, template};
use crate::error::{AkaError, Result};

const LAUNCHER_EXT: &str = if cfg!(windows) { "cmd" } else { "sh" };

/// Default launcher tree, next to the rest of the user's configuration.
pub fn default_output_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AkaError::Io(io::Error::other("could not determine config directory")))?;
    Ok(config_dir.join("aka").join("bin"))
}

/// Regenerate the launcher tree from the registry.
///
/// The output directory is cleared and rebuilt from scratch: one subdirectory
/// per category, one stamped launcher per alias. Any filesystem failure aborts
/// the whole pass; once the clear has run there is no partial output worth
/// keeping. Must not run concurrently with another pass (single writer).
pub fn regenerate(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).map_err(|source| AkaError::generation(out_dir, source))?;
    }
    fs::create_dir_all(out_dir).map_err(|source| AkaError::generation(out_dir, source))?;

    for category in registry::category_names() {
        let category_dir = out_dir.join(category);
        fs::create_dir(&category_dir)
            .map_err(|source| AkaError::generation(&category_dir, source))?;

        let aliases = &registry::categories()[category];
        for name in registry::alias_names(aliases) {
            let file = category_dir.join(format!("{name}.{LAUNCHER_EXT}"));
            let contents = launcher_contents(&template::resolve(&aliases[name]));
            fs::write(&file, contents).map_err(|source| AkaError::generation(&file, source))?;
            make_executable(&file)?;
            log::debug!("wrote {}", file.display());
        }
    }

    Ok(())
}

/// Full launcher file: interpreter line, version stamp, body. Newlines are
/// normalized to `\n` with exactly one trailing newline.
fn launcher_contents(body: &str) -> String {
    let body = body.replace("\r\n", "\n");
    let body = body.trim_end_matches('\n');
    if cfg!(windows) {
        format!("@echo off\nREM {}\n{body}\n", registry::VERSION_STAMP)
    } else {
        format!("#!/usr/bin/env sh\n# {}\n{body}\n", registry::VERSION_STAMP)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)
        .map_err(|source| AkaError::generation(path, source))?
        .permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).map_err(|source| AkaError::generation(path, source))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
