//! Hand a generated artifact to an editor
//!
//! Collaborator boundary: the launcher only receives the final artifact path
//! and the resolved settings. Its boolean outcome feeds user messaging and
//! never the exit code.

use std::env;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Settings;

/// How long a spawned editor is watched for an immediate failure before the
/// launch counts as successful.
const LAUNCH_GRACE: Duration = Duration::from_millis(200);

/// Candidate commands in attempt order: `$EDITOR` first when set, then the
/// configured priority list.
pub fn candidate_editors(config: &Settings) -> Vec<String> {
    let mut candidates = Vec::with_capacity(config.editor_priority.len() + 1);
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            candidates.push(editor);
        }
    }
    candidates.extend(config.editor_priority.iter().cloned());
    candidates
}

/// Open `path` with the first working candidate editor, falling back to the
/// platform's default file-open mechanism. Skipped entirely when
/// `auto_open_editor` is off.
pub fn open_in_editor(path: &Path, config: &Settings) -> bool {
    if !config.auto_open_editor {
        debug!("auto_open_editor disabled, skipping editor launch");
        return false;
    }

    for candidate in candidate_editors(config) {
        if try_launch(&candidate, path) {
            debug!("opened {} with {}", path.display(), candidate);
            return true;
        }
    }

    match open::that(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("platform open failed for {}: {}", path.display(), e);
            false
        }
    }
}

/// Spawn `command <path>` detached, with a short grace period to catch an
/// immediately failing launch.
fn try_launch(command: &str, path: &Path) -> bool {
    let mut child = match Command::new(command).arg(path).spawn() {
        Ok(child) => child,
        Err(e) => {
            debug!("editor {command} not launchable: {e}");
            return false;
        }
    };

    std::thread::sleep(LAUNCH_GRACE);
    match child.try_wait() {
        Ok(Some(status)) if !status.success() => {
            debug!("editor {command} exited immediately: {status}");
            false
        }
        // Still running, or already exited cleanly (GUI editors fork off).
        Ok(_) => true,
        Err(e) => {
            warn!("cannot observe editor {command}: {e}");
            false
        }
    }
}
