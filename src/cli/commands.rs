//! Command dispatch: one generation pass per invocation

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::editor::open_in_editor;
use crate::flow::{prepare_explicit_path, resolve_output_path};
use crate::template::{build_document, write_document};

/// Resolve config, build the document tree, write the artifact, report the
/// path, and optionally hand the file to an editor.
#[instrument(skip(cli))]
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::resolve(cli.config.as_deref());
    debug!("resolved settings: {settings:?}");

    let title = cli.resolved_title();
    let document = build_document(&title, &settings);

    let target = match &cli.output {
        Some(explicit) => {
            if explicit.is_dir() {
                return Err(CliError::InvalidArgs(format!(
                    "output path is a directory: {}",
                    explicit.display()
                )));
            }
            prepare_explicit_path(explicit)?
        }
        None => resolve_output_path(&title, &settings.flow_base_path)?,
    };

    write_document(&document, &target)?;
    output::success(&format!("created {}", target.display()));

    if !cli.no_open && open_in_editor(&target, &settings) {
        output::info("opened in editor");
    }

    Ok(())
}
