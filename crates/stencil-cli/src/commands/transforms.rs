//! Implementation of the `stencil transforms` command.

use serde_json::json;

use stencil_adapters::transforms::CATALOG;

use crate::{
    cli::{ListFormat, TransformsArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TransformsArgs, output: OutputManager) -> CliResult<()> {
    // The global JSON format wins over the table default.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Transforms:")?;
            let width = CATALOG.iter().map(|t| t.name.len()).max().unwrap_or(0);
            for info in CATALOG {
                output.print(&format!(
                    "  {:width$}  {}  [{}]",
                    info.name, info.summary, info.outputs
                ))?;
            }
        }

        ListFormat::List => {
            for info in CATALOG {
                output.print(info.name)?;
            }
        }

        ListFormat::Json => {
            let entries: Vec<_> = CATALOG
                .iter()
                .map(|info| {
                    json!({
                        "name": info.name,
                        "summary": info.summary,
                        "outputs": info.outputs,
                    })
                })
                .collect();
            output.json(&entries)?;
        }
    }

    Ok(())
}
