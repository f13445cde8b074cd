//! Action dispatch.
//!
//! Every requested action runs, in the fixed order list, host, clear, build.

use pdbinv_core::{InventoryCache, InventoryService};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output;

pub async fn dispatch<C: InventoryCache>(
    cli: &Cli,
    service: &InventoryService<C>,
) -> Result<(), CliError> {
    if cli.wants_list() {
        let document = service.list().await?;
        output::print_output(&document)?;
    }

    if let Some(ref host) = cli.host {
        output::print_output(&service.host(host))?;
    }

    if cli.clear {
        service.clear().await?;
        tracing::info!("cached inventory cleared");
    }

    if cli.build {
        service.build().await?;
    }

    Ok(())
}
