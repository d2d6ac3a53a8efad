//! Catalog command - List locations, categories or skills.

use crate::cli::args::{CatalogArgs, CatalogKind};
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

use super::{print_json, services};

/// Execute the catalog command
pub async fn execute(args: CatalogArgs, config: Config, in_memory: bool) -> AppResult<()> {
    let services = services(&config, in_memory).await?;

    match args.kind {
        CatalogKind::Locations => print_json(&services.locations().find_all().await?),
        CatalogKind::Categories => print_json(&services.categories().find_all().await?),
        CatalogKind::Skills => print_json(&services.skills().find_all().await?),
    }
}
