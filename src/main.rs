//! Circulation Admin - lane and custom list overview
//!
//! Connects to the circulation server's admin API and logs the library's
//! lane tree and custom list sidebar as the admin interface would show them.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulation_admin::{
    config::AppConfig,
    editor::{Confirm, ParentInfo, SortableListSidebar},
    routes,
    services::AdminClient,
};

/// Non-interactive sessions never confirm destructive actions
struct DeclineAll;

impl Confirm for DeclineAll {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "Declining confirmation prompt");
        false
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("circulation_admin={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Circulation Admin v{}", env!("CARGO_PKG_VERSION"));

    let client = AdminClient::new(&config.admin)?;
    let library = client.library().to_string();

    let tree = client.fetch_lanes().await?;
    tracing::info!(library = %library, lanes = tree.len(), "Fetched lanes");
    for (depth, lane) in tree.iter() {
        let parent = match tree.parent_of(Some(lane)) {
            Some(parent) => ParentInfo::SublaneOf(parent.display_name.clone()),
            None => ParentInfo::TopLevel,
        };
        tracing::info!(
            id = lane.id,
            depth,
            visible = lane.visible,
            count = lane.count,
            lists = lane.custom_list_ids.len(),
            "{} ({}) {}",
            lane.display_name,
            parent,
            routes::lane_edit_path(&library, lane.id)
        );
    }

    let lists = client.fetch_custom_lists().await?;
    let sidebar = SortableListSidebar::new(
        library.clone(),
        lists,
        false,
        Arc::new(client.clone()),
        Arc::new(DeclineAll),
    );
    for entry in sidebar.entries() {
        tracing::info!(
            id = entry.id,
            entries = entry.entry_count,
            "{} {}",
            entry.name,
            entry.edit_path
        );
    }

    Ok(())
}
