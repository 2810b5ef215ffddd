//! Serve command: load the snapshot once, then run the HTTP explorer.

use super::{load_snapshot, ConnectionArgs};
use crate::server::{self, AppState};
use crate::ui::{GraphLayout, UiState};
use anyhow::Result;
use std::sync::Arc;

pub fn run(connection: ConnectionArgs, bind: Option<String>, layout: Option<String>) -> Result<()> {
    let mut config = connection.resolve()?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(layout) = layout {
        config.server.layout = layout
            .parse::<GraphLayout>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    let addr = config.server.bind_addr()?;

    let snapshot = Arc::new(load_snapshot(&config)?);
    let state = Arc::new(AppState::new(
        snapshot,
        UiState::with_layout(config.server.layout),
        config.database.describe(),
    ));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(addr, state))?;
    Ok(())
}
