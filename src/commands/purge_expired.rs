use tracing::info;

use crate::controllers::snippet;
use crate::App;

pub async fn run(mut app: App) -> anyhow::Result<()> {
    let count = snippet::purge_expired(&mut app.store).await?;
    info!("purge finished, {count} snippets removed");
    Ok(())
}
