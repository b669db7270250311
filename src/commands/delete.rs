use tracing::warn;

use crate::controllers::snippet;
use crate::history::History;
use crate::App;

pub async fn run(mut app: App, code: String) -> anyhow::Result<()> {
    snippet::delete(&mut app.store, &code).await?;

    match app.config.history.path() {
        Ok(path) => {
            let mut history = History::load(path).await?;
            if history.forget(&code) {
                history.save().await?;
            }
        }
        Err(e) => warn!("not updating history: {e:#}"),
    }
    Ok(())
}
