use chrono::{Local, TimeZone};

use crate::config::Config;
use crate::controllers::snippet::now_millis;
use crate::history::History;

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let history = History::load(config.history.path()?).await?;
    let now = now_millis();

    for entry in history.entries() {
        let created = Local
            .timestamp_millis_opt(entry.created_at)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let status = match entry.expiry {
            0 => "never expires",
            expiry if expiry < now => "expired",
            _ => "live",
        };
        println!(
            "{code}  {created}  {status:<13}  {title}",
            code = entry.code,
            title = entry.title
        );
    }
    Ok(())
}
