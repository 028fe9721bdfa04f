//! Publishing the store under a different field name.

use cachebase::Cache;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut app = Cache::named_with_data("data", json!({"one": 1, "two": 2}))?;
    app.set("e.f", "g")?;

    println!("{}", serde_json::to_string_pretty(&app)?);
    println!("{app:?}");
    Ok(())
}
