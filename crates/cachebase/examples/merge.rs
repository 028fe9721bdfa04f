//! Deep merge, shallow extend and array union.

use cachebase::Cache;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut app = Cache::new();
    app.merge([json!({"server": {"host": "localhost"}})])?
        .merge([json!({"server": {"port": 8080}})])?;
    println!("merged:   {}", app.data());

    app.extend([json!({"server": {"port": 9090}})])?;
    println!("extended: {}", app.data());

    app.union("tags", "a")?
        .union("tags", json!(["b"]))?
        .union("tags", json!(["a", "c"]))?;
    println!("tags:     {:?}", app.get("tags")?);
    Ok(())
}
