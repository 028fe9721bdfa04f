//! Basic writes and reads, with a listener logging every `set`.
//!
//! Run with `RUST_LOG=debug cargo run -p cachebase --example set`.

use cachebase::{Cache, EventKind};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut app = Cache::new();
    app.on(EventKind::Set, |_, event| {
        println!("set {}", event.key().unwrap_or_default());
        Ok(())
    });

    app.set("a", "b")?
        .set("c.d.e", "f")?
        .set_all(json!({"g": {"h": "i"}, "dotted\\.key": true}))?;

    println!("a     = {:?}", app.get("a")?);
    println!("c.d   = {:?}", app.get("c.d")?);
    println!("g.h   = {:?}", app.get("g.h")?);
    println!("keys  = {:?}", app.keys());
    println!("store = {}", app.data());
    Ok(())
}
