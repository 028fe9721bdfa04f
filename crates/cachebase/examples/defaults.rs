//! The defaults layer fills in whatever the store does not have.

use cachebase::Cache;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut app = Cache::new();
    app.set("foo", "xxx")?
        .set_default("foo", "one")?
        .set_default("bar", "two")?
        .set("baz", "zzz")?
        .set_default("baz", "three")?;

    println!("foo = {:?}", app.get("foo")?);
    println!("bar = {:?}", app.get("bar")?);
    println!("baz = {:?}", app.get("baz")?);
    println!("store    = {}", app.data());
    println!("defaults = {}", app.defaults());
    println!("resolved = {}", app.resolved());
    Ok(())
}
