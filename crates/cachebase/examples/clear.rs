//! Clearing the store keeps defaults unless a listener drops them too.

use cachebase::{Cache, EventKind};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut app = Cache::new();
    app.set("foo", 1)?.set_default("foo", 42)?;

    app.clear()?;
    println!("after clear: foo = {:?}", app.get("foo")?);

    app.on(EventKind::Clear, |app, _| {
        app.reset_defaults();
        Ok(())
    });
    app.set("foo", 1)?.clear()?;
    println!("after clear with reset: foo = {:?}", app.get("foo")?);
    Ok(())
}
