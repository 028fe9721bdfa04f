//! A `del` listener that restores the default for whatever was removed.

use cachebase::{Cache, EventKind};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut app = Cache::new();
    app.on(EventKind::Del, |app, event| {
        let Some(key) = event.key() else {
            return Ok(());
        };
        if let Some(value) = app.get_default(key)?.cloned() {
            app.set(key, value)?;
        }
        Ok(())
    });

    app.set("foo", "xxx")?.set_default("foo", "one")?;
    println!("before del: {}", app.data());

    app.del("foo")?;
    println!("after del:  {}", app.data());
    Ok(())
}
