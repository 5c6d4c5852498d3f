use std::error::Error;

use qrtint::{Config, FileStore, QrSession, SavedCodeStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let kv = FileStore::open("qrtint-data")?;
    let mut store = SavedCodeStore::load(kv, config.storage_key.clone());
    println!("Loaded {} saved codes", store.len());

    let mut session = QrSession::new(config);
    for text in ["rust-lang.org", "crates.io", "docs.rs"] {
        let img = session.set_input(text).ok_or("nothing to encode")?.clone();
        store.save(img.raster(), text)?;
    }

    // Newest first
    let last = store.len() - 1;
    store.move_item(last, 0)?;

    for (i, code) in store.iter().enumerate() {
        println!("{i}: {} ({}, {} bytes)", code.text(), code.id(), code.image_bytes().len());
    }

    store.export_png(0, "latest.png")?;
    println!("Most recent code exported to: latest.png");

    store.clear_all()?;
    println!("Cleared, {} codes left", store.len());

    Ok(())
}
