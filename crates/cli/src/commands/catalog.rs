//! Catalog inspection.

use arcadia_engine::{Engine, EngineConfig, EngineError};

/// Print every product in the catalog.
pub fn list() -> Result<(), EngineError> {
    let engine = Engine::open(EngineConfig::from_env()?)?;
    let products = engine.catalog().list();

    if products.is_empty() {
        println!("Catalog is empty (run `arcadia seed`)");
        return Ok(());
    }

    println!("{:<5} {:<28} {:<14} {:>12} {:>6}", "ID", "TITLE", "GENRE", "PRICE", "STOCK");
    for product in &products {
        println!(
            "{:<5} {:<28} {:<14} {:>12} {:>6}",
            product.id, product.title, product.genre, product.price, product.stock
        );
    }
    println!("{} products", products.len());
    Ok(())
}
