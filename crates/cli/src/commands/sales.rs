//! Sales log inspection.

use arcadia_engine::{Engine, EngineConfig, EngineError};

/// Print every recorded sale, oldest first.
pub fn list() -> Result<(), EngineError> {
    let engine = Engine::open(EngineConfig::from_env()?)?;
    let sales = engine.sales().list();

    if sales.is_empty() {
        println!("No sales recorded");
        return Ok(());
    }

    for sale in &sales {
        let items: Vec<String> = sale
            .items
            .iter()
            .map(|line| format!("{}x{}", line.product_id, line.quantity))
            .collect();
        println!(
            "#{:<4} {} {:>10.2} {:<12} [{}]",
            sale.id,
            sale.date.format("%Y-%m-%d %H:%M:%S"),
            sale.total,
            sale.user_id,
            items.join(", ")
        );
    }
    println!("{} sales", sales.len());
    Ok(())
}
