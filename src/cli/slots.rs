use anyhow::{Context, Result};
use chrono::DateTime;

use crate::scheduling::SlotCatalog;

pub fn run(start: Option<&str>, end: Option<&str>) -> Result<()> {
    let path = std::env::var("SLOTBOOK_SLOT_CATALOG_PATH").ok();
    let catalog = SlotCatalog::load(path.as_deref())?;

    let slots: Vec<_> = match (start, end) {
        (Some(start), Some(end)) => {
            let start = DateTime::parse_from_rfc3339(start)
                .with_context(|| format!("Invalid --start {}", start))?;
            let end = DateTime::parse_from_rfc3339(end)
                .with_context(|| format!("Invalid --end {}", end))?;
            catalog.within(start, end).collect()
        }
        _ => catalog.slots().iter().collect(),
    };

    println!("{} slots from {}", slots.len(), catalog.source());
    for slot in slots {
        println!("{} - {} ({})", slot.start, slot.end, slot.time_zone);
    }

    Ok(())
}
