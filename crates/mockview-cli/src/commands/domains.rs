//! The `mockview domains` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mockview_core::model::Domain;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Domain", "Name", "Specializations"]);

    for domain in Domain::ALL {
        table.add_row(vec![
            Cell::new(domain.slug()),
            Cell::new(domain.display_name()),
            Cell::new(domain.specializations().join(", ")),
        ]);
    }

    println!("{table}");
    Ok(())
}
