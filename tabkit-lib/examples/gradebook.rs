//! Sorting and exporting a small gradebook.
//!
//! Run with: cargo run --example gradebook

use serde_json::json;
use tabkit_lib::model::Record;
use tabkit_lib::table::{Column, CsvFormat, Table, ValueType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let columns = vec![
        Column::new("Student", "user.name", ValueType::String),
        Column::new("Email", "user.email", ValueType::String).hidden(),
        Column::new("Score", "score", ValueType::Float),
        Column::new("Submitted", "submitted", ValueType::Boolean),
    ];
    let rows = vec![
        Record::new(1)
            .set("user", json!({"name": "Ada", "email": "ada@example.com"}))
            .set("score", 91.5)
            .set("submitted", true)
            .set("timestamp", 1_700_000_100i64),
        Record::new(2)
            .set("user", json!({"name": "Grace", "email": "grace@example.com"}))
            .set("submitted", false),
        Record::new(3)
            .set("user", json!({"name": "Linus", "email": "linus@example.com"}))
            .set("score", 78i64)
            .set("submitted", true)
            .set("timestamp", 1_700_000_200i64),
    ];

    let mut table = Table::new(columns, rows)?;

    // Two clicks: ascending, then descending
    table.on_header_click("score");
    table.on_header_click("score");
    println!("By score, highest first:");
    for row in table.sorted_rows() {
        let name = row.resolve("user.name").map(|v| v.to_string()).unwrap_or_default();
        println!("  {} ({})", name, row.id());
    }

    table.state_mut().show("user.email")?;
    table.state().close_customization()?;

    println!("\n{}", table.to_csv_with(&CsvFormat::rfc4180()));
    Ok(())
}
