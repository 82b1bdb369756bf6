//! Career catalog browser.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use compass_core::careers::catalog;

/// Print careers matching the search text and category.
///
/// # Examples
///
/// ```bash
/// compass careers --search design
/// compass careers --category Healthcare --json
/// ```
pub fn list_careers(search: Option<&str>, category: Option<&str>, json: bool) -> Result<()> {
    let result = catalog::search(search, category);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.careers.is_empty() {
        println!();
        println!(
            "  {} No careers found. Categories: {}",
            style("i").blue().bold(),
            style(result.categories.join(", ")).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Career").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Salary").fg(Color::White),
        Cell::new("Growth").fg(Color::White),
        Cell::new("Key Skills").fg(Color::White),
    ]);

    for career in &result.careers {
        table.add_row(vec![
            Cell::new(career.title).fg(Color::Cyan),
            Cell::new(career.category),
            Cell::new(career.salary_range).fg(Color::Green),
            Cell::new(career.growth_rate),
            Cell::new(career.skills.iter().take(3).copied().collect::<Vec<_>>().join(", "))
                .fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} of {} careers",
        style(result.total).bold(),
        catalog::CAREERS.len()
    );
    println!();
    Ok(())
}
