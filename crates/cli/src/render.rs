//! Terminal rendering for reports, history and the catalog

use colored::Colorize;
use mileage_core::domain::{Catalog, DueReport, DueStatus, Mileage, ServiceRecord};
use tabled::{Table, Tabled};

/// `139999` -> `139 999`
pub fn format_mileage(value: Mileage) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[derive(Tabled)]
struct DueRow {
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Last service")]
    last_service: String,
    #[tabled(rename = "Next due")]
    next_due: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Mileage (km)")]
    mileage: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Procedure")]
    procedure: String,
    #[tabled(rename = "Interval (km)")]
    interval: String,
}

pub fn due_report(report: &DueReport) {
    if report.is_empty() {
        println!(
            "{}",
            "✓ All systems nominal, no service required".green().bold()
        );
        return;
    }

    let due_now = report.due_now().count();
    let heading = format!(
        "Service required: {} due now, {} upcoming",
        due_now,
        report.len() - due_now
    );
    println!("{}", heading.yellow().bold());
    println!();

    let rows: Vec<DueRow> = report
        .entries
        .iter()
        .map(|entry| DueRow {
            task: entry.description.clone(),
            last_service: format_mileage(entry.last_service_mileage),
            next_due: format_mileage(entry.next_due_mileage),
            current: format_mileage(report.current_mileage),
            status: match report.status_of(entry) {
                DueStatus::DueNow => "REQUIRED".to_string(),
                DueStatus::Upcoming => "Soon".to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub fn history(records: &[ServiceRecord]) {
    if records.is_empty() {
        println!("{}", "Service history is empty".yellow());
        return;
    }

    println!("{}", "Service history".cyan().bold());
    println!();

    let rows: Vec<HistoryRow> = records
        .iter()
        .map(|record| HistoryRow {
            id: record.id,
            mileage: format_mileage(record.mileage),
            date: record.display_date(),
            category: record.category.to_string(),
            description: record.description.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub fn catalog(catalog: &Catalog) {
    println!("{}", "Scheduled maintenance intervals".cyan().bold());
    println!();

    let rows: Vec<CatalogRow> = catalog
        .list()
        .iter()
        .map(|task| CatalogRow {
            code: task.id,
            procedure: task.description.clone(),
            interval: format_mileage(task.interval),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!(
        "{}",
        "Actual intervals depend on driving conditions and the manufacturer's recommendations."
            .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mileage() {
        assert_eq!(format_mileage(0), "0");
        assert_eq!(format_mileage(999), "999");
        assert_eq!(format_mileage(1_000), "1 000");
        assert_eq!(format_mileage(139_999), "139 999");
        assert_eq!(format_mileage(1_234_567), "1 234 567");
    }
}
