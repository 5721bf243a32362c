use chrono::{DateTime, Utc};

fn format_with_dots(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `R$ 1.234,56`
pub fn format_cents(cents: u64) -> String {
    format!("R$ {},{:02}", format_with_dots(cents / 100), cents % 100)
}

/// `dd/mm/yyyy`, in UTC so a date-only due date never shifts a day.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}
