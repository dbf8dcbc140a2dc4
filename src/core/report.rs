use crate::domain::model::{CalculationResult, DiamondGroup};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const RULE_WIDTH: usize = 84;
const MONEY_WIDTH: usize = 22;

/// 以千分位與兩位小數格式化金額
pub fn format_money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

pub fn render_groups(groups: &[DiamondGroup]) -> String {
    let mut lines = vec![format!(
        "{:<6} {:>8} {:>6} {:<10} {:<6} {:<8} {:<12}",
        "Group", "Quantity", "Carat", "Cut", "Color", "Clarity", "Lab"
    )];
    lines.push("-".repeat(64));

    for (index, group) in groups.iter().enumerate() {
        lines.push(format!(
            "{:<6} {:>8} {:>6.2} {:<10} {:<6} {:<8} {:<12}",
            index + 1,
            group.quantity,
            group.carat,
            group.cut,
            group.color,
            group.clarity,
            group.certification
        ));
    }

    lines.join("\n")
}

pub fn render_report<Tz: TimeZone>(result: &CalculationResult, quoted_at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let mut lines = vec![
        format!("Diamond quote - {}", quoted_at.format("%Y-%m-%d %H:%M:%S %Z")),
        "=".repeat(RULE_WIDTH),
        format!(
            "{:<6} {:>8} {:>6} {:<6} {:<8} {:>22} {:>22}",
            "Group", "Quantity", "Carat", "Color", "Clarity", "Per diamond", "Subtotal"
        ),
        "-".repeat(RULE_WIDTH),
    ];

    for row in &result.results {
        lines.push(format!(
            "{:<6} {:>8} {:>6.2} {:<6} {:<8} {:>22} {:>22}",
            row.group_id.to_string(),
            row.details.quantity,
            row.details.carat,
            row.details.color,
            row.details.clarity,
            format_money(row.per_diamond),
            format_money(row.total)
        ));
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "{:<label$} {:>money$}",
        "Grand total",
        format_money(result.grand_total),
        label = RULE_WIDTH - MONEY_WIDTH - 1,
        money = MONEY_WIDTH
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GroupDetails, GroupId, GroupResult};
    use chrono::Utc;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.5), "$999.50");
        assert_eq!(format_money(1000.0), "$1,000.00");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-2500.0), "-$2,500.00");
    }

    #[test]
    fn test_render_report() {
        let result = CalculationResult {
            results: vec![
                GroupResult {
                    group_id: GroupId::Index(1),
                    per_diamond: 5000.0,
                    total: 5000.0,
                    details: GroupDetails {
                        quantity: 1,
                        carat: 1.0,
                        color: "D".to_string(),
                        clarity: "FL".to_string(),
                        cut: None,
                        certification: None,
                    },
                },
                GroupResult {
                    group_id: GroupId::Index(2),
                    per_diamond: 1250.25,
                    total: 12502.5,
                    details: GroupDetails {
                        quantity: 10,
                        carat: 0.5,
                        color: "H".to_string(),
                        clarity: "SI1".to_string(),
                        cut: Some("good".to_string()),
                        certification: Some("IGI".to_string()),
                    },
                },
            ],
            grand_total: 17502.5,
        };
        let quoted_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let report = render_report(&result, &quoted_at);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Diamond quote - 2024-03-01 12:30:00 UTC");
        assert_eq!(lines.len(), 8);
        assert!(lines[4].starts_with("1 "));
        assert!(lines[4].ends_with("$5,000.00"));
        assert!(lines[5].contains("SI1"));
        assert!(lines[5].ends_with("$12,502.50"));
        assert!(lines[7].starts_with("Grand total"));
        assert!(lines[7].ends_with("$17,502.50"));
        // Grand total lines up with the subtotal column
        assert_eq!(lines[4].len(), RULE_WIDTH);
        assert_eq!(lines[7].len(), RULE_WIDTH);
        assert_eq!(lines[3].len(), RULE_WIDTH);
    }

    #[test]
    fn test_render_groups() {
        let groups = vec![DiamondGroup::default(), DiamondGroup::default()];
        let table = render_groups(&groups);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("excellent"));
        assert!(lines[3].starts_with("2 "));
    }
}
