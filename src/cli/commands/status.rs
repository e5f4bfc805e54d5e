use super::open_session;
use crate::config::Config;
use crate::error::Result;
use crate::expiry::format_time_with_am_pm;
use crate::panel::{Buckets, Rental};
use serde::Serialize;

#[derive(Serialize)]
struct RentalView<'a> {
    id: &'a str,
    slot_id: &'a str,
    end_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assign_to: Option<&'a str>,
}

impl<'a> From<&'a Rental> for RentalView<'a> {
    fn from((id, record): &'a Rental) -> Self {
        Self {
            id,
            slot_id: &record.slot_id,
            end_time: record.end_time.as_deref(),
            assign_to: record.assign_to.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct StatusView<'a> {
    service: &'a str,
    active: Vec<RentalView<'a>>,
    expired: Vec<RentalView<'a>>,
}

pub async fn execute(config: &Config, json: bool) -> Result<()> {
    let session = open_session(config).await?;
    let buckets = session.buckets();

    if json {
        let view = StatusView {
            service: session.service(),
            active: buckets.active.iter().map(RentalView::from).collect(),
            expired: buckets.expired.iter().map(RentalView::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(buckets));
    }

    Ok(())
}

fn render_text(buckets: &Buckets) -> String {
    let mut out = String::new();
    render_section(&mut out, "ACTIVE", &buckets.active, "No active accounts");
    out.push('\n');
    render_section(&mut out, "EXPIRED", &buckets.expired, "No expired accounts");
    out
}

fn render_section(out: &mut String, title: &str, rentals: &[Rental], empty: &str) {
    out.push_str(title);
    out.push('\n');

    if rentals.is_empty() {
        out.push_str(&format!("  {}\n", empty));
        return;
    }

    for (id, record) in rentals {
        let end = record
            .end_time
            .as_deref()
            .map(format_time_with_am_pm)
            .unwrap_or_default();
        out.push_str(&format!("  {:>8}  {}  ({})\n", end, id, record.slot_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn rental(id: &str, end: &str) -> Rental {
        (
            id.to_string(),
            Record {
                end_time: Some(end.to_string()),
                slot_id: "s".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_render_text_with_placeholders() {
        let buckets = Buckets {
            active: vec![rental("a", "2024-01-01 14:05:00")],
            expired: Vec::new(),
        };

        let text = render_text(&buckets);

        assert!(text.contains("ACTIVE\n   2:05 PM  a  (s)\n"));
        assert!(text.contains("EXPIRED\n  No expired accounts\n"));
        assert!(!text.contains("No active accounts"));
    }

    #[test]
    fn test_json_view_skips_missing_account() {
        let rental = rental("a", "2024-01-01 14:05:00");
        let value = serde_json::to_value(RentalView::from(&rental)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"id": "a", "slot_id": "s", "end_time": "2024-01-01 14:05:00"})
        );
    }
}
