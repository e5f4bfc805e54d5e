use super::open_session;
use crate::config::Config;
use crate::error::{PanelError, Result};
use crate::expiry;
use crate::panel::RecordDetails;

pub async fn execute(config: &Config, id: &str) -> Result<()> {
    let session = open_session(config).await?;

    let rental = session
        .buckets()
        .find(id)
        .ok_or_else(|| PanelError::RecordNotFound(id.to_string()))?;

    print!("{}", render(&RecordDetails::new(rental, expiry::now())));
    Ok(())
}

fn render(details: &RecordDetails) -> String {
    let mut lines = vec![
        "Account Details".to_string(),
        format!("  ID:       {}", details.id),
        format!("  Slot:     {}", details.slot),
    ];

    for column in &details.times {
        let marker = if column.ended { " (ended)" } else { "" };
        lines.push(format!(
            "  {:<9} {}{}",
            format!("{}:", column.label),
            column.time,
            marker
        ));
    }

    if let Some(account) = &details.account {
        lines.push(format!("  Account:  {}", account));
    }
    if let Some(email) = &details.email {
        lines.push(format!("  Email:    {}", email));
    }
    if let Some(user_id) = details.user_id {
        lines.push(format!("  User ID:  {}", user_id));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::TimeColumn;

    #[test]
    fn test_render_marks_ended_end_time() {
        let details = RecordDetails {
            id: "tx-1".to_string(),
            slot: "slot-2".to_string(),
            times: vec![TimeColumn {
                label: "End",
                time: "9:00 AM".to_string(),
                ended: true,
            }],
            account: Some("acct".to_string()),
            email: None,
            user_id: Some(0),
        };

        assert_eq!(
            render(&details),
            "Account Details\n  ID:       tx-1\n  Slot:     slot-2\n  End:      9:00 AM (ended)\n  Account:  acct\n  User ID:  0\n"
        );
    }
}
