use super::open_session;
use crate::config::Config;
use crate::error::{PanelError, Result};
use crate::panel::{clear_notification, ClearFailure, ClearOutcome};
use crate::session::PanelSession;
use std::io::{self, BufRead, Write};

pub async fn execute(config: &Config, yes: bool) -> Result<()> {
    let mut session = open_session(config).await?;
    let stdin = io::stdin();
    run(&mut session, yes, &mut stdin.lock(), &mut io::stdout()).await
}

/// Confirm, clear and report.
///
/// Fails when the clear could not start or when every record failed, so the
/// process exits non-zero in both cases.
async fn run<R, W>(session: &mut PanelSession, yes: bool, input: &mut R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let expired = session.buckets().expired.len();
    if expired == 0 {
        writeln!(out, "No expired accounts")?;
        return Ok(());
    }

    if !yes {
        write!(
            out,
            "Clear {} expired orders? This will also decrement usage counts on their accounts. (y/N): ",
            expired
        )?;
        out.flush()?;

        let mut response = String::new();
        input.read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Clear cancelled.")?;
            return Ok(());
        }
    }

    let result = session.clear_expired().await;
    let notification = clear_notification(&result);
    writeln!(out, "{}: {}", notification.title, notification.description)?;

    if let Ok(outcome) = &result {
        print_failures(&outcome.failed);
    }
    into_status(result)
}

fn into_status(result: Result<ClearOutcome>) -> Result<()> {
    match result {
        Ok(outcome) if outcome.all_failed() => Err(PanelError::ClearFailed(outcome.attempted())),
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}

fn print_failures(failed: &[ClearFailure]) {
    for failure in failed {
        eprintln!("  ✗ {}: {}", failure.id, failure.error);
    }
}
