pub mod clear;
pub mod completions;
pub mod config;
pub mod show;
pub mod status;

use crate::config::Config;
use crate::error::Result;
use crate::expiry;
use crate::session::PanelSession;

/// Connect and load the current buckets
async fn open_session(config: &Config) -> Result<PanelSession> {
    let mut session = PanelSession::connect(config)?;
    session.refresh(expiry::now()).await?;
    Ok(session)
}
