//! CLI command implementations.

pub mod podcast;
pub mod search;
pub mod top;

pub use podcast::PodcastCommand;
pub use search::SearchCommand;
pub use top::TopCommand;

use crate::limiter::GlobalLimiter;
use anyhow::Result;
use tracing::{debug, warn};

/// Takes a permit from the limiter, if one is configured.
pub(crate) fn acquire_permit(limiter: Option<&GlobalLimiter>) -> Result<()> {
    let Some(limiter) = limiter else {
        return Ok(());
    };

    if !limiter.allow() {
        warn!(
            "Request limit of {} per {:?} reached",
            limiter.capacity(),
            limiter.window()
        );
        anyhow::bail!("Request limit reached, try again later");
    }

    debug!("Permit taken, {} left in this window", limiter.remaining());
    Ok(())
}
