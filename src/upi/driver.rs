//! Async driver that runs a [`LaunchSequencer`] against a real host.
//!
//! The host performs navigations and shows the failure message; page
//! visibility arrives on a `watch` channel. Timers are fire-and-forget: once
//! the page is hidden the outcome is settled and the pending wait is dropped.

use async_trait::async_trait;
use tokio::sync::watch;

use super::error::UpiError;
use super::launch::{LaunchAction, LaunchSequencer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// The browser/OS side of a launch.
#[async_trait]
pub trait LaunchHost: Send + Sync {
    async fn navigate(&self, url: &str);

    /// Shows the terminal failure message verbatim.
    async fn notify_failure(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Succeeded,
    Failed(UpiError),
}

pub async fn run_launch<H>(
    host: &H,
    mut sequencer: LaunchSequencer,
    mut visibility: watch::Receiver<Visibility>,
) -> LaunchOutcome
where
    H: LaunchHost + ?Sized,
{
    let mut action = sequencer.start();
    loop {
        match action {
            LaunchAction::Navigate { url, wait } => {
                host.navigate(&url).await;
                action = await_timer(&mut sequencer, &mut visibility, wait).await;
            }
            LaunchAction::Succeeded | LaunchAction::Noop => {
                tracing::info!(platform = ?sequencer.plan().platform, "payment app opened");
                return LaunchOutcome::Succeeded;
            }
            LaunchAction::Failed(err) => {
                tracing::warn!(platform = ?sequencer.plan().platform, error = %err, "payment app launch failed");
                host.notify_failure(&err.to_string()).await;
                return LaunchOutcome::Failed(err);
            }
        }
    }
}

async fn await_timer(
    sequencer: &mut LaunchSequencer,
    visibility: &mut watch::Receiver<Visibility>,
    wait: std::time::Duration,
) -> LaunchAction {
    let timer = tokio::time::sleep(wait);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            _ = &mut timer => {
                let visible = *visibility.borrow() == Visibility::Visible;
                return sequencer.timer_elapsed(visible);
            }
            changed = visibility.changed() => {
                if changed.is_err() {
                    // Sender gone; only the timer can decide now.
                    (&mut timer).await;
                    let visible = *visibility.borrow() == Visibility::Visible;
                    return sequencer.timer_elapsed(visible);
                }
                if *visibility.borrow_and_update() == Visibility::Hidden {
                    return sequencer.page_hidden();
                }
            }
        }
    }
}
