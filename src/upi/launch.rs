//! Launch sequencing for the payment app.
//!
//! Only Google Pay is targeted; there is no fallback to a generic
//! UPI chooser. Success is inferred, never confirmed: if the page is still
//! visible when a wait elapses the attempt is assumed to have failed, and if the
//! page was hidden the app is assumed to have opened. An app that opened and
//! then failed on its own looks the same as a successful launch.

use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

use super::error::UpiError;
use super::query::encode_uri_component;

pub const GPAY_APP_NAME: &str = "Google Pay";
pub const GPAY_ANDROID_PACKAGE: &str = "com.google.android.apps.nbu.paisa.user";
pub const GPAY_PLAY_STORE_URL: &str =
    "https://play.google.com/store/apps/details?id=com.google.android.apps.nbu.paisa.user";

pub const ANDROID_FAILURE: &str =
    "Could not open Google Pay. Please install/enable GPay and try again.";
pub const IOS_FAILURE: &str = "Could not open Google Pay. Make sure it's installed.";
pub const UNSUPPORTED_PLATFORM: &str = "This flow requires Google Pay on a mobile device.";

pub const DEFAULT_INTENT_WAIT: Duration = Duration::from_millis(1200);
pub const DEFAULT_SCHEME_WAIT: Duration = Duration::from_millis(900);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("android") {
            Platform::Android
        } else if ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d)) {
            Platform::Ios
        } else {
            Platform::Other
        }
    }
}

/// Bounded waits between launch attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchTimings {
    /// Wait after the Android package-targeted intent.
    pub intent_wait: Duration,
    /// Wait after any scheme-based launch.
    pub scheme_wait: Duration,
}

impl Default for LaunchTimings {
    fn default() -> Self {
        Self {
            intent_wait: DEFAULT_INTENT_WAIT,
            scheme_wait: DEFAULT_SCHEME_WAIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAttempt {
    pub url: String,
    pub wait_ms: u64,
}

impl LaunchAttempt {
    fn new(url: String, wait: Duration) -> Self {
        Self {
            url,
            wait_ms: wait.as_millis() as u64,
        }
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// The ordered attempts for one platform and the message shown when all of them time out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPlan {
    pub platform: Platform,
    pub attempts: Vec<LaunchAttempt>,
    pub failure_message: String,
}

impl LaunchPlan {
    /// Embeds `query` verbatim into each platform URL.
    pub fn for_platform(platform: Platform, query: &str, timings: &LaunchTimings) -> Self {
        let gpay = format!("gpay://upi/pay?{query}");
        let (attempts, failure_message) = match platform {
            Platform::Android => (
                vec![
                    LaunchAttempt::new(android_intent_url(query), timings.intent_wait),
                    LaunchAttempt::new(gpay, timings.scheme_wait),
                ],
                ANDROID_FAILURE,
            ),
            Platform::Ios => (
                vec![
                    LaunchAttempt::new(gpay, timings.scheme_wait),
                    LaunchAttempt::new(format!("tez://upi/pay?{query}"), timings.scheme_wait),
                ],
                IOS_FAILURE,
            ),
            Platform::Other => (Vec::new(), UNSUPPORTED_PLATFORM),
        };

        Self {
            platform,
            attempts,
            failure_message: failure_message.to_string(),
        }
    }

    fn failure(&self) -> UpiError {
        match self.platform {
            Platform::Android => UpiError::LaunchFailed {
                app: GPAY_APP_NAME,
                message: ANDROID_FAILURE,
            },
            Platform::Ios => UpiError::LaunchFailed {
                app: GPAY_APP_NAME,
                message: IOS_FAILURE,
            },
            Platform::Other => UpiError::UnsupportedPlatform {
                message: UNSUPPORTED_PLATFORM,
            },
        }
    }
}

pub fn android_intent_url(query: &str) -> String {
    format!(
        "intent://pay?{query}#Intent;scheme=upi;package={GPAY_ANDROID_PACKAGE};S.browser_fallback_url={};end",
        encode_uri_component(GPAY_PLAY_STORE_URL)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    AttemptPrimary,
    AttemptSecondary,
    Success,
    Failed,
}

impl LaunchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LaunchState::Success | LaunchState::Failed)
    }
}

/// What the caller must do after feeding an event into the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    /// Navigate to `url`, then report back after `wait` with `timer_elapsed`.
    Navigate { url: String, wait: Duration },
    Succeeded,
    Failed(UpiError),
    /// The event arrived after a terminal outcome, or out of order.
    Noop,
}

/// Explicit state machine for one launch. Owned by the call site.
#[derive(Debug, Clone)]
pub struct LaunchSequencer {
    plan: LaunchPlan,
    state: LaunchState,
}

impl LaunchSequencer {
    pub fn new(plan: LaunchPlan) -> Self {
        Self {
            plan,
            state: LaunchState::Idle,
        }
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn plan(&self) -> &LaunchPlan {
        &self.plan
    }

    pub fn start(&mut self) -> LaunchAction {
        if self.state != LaunchState::Idle {
            return LaunchAction::Noop;
        }
        if self.plan.attempts.is_empty() {
            return self.fail();
        }
        self.attempt(LaunchState::AttemptPrimary, 0)
    }

    /// The page was backgrounded: the app is taken to have opened.
    pub fn page_hidden(&mut self) -> LaunchAction {
        match self.state {
            LaunchState::AttemptPrimary | LaunchState::AttemptSecondary => self.succeed(),
            _ => LaunchAction::Noop,
        }
    }

    /// A bounded wait elapsed; `page_visible` is the visibility at that moment.
    pub fn timer_elapsed(&mut self, page_visible: bool) -> LaunchAction {
        match self.state {
            LaunchState::AttemptPrimary | LaunchState::AttemptSecondary if !page_visible => {
                self.succeed()
            }
            LaunchState::AttemptPrimary if self.plan.attempts.len() > 1 => {
                self.attempt(LaunchState::AttemptSecondary, 1)
            }
            LaunchState::AttemptPrimary | LaunchState::AttemptSecondary => self.fail(),
            _ => LaunchAction::Noop,
        }
    }

    fn attempt(&mut self, next: LaunchState, index: usize) -> LaunchAction {
        let attempt = self.plan.attempts[index].clone();
        self.transition(next);
        LaunchAction::Navigate {
            wait: attempt.wait(),
            url: attempt.url,
        }
    }

    fn succeed(&mut self) -> LaunchAction {
        self.transition(LaunchState::Success);
        LaunchAction::Succeeded
    }

    fn fail(&mut self) -> LaunchAction {
        self.transition(LaunchState::Failed);
        LaunchAction::Failed(self.plan.failure())
    }

    fn transition(&mut self, next: LaunchState) {
        tracing::debug!(
            platform = ?self.plan.platform,
            from = ?self.state,
            to = ?next,
            "launch sequencer transition"
        );
        self.state = next;
    }
}
