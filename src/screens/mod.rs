//! Screen state machines.
//!
//! Each screen owns an `ApiClient` handle and its local view state. Loads
//! move a `ViewState` from `Loading` to `Ready` or `Failed`. Submits are
//! split like directory fetches: `begin_*` validates and raises the saving
//! flag, `send` performs the request over `&self`, and `finish` lowers the
//! flag and leaves a `Banner`. A failure's display message is the only
//! thing surfaced; nothing retries.

pub mod account;
pub mod admin;
pub mod clinic;
pub mod medical;
pub mod patient;
pub mod public;

use std::fmt::Display;
use std::time::Instant;

use crate::config::SUCCESS_BANNER_TTL;

/// Which portal's endpoints a shared screen talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    /// `/clinic/...`, signed in as a clinic account.
    Clinic,
    /// `/medical/...`, signed in as a doctor or nurse.
    Medical,
}

// ═══════════════════════════════════════════════════════════
// View state
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> ViewState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Banners
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Alert shown above a form. Success banners expire after
/// `SUCCESS_BANNER_TTL`; error banners stay until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub expires_at: Option<Instant>,
}

impl Banner {
    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
            expires_at: Some(now + SUCCESS_BANNER_TTL),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// The banner slot every form screen carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerSlot(Option<Banner>);

impl BannerSlot {
    pub fn show(&mut self, banner: Banner) {
        self.0 = Some(banner);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// The current banner, unless it has expired by `now`.
    pub fn visible(&self, now: Instant) -> Option<&Banner> {
        self.0.as_ref().filter(|b| b.is_visible(now))
    }

    /// Error message currently shown, if any.
    pub fn error(&self) -> Option<&str> {
        self.0
            .as_ref()
            .filter(|b| b.kind == BannerKind::Error)
            .map(|b| b.message.as_str())
    }

    /// Unwrap `result`, or show its error and yield `None`.
    pub fn accept<T, E: Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.show(Banner::error(err.to_string()));
                None
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Request generations
// ═══════════════════════════════════════════════════════════

/// Ticket handed out with each request a screen issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Drops stale responses: only the latest issued ticket may be applied.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn success_banner_expires_after_ttl() {
        let now = Instant::now();
        let banner = Banner::success("Saved", now);
        assert!(banner.is_visible(now));
        assert!(banner.is_visible(now + Duration::from_millis(2999)));
        assert!(!banner.is_visible(now + SUCCESS_BANNER_TTL));
    }

    #[test]
    fn accept_shows_error_banner() {
        let mut slot = BannerSlot::default();
        assert_eq!(slot.accept::<u32, &str>(Ok(3)), Some(3));
        assert!(slot.error().is_none());
        assert_eq!(slot.accept::<u32, &str>(Err("Reason is required")), None);
        assert_eq!(slot.error(), Some("Reason is required"));
    }

    #[test]
    fn error_banner_persists() {
        let now = Instant::now();
        let mut slot = BannerSlot::default();
        slot.show(Banner::error("Network error"));
        assert!(slot.visible(now + Duration::from_secs(3600)).is_some());
        assert_eq!(slot.error(), Some("Network error"));
    }

    #[test]
    fn only_latest_generation_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn view_state_from_result() {
        let ok: ViewState<u8> = ViewState::from_result(Ok::<_, String>(1));
        assert_eq!(ok.ready(), Some(&1));
        let failed: ViewState<u8> = ViewState::from_result(Err("HTTP 500"));
        assert_eq!(failed.error(), Some("HTTP 500"));
        assert!(ViewState::<u8>::default().is_loading());
    }
}
