//! Navigation shell: route table and the fade between pages.

use std::fmt;
use std::time::{Duration, Instant};

use scape_config::UiConfig;

/// A page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Map,
    Articles,
    Library,
    /// Anything else; carries the requested path.
    NotFound(String),
}

impl Route {
    /// Resolve a path. `/` and `/home` are the landing page; `/1/`, `/2/`
    /// and `/3/` are map, articles and library. A trailing slash is optional.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let key = trimmed.trim_end_matches('/');
        match key {
            "" | "/home" => Self::Home,
            "/1" => Self::Map,
            "/2" => Self::Articles,
            "/3" => Self::Library,
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    /// Canonical path.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/home",
            Self::Map => "/1/",
            Self::Articles => "/2/",
            Self::Library => "/3/",
            Self::NotFound(path) => path,
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Map => "Smell Map",
            Self::Articles => "Articles",
            Self::Library => "Scent Library",
            Self::NotFound(_) => "Page Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Phase of the page fade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Idle,
    /// The current page is fading out; `to` replaces it when done.
    FadingOut { to: Route, started: Instant },
    /// The new page is fading in.
    FadingIn { started: Instant },
}

/// Holds the displayed route and drives the fade-out, swap, fade-in cycle.
#[derive(Debug, Clone)]
pub struct Shell {
    current: Route,
    transition: Transition,
    fade: Duration,
}

impl Shell {
    #[must_use]
    pub const fn new(fade: Duration) -> Self {
        Self {
            current: Route::Home,
            transition: Transition::Idle,
            fade,
        }
    }

    #[must_use]
    pub const fn from_config(config: &UiConfig) -> Self {
        Self::new(Duration::from_millis(config.fade_ms))
    }

    /// Route currently on screen (the old one until the fade-out finishes).
    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    #[must_use]
    pub const fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Start navigating to `path`. Navigating to the page already shown is a
    /// no-op; navigating mid-fade retargets the fade.
    pub fn navigate(&mut self, path: &str, now: Instant) -> Route {
        let target = Route::parse(path);
        let settled_here = matches!(self.transition, Transition::Idle) && target == self.current;
        if !settled_here {
            tracing::debug!(from = %self.current, to = %target, "navigate");
            let started = match &self.transition {
                Transition::FadingOut { started, .. } => *started,
                Transition::Idle | Transition::FadingIn { .. } => now,
            };
            self.transition = Transition::FadingOut {
                to: target.clone(),
                started,
            };
            self.tick(now);
        }
        target
    }

    /// Advance the fade to `now`.
    pub fn tick(&mut self, now: Instant) {
        loop {
            match &self.transition {
                Transition::FadingOut { to, started } if elapsed(*started, now) >= self.fade => {
                    let swap_at = started.checked_add(self.fade).unwrap_or(now);
                    self.current = to.clone();
                    self.transition = Transition::FadingIn { started: swap_at };
                }
                Transition::FadingIn { started } if elapsed(*started, now) >= self.fade => {
                    self.transition = Transition::Idle;
                }
                _ => break,
            }
        }
    }

    /// Opacity of the displayed page at `now`, from 0.0 to 1.0.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match &self.transition {
            Transition::Idle => 1.0,
            Transition::FadingOut { started, .. } => 1.0 - self.progress(*started, now),
            Transition::FadingIn { started } => self.progress(*started, now),
        }
    }

    fn progress(&self, started: Instant, now: Instant) -> f32 {
        if self.fade.is_zero() {
            return 1.0;
        }
        let ratio = elapsed(started, now).as_secs_f32() / self.fade.as_secs_f32();
        ratio.clamp(0.0, 1.0)
    }
}

fn elapsed(started: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(started)
}

impl Default for Shell {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}
