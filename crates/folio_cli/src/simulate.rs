//! Headless page simulation
//!
//! Scrolls a mounted page from top to bottom at constant speed, ticking at a
//! fixed frame rate, and records every reveal event.

use folio_core::ItemId;
use folio_layout::RevealEvent;
use folio_site::{Page, PageEvent};

/// Upper bound on simulated time
const MAX_SIMULATED_MS: u64 = 10 * 60 * 1000;

#[derive(Clone, Copy, Debug)]
pub struct SimulationOptions {
    /// Scroll speed in px per second
    pub scroll_speed: f32,
    /// Frames per second, at least 1
    pub fps: u32,
    /// Time kept ticking after the page end is reached (ms)
    pub hold_ms: u64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            scroll_speed: 600.0,
            fps: 60,
            hold_ms: 1_000,
        }
    }
}

impl SimulationOptions {
    pub fn frame_ms(&self) -> u64 {
        (1000 / u64::from(self.fps.max(1))).max(1)
    }
}

#[derive(Debug)]
pub struct SimulationReport {
    pub events: Vec<PageEvent>,
    pub frames: u64,
    pub duration_ms: u64,
    pub settled: bool,
}

/// Drive a page until every item settles or the hold time runs out
pub fn run(page: &mut Page, options: &SimulationOptions) -> SimulationReport {
    if !page.is_mounted() {
        page.mount();
    }

    let frame_ms = options.frame_ms();
    let mut events = Vec::new();
    let mut frames = 0;
    let mut now = 0;
    let mut bottom_at: Option<u64> = None;

    loop {
        let target = options.scroll_speed.max(0.0) * now as f32 / 1000.0;
        let scroll = page.scroll_to(target);
        if bottom_at.is_none() && (scroll >= page.max_scroll() || options.scroll_speed <= 0.0) {
            tracing::debug!("Simulation: page end reached at {}ms", now);
            bottom_at = Some(now);
        }

        page.tick(now);
        events.extend(page.take_events());
        frames += 1;

        if page.is_settled() {
            break;
        }
        if bottom_at.is_some_and(|at| now >= at.saturating_add(options.hold_ms)) {
            tracing::warn!("Simulation: hold time elapsed with items still pending");
            break;
        }
        if now >= MAX_SIMULATED_MS {
            break;
        }
        now += frame_ms;
    }

    SimulationReport {
        events,
        frames,
        duration_ms: now,
        settled: page.is_settled(),
    }
}

pub fn event_label(event: &RevealEvent) -> &'static str {
    match event {
        RevealEvent::Triggered { .. } => "triggered",
        RevealEvent::Started { .. } => "started",
        RevealEvent::Settled { .. } => "settled",
    }
}

/// Payload of an item, for display
pub fn describe_item(page: &Page, item: ItemId) -> String {
    page.groups()
        .iter()
        .flat_map(|group| group.items.iter())
        .find(|candidate| candidate.id() == item)
        .map(|candidate| candidate.payload().to_string())
        .unwrap_or_default()
}
