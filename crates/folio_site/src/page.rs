//! Page runtime
//!
//! Owns the shared visibility gate, one reveal controller per non-empty
//! group and the page layout. The host drives it with scroll, resize and
//! frame ticks; all times are milliseconds on the host clock.

use folio_core::{ItemId, Rect};
use folio_layout::{MotionKeyframe, RevealController, RevealEvent, RevealState, VisibilityGate};

use crate::compose::{ContentGroup, GroupKind, SectionComposer};
use crate::config::SiteConfig;
use crate::content::SiteContent;
use crate::layout::PageLayout;

/// Reveal event tagged with the group that emitted it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEvent {
    pub group: GroupKind,
    pub event: RevealEvent,
}

/// A mounted (or mountable) portfolio page
pub struct Page {
    config: SiteConfig,
    content: SiteContent,
    groups: Vec<ContentGroup>,
    layout: PageLayout,
    gate: VisibilityGate,
    controllers: Vec<(GroupKind, RevealController)>,
    scroll_y: f32,
    mounted: bool,
}

impl Page {
    /// Compose and lay out the page; nothing is observed until [`Page::mount`]
    pub fn new(config: SiteConfig) -> Self {
        let content = config.content();
        let groups = SectionComposer::new().compose(&content, &config.motion);
        let layout = PageLayout::compute(&groups, &config.viewport, &config.layout);

        Self {
            config,
            content,
            groups,
            layout,
            gate: VisibilityGate::new(),
            controllers: Vec::new(),
            scroll_y: 0.0,
            mounted: false,
        }
    }

    /// Register every group with its controller and start observing
    ///
    /// Mount-triggered groups start on the next [`Page::tick`]. Mounting an
    /// already mounted page does nothing and returns false.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            tracing::warn!("Page: already mounted");
            return false;
        }

        self.controllers = SectionComposer::wire(&self.groups, &mut self.gate)
            .into_iter()
            .filter_map(|controller| {
                GroupKind::from_name(controller.name()).map(|kind| (kind, controller))
            })
            .collect();
        self.push_bounds();
        self.gate.set_viewport(self.viewport());
        self.mounted = true;

        tracing::debug!(
            "Page: mounted {} group(s), {} observation(s)",
            self.controllers.len(),
            self.gate.len()
        );
        true
    }

    /// Tear down every controller and release all observations
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for (_, controller) in &mut self.controllers {
            controller.teardown(&mut self.gate);
        }
        self.controllers.clear();
        self.gate.clear();
        self.mounted = false;
        tracing::debug!("Page: unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Scroll to `y`, clamped to the page; returns the applied offset
    pub fn scroll_to(&mut self, y: f32) -> f32 {
        let max = self.max_scroll();
        self.scroll_y = if y.is_nan() { 0.0 } else { y.clamp(0.0, max) };
        self.gate.set_viewport(self.viewport());
        self.scroll_y
    }

    /// Scroll so a section's top edge meets the top of the viewport
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> Option<f32> {
        let section = self.layout.section_bounds(anchor)?;
        Some(self.scroll_to(section.y()))
    }

    /// Re-layout for a new viewport size
    ///
    /// Items keep their ids and reveal state; only their bounds move.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self.layout = PageLayout::compute(&self.groups, &self.config.viewport, &self.config.layout);

        if self.mounted {
            self.push_bounds();
        }
        self.scroll_to(self.scroll_y);
        tracing::debug!("Page: resized to {}x{}", width, height);
    }

    /// Hand laid-out bounds to the gate for items it still observes
    fn push_bounds(&mut self) {
        for (item, bounds) in self.layout.items() {
            if self.gate.is_observing(item) {
                self.gate.set_bounds(item, bounds);
            }
        }
    }

    /// Evaluate visibility and advance every controller
    ///
    /// Returns true while any item is animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }

        let fired = self.gate.process(now_ms);
        if fired > 0 {
            tracing::trace!("Page: {} observation(s) fired at {}ms", fired, now_ms);
        }

        let mut active = false;
        for (_, controller) in &mut self.controllers {
            if controller.tick(now_ms) {
                active = true;
            }
        }
        active
    }

    /// Events emitted since the last call, ordered by scheduled time
    pub fn take_events(&mut self) -> Vec<PageEvent> {
        let mut events: Vec<PageEvent> = self
            .controllers
            .iter_mut()
            .flat_map(|(group, controller)| {
                controller
                    .take_events()
                    .into_iter()
                    .map(|event| PageEvent {
                        group: *group,
                        event,
                    })
            })
            .collect();
        events.sort_by_key(|page_event| page_event.event.at_ms());
        events
    }

    /// Whether every registered item has settled
    pub fn is_settled(&self) -> bool {
        self.controllers
            .iter()
            .all(|(_, controller)| controller.is_settled())
    }

    /// Current viewport in page coordinates
    pub fn viewport(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.config.viewport.width,
            self.config.viewport.height,
        )
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn max_scroll(&self) -> f32 {
        self.layout.max_scroll(self.config.viewport.height)
    }

    pub fn page_height(&self) -> f32 {
        self.layout.height()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn groups(&self) -> &[ContentGroup] {
        &self.groups
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    pub fn group(&self, kind: GroupKind) -> Option<&ContentGroup> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    pub fn controller(&self, kind: GroupKind) -> Option<&RevealController> {
        self.controllers
            .iter()
            .find(|(group, _)| *group == kind)
            .map(|(_, controller)| controller)
    }

    pub fn state(&self, item: ItemId) -> Option<RevealState> {
        self.controllers
            .iter()
            .find_map(|(_, controller)| controller.state(item))
    }

    /// Current visual values of an item
    pub fn values(&self, item: ItemId) -> Option<MotionKeyframe> {
        self.controllers
            .iter()
            .find_map(|(_, controller)| controller.values(item))
    }
}
