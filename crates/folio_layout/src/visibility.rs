//! Viewport visibility gate
//!
//! A single registry of one-shot visibility observations, keyed by item.
//! Each observation fires its callback at most once: the first time the
//! item's visible fraction reaches the observation's threshold. After
//! firing the observation is dropped together with its callback.
//!
//! Intersection data reaches the gate two ways:
//!
//! - **Geometry**: the host pushes the viewport ([`VisibilityGate::set_viewport`])
//!   and item bounds ([`VisibilityGate::set_bounds`]) and calls
//!   [`VisibilityGate::process`] once per frame
//! - **Reports**: a host that computes ratios itself calls
//!   [`VisibilityGate::report`] directly
//!
//! Observations are evaluated against the current state on every `process`,
//! so an item that is already visible when it gets observed fires on the next
//! frame.

use folio_core::{ItemId, Rect};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered observation
    pub struct ObserverId;
}

/// Fraction of an item's bounding box that must be inside the viewport
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f32);

impl Threshold {
    /// 30% of the item must be visible
    pub const DEFAULT: Threshold = Threshold(0.3);

    /// Fires on the first evaluation, whatever the geometry
    pub const IMMEDIATE: Threshold = Threshold(0.0);

    /// Create a threshold, clamped to 0.0 - 1.0
    ///
    /// NaN and non-positive values collapse to [`Threshold::IMMEDIATE`].
    pub fn new(value: f32) -> Self {
        if value.is_nan() || value <= 0.0 {
            Self::IMMEDIATE
        } else {
            Threshold(value.min(1.0))
        }
    }

    /// Missing thresholds use [`Threshold::DEFAULT`]
    pub fn from_option(value: Option<f32>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Whether a visible fraction satisfies this threshold
    pub fn is_met(&self, ratio: f32) -> bool {
        self.0 <= 0.0 || ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Delivered to a callback when its observation fires
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEntry {
    pub item: ItemId,
    /// Visible fraction at the moment of firing
    pub ratio: f32,
    /// Time of the intersection report (ms)
    pub time_ms: u64,
}

/// One-shot visibility callback
pub type VisibilityCallback = Box<dyn FnOnce(VisibilityEntry)>;

struct Observation {
    item: ItemId,
    threshold: Threshold,
    callback: VisibilityCallback,
}

/// Shared registry of one-shot visibility observations
#[derive(Default)]
pub struct VisibilityGate {
    viewport: Option<Rect>,
    bounds: FxHashMap<ItemId, Rect>,
    observations: SlotMap<ObserverId, Observation>,
    by_item: FxHashMap<ItemId, SmallVec<[ObserverId; 2]>>,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-shot observation
    ///
    /// `callback` runs at most once, when the item's visible fraction first
    /// reaches `threshold`. It never runs if the item is removed first.
    pub fn observe<F>(&mut self, item: ItemId, threshold: Threshold, callback: F) -> ObserverId
    where
        F: FnOnce(VisibilityEntry) + 'static,
    {
        let id = self.observations.insert(Observation {
            item,
            threshold,
            callback: Box::new(callback),
        });
        self.by_item.entry(item).or_default().push(id);

        tracing::trace!(
            "VisibilityGate: observing {} at threshold {}",
            item,
            threshold.value()
        );
        id
    }

    /// Release a single observation without firing it
    ///
    /// Returns false if the observation already fired or was released.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.take(id).is_some()
    }

    /// Forget an item: release all its observations and its bounds
    ///
    /// Returns the number of observations released. Unknown items are a no-op.
    pub fn remove_item(&mut self, item: ItemId) -> usize {
        self.bounds.remove(&item);
        let Some(ids) = self.by_item.remove(&item) else {
            return 0;
        };

        let released = ids
            .into_iter()
            .filter(|id| self.observations.remove(*id).is_some())
            .count();
        if released > 0 {
            tracing::debug!(
                "VisibilityGate: released {} observation(s) of removed {}",
                released,
                item
            );
        }
        released
    }

    /// Release every observation and forget all bounds
    pub fn clear(&mut self) {
        self.observations.clear();
        self.by_item.clear();
        self.bounds.clear();
    }

    /// Set the current viewport rect (page coordinates)
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Set the laid-out bounds of an item (page coordinates)
    ///
    /// Bounds are forgotten once the item's last observation fires.
    pub fn set_bounds(&mut self, item: ItemId, bounds: Rect) {
        self.bounds.insert(item, bounds);
    }

    pub fn bounds(&self, item: ItemId) -> Option<Rect> {
        self.bounds.get(&item).copied()
    }

    /// Visible fraction of an item in the current viewport
    ///
    /// None until both the viewport and the item's bounds are known.
    pub fn visible_fraction(&self, item: ItemId) -> Option<f32> {
        let viewport = self.viewport?;
        let bounds = self.bounds.get(&item)?;
        Some(bounds.visible_fraction(&viewport))
    }

    /// Evaluate every observation against the current geometry
    ///
    /// Returns the number of callbacks fired.
    pub fn process(&mut self, time_ms: u64) -> usize {
        if self.viewport.is_none() {
            return 0;
        }

        let ready: Vec<(ObserverId, f32)> = self
            .observations
            .iter()
            .filter_map(|(id, observation)| {
                let ratio = self.visible_fraction(observation.item)?;
                observation.threshold.is_met(ratio).then_some((id, ratio))
            })
            .collect();

        self.fire(ready, time_ms)
    }

    /// Feed an externally computed visible fraction for an item
    ///
    /// Returns the number of callbacks fired.
    pub fn report(&mut self, item: ItemId, ratio: f32, time_ms: u64) -> usize {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };

        let ready: Vec<(ObserverId, f32)> = self
            .by_item
            .get(&item)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| {
                        self.observations
                            .get(*id)
                            .is_some_and(|observation| observation.threshold.is_met(ratio))
                    })
                    .map(|id| (id, ratio))
                    .collect()
            })
            .unwrap_or_default();

        self.fire(ready, time_ms)
    }

    /// Number of live observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Whether an item still has a live observation
    pub fn is_observing(&self, item: ItemId) -> bool {
        self.by_item.get(&item).is_some_and(|ids| !ids.is_empty())
    }

    fn take(&mut self, id: ObserverId) -> Option<Observation> {
        let observation = self.observations.remove(id)?;
        if let Some(ids) = self.by_item.get_mut(&observation.item) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_item.remove(&observation.item);
            }
        }
        Some(observation)
    }

    fn fire(&mut self, ready: Vec<(ObserverId, f32)>, time_ms: u64) -> usize {
        // Detach everything first so callbacks never observe a half-updated gate
        let fired: Vec<(Observation, f32)> = ready
            .into_iter()
            .filter_map(|(id, ratio)| self.take(id).map(|observation| (observation, ratio)))
            .collect();
        for (observation, _) in &fired {
            if !self.by_item.contains_key(&observation.item) {
                self.bounds.remove(&observation.item);
            }
        }

        let count = fired.len();
        for (observation, ratio) in fired {
            tracing::debug!(
                "VisibilityGate: {} became visible ({:.0}% >= {:.0}%) at {}ms",
                observation.item,
                ratio * 100.0,
                observation.threshold.value() * 100.0,
                time_ms
            );
            (observation.callback)(VisibilityEntry {
                item: observation.item,
                ratio,
                time_ms,
            });
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (
        Rc<RefCell<Vec<VisibilityEntry>>>,
        impl Fn() -> Box<dyn FnOnce(VisibilityEntry)>,
    ) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move || {
            let sink = Rc::clone(&sink);
            Box::new(move |entry: VisibilityEntry| sink.borrow_mut().push(entry))
                as Box<dyn FnOnce(VisibilityEntry)>
        };
        (log, make)
    }

    #[test]
    fn test_threshold_sanitizing() {
        assert_eq!(Threshold::new(0.5).value(), 0.5);
        assert_eq!(Threshold::new(1.5).value(), 1.0);
        assert_eq!(Threshold::new(-0.2), Threshold::IMMEDIATE);
        assert_eq!(Threshold::new(f32::NAN), Threshold::IMMEDIATE);
        assert_eq!(Threshold::from_option(None), Threshold::DEFAULT);
        assert_eq!(Threshold::from_option(Some(0.0)), Threshold::IMMEDIATE);
    }

    #[test]
    fn test_threshold_is_met() {
        let threshold = Threshold::new(0.3);
        assert!(!threshold.is_met(0.29));
        assert!(threshold.is_met(0.3));
        assert!(threshold.is_met(1.0));
        assert!(Threshold::IMMEDIATE.is_met(0.0));
    }

    #[test]
    fn test_report_fires_once() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        let item = ItemId(1);
        gate.observe(item, Threshold::new(0.3), make());

        assert_eq!(gate.report(item, 0.45, 1000), 1);
        assert_eq!(gate.report(item, 0.80, 1010), 0);

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].time_ms, 1000);
        assert!((log[0].ratio - 0.45).abs() < 1e-6);
        assert!(!gate.is_observing(item));
        assert!(gate.is_empty());
    }

    #[test]
    fn test_below_threshold_never_fires() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        let item = ItemId(1);
        gate.observe(item, Threshold::new(0.5), make());

        for (i, ratio) in [0.0, 0.1, 0.49, 0.3, 0.0].into_iter().enumerate() {
            assert_eq!(gate.report(item, ratio, i as u64 * 16), 0);
        }

        assert!(log.borrow().is_empty());
        assert!(gate.is_observing(item));
    }

    #[test]
    fn test_fluctuating_visibility_fires_once() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        let item = ItemId(3);
        gate.observe(item, Threshold::new(0.3), make());

        for (i, ratio) in [0.1, 0.5, 0.1, 0.9, 0.0, 1.0].into_iter().enumerate() {
            gate.report(item, ratio, i as u64 * 16);
        }

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].time_ms, 16);
    }

    #[test]
    fn test_process_uses_geometry() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        let item = ItemId(1);
        gate.set_bounds(item, Rect::new(0.0, 1000.0, 400.0, 200.0));
        gate.observe(item, Threshold::new(0.3), make());

        // Viewport unknown: nothing to evaluate
        assert_eq!(gate.process(0), 0);

        // 20% visible
        gate.set_viewport(Rect::new(0.0, 240.0, 1280.0, 800.0));
        assert_eq!(gate.process(16), 0);

        // 50% visible
        gate.set_viewport(Rect::new(0.0, 300.0, 1280.0, 800.0));
        assert_eq!(gate.process(32), 1);
        assert_eq!(gate.process(48), 0);

        // Nothing left to evaluate for the item
        assert!(gate.bounds(item).is_none());

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].time_ms, 32);
        assert!((log[0].ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_already_visible_at_registration() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        gate.set_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0));
        gate.set_bounds(ItemId(1), Rect::new(0.0, 0.0, 100.0, 100.0));

        gate.observe(ItemId(1), Threshold::DEFAULT, make());
        assert_eq!(gate.process(0), 1);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_items_are_independent() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        gate.observe(ItemId(1), Threshold::DEFAULT, make());
        gate.observe(ItemId(2), Threshold::DEFAULT, make());

        gate.report(ItemId(1), 1.0, 0);

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].item, ItemId(1));
        assert!(gate.is_observing(ItemId(2)));
        assert_eq!(gate.len(), 1);
    }

    #[test]
    fn test_removed_item_never_fires() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        let item = ItemId(7);
        gate.set_viewport(Rect::new(0.0, 0.0, 100.0, 100.0));
        gate.set_bounds(item, Rect::new(0.0, 0.0, 10.0, 10.0));
        gate.observe(item, Threshold::DEFAULT, make());

        assert_eq!(gate.remove_item(item), 1);
        assert_eq!(gate.process(0), 0);
        assert_eq!(gate.report(item, 1.0, 0), 0);
        assert!(log.borrow().is_empty());
        assert!(gate.bounds(item).is_none());

        // Removing again is a no-op
        assert_eq!(gate.remove_item(item), 0);
    }

    #[test]
    fn test_unobserve() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        let id = gate.observe(ItemId(1), Threshold::DEFAULT, make());

        assert!(gate.unobserve(id));
        assert!(!gate.unobserve(id));
        assert_eq!(gate.report(ItemId(1), 1.0, 0), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_multiple_observations_per_item() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        gate.observe(ItemId(1), Threshold::new(0.2), make());
        gate.observe(ItemId(1), Threshold::new(0.8), make());

        gate.set_bounds(ItemId(1), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(gate.report(ItemId(1), 0.5, 0), 1);
        assert!(gate.is_observing(ItemId(1)));
        assert!(gate.bounds(ItemId(1)).is_some());
        assert_eq!(gate.report(ItemId(1), 0.9, 10), 1);
        assert!(!gate.is_observing(ItemId(1)));
        assert!(gate.bounds(ItemId(1)).is_none());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_immediate_threshold_fires_without_overlap() {
        let (log, make) = recorder();
        let mut gate = VisibilityGate::new();
        gate.set_viewport(Rect::new(0.0, 0.0, 100.0, 100.0));
        gate.set_bounds(ItemId(1), Rect::new(0.0, 5000.0, 10.0, 10.0));
        gate.observe(ItemId(1), Threshold::IMMEDIATE, make());

        assert_eq!(gate.process(0), 1);
        assert_eq!(log.borrow()[0].ratio, 0.0);
    }

    #[test]
    fn test_clear_releases_everything() {
        let (_log, make) = recorder();
        let mut gate = VisibilityGate::new();
        gate.observe(ItemId(1), Threshold::DEFAULT, make());
        gate.observe(ItemId(2), Threshold::DEFAULT, make());
        gate.set_bounds(ItemId(1), Rect::new(0.0, 0.0, 1.0, 1.0));

        gate.clear();
        assert!(gate.is_empty());
        assert!(!gate.is_observing(ItemId(1)));
        assert!(gate.bounds(ItemId(1)).is_none());
    }
}
