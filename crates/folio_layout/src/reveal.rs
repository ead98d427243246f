//! Reveal controller
//!
//! Owns the entrance state of every item in one sequenced group and drives
//! it from visibility triggers and frame ticks.
//!
//! # State machine
//!
//! ```text
//!   Pending ──(trigger, once)──► Animating ──(offset + duration)──► Settled
//! ```
//!
//! - `Pending`: registered, waiting for its trigger (visibility or mount)
//! - `Animating`: triggered; the visual transition starts `offset` after the
//!   trigger and runs for the transition duration
//! - `Settled`: the resting keyframe has been applied
//!
//! No transition ever leads back to `Pending`. The `has_triggered` flag on
//! each [`VisibilityRecord`] is set on the first trigger and never cleared,
//! so later triggers for the same item are ignored.
//!
//! # Timing
//!
//! All times are milliseconds on the host's frame clock. Events are stamped
//! with their scheduled time (trigger time, trigger + offset, start +
//! duration), not with the tick that observed them, so results do not depend
//! on frame granularity.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_animation::StaggerConfig;
use folio_core::{AnimatableItem, ItemId};
use indexmap::IndexMap;

use crate::motion::{MotionKeyframe, RevealTransition, RevealTrigger};
use crate::visibility::{ObserverId, Threshold, VisibilityEntry, VisibilityGate};

/// Entrance state of a single item
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealState {
    /// Not triggered yet
    Pending,
    /// Triggered; the transition is delayed until `starts_at_ms`, then runs
    ///
    /// Entered at trigger time, not at `starts_at_ms`: during the stagger
    /// delay an item is already `Animating` with progress 0.0. The moment
    /// its visual transition begins is reported by [`RevealEvent::Started`].
    Animating {
        triggered_at_ms: u64,
        starts_at_ms: u64,
        /// Normalized transition progress (0.0 while delayed)
        progress: f32,
    },
    /// Resting keyframe applied
    Settled { settled_at_ms: u64 },
}

impl RevealState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RevealState::Pending)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, RevealState::Animating { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, RevealState::Settled { .. })
    }
}

/// Per-item visibility bookkeeping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityRecord {
    /// Set on the first trigger, never cleared
    pub has_triggered: bool,
    pub threshold: Threshold,
}

/// Lifecycle notifications emitted by a controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    /// Item entered `Animating`
    Triggered { item: ItemId, at_ms: u64 },
    /// Visual transition began (trigger + offset)
    Started { item: ItemId, at_ms: u64 },
    /// Item entered `Settled`
    Settled { item: ItemId, at_ms: u64 },
}

impl RevealEvent {
    pub fn item(&self) -> ItemId {
        match self {
            RevealEvent::Triggered { item, .. }
            | RevealEvent::Started { item, .. }
            | RevealEvent::Settled { item, .. } => *item,
        }
    }

    pub fn at_ms(&self) -> u64 {
        match self {
            RevealEvent::Triggered { at_ms, .. }
            | RevealEvent::Started { at_ms, .. }
            | RevealEvent::Settled { at_ms, .. } => *at_ms,
        }
    }
}

/// Configuration shared by every item of a group
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RevealConfig {
    pub trigger: RevealTrigger,
    /// Offsets between consecutive items
    pub stagger: StaggerConfig,
    /// Extra delay added to every item's offset
    pub base_delay_ms: u32,
    pub transition: RevealTransition,
}

impl RevealConfig {
    pub fn new(trigger: RevealTrigger, transition: RevealTransition) -> Self {
        Self {
            trigger,
            stagger: StaggerConfig::default(),
            base_delay_ms: 0,
            transition,
        }
    }

    pub fn stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn base_delay(mut self, delay_ms: u32) -> Self {
        self.base_delay_ms = delay_ms;
        self
    }

    /// Offset of an item within a group of `total`
    pub fn offset_for(&self, index: usize, total: usize) -> u32 {
        self.base_delay_ms.saturating_add(self.stagger.delay_for_index(index, total))
    }
}

/// Entrance bookkeeping of one registered item
#[derive(Clone, Debug)]
pub struct RevealRecord {
    item: AnimatableItem,
    offset_ms: u32,
    visibility: VisibilityRecord,
    state: RevealState,
    current: MotionKeyframe,
    observer: Option<ObserverId>,
    started: bool,
}

impl RevealRecord {
    pub fn item(&self) -> &AnimatableItem {
        &self.item
    }

    pub fn offset_ms(&self) -> u32 {
        self.offset_ms
    }

    pub fn visibility(&self) -> VisibilityRecord {
        self.visibility
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Current visual values
    pub fn values(&self) -> MotionKeyframe {
        self.current
    }

    /// Scheduled start of the visual transition, once triggered
    pub fn starts_at_ms(&self) -> Option<u64> {
        match self.state {
            RevealState::Animating { starts_at_ms, .. } => Some(starts_at_ms),
            _ => None,
        }
    }

    fn apply_settled(&mut self, at_ms: u64) {
        self.current.settle();
        self.state = RevealState::Settled {
            settled_at_ms: at_ms,
        };
    }
}

type TriggerQueue = Rc<RefCell<Vec<VisibilityEntry>>>;

/// Drives the entrance of one sequenced group
///
/// # Example
///
/// ```
/// use folio_core::{AnimatableItem, ItemId, Payload};
/// use folio_layout::{RevealConfig, RevealController, RevealTransition, RevealTrigger};
/// use folio_layout::{Threshold, VisibilityGate};
/// use folio_animation::{Easing, StaggerConfig};
///
/// let mut gate = VisibilityGate::new();
/// let config = RevealConfig::new(
///     RevealTrigger::InView(Threshold::DEFAULT),
///     RevealTransition::rise(24.0, 300, Easing::EaseOutCubic),
/// )
/// .stagger(StaggerConfig::new(50));
/// let mut cards = RevealController::new("projects", config);
///
/// let item = AnimatableItem::new(ItemId(1), 0, Payload::Tag("Rust".into()));
/// cards.register(&mut gate, item, 0);
///
/// gate.report(ItemId(1), 0.5, 1_000);
/// cards.tick(1_000);
/// assert!(cards.state(ItemId(1)).unwrap().is_animating());
///
/// cards.tick(1_300);
/// assert!(cards.state(ItemId(1)).unwrap().is_settled());
/// ```
pub struct RevealController {
    name: String,
    config: RevealConfig,
    records: IndexMap<ItemId, RevealRecord>,
    triggers: TriggerQueue,
    events: Vec<RevealEvent>,
}

impl RevealController {
    pub fn new(name: impl Into<String>, config: RevealConfig) -> Self {
        Self {
            name: name.into(),
            config,
            records: IndexMap::new(),
            triggers: Rc::new(RefCell::new(Vec::new())),
            events: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Register an item with an explicit schedule offset
    ///
    /// Creates a `Pending` record and, for in-view groups, starts observing
    /// the item. Registering an id twice is a no-op and returns false.
    pub fn register(
        &mut self,
        gate: &mut VisibilityGate,
        item: AnimatableItem,
        offset_ms: u32,
    ) -> bool {
        let id = item.id();
        if self.records.contains_key(&id) {
            return false;
        }

        let threshold = self.config.trigger.threshold();
        let observer = match self.config.trigger {
            RevealTrigger::OnMount => None,
            RevealTrigger::InView(threshold) => {
                let queue: Weak<RefCell<Vec<VisibilityEntry>>> = Rc::downgrade(&self.triggers);
                Some(gate.observe(id, threshold, move |entry| {
                    // Controller may be gone by the time the gate fires
                    if let Some(queue) = queue.upgrade() {
                        queue.borrow_mut().push(entry);
                    }
                }))
            }
        };

        tracing::trace!(
            "RevealController[{}]: registered {} (index {}, offset {}ms)",
            self.name,
            id,
            item.index(),
            offset_ms
        );

        self.records.insert(
            id,
            RevealRecord {
                item,
                offset_ms,
                visibility: VisibilityRecord {
                    has_triggered: false,
                    threshold,
                },
                state: RevealState::Pending,
                current: self.config.transition.from,
                observer,
                started: false,
            },
        );
        true
    }

    /// Register a whole group, offsets computed from the stagger config
    ///
    /// Returns the number of newly registered items.
    pub fn register_group<I>(&mut self, gate: &mut VisibilityGate, items: I) -> usize
    where
        I: IntoIterator<Item = AnimatableItem>,
    {
        let items: Vec<AnimatableItem> = items.into_iter().collect();
        let total = items.len();
        let mut registered = 0;
        for item in items {
            let offset = self.config.offset_for(item.index(), total);
            if self.register(gate, item, offset) {
                registered += 1;
            }
        }
        registered
    }

    /// Stop tracking an item and release its observation
    ///
    /// Unknown items are a no-op.
    pub fn unregister(&mut self, gate: &mut VisibilityGate, item: ItemId) -> bool {
        let Some(record) = self.records.shift_remove(&item) else {
            return false;
        };
        if let Some(observer) = record.observer {
            gate.unobserve(observer);
        }
        self.triggers.borrow_mut().retain(|entry| entry.item != item);
        true
    }

    /// Unregister every item (section unmount)
    pub fn teardown(&mut self, gate: &mut VisibilityGate) {
        let released = self
            .records
            .values()
            .filter_map(|record| record.observer)
            .filter(|observer| gate.unobserve(*observer))
            .count();
        tracing::debug!(
            "RevealController[{}]: teardown, {} item(s), {} pending observation(s) released",
            self.name,
            self.records.len(),
            released
        );
        self.records.clear();
        self.triggers.borrow_mut().clear();
    }

    /// Advance the group to `now_ms`
    ///
    /// Applies queued visibility triggers (and mount triggers), then moves
    /// animating items forward. Returns true while any item is animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if matches!(self.config.trigger, RevealTrigger::OnMount) {
            let pending: Vec<ItemId> = self
                .records
                .values()
                .filter(|record| !record.visibility.has_triggered)
                .map(|record| record.item.id())
                .collect();
            for id in pending {
                self.trigger(id, now_ms);
            }
        }

        let queued = std::mem::take(&mut *self.triggers.borrow_mut());
        for entry in queued {
            self.trigger(entry.item, entry.time_ms);
        }

        let transition = self.config.transition;
        let mut active = false;
        for record in self.records.values_mut() {
            if Self::advance(record, &transition, now_ms, &mut self.events) {
                active = true;
            }
        }
        active
    }

    fn trigger(&mut self, item: ItemId, at_ms: u64) {
        let Some(record) = self.records.get_mut(&item) else {
            return;
        };
        if record.visibility.has_triggered {
            return;
        }

        record.visibility.has_triggered = true;
        record.observer = None;
        let starts_at_ms = at_ms.saturating_add(u64::from(record.offset_ms));
        record.state = RevealState::Animating {
            triggered_at_ms: at_ms,
            starts_at_ms,
            progress: 0.0,
        };

        tracing::debug!(
            "RevealController[{}]: {} triggered at {}ms, starts at {}ms",
            self.name,
            item,
            at_ms,
            starts_at_ms
        );
        self.events.push(RevealEvent::Triggered { item, at_ms });
    }

    /// Returns true while the record is still animating
    fn advance(
        record: &mut RevealRecord,
        transition: &RevealTransition,
        now_ms: u64,
        events: &mut Vec<RevealEvent>,
    ) -> bool {
        let RevealState::Animating {
            triggered_at_ms,
            starts_at_ms,
            ..
        } = record.state
        else {
            return false;
        };
        if now_ms < starts_at_ms {
            return true;
        }

        let id = record.item.id();
        if !record.started {
            record.started = true;
            events.push(RevealEvent::Started {
                item: id,
                at_ms: starts_at_ms,
            });
        }

        let elapsed = now_ms - starts_at_ms;
        let duration = u64::from(transition.duration_ms);
        if elapsed >= duration {
            let settled_at_ms = starts_at_ms.saturating_add(duration);
            record.apply_settled(settled_at_ms);
            events.push(RevealEvent::Settled {
                item: id,
                at_ms: settled_at_ms,
            });
            tracing::trace!("RevealController: {} settled at {}ms", id, settled_at_ms);
            return false;
        }

        let progress = elapsed as f32 / duration as f32;
        record.current = transition.value_at(progress);
        record.state = RevealState::Animating {
            triggered_at_ms,
            starts_at_ms,
            progress,
        };
        true
    }

    /// Take the events emitted since the last call
    pub fn take_events(&mut self) -> Vec<RevealEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn record(&self, item: ItemId) -> Option<&RevealRecord> {
        self.records.get(&item)
    }

    /// Records in registration order
    pub fn records(&self) -> impl Iterator<Item = &RevealRecord> {
        self.records.values()
    }

    pub fn state(&self, item: ItemId) -> Option<RevealState> {
        self.records.get(&item).map(|record| record.state)
    }

    /// Current visual values of an item
    pub fn values(&self, item: ItemId) -> Option<MotionKeyframe> {
        self.records.get(&item).map(|record| record.current)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any item is animating
    pub fn has_active(&self) -> bool {
        self.records.values().any(|record| record.state.is_animating())
    }

    /// Whether every item has settled
    pub fn is_settled(&self) -> bool {
        self.records.values().all(|record| record.state.is_settled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::Easing;
    use folio_core::{Payload, Rect};

    fn cards(count: usize) -> Vec<AnimatableItem> {
        (0..count)
            .map(|i| {
                AnimatableItem::new(
                    ItemId(i as u64 + 1),
                    i,
                    Payload::Card {
                        title: format!("Card {}", i),
                    },
                )
            })
            .collect()
    }

    fn card_config() -> RevealConfig {
        RevealConfig::new(
            RevealTrigger::InView(Threshold::new(0.3)),
            RevealTransition::rise(24.0, 300, Easing::EaseOutCubic),
        )
        .stagger(StaggerConfig::new(50))
    }

    #[test]
    fn test_register_creates_pending_records() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());

        assert_eq!(controller.register_group(&mut gate, cards(4)), 4);
        assert_eq!(gate.len(), 4);

        for record in controller.records() {
            assert_eq!(record.state(), RevealState::Pending);
            assert!(!record.visibility().has_triggered);
            assert_eq!(record.values(), MotionKeyframe::rise(24.0));
        }
        let offsets: Vec<u32> = controller.records().map(|r| r.offset_ms()).collect();
        assert_eq!(offsets, vec![0, 50, 100, 150]);
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        let item = cards(1).remove(0);

        assert!(controller.register(&mut gate, item.clone(), 0));
        assert!(!controller.register(&mut gate, item, 500));
        assert_eq!(gate.len(), 1);
        assert_eq!(controller.record(ItemId(1)).unwrap().offset_ms(), 0);
    }

    #[test]
    fn test_group_starts_are_staggered() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(4));

        let t = 2_000;
        for id in 1..=4 {
            gate.report(ItemId(id), 0.6, t);
        }
        controller.tick(t + 1_000);

        let started: Vec<u64> = controller
            .take_events()
            .into_iter()
            .filter_map(|event| match event {
                RevealEvent::Started { at_ms, .. } => Some(at_ms),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![t, t + 50, t + 100, t + 150]);
    }

    #[test]
    fn test_state_progression() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(2));

        gate.report(ItemId(2), 1.0, 100);
        controller.tick(100);

        // Second card: triggered, delayed by 50ms
        match controller.state(ItemId(2)).unwrap() {
            RevealState::Animating {
                triggered_at_ms,
                starts_at_ms,
                progress,
            } => {
                assert_eq!(triggered_at_ms, 100);
                assert_eq!(starts_at_ms, 150);
                assert_eq!(progress, 0.0);
            }
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(controller.values(ItemId(2)), Some(MotionKeyframe::rise(24.0)));

        // Halfway through the transition
        controller.tick(300);
        let mid = controller.values(ItemId(2)).unwrap();
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.translate_y > 0.0 && mid.translate_y < 24.0);

        controller.tick(450);
        assert_eq!(
            controller.state(ItemId(2)),
            Some(RevealState::Settled { settled_at_ms: 450 })
        );
        assert_eq!(controller.values(ItemId(2)), Some(MotionKeyframe::SETTLED));

        // First card never became visible
        assert_eq!(controller.state(ItemId(1)), Some(RevealState::Pending));
        assert!(!controller.is_settled());
    }

    #[test]
    fn test_trigger_is_at_most_once() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(1));

        gate.report(ItemId(1), 0.5, 0);
        controller.tick(0);
        controller.tick(1_000);
        assert!(controller.state(ItemId(1)).unwrap().is_settled());

        // Scroll away and back: the gate no longer observes the item
        assert_eq!(gate.report(ItemId(1), 0.0, 1_100), 0);
        assert_eq!(gate.report(ItemId(1), 1.0, 1_200), 0);

        // A stray trigger is ignored as well
        controller.trigger(ItemId(1), 1_300);
        controller.tick(1_300);
        assert!(controller.state(ItemId(1)).unwrap().is_settled());

        let triggered = controller
            .take_events()
            .iter()
            .filter(|event| matches!(event, RevealEvent::Triggered { .. }))
            .count();
        assert_eq!(triggered, 1);
    }

    #[test]
    fn test_apply_settled_is_idempotent() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(1));
        let mut record = controller.record(ItemId(1)).unwrap().clone();

        record.apply_settled(500);
        let once = (record.state(), record.values());
        record.apply_settled(500);
        let twice = (record.state(), record.values());

        assert_eq!(once, twice);
        assert!(record.values().is_settled());
    }

    #[test]
    fn test_coarse_ticks_emit_every_stage() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(1));

        gate.report(ItemId(1), 1.0, 10);
        assert!(!controller.tick(5_000));

        assert_eq!(
            controller.take_events(),
            vec![
                RevealEvent::Triggered {
                    item: ItemId(1),
                    at_ms: 10
                },
                RevealEvent::Started {
                    item: ItemId(1),
                    at_ms: 10
                },
                RevealEvent::Settled {
                    item: ItemId(1),
                    at_ms: 310
                },
            ]
        );
    }

    #[test]
    fn test_zero_duration_settles_at_start() {
        let mut gate = VisibilityGate::new();
        let config = RevealConfig::new(
            RevealTrigger::InView(Threshold::DEFAULT),
            RevealTransition::fade(0, Easing::Linear),
        );
        let mut controller = RevealController::new("tags", config);
        controller.register_group(&mut gate, cards(1));

        gate.report(ItemId(1), 1.0, 40);
        controller.tick(40);
        assert_eq!(
            controller.state(ItemId(1)),
            Some(RevealState::Settled { settled_at_ms: 40 })
        );
    }

    #[test]
    fn test_on_mount_triggers_on_first_tick() {
        let mut gate = VisibilityGate::new();
        let config = RevealConfig::new(
            RevealTrigger::OnMount,
            RevealTransition::rise(40.0, 500, Easing::spring(500, 0.1)),
        )
        .stagger(StaggerConfig::new(50));
        let mut controller = RevealController::new("hero", config);
        controller.register_group(&mut gate, cards(3));

        // Mount-triggered groups never touch the gate
        assert!(gate.is_empty());

        controller.tick(16);
        let starts: Vec<Option<u64>> = controller.records().map(|r| r.starts_at_ms()).collect();
        assert_eq!(starts, vec![Some(16), Some(66), Some(116)]);
        for record in controller.records() {
            assert!(record.visibility().has_triggered);
            assert_eq!(record.visibility().threshold, Threshold::IMMEDIATE);
        }

        controller.tick(1_000);
        assert!(controller.is_settled());
    }

    #[test]
    fn test_base_delay_adds_to_offsets() {
        let config = card_config().base_delay(800);
        assert_eq!(config.offset_for(0, 4), 800);
        assert_eq!(config.offset_for(3, 4), 950);
    }

    #[test]
    fn test_unregister_releases_observer() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(2));

        assert!(controller.unregister(&mut gate, ItemId(1)));
        assert!(!gate.is_observing(ItemId(1)));
        assert_eq!(gate.len(), 1);

        // Unknown / already removed: no-op
        assert!(!controller.unregister(&mut gate, ItemId(1)));
        assert!(!controller.unregister(&mut gate, ItemId(99)));
    }

    #[test]
    fn test_unregister_drops_queued_trigger() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(1));

        gate.report(ItemId(1), 1.0, 0);
        controller.unregister(&mut gate, ItemId(1));
        controller.tick(0);

        assert!(controller.take_events().is_empty());
        assert!(controller.is_empty());
    }

    #[test]
    fn test_teardown_releases_all_observers() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        controller.register_group(&mut gate, cards(4));
        gate.report(ItemId(1), 1.0, 0);

        controller.teardown(&mut gate);
        assert!(gate.is_empty());
        assert!(controller.is_empty());
        assert!(!controller.tick(100));
    }

    #[test]
    fn test_gate_outliving_controller() {
        let mut gate = VisibilityGate::new();
        {
            let mut controller = RevealController::new("projects", card_config());
            controller.register_group(&mut gate, cards(1));
        }

        // Callback holds a weak queue handle; firing after drop is harmless
        assert_eq!(gate.report(ItemId(1), 1.0, 0), 1);
    }

    #[test]
    fn test_geometry_driven_reveal() {
        let mut gate = VisibilityGate::new();
        let mut controller = RevealController::new("projects", card_config());
        let items = cards(2);
        gate.set_bounds(ItemId(1), Rect::new(0.0, 900.0, 400.0, 300.0));
        gate.set_bounds(ItemId(2), Rect::new(0.0, 1300.0, 400.0, 300.0));
        controller.register_group(&mut gate, items);

        gate.set_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0));
        gate.process(0);
        controller.tick(0);
        assert!(controller.state(ItemId(1)).unwrap().is_pending());

        // Card 1 is 2/3 visible, card 2 not at all
        gate.set_viewport(Rect::new(0.0, 300.0, 1280.0, 800.0));
        gate.process(500);
        controller.tick(500);
        assert!(controller.state(ItemId(1)).unwrap().is_animating());
        assert!(controller.state(ItemId(2)).unwrap().is_pending());
    }
}
