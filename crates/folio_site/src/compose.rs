//! Section composer
//!
//! Turns static content into ordered item groups, one per semantic section,
//! and wires every non-empty group to its own [`RevealController`].

use std::fmt;

use folio_animation::{Easing, StaggerConfig};
use folio_core::{AnimatableItem, ItemIdGenerator, Payload};
use folio_layout::{
    RevealConfig, RevealController, RevealTransition, RevealTrigger, Threshold, VisibilityGate,
};

use crate::config::MotionSettings;
use crate::content::SiteContent;

/// Non-breaking space, keeps the width of a blank headline character
pub const NBSP: char = '\u{00A0}';

/// Semantic group of revealed items
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Hero headline, one item per character
    HeroTitle,
    /// Hero tagline under the headline
    HeroSubtitle,
    /// Project gallery cards
    Projects,
    /// Skill tags in the about section
    Skills,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [
        GroupKind::HeroTitle,
        GroupKind::HeroSubtitle,
        GroupKind::Projects,
        GroupKind::Skills,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::HeroTitle => "hero-title",
            GroupKind::HeroSubtitle => "hero-subtitle",
            GroupKind::Projects => "projects",
            GroupKind::Skills => "skills",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Reveal configuration of this group
    pub fn reveal_config(&self, motion: &MotionSettings) -> RevealConfig {
        let in_view = RevealTrigger::InView(Threshold::from_option(motion.threshold));

        match self {
            GroupKind::HeroTitle => RevealConfig::new(
                RevealTrigger::OnMount,
                RevealTransition::rise(
                    motion.char_rise_px,
                    motion.char_duration_ms,
                    Easing::spring(motion.char_duration_ms, motion.char_bounce),
                ),
            )
            .stagger(StaggerConfig::new(motion.char_step_ms)),
            GroupKind::HeroSubtitle => RevealConfig::new(
                RevealTrigger::OnMount,
                RevealTransition::fade(motion.subtitle_duration_ms, Easing::EaseOutCubic),
            )
            .base_delay(motion.subtitle_delay_ms),
            GroupKind::Projects => RevealConfig::new(
                in_view,
                RevealTransition::rise(
                    motion.card_rise_px,
                    motion.card_duration_ms,
                    Easing::EaseOutCubic,
                ),
            )
            .stagger(StaggerConfig::new(motion.card_step_ms).with_direction(motion.card_order)),
            GroupKind::Skills => RevealConfig::new(
                in_view,
                RevealTransition::fade(motion.card_duration_ms, Easing::EaseOutCubic),
            )
            .stagger(StaggerConfig::new(motion.skill_step_ms)),
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered items of one section plus the way they reveal
#[derive(Clone, Debug)]
pub struct ContentGroup {
    pub kind: GroupKind,
    pub items: Vec<AnimatableItem>,
    pub config: RevealConfig,
}

impl ContentGroup {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Schedule offset of every item, in item order
    pub fn offsets(&self) -> Vec<u32> {
        let total = self.items.len();
        self.items
            .iter()
            .map(|item| self.config.offset_for(item.index(), total))
            .collect()
    }
}

/// Split a headline into glyph payloads
///
/// Spaces become non-breaking spaces so they keep their width when every
/// character is its own inline box.
pub fn hero_glyphs(name: &str) -> Vec<Payload> {
    name.chars()
        .map(|c| if c == ' ' { NBSP } else { c })
        .map(Payload::Glyph)
        .collect()
}

/// Builds content groups with page-unique item ids
#[derive(Debug, Default)]
pub struct SectionComposer {
    ids: ItemIdGenerator,
}

impl SectionComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every group of the page, in page order
    pub fn compose(&mut self, content: &SiteContent, motion: &MotionSettings) -> Vec<ContentGroup> {
        let subtitle = if content.hero.subtitle.is_empty() {
            Vec::new()
        } else {
            vec![Payload::Text(content.hero.subtitle.clone())]
        };
        let cards = content
            .gallery
            .projects
            .iter()
            .map(|project| Payload::Card {
                title: project.title.clone(),
            })
            .collect();
        let tags = content
            .about
            .skills
            .iter()
            .map(|skill| Payload::Tag(skill.clone()))
            .collect();

        vec![
            self.group(GroupKind::HeroTitle, hero_glyphs(&content.hero.name), motion),
            self.group(GroupKind::HeroSubtitle, subtitle, motion),
            self.group(GroupKind::Projects, cards, motion),
            self.group(GroupKind::Skills, tags, motion),
        ]
    }

    fn group(
        &mut self,
        kind: GroupKind,
        payloads: Vec<Payload>,
        motion: &MotionSettings,
    ) -> ContentGroup {
        let items = payloads
            .into_iter()
            .enumerate()
            .map(|(index, payload)| AnimatableItem::new(self.ids.next(), index, payload))
            .collect();

        ContentGroup {
            kind,
            items,
            config: kind.reveal_config(motion),
        }
    }

    /// Create one controller per non-empty group and register its items
    pub fn wire(groups: &[ContentGroup], gate: &mut VisibilityGate) -> Vec<RevealController> {
        groups
            .iter()
            .filter(|group| {
                if group.is_empty() {
                    tracing::debug!("Composer: {} is empty, no controller", group.kind);
                }
                !group.is_empty()
            })
            .map(|group| {
                let mut controller = RevealController::new(group.kind.name(), group.config);
                let registered = controller.register_group(gate, group.items.iter().cloned());
                tracing::debug!("Composer: wired {} with {} item(s)", group.kind, registered);
                controller
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hero_glyphs() {
        let glyphs = hero_glyphs("ALEX DEV");

        assert_eq!(glyphs.len(), 8);
        assert_eq!(glyphs[0], Payload::Glyph('A'));
        assert_eq!(glyphs[4], Payload::Glyph(NBSP));
        assert_eq!(glyphs[7], Payload::Glyph('V'));
    }

    #[test]
    fn test_compose_default_page() {
        let content = SiteContent::default();
        let groups = SectionComposer::new().compose(&content, &MotionSettings::default());

        let kinds: Vec<GroupKind> = groups.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, GroupKind::ALL.to_vec());

        let sizes: Vec<usize> = groups.iter().map(|g| g.items.len()).collect();
        assert_eq!(sizes, vec![8, 1, 4, 7]);

        for group in &groups {
            for (position, item) in group.items.iter().enumerate() {
                assert_eq!(item.index(), position);
            }
        }
    }

    #[test]
    fn test_item_ids_are_page_unique() {
        let content = SiteContent::default();
        let groups = SectionComposer::new().compose(&content, &MotionSettings::default());

        let ids: HashSet<_> = groups
            .iter()
            .flat_map(|g| g.items.iter().map(|item| item.id()))
            .collect();
        assert_eq!(ids.len(), 8 + 1 + 4 + 7);
    }

    #[test]
    fn test_group_offsets() {
        let content = SiteContent::default();
        let groups = SectionComposer::new().compose(&content, &MotionSettings::default());

        assert_eq!(groups[0].offsets(), vec![0, 50, 100, 150, 200, 250, 300, 350]);
        assert_eq!(groups[1].offsets(), vec![800]);
        assert_eq!(groups[2].offsets(), vec![0, 50, 100, 150]);
    }

    #[test]
    fn test_trigger_kinds() {
        let motion = MotionSettings::default();

        assert_eq!(
            GroupKind::HeroTitle.reveal_config(&motion).trigger,
            RevealTrigger::OnMount
        );
        assert_eq!(
            GroupKind::Projects.reveal_config(&motion).trigger,
            RevealTrigger::InView(Threshold::new(0.3))
        );
    }

    #[test]
    fn test_empty_groups_get_no_controller() {
        let mut content = SiteContent::default();
        content.gallery.projects.clear();
        content.hero.subtitle.clear();

        let groups = SectionComposer::new().compose(&content, &MotionSettings::default());
        let mut gate = VisibilityGate::new();
        let controllers = SectionComposer::wire(&groups, &mut gate);

        let names: Vec<&str> = controllers.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["hero-title", "skills"]);
        // Only the in-view skills group observes the gate
        assert_eq!(gate.len(), 7);
    }
}
