//! Page layout
//!
//! A fixed, single-column flow: hero, project grid, about, contact, footer.
//! Bounds are page coordinates in px; the visibility gate compares them
//! against the scrolled viewport.

use folio_core::{ItemId, Payload, Rect};
use indexmap::IndexMap;

use crate::compose::{ContentGroup, GroupKind};
use crate::config::{LayoutSettings, ViewportSettings};

const MAX_CONTENT_WIDTH: f32 = 1152.0;
const GUTTER: f32 = 24.0;
const GRID_GAP: f32 = 24.0;
const SECTION_HEADER: f32 = 120.0;

const GLYPH_WIDTH: f32 = 48.0;
const GLYPH_HEIGHT: f32 = 80.0;
const SUBTITLE_HEIGHT: f32 = 32.0;

const TAG_GAP: f32 = 8.0;
const TAG_PADDING: f32 = 16.0;
const TAG_CHAR_WIDTH: f32 = 9.0;
const ABOUT_TEXT_HEIGHT: f32 = 240.0;

const CONTACT_HEIGHT: f32 = 600.0;
const FOOTER_HEIGHT: f32 = 120.0;

/// Laid-out page
#[derive(Clone, Debug)]
pub struct PageLayout {
    width: f32,
    height: f32,
    sections: IndexMap<&'static str, Rect>,
    items: IndexMap<ItemId, Rect>,
}

impl PageLayout {
    /// Lay out every group for a viewport
    pub fn compute(
        groups: &[ContentGroup],
        viewport: &ViewportSettings,
        layout: &LayoutSettings,
    ) -> Self {
        let width = viewport.width.max(0.0);
        let content_width = (width - 2.0 * GUTTER).clamp(0.0, MAX_CONTENT_WIDTH);
        let left = (width - content_width) / 2.0;

        let mut page = Self {
            width,
            height: 0.0,
            sections: IndexMap::new(),
            items: IndexMap::new(),
        };

        let hero_height = viewport.height.max(0.0);
        page.section("home", hero_height);
        for group in groups {
            match group.kind {
                GroupKind::HeroTitle => page.hero_title(group, hero_height),
                GroupKind::HeroSubtitle => {
                    page.hero_subtitle(group, hero_height, left, content_width)
                }
                _ => {}
            }
        }

        let projects = groups.iter().find(|g| g.kind == GroupKind::Projects);
        let projects_height = page.project_grid(projects, layout, left, content_width);
        page.section("projects", projects_height);

        let skills = groups.iter().find(|g| g.kind == GroupKind::Skills);
        let about_height = page.skill_tags(skills, layout, left, content_width);
        page.section("about", about_height);

        page.section("contact", CONTACT_HEIGHT);
        page.section("footer", FOOTER_HEIGHT);

        tracing::debug!(
            "PageLayout: {}x{} page, {} item(s)",
            page.width,
            page.height,
            page.items.len()
        );
        page
    }

    fn section(&mut self, anchor: &'static str, height: f32) {
        self.sections
            .insert(anchor, Rect::new(0.0, self.height, self.width, height));
        self.height += height;
    }

    /// Headline glyphs in one centered row
    fn hero_title(&mut self, group: &ContentGroup, hero_height: f32) {
        let row_width = group.items.len() as f32 * GLYPH_WIDTH;
        let x = (self.width - row_width) / 2.0;
        let y = hero_height * 0.4 - GLYPH_HEIGHT / 2.0;
        for item in &group.items {
            let bounds = Rect::new(
                x + item.index() as f32 * GLYPH_WIDTH,
                y,
                GLYPH_WIDTH,
                GLYPH_HEIGHT,
            );
            self.items.insert(item.id(), bounds);
        }
    }

    fn hero_subtitle(&mut self, group: &ContentGroup, hero_height: f32, left: f32, width: f32) {
        let y = hero_height * 0.4 + GLYPH_HEIGHT / 2.0 + GUTTER;
        for item in &group.items {
            self.items
                .insert(item.id(), Rect::new(left, y, width, SUBTITLE_HEIGHT));
        }
    }

    /// Cards in a `columns`-wide grid; returns the section height
    fn project_grid(
        &mut self,
        group: Option<&ContentGroup>,
        layout: &LayoutSettings,
        left: f32,
        width: f32,
    ) -> f32 {
        let columns = layout.columns.max(1);
        let count = group.map_or(0, |g| g.items.len());
        let rows = count.div_ceil(columns);
        let card_width = ((width - GRID_GAP * (columns - 1) as f32) / columns as f32).max(0.0);
        let top = self.height + layout.section_padding + SECTION_HEADER;

        if let Some(group) = group {
            for item in &group.items {
                let column = item.index() % columns;
                let row = item.index() / columns;
                let bounds = Rect::new(
                    left + column as f32 * (card_width + GRID_GAP),
                    top + row as f32 * (layout.card_height + GRID_GAP),
                    card_width,
                    layout.card_height,
                );
                self.items.insert(item.id(), bounds);
            }
        }

        let grid_height = if rows == 0 {
            0.0
        } else {
            rows as f32 * layout.card_height + (rows - 1) as f32 * GRID_GAP
        };
        2.0 * layout.section_padding + SECTION_HEADER + grid_height
    }

    /// Tags wrapping in the right half; returns the section height
    fn skill_tags(
        &mut self,
        group: Option<&ContentGroup>,
        layout: &LayoutSettings,
        left: f32,
        width: f32,
    ) -> f32 {
        let column_left = left + width / 2.0;
        let column_width = width / 2.0;
        let top = self.height + layout.section_padding + SECTION_HEADER / 2.0;

        let mut x = 0.0;
        let mut y = 0.0;
        let mut used = 0.0;
        if let Some(group) = group {
            for item in &group.items {
                let tag_width = tag_width(item.payload()).min(column_width);
                if x > 0.0 && x + tag_width > column_width {
                    x = 0.0;
                    y += layout.skill_height + TAG_GAP;
                }
                let bounds = Rect::new(column_left + x, top + y, tag_width, layout.skill_height);
                self.items.insert(item.id(), bounds);
                x += tag_width + TAG_GAP;
                used = y + layout.skill_height;
            }
        }

        let column_height = (SECTION_HEADER / 2.0 + used).max(ABOUT_TEXT_HEIGHT);
        2.0 * layout.section_padding + column_height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Total page height
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self, item: ItemId) -> Option<Rect> {
        self.items.get(&item).copied()
    }

    /// Section rect by anchor (`home`, `projects`, `about`, `contact`, `footer`)
    pub fn section_bounds(&self, anchor: &str) -> Option<Rect> {
        self.sections.get(anchor).copied()
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, Rect)> + '_ {
        self.items.iter().map(|(id, rect)| (*id, *rect))
    }

    /// Largest scroll offset for a viewport of `viewport_height`
    pub fn max_scroll(&self, viewport_height: f32) -> f32 {
        (self.height - viewport_height).max(0.0)
    }
}

fn tag_width(payload: &Payload) -> f32 {
    let chars = match payload {
        Payload::Tag(text) | Payload::Text(text) => text.chars().count(),
        Payload::Card { title } => title.chars().count(),
        Payload::Glyph(_) => 1,
    };
    TAG_PADDING * 2.0 + chars as f32 * TAG_CHAR_WIDTH
}
