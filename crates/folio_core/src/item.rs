//! Animatable items
//!
//! An [`AnimatableItem`] is one renderable unit inside a content group. Its
//! index within the group decides where it lands in the stagger sequence.
//! Items are immutable once built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identity of an item for the lifetime of a page
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generator for unique item IDs
#[derive(Debug)]
pub struct ItemIdGenerator {
    next: u64,
}

impl ItemIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        id
    }
}

impl Default for ItemIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual payload of an item
///
/// The reveal machinery never looks inside a payload; it is carried along so
/// a renderer knows what to draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// A single glyph of a headline
    Glyph(char),
    /// A run of text (subtitle, paragraph)
    Text(String),
    /// A project card, identified by its title
    Card { title: String },
    /// A pill-shaped tag
    Tag(String),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Glyph(c) => write!(f, "'{}'", c),
            Payload::Text(text) => write!(f, "\"{}\"", text),
            Payload::Card { title } => write!(f, "card \"{}\"", title),
            Payload::Tag(label) => write!(f, "tag \"{}\"", label),
        }
    }
}

/// One member of a sequenced content group
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatableItem {
    id: ItemId,
    index: usize,
    payload: Payload,
}

impl AnimatableItem {
    pub fn new(id: ItemId, index: usize, payload: Payload) -> Self {
        Self { id, index, payload }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Position within the owning group
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
