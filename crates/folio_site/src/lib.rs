//! Folio Site
//!
//! The portfolio page built on the reveal engine: static content, the
//! section composer that turns it into reveal groups, page layout and the
//! [`Page`] runtime a host drives with scroll and frame ticks.
//!
//! # Example
//!
//! ```
//! use folio_site::{Page, SiteConfig};
//!
//! let mut page = Page::new(SiteConfig::default());
//! page.mount();
//!
//! let mut now = 0;
//! while !page.is_settled() && now < 10_000 {
//!     page.tick(now);
//!     page.scroll_to(now as f32);
//!     now += 16;
//! }
//! assert!(page.is_settled());
//! ```

pub mod compose;
pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod page;

pub use compose::{hero_glyphs, ContentGroup, GroupKind, SectionComposer, NBSP};
pub use config::{LayoutSettings, MotionSettings, SiteConfig, ViewportSettings, CONFIG_FILE};
pub use content::{
    About, Contact, ContactSubmission, Footer, Gallery, Hero, MailHandoff, NavLink, Navigation,
    Project, SceneEmbed, SceneSize, SiteContent, SECTION_ANCHORS,
};
pub use error::{Result, SiteError};
pub use layout::PageLayout;
pub use page::{Page, PageEvent};
