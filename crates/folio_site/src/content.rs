//! Static page content
//!
//! Everything the portfolio page shows: navigation, hero, project gallery,
//! about section, contact form and footer. The built-in content is used
//! unless `folio.toml` carries a `[content]` table.

use serde::{Deserialize, Serialize};

/// Section anchors, in page order
pub const SECTION_ANCHORS: [&str; 4] = ["home", "projects", "about", "contact"];

/// In-page or external link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    /// Anchor name for in-page links (`#projects` -> `projects`)
    pub fn anchor(&self) -> Option<&str> {
        self.href.strip_prefix('#').filter(|anchor| !anchor.is_empty())
    }
}

/// Top navigation bar
///
/// A plain link list. The mobile variant has no menu state; it is just a
/// shorter list relying on the browser's scroll-to-anchor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub brand: NavLink,
    pub links: Vec<NavLink>,
    pub call_to_action: NavLink,
    pub mobile: Vec<NavLink>,
}

impl Navigation {
    /// Every link the bar can render
    pub fn all_links(&self) -> impl Iterator<Item = &NavLink> {
        std::iter::once(&self.brand)
            .chain(self.links.iter())
            .chain(std::iter::once(&self.call_to_action))
            .chain(self.mobile.iter())
    }
}

/// How the embedded scene is sized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneSize {
    /// Fill the containing section
    #[default]
    Fill,
}

/// Opaque 3D scene embedded behind the hero
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEmbed {
    /// Scene descriptor URL handed to the viewer as-is
    pub url: String,
    #[serde(default)]
    pub size: SceneSize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    /// Headline revealed character by character
    pub name: String,
    /// Screen-reader label for the headline
    pub label: String,
    pub subtitle: String,
    pub badge: String,
    pub scene: SceneEmbed,
    pub actions: Vec<NavLink>,
    pub social: Vec<NavLink>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_link")]
    pub link: String,
}

fn default_link() -> String {
    "#".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub heading: String,
    pub blurb: String,
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub heading: String,
    pub body: String,
    pub skills_heading: String,
    pub skills: Vec<String>,
}

/// Contact form definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub heading: String,
    pub blurb: String,
    /// `mailto:` action of the form
    pub action: String,
    pub submit_label: String,
}

impl Contact {
    /// Recipient address of the `mailto:` action
    pub fn recipient(&self) -> Option<&str> {
        self.action
            .strip_prefix("mailto:")
            .filter(|address| !address.is_empty())
    }
}

/// Fields posted by the contact form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// What the platform receives for mail composition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailHandoff {
    pub action: String,
    pub content_type: &'static str,
    pub body: String,
}

impl ContactSubmission {
    /// Body encoded the way a `text/plain` form post encodes it
    pub fn to_plain_text(&self) -> String {
        format!(
            "name={}\r\nemail={}\r\nmessage={}\r\n",
            self.name, self.email, self.message
        )
    }

    /// Hand the submission to the platform's mail composer
    pub fn handoff(&self, contact: &Contact) -> MailHandoff {
        MailHandoff {
            action: contact.action.clone(),
            content_type: "text/plain",
            body: self.to_plain_text(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub owner: String,
    pub links: Vec<NavLink>,
}

impl Footer {
    pub fn copyright(&self, year: i32) -> String {
        format!("© {} {}. All rights reserved.", year, self.owner)
    }
}

/// Complete page content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub navigation: Navigation,
    pub hero: Hero,
    pub gallery: Gallery,
    pub about: About,
    pub contact: Contact,
    pub footer: Footer,
}

impl SiteContent {
    /// Every link on the page
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        self.navigation
            .all_links()
            .chain(self.hero.actions.iter())
            .chain(self.hero.social.iter())
            .chain(self.footer.links.iter())
    }

    /// In-page links whose anchor does not name a section
    pub fn dangling_anchors(&self) -> Vec<&NavLink> {
        self.links()
            .filter(|link| {
                link.anchor()
                    .is_some_and(|anchor| !SECTION_ANCHORS.contains(&anchor))
            })
            .collect()
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        let nav = |href: &str, label: &str| NavLink::new(href, label);

        Self {
            navigation: Navigation {
                brand: nav("#home", "DEV.PORTFOLIO"),
                links: vec![
                    nav("#home", "Home"),
                    nav("#projects", "Projects"),
                    nav("#about", "About"),
                    nav("#contact", "Contact"),
                ],
                call_to_action: nav("#contact", "Let’s talk"),
                mobile: vec![nav("#contact", "Contact")],
            },
            hero: Hero {
                name: "ALEX DEV".to_string(),
                label: "Alex Dev, Web Developer".to_string(),
                subtitle: "Web Developer • Interactive 3D • Motion‑first UI".to_string(),
                badge: "Available for work".to_string(),
                scene: SceneEmbed {
                    url: "https://prod.spline.design/zhZFnwyOYLgqlLWk/scene.splinecode"
                        .to_string(),
                    size: SceneSize::Fill,
                },
                actions: vec![nav("#projects", "View projects"), nav("#contact", "Contact")],
                social: vec![
                    nav("#", "GitHub"),
                    nav("#", "LinkedIn"),
                    nav("#contact", "Email"),
                ],
            },
            gallery: Gallery {
                heading: "Selected Work".to_string(),
                blurb: "Interfaces that feel alive and purposeful.".to_string(),
                projects: vec![
                    project(
                        "Interactive 3D Grid",
                        "Real‑time 3D interactions powered by Spline and WebGL.",
                        &["Spline", "WebGL", "UX"],
                    ),
                    project(
                        "Animated Landing Page",
                        "Micro‑interactions and motion‑driven storytelling.",
                        &["Framer Motion", "Accessibility"],
                    ),
                    project(
                        "E‑commerce UI Kit",
                        "Elegant components with focus on conversion.",
                        &["Design System", "Tailwind"],
                    ),
                    project(
                        "Realtime Dashboard",
                        "Live metrics, fluid charts, and dark UI.",
                        &["React", "Charts"],
                    ),
                ],
            },
            about: About {
                heading: "Crafting motion‑driven web experiences".to_string(),
                body: "I design and build modern interfaces with a focus on animation, \
                       interactivity, and performance. My work blends minimalist aesthetics \
                       with tactile feedback so every interaction feels intentional."
                    .to_string(),
                skills_heading: "Core stack".to_string(),
                skills: [
                    "React",
                    "Framer Motion",
                    "Spline",
                    "TypeScript",
                    "Tailwind",
                    "Accessibility",
                    "Node.js",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            contact: Contact {
                heading: "Let’s build something striking".to_string(),
                blurb: "Tell me about your project, timeline, and goals.".to_string(),
                action: "mailto:you@example.com".to_string(),
                submit_label: "Send message".to_string(),
            },
            footer: Footer {
                owner: "Alex Dev".to_string(),
                links: vec![
                    nav("#", "GitHub"),
                    nav("#", "LinkedIn"),
                    nav("/test", "System"),
                ],
            },
        }
    }
}

fn project(title: &str, description: &str, tags: &[&str]) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        link: default_link(),
    }
}
