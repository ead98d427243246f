//! Text rendering of page content for the terminal

use folio_site::{MailHandoff, SiteContent};

/// Contact form target and footer line, as printed by `folio content`
pub fn page_chrome(content: &SiteContent, year: i32) -> Vec<String> {
    let contact = &content.contact;
    let target = match contact.recipient() {
        Some(recipient) => format!("contact form -> {} ({})", recipient, contact.action),
        None => format!("contact form -> {} (no mailto recipient)", contact.action),
    };
    vec![target, format!("footer: {}", content.footer.copyright(year))]
}

/// Handoff rendered the way the platform's mail composer receives it
pub fn handoff(handoff: &MailHandoff) -> String {
    format!(
        "Action: {}\nContent-Type: {}\n\n{}",
        handoff.action, handoff.content_type, handoff.body
    )
}
