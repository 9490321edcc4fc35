//! Typed binding to the page's DOM contract.
//!
//! The page markup is parsed once and every element the controller relies on
//! is looked up here. Required elements that are missing fail the bind with
//! [`Error::Binding`]; optional enhancements (project cards, animated
//! blocks, the typing target, images) are recorded when present.

use crate::form::Field;
use crate::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Elements looked up by id that must exist
pub const REQUIRED_IDS: [&str; 5] = ["navbar", "nav-menu", "hamburger", "contactForm", "backToTop"];

/// Selector for blocks that fade in when scrolled into view
pub const ANIMATED_SELECTOR: &str = ".project-card, .about-text, .contact-info, .contact-form";

/// Selector of the headline the typing effect writes into
pub const TYPING_SELECTOR: &str = ".home-text h2";

/// Images that get a generated card when they have no source:
/// (selector, label, colour)
pub const FALLBACK_IMAGES: [(&str, &str, &str); 7] = [
    ("#profile-img", "Profile Photo", "#667eea"),
    ("img[alt=\"E-Commerce Website\"]", "E-Commerce Project", "#ff6b6b"),
    ("img[alt=\"Task Management App\"]", "Task Manager", "#4ecdc4"),
    ("img[alt=\"Weather App\"]", "Weather App", "#45b7d1"),
    ("img[alt=\"Student Management System\"]", "Student System", "#f9ca24"),
    ("img[alt=\"Algorithm Visualizer\"]", "Algorithm Viz", "#6c5ce7"),
    ("img[alt=\"Portfolio Website\"]", "Portfolio", "#a29bfe"),
];

/// A `.nav-link` pointing at a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Target section id, without the leading `#`
    pub target: String,
}

/// A contact form `.form-group`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormGroupBinding {
    pub field: Field,
    /// Whether the group has an `.error-message` element
    pub has_error_slot: bool,
}

/// Content of a `.project-card`, as shown in its modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
}

/// An image from [`FALLBACK_IMAGES`] that exists in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub selector: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    /// Whether the element already has a non-empty `src`
    pub has_source: bool,
}

/// The validated view of the page the controller is built on
#[derive(Debug, Clone, PartialEq)]
pub struct PageBinding {
    pub nav_links: Vec<NavLink>,
    /// Index into `nav_links` of the link forced active near the top
    pub home_link: usize,
    /// `section[id]` ids in document order
    pub sections: Vec<String>,
    /// Form groups in form order (name, email, subject, message)
    pub form_groups: [FormGroupBinding; 4],
    pub projects: Vec<ProjectCard>,
    /// Class that matched each animated block, in document order
    pub animated: Vec<String>,
    pub has_typing_target: bool,
    pub images: Vec<ImageSlot>,
}

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| Error::Binding(format!("bad selector {:?}: {:?}", s, e)))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

impl PageBinding {
    /// Parse `html` and bind every element of the DOM contract.
    pub fn from_html(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);

        for id in REQUIRED_IDS {
            let sel = selector(&format!("#{}", id))?;
            if document.select(&sel).next().is_none() {
                return Err(Error::Binding(format!("missing required element #{}", id)));
            }
        }

        let nav_links = Self::bind_nav_links(&document)?;
        let home_link = nav_links
            .iter()
            .position(|l| l.target == "home")
            .unwrap_or(0);

        let sections = document
            .select(&selector("section[id]")?)
            .filter_map(|s| s.value().attr("id"))
            .map(str::to_string)
            .collect::<Vec<_>>();

        let form_sel = selector("#contactForm")?;
        let form = document
            .select(&form_sel)
            .next()
            .ok_or_else(|| Error::Binding("missing required element #contactForm".into()))?;
        let form_groups = Self::bind_form_groups(form)?;
        if form.select(&selector(".btn-submit")?).next().is_none() {
            return Err(Error::Binding("missing required element .btn-submit in #contactForm".into()));
        }

        let projects = Self::bind_projects(&document)?;
        let animated = Self::bind_animated(&document)?;
        let has_typing_target = document.select(&selector(TYPING_SELECTOR)?).next().is_some();

        let mut images = Vec::new();
        for (sel, label, color) in FALLBACK_IMAGES {
            if let Some(img) = document.select(&selector(sel)?).next() {
                let has_source = img
                    .value()
                    .attr("src")
                    .map(|s| !s.trim().is_empty())
                    .unwrap_or(false);
                images.push(ImageSlot {
                    selector: sel,
                    label,
                    color,
                    has_source,
                });
            }
        }

        log::debug!(
            "bound page: {} nav links, {} sections, {} projects, {} animated, {} images",
            nav_links.len(),
            sections.len(),
            projects.len(),
            animated.len(),
            images.len()
        );

        Ok(Self {
            nav_links,
            home_link,
            sections,
            form_groups,
            projects,
            animated,
            has_typing_target,
            images,
        })
    }

    fn bind_nav_links(document: &Html) -> Result<Vec<NavLink>> {
        let mut links = Vec::new();
        for a in document.select(&selector(".nav-link")?) {
            let href = a.value().attr("href").unwrap_or_default();
            let target = href
                .strip_prefix('#')
                .filter(|t| !t.is_empty())
                .ok_or_else(|| Error::Binding(format!("nav link href {:?} is not a #section anchor", href)))?;
            links.push(NavLink {
                target: target.to_string(),
            });
        }
        if links.is_empty() {
            return Err(Error::Binding("no .nav-link elements".into()));
        }
        Ok(links)
    }

    fn bind_form_groups(form: ElementRef<'_>) -> Result<[FormGroupBinding; 4]> {
        let input_sel = selector("input[name], textarea[name]")?;
        let error_sel = selector(".error-message")?;
        let mut found: [Option<FormGroupBinding>; 4] = [None; 4];

        for group in form.select(&selector(".form-group")?) {
            let field = group
                .select(&input_sel)
                .filter_map(|i| i.value().attr("name"))
                .find_map(Field::from_name);
            if let Some(field) = field {
                found[field as usize] = Some(FormGroupBinding {
                    field,
                    has_error_slot: group.select(&error_sel).next().is_some(),
                });
            }
        }

        let mut groups = Vec::with_capacity(4);
        for (field, slot) in Field::ALL.into_iter().zip(found) {
            let group = slot.ok_or_else(|| {
                Error::Binding(format!("missing form field {:?} inside a .form-group", field.name()))
            })?;
            groups.push(group);
        }
        groups
            .try_into()
            .map_err(|_| Error::Binding("form groups out of order".into()))
    }

    fn bind_projects(document: &Html) -> Result<Vec<ProjectCard>> {
        let title_sel = selector("h3")?;
        let desc_sel = selector("p")?;
        let tech_sel = selector(".project-tech span")?;
        let cards = document
            .select(&selector(".project-card")?)
            .map(|card| ProjectCard {
                title: card.select(&title_sel).next().map(text_of).unwrap_or_default(),
                description: card.select(&desc_sel).next().map(text_of).unwrap_or_default(),
                tech: card.select(&tech_sel).map(text_of).collect(),
            })
            .collect();
        Ok(cards)
    }

    fn bind_animated(document: &Html) -> Result<Vec<String>> {
        let classes = ["project-card", "about-text", "contact-info", "contact-form"];
        let animated = document
            .select(&selector(ANIMATED_SELECTOR)?)
            .filter_map(|el| {
                classes
                    .iter()
                    .find(|c| el.value().classes().any(|k| k == **c))
                    .map(|c| c.to_string())
            })
            .collect();
        Ok(animated)
    }

    /// Index of the nav link whose target is `section_id`
    pub fn link_for_section(&self, section_id: &str) -> Option<usize> {
        self.nav_links.iter().position(|l| l.target == section_id)
    }

    /// Whether group `field` can display a message
    pub fn error_slots(&self) -> [bool; 4] {
        self.form_groups.map(|g| g.has_error_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_anchor_nav_link() {
        let html = r##"<nav id="navbar"><ul id="nav-menu"><li><a class="nav-link" href="/about">About</a></li></ul><div id="hamburger"></div></nav>"##;
        let err = PageBinding::bind_nav_links(&Html::parse_document(html)).unwrap_err();
        assert!(err.to_string().contains("/about"));
    }

    #[test]
    fn home_link_defaults_to_first() {
        let html = r##"<a class="nav-link" href="#intro"></a><a class="nav-link" href="#work"></a>"##;
        let links = PageBinding::bind_nav_links(&Html::parse_document(html)).unwrap();
        assert_eq!(links[0].target, "intro");
        assert_eq!(links.len(), 2);
    }
}
