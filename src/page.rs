use crate::{
    core::ElementId,
    error::{ScrollwireError, ScrollwireResult},
};

/// Static description of the page the engine drives: every element carrying a
/// role marker, with its document geometry and declared data attributes.
/// Built once at initialization (usually from JSON) and immutable afterwards.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Page {
    pub viewport_height: f64,
    pub elements: Vec<PageElement>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageElement {
    pub id: String,
    pub role: Role,
    /// Document-space top edge, in px from the top of the page.
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub dataset: Dataset,
}

/// Role markers the engine recognizes. One element, one role; compound
/// widgets (the contact form and its submit button, say) are separate
/// elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Navbar,
    Hamburger,
    NavMenu,
    NavLink,
    HeroItem,
    Section,
    SectionHeader,
    AboutImage,
    AboutText,
    Counter,
    ProgressBar,
    TimelineItem,
    TimelineIcon,
    FilterButton,
    Card,
    FloatingCard,
    ContactInfo,
    ContactMethod,
    FormGroup,
    SocialLink,
    ContactForm,
    SubmitButton,
    BackToTop,
    Background,
}

impl Role {
    /// Roles whose hover scales the custom cursor (the original wires
    /// `a, button, .project-card, .skill-card`).
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Role::NavLink
                | Role::FilterButton
                | Role::Card
                | Role::SubmitButton
                | Role::BackToTop
                | Role::SocialLink
        )
    }
}

/// Declared `data-*` attributes. Raw strings; numeric attributes are parsed
/// at effect time so a bad value degrades that one binding instead of
/// failing the whole page load.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Counter target value (`data-target`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Progress-bar target percentage (`data-progress`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Nav-link anchor: id of the section it scrolls to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Timeline placement (`"left"` or `"right"`); anything but `"left"`
    /// reveals from the right.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

impl Page {
    /// Parse and validate a page description in one step.
    pub fn from_json(raw: &str) -> ScrollwireResult<Self> {
        let page: Page = serde_json::from_str(raw)?;
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> ScrollwireResult<()> {
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(ScrollwireError::validation("viewport_height must be > 0"));
        }

        let mut seen = std::collections::BTreeSet::new();
        for el in &self.elements {
            if el.id.trim().is_empty() {
                return Err(ScrollwireError::validation("element id must be non-empty"));
            }
            if !seen.insert(el.id.as_str()) {
                return Err(ScrollwireError::validation(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
            if !el.top.is_finite() || !el.height.is_finite() || el.height < 0.0 {
                return Err(ScrollwireError::validation(format!(
                    "element '{}' has invalid geometry",
                    el.id
                )));
            }
        }

        for el in &self.elements {
            if el.role == Role::NavLink
                && let Some(href) = &el.dataset.href
                && !self.elements.iter().any(|e| &e.id == href)
            {
                return Err(ScrollwireError::validation(format!(
                    "nav link '{}' targets missing element '{}'",
                    el.id, href
                )));
            }
        }

        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<ElementId> {
        self.elements.iter().position(|e| e.id == id).map(ElementId)
    }

    pub fn element(&self, id: ElementId) -> &PageElement {
        &self.elements[id.0]
    }

    /// Elements with the given role, in document order.
    pub fn by_role(&self, role: Role) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.role == role)
            .map(|(i, _)| ElementId(i))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
