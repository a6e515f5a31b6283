//! Runtime page model.
//!
//! Built once from [`crate::content::Content`] at startup; entities live
//! for the whole session and only their visual-state attributes mutate.
//! The reveal subsystem is handed this model explicitly; there is no
//! ambient element lookup.

pub mod layout;

use crate::content::Content;
use std::time::Instant;

/// Index of a section within [`Page::sections`]. Stable for the session.
pub type SectionId = usize;

/// What a section renders as and which animation group it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    About,
    Skills,
    Projects,
    Experience,
    Contact,
}

/// Container reveal state machine: unseen → visible-pending → revealed.
/// `Revealed` is terminal; this subsystem never re-hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Unseen,
    VisiblePending,
    Revealed,
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealState::Revealed)
    }
}

/// Visual fill of a skill bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    /// Initial 0% state.
    Empty,
    /// Transitioning toward `target` since `started`.
    Filling { target: u8, started: Instant },
    /// At `target` with no transition (reduced-motion path).
    Set { target: u8 },
}

impl FillState {
    /// Target percentage, if the fill has been triggered.
    pub fn target(&self) -> Option<u8> {
        match self {
            FillState::Empty => None,
            FillState::Filling { target, .. } | FillState::Set { target } => Some(*target),
        }
    }
}

/// One skill row inside the skills section.
#[derive(Debug, Clone)]
pub struct SkillItem {
    pub name: String,
    /// Raw level attribute from the content file; validated when the
    /// bar animates, not before.
    pub level: String,
    /// Idempotence guard: set the first time the fill is triggered.
    pub animated: bool,
    pub fill: FillState,
}

/// Card visibility. `Revealing` carries its transition start so the view
/// can ease opacity and position; `Shown` is the reduced-motion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealing { since: Instant },
    Shown,
}

/// One card inside a project or experience section.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub body: String,
    pub meta: Option<String>,
    pub state: CardState,
}

/// A trackable container: one region of the document.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    pub kind: SectionKind,
    pub title: String,
    pub reveal: RevealState,
    pub paragraphs: Vec<String>,
    pub skills: Vec<SkillItem>,
    pub cards: Vec<Card>,
}

/// The whole document, discovered once at initialization.
#[derive(Debug, Clone)]
pub struct Page {
    pub owner_name: String,
    /// Titles the hero typewriter cycles through.
    pub titles: Vec<String>,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn from_content(content: &Content) -> Self {
        let mut sections = Vec::new();
        let mut next_id = 0usize;
        let mut push = |section: Section| {
            sections.push(section);
        };

        let mut make = |kind: SectionKind, title: &str, reveal: RevealState| {
            let id = next_id;
            next_id += 1;
            Section {
                id,
                kind,
                title: title.to_string(),
                reveal,
                paragraphs: Vec::new(),
                skills: Vec::new(),
                cards: Vec::new(),
            }
        };

        // The hero is always visible and the skills container carries no
        // hidden styling of its own; only its bars animate.
        push(make(SectionKind::Hero, "", RevealState::Revealed));

        let mut about = make(SectionKind::About, "About", RevealState::Unseen);
        about.paragraphs = content.about.clone();
        push(about);

        let mut skills = make(SectionKind::Skills, "Skills", RevealState::Revealed);
        skills.skills = content
            .skills
            .iter()
            .map(|def| SkillItem {
                name: def.name.clone(),
                level: def.level.clone(),
                animated: false,
                fill: FillState::Empty,
            })
            .collect();
        push(skills);

        let mut projects = make(SectionKind::Projects, "Projects", RevealState::Unseen);
        projects.cards = content.projects.iter().map(card_from_def).collect();
        push(projects);

        let mut experience = make(SectionKind::Experience, "Experience", RevealState::Unseen);
        experience.cards = content.experience.iter().map(card_from_def).collect();
        push(experience);

        let mut contact = make(SectionKind::Contact, "Contact", RevealState::Unseen);
        contact.paragraphs = vec![content.contact_blurb.clone()];
        push(contact);

        Page {
            owner_name: content.name.clone(),
            titles: content.titles.clone(),
            sections,
        }
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.get_mut(id)
    }

    /// The one skills container, if the document has one.
    pub fn skills_section_id(&self) -> Option<SectionId> {
        self.sections
            .iter()
            .find(|s| s.kind == SectionKind::Skills)
            .map(|s| s.id)
    }

    /// Sections that reveal on scroll (group B).
    pub fn animatable_section_ids(&self) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|s| {
                matches!(
                    s.kind,
                    SectionKind::About
                        | SectionKind::Projects
                        | SectionKind::Experience
                        | SectionKind::Contact
                )
            })
            .map(|s| s.id)
            .collect()
    }

    /// Sections reachable through number-key navigation, in order.
    pub fn navigable_section_ids(&self) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|s| s.kind != SectionKind::Hero)
            .map(|s| s.id)
            .collect()
    }
}

fn card_from_def(def: &crate::content::CardDef) -> Card {
    Card {
        title: def.title.clone(),
        body: def.body.clone(),
        meta: def.meta.clone(),
        state: CardState::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;

    #[test]
    fn test_page_structure_from_default_content() {
        let page = Page::from_content(&Content::default());

        assert_eq!(page.sections.len(), 6);
        assert_eq!(page.sections[0].kind, SectionKind::Hero);
        assert_eq!(page.sections[2].kind, SectionKind::Skills);

        // Hero and the skills container start revealed; the rest hidden.
        assert!(page.sections[0].reveal.is_revealed());
        assert!(page.sections[2].reveal.is_revealed());
        for id in page.animatable_section_ids() {
            assert_eq!(page.sections[id].reveal, RevealState::Unseen);
        }
    }

    #[test]
    fn test_skills_start_unanimated_and_empty() {
        let page = Page::from_content(&Content::default());
        let skills = &page.sections[page.skills_section_id().unwrap()].skills;
        assert!(!skills.is_empty());
        for item in skills {
            assert!(!item.animated);
            assert_eq!(item.fill, FillState::Empty);
        }
    }

    #[test]
    fn test_cards_start_hidden() {
        let page = Page::from_content(&Content::default());
        for section in &page.sections {
            for card in &section.cards {
                assert_eq!(card.state, CardState::Hidden);
            }
        }
    }

    #[test]
    fn test_navigable_sections_skip_hero() {
        let page = Page::from_content(&Content::default());
        let ids = page.navigable_section_ids();
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&0));
    }
}
