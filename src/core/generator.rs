/// Event generator — uniform template selection and slot filling.

use rand::Rng;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::template::{Template, TemplateError};
use crate::schema::catalog::Catalog;
use crate::schema::vocabulary::VocabularySet;

#[derive(Debug, Error, PartialEq)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("no templates configured")]
    NoTemplates,
    #[error("template '{template}' references slot '{slot}' which has no vocabulary")]
    MissingSlot { template: String, slot: String },
    #[error("slot '{slot}' is referenced by template '{template}' but its vocabulary is empty")]
    EmptySlot { template: String, slot: String },
}

/// Renders an unbounded stream of events from a fixed template set.
///
/// All validation happens in [`EventGenerator::new`]; once built, rendering
/// cannot fail.
#[derive(Debug, Clone)]
pub struct EventGenerator {
    templates: Vec<Template>,
    vocabulary: VocabularySet,
}

impl EventGenerator {
    /// Parse `templates` and check that every slot they reference is bound
    /// to a non-empty vocabulary.
    pub fn new<I, S>(templates: I, vocabulary: VocabularySet) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let templates = templates
            .into_iter()
            .map(|raw| Template::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_templates(templates, vocabulary)
    }

    /// Build from already-parsed templates.
    pub fn from_templates(
        templates: Vec<Template>,
        vocabulary: VocabularySet,
    ) -> Result<Self, GeneratorError> {
        validate(&templates, &vocabulary)?;
        Ok(Self {
            templates,
            vocabulary,
        })
    }

    pub fn from_catalog(catalog: &Catalog) -> Result<Self, GeneratorError> {
        Self::new(&catalog.templates, catalog.slots.clone())
    }

    /// Render one event.
    pub fn next_event<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        render_random_event(&self.templates, &self.vocabulary, rng)
    }

    /// An endless iterator of events drawn from `rng`.
    pub fn events<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R) -> Events<'a, R> {
        Events {
            generator: self,
            rng,
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn vocabulary(&self) -> &VocabularySet {
        &self.vocabulary
    }
}

/// Iterator returned by [`EventGenerator::events`]. Never yields `None`.
pub struct Events<'a, R: ?Sized> {
    generator: &'a EventGenerator,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> Iterator for Events<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.generator.next_event(self.rng))
    }
}

fn validate(templates: &[Template], vocabulary: &VocabularySet) -> Result<(), GeneratorError> {
    if templates.is_empty() {
        return Err(GeneratorError::NoTemplates);
    }

    for template in templates {
        for slot in template.slots() {
            match vocabulary.get(slot) {
                None => {
                    return Err(GeneratorError::MissingSlot {
                        template: template.source().to_string(),
                        slot: slot.to_string(),
                    })
                }
                Some([]) => {
                    return Err(GeneratorError::EmptySlot {
                        template: template.source().to_string(),
                        slot: slot.to_string(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

/// Pick a template uniformly, then one fragment per distinct slot name
/// (independently, with replacement), and substitute.
///
/// Callers must have validated `templates` against `vocabulary`; an unbound
/// slot renders as the empty string.
pub fn render_random_event<R: Rng + ?Sized>(
    templates: &[Template],
    vocabulary: &VocabularySet,
    rng: &mut R,
) -> String {
    if templates.is_empty() {
        return String::new();
    }
    let template = &templates[rng.gen_range(0..templates.len())];

    let mut chosen: FxHashMap<&str, &str> = FxHashMap::default();
    for slot in template.slots() {
        if chosen.contains_key(slot) {
            continue;
        }
        if let Some(fragments) = vocabulary.get(slot).filter(|f| !f.is_empty()) {
            chosen.insert(slot, fragments[rng.gen_range(0..fragments.len())].as_str());
        }
    }

    template.render(|slot| chosen.get(slot).copied().unwrap_or_default())
}
