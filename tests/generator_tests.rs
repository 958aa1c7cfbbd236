/// Generator integration tests — built-in catalogs rendered at volume.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use travel_buzz::core::generator::EventGenerator;
use travel_buzz::core::template::{Template, TemplateSegment};
use travel_buzz::schema::catalog::Catalog;
use travel_buzz::schema::vocabulary::VocabularySet;

/// Does `text` read as `segments` with every slot filled from `vocab`, using
/// one fragment per slot name?
fn matches_segments(
    segments: &[TemplateSegment],
    vocab: &VocabularySet,
    rest: &str,
    bound: &mut HashMap<String, String>,
) -> bool {
    match segments.split_first() {
        None => rest.is_empty(),
        Some((TemplateSegment::Literal(literal), tail)) => rest
            .strip_prefix(literal.as_str())
            .map_or(false, |r| matches_segments(tail, vocab, r, bound)),
        Some((TemplateSegment::Slot(name), tail)) => {
            if let Some(value) = bound.get(name).cloned() {
                return rest
                    .strip_prefix(value.as_str())
                    .map_or(false, |r| matches_segments(tail, vocab, r, bound));
            }
            for fragment in vocab.get(name).unwrap_or(&[]) {
                if let Some(r) = rest.strip_prefix(fragment.as_str()) {
                    bound.insert(name.clone(), fragment.clone());
                    if matches_segments(tail, vocab, r, bound) {
                        return true;
                    }
                    bound.remove(name);
                }
            }
            false
        }
    }
}

fn matching_templates<'a>(templates: &'a [Template], vocab: &VocabularySet, text: &str) -> Vec<&'a Template> {
    templates
        .iter()
        .filter(|t| matches_segments(&t.segments, vocab, text, &mut HashMap::new()))
        .collect()
}

fn assert_catalog_renders_cleanly(catalog: &Catalog, seed: u64) {
    let generator = EventGenerator::from_catalog(catalog).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    for event in generator.events(&mut rng).take(10_000) {
        assert!(!event.is_empty());
        assert!(
            !event.contains('{') && !event.contains('}'),
            "unreplaced slot marker in '{}'",
            event
        );
        let matched = matching_templates(generator.templates(), generator.vocabulary(), &event);
        assert_eq!(matched.len(), 1, "'{}' matched {} templates", event, matched.len());
    }
}

#[test]
fn travel_buzz_ten_thousand_renders() {
    assert_catalog_renders_cleanly(&Catalog::travel_buzz().unwrap(), 42);
}

#[test]
fn buzz_responses_ten_thousand_renders() {
    assert_catalog_renders_cleanly(&Catalog::buzz_responses().unwrap(), 2024);
}

#[test]
fn every_fragment_is_reachable() {
    let catalog = Catalog::travel_buzz().unwrap();
    let generator = EventGenerator::from_catalog(&catalog).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let events: Vec<String> = generator.events(&mut rng).take(2_000).collect();

    for slot in ["action", "adjective", "destination"] {
        for fragment in catalog.slots.get(slot).unwrap() {
            assert!(
                events.iter().any(|e| e.contains(fragment.as_str())),
                "fragment '{}' of slot '{}' never rendered",
                fragment,
                slot
            );
        }
    }
}

#[test]
fn consumer_responses_wrap_a_canned_message() {
    let catalog = Catalog::buzz_responses().unwrap();
    let messages = catalog.slots.get("message").unwrap();
    let generator = EventGenerator::from_catalog(&catalog).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    for event in generator.events(&mut rng).take(500) {
        let inner = travel_buzz::core::extract::extract_quoted(&event).unwrap();
        assert!(messages.iter().any(|m| m == inner), "unexpected message '{}'", inner);
    }
}

#[test]
fn catalog_with_empty_slot_is_rejected() {
    let catalog = Catalog::parse_ron(
        r#"(
            templates: ["Just {action} {destination}."],
            slots: { "action": ["hiked"], "destination": [] },
        )"#,
    )
    .unwrap();
    let err = EventGenerator::from_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("destination"));
}
