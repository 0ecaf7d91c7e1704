use super::common::*;
use crate::disclosure::{ContentModel, FieldGroup, FieldNode, FieldVisibility, FormLayout};
use crate::disclosure::DisclosureEngine;
use crate::quality::{FieldCatalog, FieldType, QualityEvaluator};
use std::sync::Arc;

#[test]
fn strong_input_completes_and_reveals_next_field() {
    let engine = engine();
    let mut state = engine.initial_state();
    engine.select_model(&mut state, ContentModel::Simple);

    let outcome = engine.on_field_input(&mut state, "specific-strengths", ACCURACY_STRENGTH);

    assert_eq!(outcome.field_type, FieldType::Strengths);
    assert!(outcome.completed);
    assert_eq!(outcome.revealed, vec!["areas-for-improvement".to_string()]);
    assert_eq!(
        state.visibility("specific-strengths"),
        Some(FieldVisibility::VisibleCompleted)
    );
    assert_eq!(
        state.visibility("areas-for-improvement"),
        Some(FieldVisibility::VisibleIncomplete)
    );
    assert_eq!(state.visibility("support-offered"), Some(FieldVisibility::Hidden));
}

#[test]
fn weak_input_keeps_the_frontier_in_place() {
    let engine = engine();
    let mut state = engine.initial_state();

    let outcome = engine.on_field_input(&mut state, "specific-strengths", WEAK_TEXT);

    assert!(outcome.evaluation.score < 40);
    assert!(!outcome.completed);
    assert!(outcome.revealed.is_empty());
    assert_eq!(
        state.field("specific-strengths").and_then(|field| field.last_score),
        Some(outcome.evaluation.score)
    );
    assert!(!state.is_visible("areas-for-improvement"));
}

#[test]
fn thirty_nine_does_not_progress_but_forty_does() {
    let engine = word_counting_engine();
    let mut state = engine.initial_state();

    let below = engine.on_field_input(&mut state, "specific-strengths", &filler_words(39));
    assert_eq!(below.evaluation.score, 39);
    assert!(!below.completed);
    assert!(below.revealed.is_empty());
    assert!(!state.is_visible("areas-for-improvement"));

    let at = engine.on_field_input(&mut state, "specific-strengths", &filler_words(40));
    assert_eq!(at.evaluation.score, 40);
    assert!(at.completed);
    assert_eq!(at.revealed, vec!["areas-for-improvement".to_string()]);
}

#[test]
fn completion_survives_later_regression() {
    let engine = engine();
    let mut state = engine.initial_state();
    engine.on_field_input(&mut state, "situation", STRONG_SITUATION);

    let cleared = engine.on_field_input(&mut state, "situation", "");

    assert_eq!(cleared.evaluation.score, 0);
    assert!(cleared.completed);
    assert!(cleared.revealed.is_empty());
    assert!(state.is_completed("situation"));
    assert!(state.is_visible("behavior"));
    assert_eq!(
        state.field("situation").and_then(|field| field.last_score),
        Some(0)
    );
}

#[test]
fn selecting_sbi_after_simple_resets_every_group() {
    let engine = engine();
    let mut state = engine.initial_state();
    engine.select_model(&mut state, ContentModel::Simple);
    engine.on_field_input(&mut state, "specific-strengths", ACCURACY_STRENGTH);
    engine.on_field_input(&mut state, "next-steps", STRONG_NEXT_STEPS);

    engine.select_model(&mut state, ContentModel::Sbi);

    assert_eq!(state.active_model(), Some(ContentModel::Sbi));
    assert_eq!(
        state.visibility("situation"),
        Some(FieldVisibility::VisibleIncomplete)
    );
    assert_eq!(state.visibility("behavior"), Some(FieldVisibility::Hidden));
    assert_eq!(state.visibility("impact"), Some(FieldVisibility::Hidden));
    assert_eq!(
        state.visibility("specific-strengths"),
        Some(FieldVisibility::VisibleIncomplete)
    );
    assert_eq!(
        state.visibility("areas-for-improvement"),
        Some(FieldVisibility::Hidden)
    );
    assert_eq!(state.visibility("support-resources"), Some(FieldVisibility::Hidden));
    assert_eq!(state.field("specific-strengths").and_then(|f| f.last_score), None);
}

#[test]
fn show_all_reveals_the_whole_group_without_completing_it() {
    let engine = engine();
    let mut state = engine.initial_state();
    engine.select_model(&mut state, ContentModel::Star);

    let revealed = engine.show_all(&mut state, "star-fields");

    assert_eq!(
        revealed,
        vec!["task".to_string(), "action".to_string(), "result".to_string()]
    );
    for field in ["star-situation", "task", "action", "result"] {
        assert_eq!(
            state.visibility(field),
            Some(FieldVisibility::VisibleIncomplete),
            "{field}"
        );
    }
    assert!(engine.show_all(&mut state, "star-fields").is_empty());
    assert!(engine.show_all(&mut state, "no-such-group").is_empty());
}

#[test]
fn show_all_keeps_prior_completion() {
    let engine = engine();
    let mut state = engine.initial_state();
    engine.on_field_input(&mut state, "situation", STRONG_SITUATION);

    let revealed = engine.show_all(&mut state, "sbi-fields");

    assert_eq!(revealed, vec!["impact".to_string()]);
    assert_eq!(
        state.visibility("situation"),
        Some(FieldVisibility::VisibleCompleted)
    );
}

#[test]
fn hidden_fields_do_not_complete() {
    let engine = engine();
    let mut state = engine.initial_state();

    let outcome = engine.on_field_input(&mut state, "behavior", STRONG_SITUATION);

    assert!(outcome.evaluation.score >= 40);
    assert!(!outcome.completed);
    assert!(outcome.revealed.is_empty());
    assert!(!state.is_visible("behavior"));
    assert!(!state.is_visible("impact"));
}

#[test]
fn unknown_fields_are_scored_with_the_default_profile() {
    let engine = engine();
    let mut state = engine.initial_state();
    let before = state.clone();

    let outcome = engine.on_field_input(&mut state, "free-notes", STRONG_SITUATION);

    assert_eq!(outcome.field_type, FieldType::Default);
    assert!(outcome.evaluation.score > 0);
    assert_eq!(state, before);
}

#[test]
fn checkbox_sets_complete_on_selection() {
    let engine = engine();
    let mut state = engine.initial_state();
    let revealed = engine
        .on_field_input(&mut state, "next-steps", STRONG_NEXT_STEPS)
        .revealed;
    assert_eq!(revealed, vec!["support-resources".to_string()]);

    let typed = engine.on_field_input(&mut state, "support-resources", STRONG_NEXT_STEPS);
    assert!(!typed.completed);
    assert!(typed.revealed.is_empty());

    let none = engine.on_selection_change(&mut state, "support-resources", 0);
    assert!(!none.completed);
    assert!(none.revealed.is_empty());

    let some = engine.on_selection_change(&mut state, "support-resources", 2);
    assert!(some.completed);
    assert_eq!(some.revealed, vec!["check-in-plan".to_string()]);
    assert!(state.is_visible("check-in-plan"));
}

#[test]
fn selection_on_text_fields_is_ignored() {
    let engine = engine();
    let mut state = engine.initial_state();

    let outcome = engine.on_selection_change(&mut state, "situation", 3);

    assert!(!outcome.completed);
    assert!(!state.is_completed("situation"));
}

#[test]
fn dangling_reveal_targets_are_ignored() {
    let catalog = FieldCatalog::new().with("only", FieldType::Situation);
    let layout = FormLayout::new(
        catalog,
        vec![FieldGroup {
            id: "solo".to_string(),
            model: None,
            nodes: vec![FieldNode::text("only", true, &["ghost"])],
        }],
    );
    let engine = DisclosureEngine::new(Arc::new(layout), Arc::new(QualityEvaluator::standard()));
    let mut state = engine.initial_state();

    let outcome = engine.on_field_input(&mut state, "only", STRONG_SITUATION);

    assert!(outcome.completed);
    assert!(outcome.revealed.is_empty());
    assert_eq!(state.visibility("ghost"), None);
}

#[test]
fn states_are_independent_per_form() {
    let engine = engine();
    let mut first = engine.initial_state();
    let second = engine.initial_state();

    engine.on_field_input(&mut first, "situation", STRONG_SITUATION);

    assert!(first.is_visible("behavior"));
    assert!(!second.is_visible("behavior"));
}
