use kite::engine::agent::MockAgent;
use kite::engine::protocol::{KeyPress, Modifiers, ScriptPurpose, ScriptToken, ViewId};
use kite::hints::coordinator::{
    HintCoordinator, MSG_ACTIVATE_FAILED, MSG_CANCELLED, MSG_NO_MATCH, MSG_NO_TARGETS,
};
use kite::hints::overlay::OVERLAY_ID;
use serde_json::{Value, json};

mod common;

use crate::common::pages::discovery_result;

const VIEW: ViewId = ViewId(1);
const OTHER_VIEW: ViewId = ViewId(2);

fn discovery_token(view: ViewId) -> ScriptToken {
    ScriptToken {
        view,
        purpose: ScriptPurpose::HintDiscovery,
    }
}

fn activate_token(view: ViewId) -> ScriptToken {
    ScriptToken {
        view,
        purpose: ScriptPurpose::HintActivate,
    }
}

/// Trigger hint mode on VIEW and feed back a scan result with `count`
/// candidates.
fn enter_hint_mode(coordinator: &mut HintCoordinator, agent: &mut MockAgent, count: usize) {
    coordinator.trigger(VIEW, agent);
    coordinator.handle_script_result(discovery_token(VIEW), &discovery_result(count), agent);
}

// =========================================================================
// Triggering and discovery
// =========================================================================

#[test]
fn trigger_issues_one_discovery_scan() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    coordinator.trigger(VIEW, &mut agent);
    assert_eq!(agent.scripts_with(ScriptPurpose::HintDiscovery).len(), 1);
    assert!(!coordinator.is_active());
}

#[test]
fn second_trigger_is_a_noop() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    // While the scan is still pending.
    coordinator.trigger(VIEW, &mut agent);
    coordinator.trigger(VIEW, &mut agent);
    assert_eq!(agent.scripts_with(ScriptPurpose::HintDiscovery).len(), 1);

    // And once the session is active.
    coordinator.handle_script_result(discovery_token(VIEW), &discovery_result(4), &mut agent);
    assert!(coordinator.is_active());
    coordinator.trigger(VIEW, &mut agent);
    assert_eq!(agent.scripts_with(ScriptPurpose::HintDiscovery).len(), 1);
}

#[test]
fn entering_projects_overlay_and_clears_buffer() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    enter_hint_mode(&mut coordinator, &mut agent, 4);

    assert!(coordinator.is_active());
    assert_eq!(coordinator.buffer(), Some(""));
    let overlays = agent.scripts_with(ScriptPurpose::HintOverlay);
    assert_eq!(overlays.len(), 1);
    assert!(overlays[0].contains(OVERLAY_ID));
    // Labels a..f bound to candidates in document order.
    assert!(overlays[0].contains(r#"["h0","a"]"#));
    assert!(overlays[0].contains(r#"["h3","f"]"#));
}

#[test]
fn zero_candidates_reports_no_targets() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    enter_hint_mode(&mut coordinator, &mut agent, 0);

    assert!(!coordinator.is_active());
    assert_eq!(agent.last_status(), Some(MSG_NO_TARGETS));
    assert!(agent.scripts_with(ScriptPurpose::HintOverlay).is_empty());
}

#[test]
fn scan_failure_is_treated_as_no_targets() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    coordinator.trigger(VIEW, &mut agent);
    coordinator.handle_script_result(discovery_token(VIEW), &Value::Null, &mut agent);

    assert!(!coordinator.is_active());
    assert_eq!(agent.last_status(), Some(MSG_NO_TARGETS));
}

#[test]
fn discovery_for_a_different_view_is_dropped() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    coordinator.trigger(VIEW, &mut agent);
    coordinator.handle_script_result(
        discovery_token(OTHER_VIEW),
        &discovery_result(4),
        &mut agent,
    );

    assert!(!coordinator.is_active());
    assert!(agent.scripts_with(ScriptPurpose::HintOverlay).is_empty());
    assert!(agent.statuses.is_empty());
}

#[test]
fn discovery_after_navigation_is_dropped() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    coordinator.trigger(VIEW, &mut agent);
    coordinator.handle_url_changed(VIEW, &mut agent);
    coordinator.handle_script_result(discovery_token(VIEW), &discovery_result(4), &mut agent);

    assert!(!coordinator.is_active());
    assert!(agent.scripts_with(ScriptPurpose::HintOverlay).is_empty());
}

// =========================================================================
// Keystrokes
// =========================================================================

#[test]
fn exact_sole_match_activates_immediately() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4); // labels a, s, d, f

    let consumed = coordinator.handle_key(VIEW, &KeyPress::character('s'), &mut agent);

    assert!(consumed);
    assert!(!coordinator.is_active());
    let activations = agent.scripts_with(ScriptPurpose::HintActivate);
    assert_eq!(activations.len(), 1);
    assert!(activations[0].contains("h1"));
    // Overlay: one projection, one teardown.
    assert_eq!(agent.scripts_with(ScriptPurpose::HintOverlay).len(), 2);
}

#[test]
fn uppercase_input_is_lowercased() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    coordinator.handle_key(VIEW, &KeyPress::character('S'), &mut agent);

    assert!(!coordinator.is_active());
    assert!(agent.scripts_with(ScriptPurpose::HintActivate)[0].contains("h1"));
}

#[test]
fn unmatched_character_resets_buffer_with_message() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4); // labels a, s, d, f

    let consumed = coordinator.handle_key(VIEW, &KeyPress::character('z'), &mut agent);

    assert!(consumed);
    assert!(coordinator.is_active());
    assert_eq!(coordinator.buffer(), Some(""));
    assert_eq!(agent.last_status(), Some(MSG_NO_MATCH));
    // Projection plus the filter reset showing all labels again.
    assert_eq!(agent.scripts_with(ScriptPurpose::HintOverlay).len(), 2);
}

#[test]
fn thirty_candidates_first_character_activates_the_single_label() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 30); // 26 singles + aa, as, ad, af

    // "a" is both a complete label and a prefix of four pair labels; the
    // exact match wins immediately.
    coordinator.handle_key(VIEW, &KeyPress::character('a'), &mut agent);

    assert!(!coordinator.is_active());
    let activations = agent.scripts_with(ScriptPurpose::HintActivate);
    assert_eq!(activations.len(), 1);
    assert!(activations[0].contains(r#""h0""#));
}

#[test]
fn enter_with_unique_match_activates() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 1);

    coordinator.handle_key(VIEW, &KeyPress::named("enter"), &mut agent);

    assert!(!coordinator.is_active());
    assert_eq!(agent.scripts_with(ScriptPurpose::HintActivate).len(), 1);
}

#[test]
fn enter_with_ambiguous_matches_is_a_noop() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    let consumed = coordinator.handle_key(VIEW, &KeyPress::named("enter"), &mut agent);

    assert!(consumed);
    assert!(coordinator.is_active());
    assert!(agent.scripts_with(ScriptPurpose::HintActivate).is_empty());
}

#[test]
fn escape_cancels_with_message() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    coordinator.handle_key(VIEW, &KeyPress::named("escape"), &mut agent);

    assert!(!coordinator.is_active());
    assert_eq!(agent.last_status(), Some(MSG_CANCELLED));
    assert_eq!(agent.scripts_with(ScriptPurpose::HintOverlay).len(), 2);
}

#[test]
fn backspace_on_empty_buffer_cancels() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    coordinator.handle_key(VIEW, &KeyPress::named("backspace"), &mut agent);

    assert!(!coordinator.is_active());
    assert_eq!(agent.last_status(), Some(MSG_CANCELLED));
}

#[test]
fn every_key_is_consumed_while_active() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    assert!(coordinator.handle_key(VIEW, &KeyPress::named("tab"), &mut agent));
    assert!(coordinator.handle_key(VIEW, &KeyPress::character('3'), &mut agent));
    assert!(coordinator.is_active());
    // Neither the tab key nor the digit changed anything.
    assert_eq!(coordinator.buffer(), Some(""));
}

#[test]
fn keys_pass_through_when_inactive_or_for_other_views() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();

    assert!(!coordinator.handle_key(VIEW, &KeyPress::character('f'), &mut agent));

    enter_hint_mode(&mut coordinator, &mut agent, 4);
    assert!(!coordinator.handle_key(OTHER_VIEW, &KeyPress::character('s'), &mut agent));
    assert!(coordinator.is_active());
}

#[test]
fn modified_characters_do_not_type() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    let key = KeyPress::character('s').with_modifiers(Modifiers::CONTROL);
    assert!(coordinator.handle_key(VIEW, &key, &mut agent));
    assert!(coordinator.is_active());
    assert!(agent.scripts_with(ScriptPurpose::HintActivate).is_empty());
}

// =========================================================================
// Teardown and activation outcomes
// =========================================================================

#[test]
fn navigation_cancels_with_exactly_one_overlay_clear() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);
    let overlays_before = agent.scripts_with(ScriptPurpose::HintOverlay).len();

    coordinator.handle_url_changed(VIEW, &mut agent);

    assert!(!coordinator.is_active());
    let overlays = agent.scripts_with(ScriptPurpose::HintOverlay);
    assert_eq!(overlays.len(), overlays_before + 1);
    assert!(overlays.last().is_some_and(|s| s.contains("removeAttribute")));
}

#[test]
fn navigation_on_other_view_keeps_session() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);

    coordinator.handle_url_changed(OTHER_VIEW, &mut agent);

    assert!(coordinator.is_active());
}

#[test]
fn failed_activation_reports_unable_to_follow() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);
    coordinator.handle_key(VIEW, &KeyPress::character('a'), &mut agent);

    // The element vanished between scan and activation: the in-page
    // script resolved to false.
    coordinator.handle_script_result(activate_token(VIEW), &json!(false), &mut agent);

    assert_eq!(agent.last_status(), Some(MSG_ACTIVATE_FAILED));
}

#[test]
fn successful_activation_stays_quiet() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);
    coordinator.handle_key(VIEW, &KeyPress::character('a'), &mut agent);

    coordinator.handle_script_result(activate_token(VIEW), &json!(true), &mut agent);

    assert!(agent.statuses.is_empty());
}

#[test]
fn can_reenter_after_cancel() {
    let mut coordinator = HintCoordinator::new();
    let mut agent = MockAgent::new();
    enter_hint_mode(&mut coordinator, &mut agent, 4);
    coordinator.handle_key(VIEW, &KeyPress::named("escape"), &mut agent);

    enter_hint_mode(&mut coordinator, &mut agent, 2);

    assert!(coordinator.is_active());
    assert_eq!(agent.scripts_with(ScriptPurpose::HintDiscovery).len(), 2);
}
