use super::*;

const SUPERVISOR_TO_NBI: &str = r"((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'NBI Agent', 'messages': [HumanMessage(content='To complete the task, I will follow the steps outlined:\n\n1. **Extract and Translate Node Names and TP Locations to UUIDs:**\n   - Node Name: 203_WANHE_BUILDINGS_A\n   - TP Location: /ne=203_WANHE_BUILDINGS_A/sh=0/sl=3/p=1 (Node UUID: [UUID of 203_WANHE_BUILDINGS_A])\n\nPlease confirm if you need any further assistance.', additional_kwargs={}, response_metadata={})]}})";

#[test]
fn test_talkto_before_messages() {
    let entry = extract_handoff(SUPERVISOR_TO_NBI).unwrap();
    assert_eq!(entry.caller, "Supervisor");
    assert_eq!(entry.talkto, "NBI Agent");
    assert!(entry.message.starts_with("To complete the task"));
    assert!(entry.message.contains("[UUID of 203_WANHE_BUILDINGS_A]"));
    assert!(entry.message.ends_with("further assistance."));
    assert!(entry.message.contains('\n'));
}

#[test]
fn test_messages_before_talkto() {
    let record = "((), {'NBI Agent': {'caller': 'NBI Agent', 'messages': [HumanMessage(content='UUIDs resolved')], 'talkto': 'Plan Agent'}})";
    let entry = extract_handoff(record).unwrap();
    assert_eq!(entry.caller, "NBI Agent");
    assert_eq!(entry.talkto, "Plan Agent");
    assert_eq!(entry.message, "UUIDs resolved");
}

#[test]
fn test_plain_string_messages() {
    let record = "((), {'Checker': {'caller': 'Checker', 'talkto': 'Supervisor', 'messages': 'Create an OCh from A to B'}})";
    let entry = extract_handoff(record).unwrap();
    assert_eq!(entry.caller, "Checker");
    assert_eq!(entry.talkto, "Supervisor");
    assert_eq!(entry.message, "Create an OCh from A to B");
}

#[test]
fn test_quoted_fallback_inside_messages() {
    let record =
        "((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'Plan Agent', 'messages': ['plan the route']}})";
    let entry = extract_handoff(record).unwrap();
    assert_eq!(entry.message, "plan the route");
}

#[test]
fn test_placeholder_when_messages_unreadable() {
    let record =
        "((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'Plan Agent', 'messages': []}})";
    let entry = extract_handoff(record).unwrap();
    assert_eq!(entry.message, PLACEHOLDER_MESSAGE);
}

#[test]
fn test_tool_call_marker_suppresses_handoff() {
    let record = "((), {'NBI Agent': {'caller': 'NBI Agent', 'talkto': 'Supervisor', 'messages': [HumanMessage(content='x')], 'tool_calls': [{'name': 'get_uuid'}]}})";
    assert!(is_internal_step(record));
    assert_eq!(extract_handoff(record), None);
}

#[test]
fn test_each_internal_marker_suppresses_handoff() {
    for marker in INTERNAL_MARKERS {
        let record = format!(
            "((), {{'A': {{'caller': 'A', 'talkto': 'B', 'messages': [HumanMessage(content='hi')]}}}}) {}",
            marker
        );
        assert_eq!(extract_handoff(&record), None, "marker {marker} should suppress");
    }
}

#[test]
fn test_no_shape_no_handoff() {
    assert_eq!(extract_handoff("((), {'Supervisor': {'messages': ['hi']}})"), None);
    assert_eq!(extract_handoff("random text"), None);
}

#[test]
fn test_placeholder_when_sibling_follows_empty_messages() {
    let record = "((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'Plan Agent', 'messages': []}, 'Plan Agent': {'status': 'idle'}})";
    let entry = extract_handoff(record).unwrap();
    assert_eq!(entry.talkto, "Plan Agent");
    assert_eq!(entry.message, PLACEHOLDER_MESSAGE);
}

#[test]
fn test_empty_messages_before_talkto_uses_placeholder() {
    let record =
        "((), {'NBI Agent': {'caller': 'NBI Agent', 'messages': [], 'talkto': 'Plan Agent'}})";
    let entry = extract_handoff(record).unwrap();
    assert_eq!(entry.talkto, "Plan Agent");
    assert_eq!(entry.message, PLACEHOLDER_MESSAGE);
}
