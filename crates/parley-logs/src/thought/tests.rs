use super::*;

#[test]
fn test_rejects_non_empty_first_element() {
    let record = "(('step',), {'Supervisor': {'messages': [HumanMessage(content='plan')]}})";
    assert_eq!(extract_thought(record), None);
}

#[test]
fn test_rejects_plain_text() {
    assert_eq!(extract_thought("Supervisor started"), None);
    assert_eq!(extract_thought(""), None);
}

#[test]
fn test_rejects_record_without_messages() {
    let record = "((), {'Supervisor': {'caller': 'Supervisor', 'next': 'NBI Agent'}})";
    assert_eq!(extract_thought(record), None);
}

#[test]
fn test_tagged_message_exact_content() {
    let record = "((), {'Supervisor': {'messages': [HumanMessage(content='Translate node names')]}})";
    assert_eq!(extract_thought(record).as_deref(), Some("Translate node names"));
}

#[test]
fn test_tagged_message_with_kwargs_and_escapes() {
    let record = r"((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'NBI Agent', 'messages': [HumanMessage(content='Step 1:\n- Source: 203_WANHE_BUILDINGS_A', additional_kwargs={}, response_metadata={})]}})";
    assert_eq!(
        extract_thought(record).as_deref(),
        Some("Step 1:\n- Source: 203_WANHE_BUILDINGS_A")
    );
}

#[test]
fn test_truncated_record_uses_open_ended_attempt() {
    let record = "((), {'Plan Agent': {'messages': [HumanMessage(content='Planning the OCh between";
    assert_eq!(extract_thought(record).as_deref(), Some("Planning the OCh between"));
}

#[test]
fn test_falls_back_to_first_quoted_string() {
    let record = "((), {'NBI Agent': {'messages': ['uuid-1234 resolved', 'other']}})";
    assert_eq!(extract_thought(record).as_deref(), Some("uuid-1234 resolved"));
}

#[test]
fn test_tagged_message_wins_over_earlier_quoted_string() {
    let record =
        "((), {'Supervisor': {'messages': ['status', HumanMessage(content='real message')]}})";
    assert_eq!(extract_thought(record).as_deref(), Some("real message"));
}

#[test]
fn test_quoted_strings_before_messages_field_are_ignored() {
    let record = "((), {'Supervisor': {'caller': 'Supervisor', 'messages': []}})";
    assert_eq!(extract_thought(record), None);
}

#[test]
fn test_empty_messages_list_before_talkto() {
    let record =
        "((), {'NBI Agent': {'caller': 'NBI Agent', 'messages': [], 'talkto': 'Plan Agent'}})";
    assert_eq!(extract_thought(record), None);
}

#[test]
fn test_fallback_stays_inside_messages_list() {
    let record = "((), {'Supervisor': {'messages': [], 'talkto': 'Plan Agent'}, 'Plan Agent': {'status': 'idle'}})";
    assert_eq!(extract_thought(record), None);

    let record = "((), {'Supervisor': {'messages': ['route planned'], 'talkto': 'Plan Agent'}})";
    assert_eq!(extract_thought(record).as_deref(), Some("route planned"));
}
