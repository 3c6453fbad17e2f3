use nudge_core::{DetectorConfig, EditEvent, LanguageProfile, PatternId, Session, TextBuffer};

fn run(text: &str, events: &[EditEvent]) -> Vec<bool> {
    let mut session = Session::new(&DetectorConfig::default(), &LanguageProfile::java(), None);
    let mut buffer = TextBuffer::from_text(text);
    events
        .iter()
        .map(|event| {
            let mut triggered = session.before_edit(&buffer, event);
            buffer.apply(event).unwrap();
            triggered.extend(session.after_edit(&buffer, event));
            triggered.contains(&PatternId::TrailingWhiteSpace)
        })
        .collect()
}

#[test]
fn test_deleting_all_trailing_spaces() {
    assert_eq!(run("Line1  \nLine2\n", &[EditEvent::delete(5, 2)]), vec![true]);
}

#[test]
fn test_triggers_when_last_blank_goes() {
    let events = [EditEvent::delete(6, 1), EditEvent::delete(5, 1)];
    assert_eq!(run("Line1  \nLine2\n", &events), vec![false, true]);
}

#[test]
fn test_trailing_tab() {
    assert_eq!(run("x = 1;\t\n", &[EditEvent::delete(6, 1)]), vec![true]);
}

#[test]
fn test_last_line_without_delimiter() {
    assert_eq!(run("a\nb   ", &[EditEvent::delete(3, 3)]), vec![true]);
}

#[test]
fn test_deleting_content_does_not_trigger() {
    // Removes "1 " so the trimmed content changes.
    assert_eq!(run("Line1 \n", &[EditEvent::delete(4, 2)]), vec![false]);
}

#[test]
fn test_insertions_never_trigger() {
    assert_eq!(run("Line1 \n", &[EditEvent::replace(5, 1, ";")]), vec![false]);
    assert_eq!(run("Line1\n", &[EditEvent::insert(5, " ")]), vec![false]);
}

#[test]
fn test_line_without_trailing_blank() {
    assert_eq!(run(" Line1\n", &[EditEvent::delete(0, 1)]), vec![false]);
}
