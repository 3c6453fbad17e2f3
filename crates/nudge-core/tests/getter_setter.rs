use nudge_core::{
    DeclarationParser, DetectorConfig, EditBuffer, EditEvent, LanguageProfile, ParseError,
    PatternId, Session, TextBuffer,
};
use std::sync::{Arc, Mutex};

const PERSON: &str = "public class Person {\n    private String testName;\n    \n}\n";

/// Reports a fixed set of names and counts how often it was asked.
fn fixed_names(names: &[&str], calls: Arc<Mutex<usize>>) -> Box<dyn DeclarationParser> {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    Box::new(move |_: &str| -> Result<Vec<String>, ParseError> {
        *calls.lock().unwrap() += 1;
        Ok(names.clone())
    })
}

struct Doc {
    session: Session,
    buffer: TextBuffer,
}

impl Doc {
    fn new(text: &str, parser: Box<dyn DeclarationParser>, config: DetectorConfig) -> Self {
        Self {
            session: Session::new(&config, &LanguageProfile::java(), Some(parser)),
            buffer: TextBuffer::from_text(text),
        }
    }

    fn person(names: &[&str]) -> Self {
        let calls = Arc::new(Mutex::new(0));
        Self::new(PERSON, fixed_names(names, calls), DetectorConfig::default())
    }

    /// Offset just after the indentation of the blank line inside the class body.
    fn body_offset(&self) -> usize {
        self.buffer.line_offset(2).unwrap() + 4
    }

    fn type_text(&mut self, offset: usize, text: &str) -> Vec<usize> {
        text.chars()
            .enumerate()
            .filter_map(|(i, c)| {
                let event = EditEvent::insert(offset + i, c.to_string());
                let mut triggered = self.session.before_edit(&self.buffer, &event);
                self.buffer.apply(&event).unwrap();
                triggered.extend(self.session.after_edit(&self.buffer, &event));
                triggered.contains(&PatternId::GetterSetter).then_some(i)
            })
            .collect()
    }
}

#[test]
fn test_getter_triggers_on_completed_name() {
    let mut doc = Doc::person(&["testName"]);
    let offset = doc.body_offset();
    let typed = "public String getTestName";
    assert_eq!(doc.type_text(offset, typed), vec![typed.len() - 1]);
}

#[test]
fn test_getter_for_unknown_field_never_triggers() {
    let mut doc = Doc::person(&["testName"]);
    let offset = doc.body_offset();
    assert!(doc.type_text(offset, "public String getOtherName").is_empty());
}

#[test]
fn test_setter_and_underscore_forms() {
    let mut doc = Doc::person(&["testName"]);
    let offset = doc.body_offset();
    let typed = "protected void set_testname";
    assert_eq!(doc.type_text(offset, typed), vec![typed.len() - 1]);
}

#[test]
fn test_without_access_modifier_nothing_happens() {
    let calls = Arc::new(Mutex::new(0));
    let mut doc = Doc::new(
        PERSON,
        fixed_names(&["testName"], Arc::clone(&calls)),
        DetectorConfig::default(),
    );
    let offset = doc.body_offset();
    assert!(doc.type_text(offset, "String getTestName").is_empty());
    assert_eq!(*calls.lock().unwrap(), 0, "no modifier, no parse");
}

#[test]
fn test_parse_runs_only_behind_modifier() {
    let calls = Arc::new(Mutex::new(0));
    let mut doc = Doc::new(
        PERSON,
        fixed_names(&["testName"], Arc::clone(&calls)),
        DetectorConfig::default(),
    );
    let offset = doc.body_offset();
    doc.type_text(offset, "int x; public int y");
    assert_eq!(*calls.lock().unwrap(), 0, "modifier not at line start");
}

#[test]
fn test_parse_runs_once_per_edited_line() {
    let calls = Arc::new(Mutex::new(0));
    let mut doc = Doc::new(
        PERSON,
        fixed_names(&["testName"], Arc::clone(&calls)),
        DetectorConfig::default(),
    );
    let offset = doc.body_offset();
    let typed = "public int x;";
    doc.type_text(offset, typed);
    assert_eq!(*calls.lock().unwrap(), 1);

    // Backspace and retype on the same line reuse the names.
    let end = offset + typed.len();
    let event = EditEvent::delete(end - 1, 1);
    doc.session.before_edit(&doc.buffer, &event);
    doc.buffer.apply(&event).unwrap();
    doc.session.after_edit(&doc.buffer, &event);
    doc.type_text(end - 1, ";");
    assert_eq!(*calls.lock().unwrap(), 1);

    // A new line is a new line to parse for.
    doc.type_text(end, "\n    public int z");
    assert_eq!(*calls.lock().unwrap(), 3);
}

#[test]
fn test_edit_elsewhere_refreshes_names() {
    let mut parses = 0;
    let parser = move |_: &str| -> Result<Vec<String>, ParseError> {
        parses += 1;
        Ok(if parses == 1 {
            vec!["testName".to_string()]
        } else {
            vec!["testName".to_string(), "count".to_string()]
        })
    };
    let mut doc = Doc::new(PERSON, Box::new(parser), DetectorConfig::default());
    let offset = doc.body_offset();
    assert!(doc.type_text(offset, "public int get").is_empty());

    // Declaring a field on another line invalidates the names read for this one.
    let field_line = doc.buffer.line_offset(1).unwrap() + 4;
    doc.type_text(field_line, "int count; ");
    let getter_end = doc.body_offset() + "public int get".len();
    assert_eq!(doc.type_text(getter_end, "Count"), vec![4]);
}

#[test]
fn test_word_boundary_switch() {
    let strict = DetectorConfig::default();
    let loose = DetectorConfig {
        getter_setter_word_boundary: false,
        ..DetectorConfig::default()
    };

    let calls = Arc::new(Mutex::new(0));
    let mut doc = Doc::new(PERSON, fixed_names(&["name"], Arc::clone(&calls)), strict);
    let offset = doc.body_offset();
    assert!(doc.type_text(offset, "public int budgetName").is_empty());

    let mut doc = Doc::new(PERSON, fixed_names(&["name"], calls), loose);
    let offset = doc.body_offset();
    assert_eq!(doc.type_text(offset, "public int budgetName"), vec![20]);
}

#[test]
fn test_parse_failure_keeps_known_names() {
    let mut calls = 0;
    let parser = move |_: &str| -> Result<Vec<String>, ParseError> {
        calls += 1;
        if calls == 1 {
            Ok(vec!["count".to_string()])
        } else {
            Err(ParseError::NoTree)
        }
    };
    let mut doc = Doc::new(PERSON, Box::new(parser), DetectorConfig::default());
    let offset = doc.body_offset();
    let field = "public int x;";
    assert!(doc.type_text(offset, field).is_empty());

    let typed = "\n    public int getCount";
    let hits = doc.type_text(offset + field.len(), typed);
    assert_eq!(hits, vec![typed.len() - 1]);
}

#[test]
fn test_without_parser_nothing_is_known() {
    let mut session = Session::new(&DetectorConfig::default(), &LanguageProfile::java(), None);
    let mut buffer = TextBuffer::from_text(PERSON);
    let offset = buffer.line_offset(2).unwrap() + 4;
    let event = EditEvent::insert(offset, "public String getTestName");
    session.before_edit(&buffer, &event);
    buffer.apply(&event).unwrap();
    assert!(session.after_edit(&buffer, &event).is_empty());
}
