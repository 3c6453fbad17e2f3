use nudge_core::{
    DetectorConfig, Diagnostic, DiagnosticSnapshot, EditEvent, LanguageProfile, PatternId, Session,
    TextBuffer,
};

const SOURCE: &str = "\npublic class Main {\n    List<String> names;\n}\n";

struct Doc {
    session: Session,
    buffer: TextBuffer,
}

impl Doc {
    fn new() -> Self {
        Self {
            session: Session::new(&DetectorConfig::default(), &LanguageProfile::java(), None),
            buffer: TextBuffer::from_text(SOURCE),
        }
    }

    fn diagnostics(&mut self, messages: Vec<Diagnostic>) {
        let triggered = self
            .session
            .diagnostics_changed(&DiagnosticSnapshot::new(messages));
        assert!(triggered.is_empty(), "diagnostics alone never trigger");
    }

    fn edit(&mut self, event: EditEvent) -> Vec<PatternId> {
        let mut triggered = self.session.before_edit(&self.buffer, &event);
        self.buffer.apply(&event).unwrap();
        triggered.extend(self.session.after_edit(&self.buffer, &event));
        triggered
    }

    /// Type `text` one character at a time from `offset`, returning the indices that triggered.
    fn type_text(&mut self, offset: usize, text: &str, pattern: PatternId) -> Vec<usize> {
        text.chars()
            .enumerate()
            .filter_map(|(i, c)| {
                self.edit(EditEvent::insert(offset + i, c.to_string()))
                    .contains(&pattern)
                    .then_some(i)
            })
            .collect()
    }
}

fn unresolved() -> Diagnostic {
    Diagnostic::new("List cannot be resolved to a type")
}

fn unused() -> Diagnostic {
    Diagnostic::new("The import java.util.Map is never used")
}

#[test]
fn test_pasted_import_without_unresolved_types() {
    let mut doc = Doc::new();
    assert!(doc.edit(EditEvent::insert(0, "import java.util.*;")).is_empty());
}

#[test]
fn test_pasted_import_with_unresolved_type() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![unresolved()]);
    assert_eq!(
        doc.edit(EditEvent::insert(0, "import java.util.*;")),
        vec![PatternId::AddImportStatements]
    );
}

#[test]
fn test_typed_import_triggers_once_on_keyword() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![unresolved()]);
    let hits = doc.type_text(0, "import java.util.List;", PatternId::AddImportStatements);
    // Index 6 is the space completing "import ".
    assert_eq!(hits, vec![6]);
}

#[test]
fn test_fixing_a_typo_completes_the_import() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![unresolved()]);
    assert!(doc.edit(EditEvent::insert(0, "imprt java.util.List;")).is_empty());
    assert_eq!(
        doc.edit(EditEvent::insert(3, "o")),
        vec![PatternId::AddImportStatements]
    );
}

#[test]
fn test_indented_import_counts() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![unresolved()]);
    assert_eq!(
        doc.edit(EditEvent::insert(0, "  import java.util.List;")),
        vec![PatternId::AddImportStatements]
    );
}

#[test]
fn test_resolved_or_deleted_diagnostics_do_not_gate() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![unresolved()]);
    doc.diagnostics(Vec::new());
    assert!(doc.edit(EditEvent::insert(0, "import java.util.*;")).is_empty());

    let mut doc = Doc::new();
    doc.diagnostics(vec![Diagnostic::deleted("List cannot be resolved to a type")]);
    assert!(doc.edit(EditEvent::insert(0, "import java.util.*;")).is_empty());
}

#[test]
fn test_other_diagnostics_do_not_gate() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![
        unused(),
        Diagnostic::new("Syntax error, insert \";\" to complete BlockStatements"),
    ]);
    assert!(doc.edit(EditEvent::insert(0, "import java.util.*;")).is_empty());
}

#[test]
fn test_unused_import_tracks_latest_snapshot() {
    let mut doc = Doc::new();
    doc.diagnostics(vec![unused()]);
    assert!(doc.session.has_active_unused_import());

    assert!(doc.edit(EditEvent::insert(0, "x")).is_empty());
    assert!(doc.session.has_active_unused_import());

    doc.diagnostics(vec![unresolved()]);
    assert!(!doc.session.has_active_unused_import());

    doc.diagnostics(vec![Diagnostic::deleted("The import java.util.Map is never used")]);
    assert!(!doc.session.has_active_unused_import());
}
