//! Tree builder from parse events.

use gss_parse::Event;

use crate::diagnostic::ParseError;
use crate::value::{Node, Property, PropertyClass};

/// Builder that constructs a property tree from parse events.
///
/// The builder owns the scope state: the class currently being
/// populated, the stack of suspended enclosing classes, and the ordered
/// list of property rules eligible for inheritance. A class opened while
/// rules are in scope starts out with a copy of each of them; a class's
/// own rules go out of scope when it closes.
pub struct TreeBuilder {
    current: PropertyClass,
    ancestors: Vec<Frame>,
    /// Rules visible for inheritance by the next-opened class: every
    /// rule defined in a still-open scope, in definition order.
    pending: Vec<(String, String)>,
    /// How many `pending` entries the current scope contributed.
    pending_in_scope: usize,
    error: Option<ParseError>,
}

/// A suspended enclosing scope.
struct Frame {
    /// Name the finished child will be bound to in this class.
    name: String,
    class: PropertyClass,
    /// The enclosing scope's own `pending` contribution count.
    pending_in_scope: usize,
}

impl TreeBuilder {
    /// Create a new tree builder.
    pub fn new() -> Self {
        Self {
            current: PropertyClass::new(),
            ancestors: Vec::new(),
            pending: Vec::new(),
            pending_in_scope: 0,
            error: None,
        }
    }

    /// Feed one event. After an error, further events are ignored.
    pub fn event(&mut self, event: Event<'_>) {
        if self.error.is_some() {
            return;
        }
        match event {
            Event::Define { name, value, .. } => {
                self.current
                    .insert(name, Node::Property(Property::new(value)));
                self.pending.push((name.to_string(), value.to_string()));
                self.pending_in_scope += 1;
            }
            Event::ClassOpen { name, .. } => {
                let mut class = PropertyClass::new();
                // The new class copies every rule in scope right now;
                // rules defined after this line never reach it.
                for (rule_name, rule_value) in &self.pending {
                    class.insert(
                        rule_name.clone(),
                        Node::Property(Property::new(rule_value.clone())),
                    );
                }
                let parent = std::mem::replace(&mut self.current, class);
                self.ancestors.push(Frame {
                    name: name.to_string(),
                    class: parent,
                    pending_in_scope: self.pending_in_scope,
                });
                self.pending_in_scope = 0;
            }
            Event::ScopeClose { span } => {
                let Some(frame) = self.ancestors.pop() else {
                    self.error = Some(ParseError::new(span));
                    return;
                };
                // Retire this scope's own rules; the parent's remain.
                self.pending
                    .truncate(self.pending.len() - self.pending_in_scope);
                self.attach(frame);
            }
        }
    }

    /// Finish building and return the root class.
    ///
    /// Scopes still open at end of input are attached as-is; only a
    /// close without a matching open is an error.
    pub fn finish(mut self) -> Result<PropertyClass, ParseError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        while let Some(frame) = self.ancestors.pop() {
            self.attach(frame);
        }
        Ok(self.current)
    }

    /// Bind the finished `current` class into its suspended parent and
    /// make the parent current again.
    fn attach(&mut self, frame: Frame) {
        let child = std::mem::replace(&mut self.current, frame.class);
        self.current.insert(frame.name, Node::Class(child));
        self.pending_in_scope = frame.pending_in_scope;
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use gss_parse::{Parser, Span};

    use super::*;

    fn parse(source: &str) -> PropertyClass {
        try_parse(source).unwrap()
    }

    fn try_parse(source: &str) -> Result<PropertyClass, ParseError> {
        let mut parser = Parser::new(source);
        let mut builder = TreeBuilder::new();
        while let Some(event) = parser.next_event() {
            builder.event(event);
        }
        builder.finish()
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_leaf() {
        let root = parse("x : 42;");
        let x = root.get("x").unwrap().as_property().unwrap();
        assert_eq!(x.text(), "42");
    }

    #[test]
    fn test_nested_class() {
        let root = parse("A =\n x : 1;\nB =\n y : 2;\nC =\nD =\n z : 3;");
        assert!(root.get("A").unwrap().as_class().is_some());
    }

    #[test]
    fn test_inheritance_is_point_in_time() {
        let root = parse("p : 1 ;\nA =\nend\np2 : 2 ;\nB =\nend\n");
        let a = root.get("A").unwrap().as_class().unwrap();
        assert!(a.contains("p"));
        assert!(!a.contains("p2"));
        let b = root.get("B").unwrap().as_class().unwrap();
        assert!(b.contains("p"));
        assert!(b.contains("p2"));
    }

    #[test]
    fn test_rules_do_not_leak_out_of_a_closed_scope() {
        let root = parse("A =\n q : 9 ;\nend\nB =\nend\n");
        assert!(!root.contains("q"));
        assert!(!root.get("B").unwrap().as_class().unwrap().contains("q"));
        assert!(root.get("A").unwrap().as_class().unwrap().contains("q"));
    }

    #[test]
    fn test_grandchild_inherits_through_parent() {
        let root = parse("p : 1;\nA =\nq : 2;\nB =\nend\nend\n");
        let a = root.get("A").unwrap().as_class().unwrap();
        let b = a.get("B").unwrap().as_class().unwrap();
        // B sees both the rule inherited by A and the rule A defined.
        assert_eq!(b.get("p").unwrap().as_property().unwrap().text(), "1");
        assert_eq!(b.get("q").unwrap().as_property().unwrap().text(), "2");
    }

    #[test]
    fn test_redefinition_rebinds() {
        let root = parse("x : 1;\nx : 2;");
        assert_eq!(root.get("x").unwrap().as_property().unwrap().text(), "2");
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_class_open_displaces_property_of_same_name() {
        let root = parse("x : 1;\nx =\nend\n");
        let x = root.get("x").unwrap().as_class().unwrap();
        // The displaced rule was still in scope, so the class inherits it.
        assert_eq!(x.get("x").unwrap().as_property().unwrap().text(), "1");
    }

    #[test]
    fn test_unclosed_class_is_attached_at_end_of_input() {
        let root = parse("A =\n x : 1;");
        let a = root.get("A").unwrap().as_class().unwrap();
        assert_eq!(a.get("x").unwrap().as_property().unwrap().text(), "1");
    }

    #[test]
    fn test_unbalanced_close_is_an_error() {
        let err = try_parse("end").unwrap_err();
        assert_eq!(err.span, Span::new(0, 3));
    }

    #[test]
    fn test_events_after_an_error_are_ignored() {
        assert!(try_parse("end\nA =\nx : 1;").is_err());
    }
}
