use crate::core::demos;
use crate::core::dom::{Document, ElementHandle};
use crate::domain::ports::OutputSink;
use crate::utils::error::{Result, SandboxError};
use crate::utils::validation;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(name) => write!(f, "#{}", name),
            Selector::Class(name) => write!(f, ".{}", name),
            Selector::Tag(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationAction {
    SetText(String),
    SetAttribute { key: String, value: String },
    SetStyle { property: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub selector: Selector,
    pub action: MutationAction,
}

/// Application state: the host document plus the output sink. Constructed
/// at startup, carried by reference through the run, discarded at the end.
pub struct Sandbox<O: OutputSink> {
    pub document: Document,
    pub sink: O,
}

impl<O: OutputSink> Sandbox<O> {
    pub fn new(document: Document, sink: O) -> Self {
        Self { document, sink }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub demos_run: usize,
    pub lines_emitted: usize,
    pub mutations_applied: usize,
}

struct CountingSink<'a, O: OutputSink> {
    inner: &'a mut O,
    count: usize,
}

impl<O: OutputSink> OutputSink for CountingSink<'_, O> {
    fn emit(&mut self, line: &str) {
        self.count += 1;
        self.inner.emit(line);
    }
}

pub struct SandboxEngine<O: OutputSink> {
    state: Sandbox<O>,
}

impl<O: OutputSink> SandboxEngine<O> {
    pub fn new(state: Sandbox<O>) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> Sandbox<O> {
        self.state
    }

    /// Runs the selected demos, then applies the document mutations.
    /// Unknown demo names fail the whole run before any output is emitted.
    pub fn run(&mut self, demo_names: &[String], mutations: &[Mutation]) -> Result<RunReport> {
        for name in demo_names {
            if !demos::is_known_demo(name) {
                return Err(SandboxError::UnknownDemo { name: name.clone() });
            }
        }

        tracing::info!("Running {} demos", demo_names.len());
        let mut counting = CountingSink {
            inner: &mut self.state.sink,
            count: 0,
        };
        for name in demo_names {
            tracing::debug!("Running demo: {}", name);
            counting.emit(&format!("--- {} ---", name));
            demos::run_demo(name, &mut counting)?;
        }
        let lines_emitted = counting.count;

        tracing::info!("Applying {} document mutations", mutations.len());
        for mutation in mutations {
            Self::apply_mutation(&mut self.state.document, mutation)?;
        }

        Ok(RunReport {
            demos_run: demo_names.len(),
            lines_emitted,
            mutations_applied: mutations.len(),
        })
    }

    fn apply_mutation(document: &mut Document, mutation: &Mutation) -> Result<()> {
        let targets: Vec<ElementHandle> = match &mutation.selector {
            Selector::Id(name) => document.find_by_id(name).into_iter().collect(),
            Selector::Class(name) => document.find_by_class(name),
            Selector::Tag(name) => document.find_by_tag(name),
        };

        if targets.is_empty() {
            return Err(SandboxError::ElementNotFound {
                selector: mutation.selector.to_string(),
            });
        }

        for handle in targets {
            match &mutation.action {
                MutationAction::SetText(text) => document.set_text(Some(handle), text)?,
                MutationAction::SetAttribute { key, value } => {
                    // Image sources must be real http(s) URLs before we
                    // touch the tree.
                    if key == "src" {
                        validation::validate_url("src", value)?;
                    }
                    document.set_attribute(Some(handle), key, value)?;
                }
                MutationAction::SetStyle { property, value } => {
                    document.set_style(Some(handle), property, value)?;
                }
            }
            tracing::debug!("Applied {:?} to {}", mutation.action, mutation.selector);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::BufferSink;

    fn engine() -> SandboxEngine<BufferSink> {
        SandboxEngine::new(Sandbox::new(Document::sample_page(), BufferSink::new()))
    }

    #[test]
    fn test_run_reports_counts() {
        let mut engine = engine();
        let report = engine
            .run(&["functions".to_string(), "types".to_string()], &[])
            .unwrap();
        assert_eq!(report.demos_run, 2);
        assert_eq!(report.mutations_applied, 0);
        assert!(report.lines_emitted > 2);

        let state = engine.into_state();
        assert!(state.sink.contains("Result: 40"));
        assert!(state.sink.contains("--- types ---"));
    }

    #[test]
    fn test_unknown_demo_rejected_before_output() {
        let mut engine = engine();
        let err = engine
            .run(&["functions".to_string(), "bogus".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, SandboxError::UnknownDemo { .. }));
        assert!(engine.into_state().sink.lines().is_empty());
    }

    #[test]
    fn test_mutations_reach_the_document() {
        let mut engine = engine();
        let mutations = vec![
            Mutation {
                selector: Selector::Id("header-section-one".to_string()),
                action: MutationAction::SetText("Hello World!".to_string()),
            },
            Mutation {
                selector: Selector::Id("navigation".to_string()),
                action: MutationAction::SetStyle {
                    property: "background-color".to_string(),
                    value: "lightyellow".to_string(),
                },
            },
        ];
        let report = engine.run(&[], &mutations).unwrap();
        assert_eq!(report.mutations_applied, 2);

        let state = engine.into_state();
        let header = state.document.find_by_id("header-section-one").unwrap();
        assert_eq!(state.document.text_of(header), "Hello World!");
    }

    #[test]
    fn test_missing_selector_is_a_lookup_error() {
        let mut engine = engine();
        let mutations = vec![Mutation {
            selector: Selector::Id("missing-id".to_string()),
            action: MutationAction::SetText("nope".to_string()),
        }];
        let err = engine.run(&[], &mutations).unwrap_err();
        assert!(matches!(err, SandboxError::ElementNotFound { .. }));
    }

    #[test]
    fn test_invalid_image_src_rejected_without_mutation() {
        let mut engine = engine();
        let mutations = vec![Mutation {
            selector: Selector::Id("section-image".to_string()),
            action: MutationAction::SetAttribute {
                key: "src".to_string(),
                value: "not a url".to_string(),
            },
        }];
        assert!(engine.run(&[], &mutations).is_err());

        let state = engine.into_state();
        let img = state.document.find_by_id("section-image").unwrap();
        assert_eq!(
            state.document.attribute(img, "src"),
            Some("images/placeholder.jpg")
        );
    }
}
