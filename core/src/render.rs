//! Clear-and-rebuild list rendering.
//!
//! # Design
//! A `ListContainer` is the widget tree a host paints for one collection.
//! `render` throws away every entry and rebuilds from the sequence it is
//! given, so nothing from a previous pass survives. Lists are small, so there
//! is no diffing and no keyed reconciliation.
//!
//! Buttons hold a `Command` rather than a callback. A host registers one
//! handler per container and resolves clicks with `command_at`.

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Headline text (author, title).
    Strong,
    /// Secondary text (timestamps, quantities).
    Meta,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub style: SpanStyle,
    pub text: String,
}

/// Textual part of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSlot {
    spans: Vec<Span>,
    completed: bool,
}

impl ContentSlot {
    pub fn strong(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(SpanStyle::Strong, text)
    }

    pub fn meta(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(SpanStyle::Meta, text)
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(SpanStyle::Plain, text)
    }

    /// Style the whole entry as done/checked.
    pub fn mark_completed(&mut self) -> &mut Self {
        self.completed = true;
        self
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    fn push(&mut self, style: SpanStyle, text: impl Into<String>) -> &mut Self {
        self.spans.push(Span {
            style,
            text: text.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Danger,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: String,
    pub variant: ButtonVariant,
    pub command: Command,
}

/// Buttons of an entry, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsSlot {
    buttons: Vec<ActionButton>,
}

impl ActionsSlot {
    pub fn button(&mut self, label: impl Into<String>, variant: ButtonVariant, command: Command) -> &mut Self {
        self.buttons.push(ActionButton {
            label: label.into(),
            variant,
            command,
        });
        self
    }

    pub fn buttons(&self) -> &[ActionButton] {
        &self.buttons
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntry {
    pub content: ContentSlot,
    pub actions: ActionsSlot,
}

impl ListEntry {
    pub fn is_completed(&self) -> bool {
        self.content.completed
    }

    /// Span texts joined by single spaces.
    pub fn text(&self) -> String {
        self.content
            .spans
            .iter()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Label of the first button carrying `command`.
    pub fn label_for(&self, command: Command) -> Option<&str> {
        self.actions
            .buttons
            .iter()
            .find(|button| button.command == command)
            .map(|button| button.label.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContainer {
    entries: Vec<ListEntry>,
}

impl ListContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command behind button `button` of entry `entry`.
    pub fn command_at(&self, entry: usize, button: usize) -> Option<Command> {
        self.entries
            .get(entry)?
            .actions
            .buttons
            .get(button)
            .map(|b| b.command)
    }
}

/// Replace the contents of `container` with one entry per item, in order.
pub fn render<T, F>(container: &mut ListContainer, items: &[T], mut build: F)
where
    F: FnMut(&mut ContentSlot, &mut ActionsSlot, &T),
{
    container.entries.clear();
    for item in items {
        let mut entry = ListEntry::default();
        build(&mut entry.content, &mut entry.actions, item);
        container.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ResourceKind;

    fn build_word(content: &mut ContentSlot, actions: &mut ActionsSlot, word: &&str) {
        content.text(*word);
        actions.button("Delete", ButtonVariant::Danger, Command::Remove(ResourceKind::Posts, word.len() as i64));
    }

    #[test]
    fn render_preserves_item_order() {
        let mut container = ListContainer::new();
        render(&mut container, &["b", "a", "c"], build_word);
        let texts: Vec<String> = container.entries().iter().map(ListEntry::text).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn render_empty_clears_container() {
        let mut container = ListContainer::new();
        render(&mut container, &["one", "two"], build_word);
        render(&mut container, &[] as &[&str], build_word);
        assert!(container.is_empty());
    }

    #[test]
    fn second_render_leaves_nothing_from_first() {
        let mut container = ListContainer::new();
        render(&mut container, &["old", "stale", "gone"], build_word);
        render(&mut container, &["new"], build_word);
        assert_eq!(container.len(), 1);
        assert_eq!(container.entries()[0].text(), "new");
    }

    #[test]
    fn build_controls_styling_and_spans() {
        let mut container = ListContainer::new();
        render(&mut container, &[true, false], |content, _, done| {
            content.strong("title").meta("meta");
            if *done {
                content.mark_completed();
            }
        });
        assert!(container.entries()[0].is_completed());
        assert!(!container.entries()[1].is_completed());
        let styles: Vec<SpanStyle> = container.entries()[0]
            .content
            .spans()
            .iter()
            .map(|s| s.style)
            .collect();
        assert_eq!(styles, vec![SpanStyle::Strong, SpanStyle::Meta]);
    }

    #[test]
    fn command_at_resolves_buttons() {
        let mut container = ListContainer::new();
        render(&mut container, &["abc"], build_word);
        assert_eq!(container.command_at(0, 0), Some(Command::Remove(ResourceKind::Posts, 3)));
        assert_eq!(container.command_at(0, 1), None);
        assert_eq!(container.command_at(1, 0), None);
        assert_eq!(
            container.entries()[0].label_for(Command::Remove(ResourceKind::Posts, 3)),
            Some("Delete")
        );
    }
}
