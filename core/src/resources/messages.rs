use super::{format_timestamp, required};
use crate::binding::Resource;
use crate::command::{Command, ResourceKind};
use crate::render::{ActionsSlot, ButtonVariant, ContentSlot};
use crate::types::{CreateMessage, Message};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageForm {
    pub author: String,
    pub content: String,
}

pub struct Messages;

impl Resource for Messages {
    const KIND: ResourceKind = ResourceKind::Messages;

    type Item = Message;
    type Form = MessageForm;
    type Payload = CreateMessage;

    fn payload(form: &MessageForm) -> Option<CreateMessage> {
        Some(CreateMessage {
            author: required(&form.author)?,
            content: required(&form.content)?,
        })
    }

    // The author stays filled in for the next message.
    fn reset_form(form: &mut MessageForm) {
        form.content.clear();
    }

    fn build(content: &mut ContentSlot, actions: &mut ActionsSlot, message: &Message) {
        content
            .strong(&message.author)
            .meta(format_timestamp(&message.created_at))
            .text(&message.content);
        actions.button(
            "Delete",
            ButtonVariant::Danger,
            Command::Remove(Self::KIND, message.id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, ListContainer};

    #[test]
    fn payload_trims_fields() {
        let form = MessageForm {
            author: " Ana ".to_string(),
            content: "Dinner at 7\n".to_string(),
        };
        let payload = Messages::payload(&form).unwrap();
        assert_eq!(payload.author, "Ana");
        assert_eq!(payload.content, "Dinner at 7");
    }

    #[test]
    fn payload_requires_content() {
        let form = MessageForm {
            author: "Ana".to_string(),
            content: "   ".to_string(),
        };
        assert!(Messages::payload(&form).is_none());
    }

    #[test]
    fn reset_keeps_author() {
        let mut form = MessageForm {
            author: "Ana".to_string(),
            content: "Hi".to_string(),
        };
        Messages::reset_form(&mut form);
        assert_eq!(form.author, "Ana");
        assert!(form.content.is_empty());
    }

    #[test]
    fn build_shows_author_time_and_content() {
        let message: Message = serde_json::from_str(
            r#"{"id":42,"author":"Ana","content":"Hi","created_at":"2024-05-01T08:30:00.123456"}"#,
        )
        .unwrap();
        let mut container = ListContainer::new();
        render(&mut container, &[message], Messages::build);

        let entry = &container.entries()[0];
        assert_eq!(entry.text(), "Ana 2024-05-01 08:30 Hi");
        assert_eq!(
            container.command_at(0, 0),
            Some(Command::Remove(ResourceKind::Messages, 42))
        );
    }
}
