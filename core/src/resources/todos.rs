use super::{format_timestamp, required};
use crate::binding::{Resource, Toggle};
use crate::command::{Command, ResourceKind, Toggleable};
use crate::render::{ActionsSlot, ButtonVariant, ContentSlot};
use crate::types::{CreateTodo, Todo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub description: String,
}

pub struct Todos;

impl Resource for Todos {
    const KIND: ResourceKind = ResourceKind::Todos;

    type Item = Todo;
    type Form = TodoForm;
    type Payload = CreateTodo;

    fn payload(form: &TodoForm) -> Option<CreateTodo> {
        Some(CreateTodo {
            description: required(&form.description)?,
        })
    }

    fn reset_form(form: &mut TodoForm) {
        form.description.clear();
    }

    fn build(content: &mut ContentSlot, actions: &mut ActionsSlot, todo: &Todo) {
        if todo.completed {
            content.mark_completed();
        }
        content
            .text(&todo.description)
            .meta(format_timestamp(&todo.created_at));
        let label = if todo.completed { "Undo" } else { "Done" };
        actions
            .button(label, ButtonVariant::Outline, Command::Toggle(Self::TARGET, todo.id))
            .button("Delete", ButtonVariant::Danger, Command::Remove(Self::KIND, todo.id));
    }
}

impl Toggle for Todos {
    const TARGET: Toggleable = Toggleable::Todos;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, ListContainer};

    fn todo(id: i64, completed: bool) -> Todo {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "description": "Walk dog",
            "completed": completed,
            "created_at": "2024-05-01T08:30:00",
        }))
        .unwrap()
    }

    #[test]
    fn completed_todo_is_marked_and_offers_undo() {
        let mut container = ListContainer::new();
        render(&mut container, &[todo(1, true), todo(2, false)], Todos::build);

        let done = &container.entries()[0];
        assert!(done.is_completed());
        assert_eq!(done.label_for(Command::Toggle(Toggleable::Todos, 1)), Some("Undo"));

        let open = &container.entries()[1];
        assert!(!open.is_completed());
        assert_eq!(open.label_for(Command::Toggle(Toggleable::Todos, 2)), Some("Done"));
        assert_eq!(
            open.label_for(Command::Remove(ResourceKind::Todos, 2)),
            Some("Delete")
        );
    }

    #[test]
    fn payload_trims_description() {
        let form = TodoForm {
            description: "  call plumber ".to_string(),
        };
        assert_eq!(Todos::payload(&form).unwrap().description, "call plumber");
    }
}
