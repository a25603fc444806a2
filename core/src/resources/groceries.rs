use super::required;
use crate::binding::{Resource, Toggle};
use crate::command::{Command, ResourceKind, Toggleable};
use crate::render::{ActionsSlot, ButtonVariant, ContentSlot};
use crate::types::{CreateGrocery, Grocery};

const DEFAULT_QUANTITY: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryForm {
    pub name: String,
    pub quantity: String,
}

impl Default for GroceryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
        }
    }
}

pub struct Groceries;

impl Resource for Groceries {
    const KIND: ResourceKind = ResourceKind::Groceries;

    type Item = Grocery;
    type Form = GroceryForm;
    type Payload = CreateGrocery;

    fn payload(form: &GroceryForm) -> Option<CreateGrocery> {
        Some(CreateGrocery {
            name: required(&form.name)?,
            quantity: required(&form.quantity).unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
        })
    }

    fn reset_form(form: &mut GroceryForm) {
        *form = GroceryForm::default();
    }

    fn build(content: &mut ContentSlot, actions: &mut ActionsSlot, grocery: &Grocery) {
        if grocery.checked {
            content.mark_completed();
        }
        content.text(&grocery.name).meta(&grocery.quantity);
        let label = if grocery.checked { "Need" } else { "Have" };
        actions
            .button(label, ButtonVariant::Outline, Command::Toggle(Self::TARGET, grocery.id))
            .button("Delete", ButtonVariant::Danger, Command::Remove(Self::KIND, grocery.id));
    }
}

impl Toggle for Groceries {
    const TARGET: Toggleable = Toggleable::Groceries;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, ListContainer};

    #[test]
    fn blank_quantity_defaults_to_one() {
        let form = GroceryForm {
            name: "Milk".to_string(),
            quantity: "  ".to_string(),
        };
        let payload = Groceries::payload(&form).unwrap();
        assert_eq!(payload.name, "Milk");
        assert_eq!(payload.quantity, "1");
    }

    #[test]
    fn reset_restores_default_quantity() {
        let mut form = GroceryForm {
            name: "Milk".to_string(),
            quantity: "2 l".to_string(),
        };
        Groceries::reset_form(&mut form);
        assert!(form.name.is_empty());
        assert_eq!(form.quantity, "1");
    }

    #[test]
    fn checked_grocery_offers_need() {
        let grocery = Grocery {
            id: 5,
            name: "Bread".to_string(),
            quantity: "1".to_string(),
            checked: true,
        };
        let mut container = ListContainer::new();
        render(&mut container, &[grocery], Groceries::build);
        let entry = &container.entries()[0];
        assert!(entry.is_completed());
        assert_eq!(entry.text(), "Bread 1");
        assert_eq!(
            entry.label_for(Command::Toggle(Toggleable::Groceries, 5)),
            Some("Need")
        );
    }
}
