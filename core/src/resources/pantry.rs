use super::required;
use crate::binding::Resource;
use crate::command::{Command, ResourceKind};
use crate::render::{ActionsSlot, ButtonVariant, ContentSlot};
use crate::types::{CreateIngredient, Ingredient};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientForm {
    pub name: String,
    pub amount: String,
    pub location: String,
}

pub struct Pantry;

impl Resource for Pantry {
    const KIND: ResourceKind = ResourceKind::Pantry;

    type Item = Ingredient;
    type Form = IngredientForm;
    type Payload = CreateIngredient;

    fn payload(form: &IngredientForm) -> Option<CreateIngredient> {
        Some(CreateIngredient {
            name: required(&form.name)?,
            amount: form.amount.trim().to_string(),
            location: form.location.trim().to_string(),
        })
    }

    fn reset_form(form: &mut IngredientForm) {
        *form = IngredientForm::default();
    }

    fn build(content: &mut ContentSlot, actions: &mut ActionsSlot, ingredient: &Ingredient) {
        content.text(&ingredient.name);
        let details: Vec<&str> = [ingredient.amount.as_str(), ingredient.location.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if !details.is_empty() {
            content.meta(details.join(" • "));
        }
        actions.button(
            "Delete",
            ButtonVariant::Danger,
            Command::Remove(Self::KIND, ingredient.id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, ListContainer, SpanStyle};

    fn ingredient(amount: &str, location: &str) -> Ingredient {
        Ingredient {
            id: 1,
            name: "Eggs".to_string(),
            amount: amount.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn meta_joins_present_details() {
        let mut container = ListContainer::new();
        render(
            &mut container,
            &[ingredient("6", "door"), ingredient("", "shelf"), ingredient("", "")],
            Pantry::build,
        );
        let entries = container.entries();
        assert_eq!(entries[0].text(), "Eggs 6 • door");
        assert_eq!(entries[1].text(), "Eggs shelf");
        assert_eq!(entries[2].content.spans().len(), 1);
        assert_eq!(entries[2].content.spans()[0].style, SpanStyle::Plain);
    }

    #[test]
    fn optional_fields_are_trimmed_not_required() {
        let form = IngredientForm {
            name: " Rice ".to_string(),
            amount: " ".to_string(),
            location: " pantry ".to_string(),
        };
        let payload = Pantry::payload(&form).unwrap();
        assert_eq!(payload.name, "Rice");
        assert_eq!(payload.amount, "");
        assert_eq!(payload.location, "pantry");
    }
}
