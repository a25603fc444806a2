use super::{format_timestamp, required};
use crate::binding::Resource;
use crate::command::{Command, ResourceKind};
use crate::render::{ActionsSlot, ButtonVariant, ContentSlot};
use crate::types::{CreatePost, Post};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

pub struct Posts;

impl Resource for Posts {
    const KIND: ResourceKind = ResourceKind::Posts;

    type Item = Post;
    type Form = PostForm;
    type Payload = CreatePost;

    fn payload(form: &PostForm) -> Option<CreatePost> {
        Some(CreatePost {
            title: required(&form.title)?,
            body: required(&form.body)?,
        })
    }

    fn reset_form(form: &mut PostForm) {
        form.title.clear();
        form.body.clear();
    }

    fn build(content: &mut ContentSlot, actions: &mut ActionsSlot, post: &Post) {
        content
            .strong(&post.title)
            .meta(format_timestamp(&post.created_at))
            .text(&post.body);
        actions.button("Delete", ButtonVariant::Danger, Command::Remove(Self::KIND, post.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_both_fields() {
        let mut form = PostForm {
            title: "Trip".to_string(),
            body: "Packing list".to_string(),
        };
        Posts::reset_form(&mut form);
        assert_eq!(form, PostForm::default());
    }

    #[test]
    fn payload_requires_title() {
        let form = PostForm {
            title: String::new(),
            body: "text".to_string(),
        };
        assert!(Posts::payload(&form).is_none());
    }
}
