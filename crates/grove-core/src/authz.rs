//! Authorization gate - pure predicates over identity and content.
//!
//! Callers consult the gate before invoking any repository mutation; the
//! repositories themselves never authorize.

use crate::domain::{Comment, Post, User};

/// Only the author may edit a post.
pub fn can_edit_post(user: &User, post: &Post) -> bool {
    user.id == post.author_id
}

/// The author or an admin may delete a post.
pub fn can_delete_post(user: &User, post: &Post) -> bool {
    user.id == post.author_id || can_moderate(user)
}

/// Admins hold cross-user deletion rights.
pub fn can_moderate(user: &User) -> bool {
    user.is_admin()
}

/// The author or an admin may delete a comment.
pub fn can_delete_comment(user: &User, comment: &Comment) -> bool {
    user.id == comment.author_id || can_moderate(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use uuid::Uuid;

    fn member(name: &str) -> User {
        User::new(name.into(), format!("{name}@example.com"), "hash".into())
    }

    fn admin(name: &str) -> User {
        let mut user = member(name);
        user.role = Role::Admin;
        user
    }

    #[test]
    fn author_may_edit_own_post() {
        let alice = member("alice");
        let post = Post::new(alice.id, "Hello".into(), "World".into());

        assert!(can_edit_post(&alice, &post));
    }

    #[test]
    fn others_may_not_edit_post() {
        let alice = member("alice");
        let bob = member("bob");
        let post = Post::new(alice.id, "Hello".into(), "World".into());

        assert!(!can_edit_post(&bob, &post));
        // Not even an admin edits someone else's post; they may only delete.
        assert!(!can_edit_post(&admin("root"), &post));
    }

    #[test]
    fn admin_may_delete_any_post() {
        let alice = member("alice");
        let post = Post::new(alice.id, "Hello".into(), "World".into());

        assert!(can_delete_post(&alice, &post));
        assert!(can_delete_post(&admin("root"), &post));
        assert!(!can_delete_post(&member("bob"), &post));
    }

    #[test]
    fn only_admin_moderates() {
        assert!(can_moderate(&admin("root")));
        assert!(!can_moderate(&member("alice")));
    }

    #[test]
    fn comment_deletable_by_author_or_admin() {
        let alice = member("alice");
        let bob = member("bob");
        let comment = Comment::new(Uuid::new_v4(), alice.id, "nice".into());

        assert!(can_delete_comment(&alice, &comment));
        assert!(can_delete_comment(&admin("root"), &comment));
        assert!(!can_delete_comment(&bob, &comment));
    }
}
