use maplit::btreemap;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, Value};
use uuid::Uuid;

use grove_core::domain::{Post, User};
use grove_core::error::RepoError;
use grove_core::page::PageRequest;
use grove_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::{comment, post, post_tag, user};
use super::{PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository};

fn post_model(title: &str, views: i64) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: title.to_owned(),
        body: "Body".to_owned(),
        views,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn exec_ok(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, Value> {
    btreemap! { "num_items" => Into::<Value>::into(n) }
}

#[tokio::test]
async fn find_post_by_id() {
    let model = post_model("Test Post", 0);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let found: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let found = found.unwrap();
    assert_eq!(found.id, post_id);
    assert_eq!(found.title, "Test Post");
}

#[tokio::test]
async fn view_increments_the_counter() {
    let model = post_model("Hello", 6);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .append_exec_results([exec_ok(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let viewed = repo.view(post_id).await.unwrap();

    assert_eq!(viewed.views, 7);
    assert_eq!(viewed.title, "Hello");
}

#[tokio::test]
async fn view_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.view(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn create_post_with_tags_aborts_on_association_failure() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(1)])
        .append_exec_errors([DbErr::Query(RuntimeErr::Internal(
            "insert or update on table \"post_tags\" violates foreign key constraint".to_owned(),
        ))])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let author = Uuid::new_v4();
    let result = repo
        .create(
            Post::new(author, "Hello".into(), "World".into()),
            &[Uuid::new_v4()],
        )
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn create_post_without_tags_inserts_one_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let author = Uuid::new_v4();
    let created = repo
        .create(Post::new(author, "Hello".into(), "World".into()), &[])
        .await
        .unwrap();

    assert_eq!(created.title, "Hello");
    assert_eq!(created.views, 0);
}

#[tokio::test]
async fn update_reconciles_tags_by_diff() {
    let model = post_model("Old", 3);
    let post_id = model.id;
    let keep = Uuid::new_v4();
    let stale = Uuid::new_v4();
    let add = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .append_query_results([vec![
            post_tag::Model {
                post_id,
                tag_id: keep,
            },
            post_tag::Model {
                post_id,
                tag_id: stale,
            },
        ]])
        // post update, association insert, association delete
        .append_exec_results([exec_ok(1), exec_ok(1), exec_ok(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let updated = repo
        .update(post_id, "New".into(), "Fresh body".into(), &[keep, add])
        .await
        .unwrap();

    assert_eq!(updated.id, post_id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.body, "Fresh body");
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn update_with_unchanged_tags_touches_no_associations() {
    let model = post_model("Old", 3);
    let post_id = model.id;
    let tag = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .append_query_results([vec![post_tag::Model {
            post_id,
            tag_id: tag,
        }]])
        // Only the post update itself; no association statements run.
        .append_exec_results([exec_ok(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.update(post_id, "New".into(), "Body".into(), &[tag]).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn delete_post_removes_dependents_first() {
    let model = post_model("Doomed", 0);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        // post_tags, comments, attachments, then the post
        .append_exec_results([exec_ok(2), exec_ok(1), exec_ok(0), exec_ok(1)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.delete(post_id).await.is_ok());
}

#[tokio::test]
async fn delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(matches!(
        repo.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn search_returns_items_and_total() {
    let model = post_model("Hello", 1);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(1)]])
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let page = repo.search("hello", PageRequest::new(0, 10)).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Hello");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"users_username_key\"".to_owned(),
        ))])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let result = repo
        .create(User::new(
            "alice".into(),
            "alice@example.com".into(),
            "hash".into(),
        ))
        .await;

    assert!(matches!(result, Err(RepoError::Conflict(_))));
}

#[tokio::test]
async fn delete_user_cascades_over_owned_content() {
    let now = chrono::Utc::now();
    let user_id = Uuid::new_v4();
    let owned_post = post::Model {
        author_id: user_id,
        ..post_model("Owned", 0)
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            bio: String::new(),
            role: user::Role::Member,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .append_query_results([vec![owned_post]])
        // post_tags, post comments, attachments, authored comments, posts, user
        .append_exec_results([
            exec_ok(1),
            exec_ok(2),
            exec_ok(0),
            exec_ok(3),
            exec_ok(1),
            exec_ok(1),
        ])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    assert!(repo.delete(user_id).await.is_ok());
}

// End-to-end shape over the adapters: register, log in, author a post,
// view it. The database is mocked; hashing and sessions are real.
#[tokio::test]
async fn register_login_post_and_view_flow() {
    use std::time::Duration;

    use grove_core::ports::{PasswordService, SessionStore};

    use crate::auth::Argon2PasswordService;
    use crate::session::InMemorySessionStore;

    let passwords = Argon2PasswordService::new();
    let sessions = InMemorySessionStore::new(Duration::from_secs(60));

    let now = chrono::Utc::now();
    let hash = passwords.hash("pw123!").unwrap();
    let alice = User::new("alice".into(), "alice@example.com".into(), hash.clone());
    let stored = user::Model {
        id: alice.id,
        username: alice.username.clone(),
        email: alice.email.clone(),
        password_hash: hash,
        bio: String::new(),
        role: user::Role::Member,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let authored = post::Model {
        author_id: alice.id,
        ..post_model("First post", 0)
    };
    let post_id = authored.id;

    // One mocked connection per repository, each with its own
    // expectation sequence.
    let user_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .append_exec_results([exec_ok(1)])
        .into_connection();
    let post_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![authored]])
        // post insert, then the view-counter update
        .append_exec_results([exec_ok(1), exec_ok(1)])
        .into_connection();

    let users = PostgresUserRepository::new(user_db);
    let posts = PostgresPostRepository::new(post_db);

    // Register.
    let registered = users.create(alice).await.unwrap();

    // Login: look the account up, check the password, start a session.
    let account = users
        .find_by_username(&registered.username)
        .await
        .unwrap()
        .unwrap();
    assert!(passwords.verify("pw123!", &account.password_hash).unwrap());
    let token = sessions.start(account.id).await;
    assert_eq!(sessions.resolve(&token).await, Some(account.id));

    // Author and view a post.
    posts
        .create(
            Post::new(account.id, "First post".into(), "Hello".into()),
            &[],
        )
        .await
        .unwrap();
    let viewed = posts.view(post_id).await.unwrap();
    assert_eq!(viewed.views, 1);
    assert_eq!(viewed.author_id, account.id);
}

#[tokio::test]
async fn comment_count_for_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(3)]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    assert_eq!(repo.count_for_post(Uuid::new_v4()).await.unwrap(), 3);
}

#[tokio::test]
async fn comments_listed_oldest_first_pass_through() {
    let post_id = Uuid::new_v4();
    let now = chrono::Utc::now();
    let rows = vec![
        comment::Model {
            id: Uuid::new_v4(),
            post_id,
            author_id: Uuid::new_v4(),
            body: "first".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        },
        comment::Model {
            id: Uuid::new_v4(),
            post_id,
            author_id: Uuid::new_v4(),
            body: "second".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        },
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo.list_for_post(post_id).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "first");
}
