#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
    use quill_core::domain::{Post, PostChanges, User};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    fn user_model(username: &str) -> user::Model {
        let now = chrono::Utc::now();
        user::Model {
            id: uuid::Uuid::new_v4(),
            username: username.to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn post_model(author_id: uuid::Uuid, title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            summary: "Summary".to_owned(),
            content: "Content".to_owned(),
            cover: "https://bucket.example.com/abc-cover.png".to_owned(),
            author_id,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let author = user_model("alice");
        let model = post_model(author.id, "Test Post");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author.id);
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let model = user_model("alice");
        let user_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let user: User = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_insert_duplicate_username_is_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"users_username_key\"".to_owned(),
            ))])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let result = repo
            .insert(User::new("alice".to_owned(), "hash".to_owned()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_list_recent_joins_author() {
        let author = user_model("alice");
        let newer = post_model(author.id, "Newer");
        let older = post_model(author.id, "Older");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                (newer, author.clone()),
                (older, author.clone()),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.list_recent(32).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post.title, "Newer");
        assert_eq!(
            posts[0].author.as_ref().map(|a| a.username.as_str()),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn test_update_returns_updated_row() {
        let author = user_model("alice");
        let mut model = post_model(author.id, "Edited");
        model.content = "New content".to_owned();
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let updated = repo
            .update(
                post_id,
                PostChanges {
                    title: Some("Edited".to_owned()),
                    content: Some("New content".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, post_id);
        assert_eq!(updated.content, "New content");
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = repo
            .update(uuid::Uuid::new_v4(), PostChanges::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
