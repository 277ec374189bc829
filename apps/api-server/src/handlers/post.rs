//! Post CRUD handlers.
//!
//! Each handler is a pure mapping from one request to one response; the
//! only shared state is the repository handle captured at registration.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_shared::decode_body;
use quill_shared::dto::{CreatePostRequest, POST_FIELDS, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid post id `{}`", raw)))
}

/// GET /api/post
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/post/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/post
///
/// The server mints the id. A client-supplied `id` key is an unknown
/// field: rejected in strict mode, ignored otherwise.
pub async fn create_post(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = decode_body(&body, state.strict_json, POST_FIELDS)?;

    let post = state.posts.insert(Post::new(req.title, req.content)).await?;

    tracing::info!("Post created: {}", post.id);

    Ok(HttpResponse::Created().finish())
}

/// PUT /api/post/{post_id}
///
/// Applies only `content`; every other field is immutable here.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req: UpdatePostRequest = decode_body(&body, state.strict_json, POST_FIELDS)?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    post.set_content(req.content);
    state.posts.save(post).await?;

    tracing::info!("Post updated: {}", id);

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/post/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    state.posts.delete(id).await?;

    tracing::info!("Post deleted: {}", id);

    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use chrono::DateTime;
    use quill_core::error::RepoError;
    use quill_shared::ErrorResponse;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    /// In-memory repository double for handler tests.
    #[derive(Default)]
    struct InMemoryPostRepository {
        rows: RwLock<HashMap<Uuid, Post>>,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.read().unwrap().get(&id).cloned())
        }

        async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
            self.rows
                .write()
                .unwrap()
                .insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            let mut rows = self.rows.write().unwrap();
            if !rows.contains_key(&entity.id) {
                return Err(RepoError::NotFound);
            }
            rows.insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            match self.rows.write().unwrap().remove(&id) {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            }
        }
    }

    #[async_trait]
    impl PostRepository for InMemoryPostRepository {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.rows.read().unwrap().values().cloned().collect())
        }
    }

    fn state(strict_json: bool) -> AppState {
        AppState {
            posts: Arc::new(InMemoryPostRepository::default()),
            strict_json,
        }
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(handlers::configure_routes),
            )
            .await
        };
    }

    macro_rules! create {
        ($app:expr, $title:expr, $content:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/post")
                .set_json(serde_json::json!({ "title": $title, "content": $content }))
                .to_request();
            test::call_service(&$app, req).await.status()
        }};
    }

    macro_rules! list {
        ($app:expr) => {{
            let req = test::TestRequest::get().uri("/api/post").to_request();
            let posts: Vec<PostResponse> = test::call_and_read_body_json(&$app, req).await;
            posts
        }};
    }

    #[actix_web::test]
    async fn create_then_fetch_roundtrip() {
        let app = app!(state(true));

        assert_eq!(create!(app, "hello", "world"), StatusCode::CREATED);

        let posts = list!(app);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "hello");
        assert_eq!(posts[0].content, "world");
        assert_eq!(posts[0].created_at, posts[0].updated_at);

        let req = test::TestRequest::get()
            .uri(&format!("/api/post/{}", posts[0].id))
            .to_request();
        let fetched: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched.id, posts[0].id);
        assert_eq!(fetched.content, "world");
    }

    #[actix_web::test]
    async fn list_is_empty_before_any_create() {
        let app = app!(state(true));

        let posts = list!(app);

        assert!(posts.is_empty());
    }

    #[actix_web::test]
    async fn list_returns_exactly_n_entries() {
        let app = app!(state(true));

        for i in 0..50 {
            assert_eq!(
                create!(app, &format!("post {}", i), "content"),
                StatusCode::CREATED
            );
        }

        let posts = list!(app);
        assert_eq!(posts.len(), 50);

        let mut ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[actix_web::test]
    async fn get_unknown_id_is_404_with_error_body() {
        let app = app!(state(true));

        let req = test::TestRequest::get()
            .uri(&format!("/api/post/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("not found"));
    }

    #[actix_web::test]
    async fn get_malformed_id_is_400() {
        let app = app!(state(true));

        let req = test::TestRequest::get()
            .uri("/api/post/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_replaces_content_only() {
        let app = app!(state(true));

        create!(app, "title", "before");
        let posts = list!(app);
        let id = posts[0].id.clone();

        // Make sure the update lands on a later timestamp.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/post/{}", id))
            .set_json(serde_json::json!({ "content": "after" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/post/{}", id))
            .to_request();
        let updated: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated.content, "after");
        assert_eq!(updated.title, "title");
        assert_eq!(updated.id, id);

        let created = DateTime::parse_from_rfc3339(&updated.created_at).unwrap();
        let modified = DateTime::parse_from_rfc3339(&updated.updated_at).unwrap();
        assert!(modified > created);
    }

    #[actix_web::test]
    async fn update_tolerates_a_title_key_but_ignores_it() {
        let app = app!(state(true));

        create!(app, "title", "before");
        let id = list!(app)[0].id.clone();

        let req = test::TestRequest::put()
            .uri(&format!("/api/post/{}", id))
            .set_json(serde_json::json!({ "title": "other", "content": "after" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let posts = list!(app);
        assert_eq!(posts[0].title, "title");
        assert_eq!(posts[0].content, "after");
    }

    #[actix_web::test]
    async fn update_unknown_id_is_404() {
        let app = app!(state(true));

        let req = test::TestRequest::put()
            .uri(&format!("/api/post/{}", Uuid::new_v4()))
            .set_json(serde_json::json!({ "content": "after" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_then_fetch_is_404() {
        let app = app!(state(true));

        create!(app, "title", "content");
        let id = list!(app)[0].id.clone();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/post/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/post/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Deleting again reports the missing row.
        let req = test::TestRequest::delete()
            .uri(&format!("/api/post/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn strict_mode_rejects_a_client_supplied_id() {
        let app = app!(state(true));

        let req = test::TestRequest::post()
            .uri("/api/post")
            .set_json(serde_json::json!({
                "title": "t",
                "content": "c",
                "id": "c56ad0b6-7d5f-4b82-9435-4f570ec55ca0"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("id"));
    }

    #[actix_web::test]
    async fn lenient_mode_ignores_a_client_supplied_id() {
        let app = app!(state(false));

        let req = test::TestRequest::post()
            .uri("/api/post")
            .set_json(serde_json::json!({
                "title": "t",
                "content": "c",
                "id": "c56ad0b6-7d5f-4b82-9435-4f570ec55ca0"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // The server minted its own id.
        let posts = list!(app);
        assert_eq!(posts.len(), 1);
        assert_ne!(posts[0].id, "c56ad0b6-7d5f-4b82-9435-4f570ec55ca0");
    }

    #[actix_web::test]
    async fn create_with_malformed_json_is_400() {
        let app = app!(state(true));

        let req = test::TestRequest::post()
            .uri("/api/post")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
