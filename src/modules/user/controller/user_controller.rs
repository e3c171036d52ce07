use crate::common::{ApiResponse, ResponseFormat};
use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::modules::user::domain::{UpdateUserRequest, User, render_listing};
use crate::modules::user::service::UserService;
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

/// Body returned by successful updates and deletes.
pub const ACKNOWLEDGEMENT: &str = "WORKED!";

pub struct UserController {
    service: Arc<UserService>,
}

impl Injectable for UserController {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self {
            service: container.resolve::<UserService>()?,
        })
    }
}

impl UserController {
    pub fn base_path() -> &'static str {
        "/api/users"
    }

    /// `GET /api/users/{id}`: 200 with zero or one rows, never 404.
    pub async fn get_one(&self, id: i32, format: ResponseFormat) -> Result<Response> {
        let users = self.service.get(id).await?;
        Ok(render(users, format))
    }

    /// `GET /api/users`
    pub async fn list(&self, format: ResponseFormat) -> Result<Response> {
        let users = self.service.list().await?;
        Ok(render(users, format))
    }

    /// `POST /api/users`: 201 echoing the decoded payload.
    pub async fn create(&self, user: User) -> Result<(StatusCode, Json<User>)> {
        let user = self.service.create(user).await?;
        Ok((StatusCode::CREATED, Json(user)))
    }

    /// `PUT /api/users/{id}`: the path id wins over any id in the body.
    pub async fn update(&self, id: i32, changes: UpdateUserRequest) -> Result<&'static str> {
        self.service.update(id, changes).await?;
        Ok(ACKNOWLEDGEMENT)
    }

    /// `DELETE /api/users/{id}`
    pub async fn delete(&self, id: i32) -> Result<&'static str> {
        self.service.delete(id).await?;
        Ok(ACKNOWLEDGEMENT)
    }

    pub fn router<S>(controller: Arc<Self>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let collection = Self::base_path();
        let member = format!("{}/{{id}}", collection);

        Router::new()
            .route(
                collection,
                get({
                    let controller = controller.clone();
                    move |format: ResponseFormat| {
                        let controller = controller.clone();
                        async move { controller.list(format).await.into_response() }
                    }
                })
                .post({
                    let controller = controller.clone();
                    move |Json(user): Json<User>| {
                        let controller = controller.clone();
                        async move { controller.create(user).await.into_response() }
                    }
                }),
            )
            .route(
                &member,
                get({
                    let controller = controller.clone();
                    move |Path(id): Path<i32>, format: ResponseFormat| {
                        let controller = controller.clone();
                        async move { controller.get_one(id, format).await.into_response() }
                    }
                })
                .put({
                    let controller = controller.clone();
                    move |Path(id): Path<i32>, Json(changes): Json<UpdateUserRequest>| {
                        let controller = controller.clone();
                        async move { controller.update(id, changes).await.into_response() }
                    }
                })
                .delete({
                    let controller = controller.clone();
                    move |Path(id): Path<i32>| {
                        let controller = controller.clone();
                        async move { controller.delete(id).await.into_response() }
                    }
                }),
            )
    }
}

fn render(users: Vec<User>, format: ResponseFormat) -> Response {
    match format {
        ResponseFormat::Text => (StatusCode::OK, render_listing(&users)).into_response(),
        ResponseFormat::Json => ApiResponse::success(users).into_response(),
    }
}
