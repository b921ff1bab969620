use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::AppMessageService;

#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Messages for the user, oldest first", body = [Message]),
        (status = 400, description = "userId missing")
    )
)]
pub async fn list_messages(
    message_service: web::Data<AppMessageService>,
    query: web::Query<ListMessagesQuery>,
) -> Result<HttpResponse> {
    match message_service
        .list_messages(query.into_inner().user_id)
        .await
    {
        Ok(messages) => Ok(HttpResponse::Ok().json(messages)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Message stored", body = PostMessageResponse),
        (status = 400, description = "Missing fields"),
        (status = 500, description = "Message file could not be written")
    )
)]
pub async fn post_message(
    message_service: web::Data<AppMessageService>,
    request: web::Json<PostMessageRequest>,
) -> Result<HttpResponse> {
    match message_service.post_message(request.into_inner()).await {
        Ok(message) => Ok(HttpResponse::Ok().json(PostMessageResponse {
            success: true,
            message,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn message_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/messages", web::get().to(list_messages))
            .route("/messages", web::post().to(post_message)),
    );
}
