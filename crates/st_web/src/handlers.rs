use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::sync::Arc;

use st_cms::ExtendStatus;
use st_core::Post;

use crate::AppState;

const MONTHS_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub published_at: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostView>,
    pub has_more: bool,
}

/// Dates are stored raw on the `Post` and only formatted here, at the
/// presentation edge, in the original blog's pt-BR style.
pub fn format_published(published_at: DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        published_at.day(),
        MONTHS_PT_BR[published_at.month0() as usize],
        published_at.year()
    )
}

fn post_view(post: &Post) -> PostView {
    PostView {
        id: post.id.clone(),
        title: post.summary.title.clone(),
        subtitle: post.summary.subtitle.clone(),
        author: post.summary.author.clone(),
        published_at: post.published_at.map(format_published),
        href: post.id.as_ref().map(|id| format!("/post/{}", id)),
    }
}

fn list_response(posts: &[Post], has_more: bool) -> PostListResponse {
    PostListResponse {
        posts: posts.iter().map(post_view).collect(),
        has_more,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let (posts, has_more) = state.feed.snapshot().await;

    let mut body = String::from(
        "<!DOCTYPE html><html lang=\"pt-BR\"><head><meta charset=\"utf-8\">\
         <title>spacetraveling</title></head><body><main class=\"container\">\
         <div class=\"posts\">",
    );
    for post in &posts {
        let view = post_view(post);
        body.push_str(&format!(
            "<a href=\"{}\"><h1>{}</h1><p>{}</p><div><time>{}</time><span>{}</span></div></a>",
            view.href.as_deref().unwrap_or("#"),
            escape(&view.title),
            escape(&view.subtitle),
            view.published_at.as_deref().unwrap_or(""),
            escape(&view.author),
        ));
    }
    body.push_str("</div>");
    // The affordance disappears once the cursor is terminal.
    if has_more {
        body.push_str(
            "<button class=\"morePosts\" data-endpoint=\"/api/posts/more\">\
             Carregar mais posts</button>",
        );
    }
    body.push_str("</main></body></html>");

    Html(body)
}

pub async fn list_posts(State(state): State<Arc<AppState>>) -> Json<PostListResponse> {
    let (posts, has_more) = state.feed.snapshot().await;
    Json(list_response(&posts, has_more))
}

pub async fn load_more(State(state): State<Arc<AppState>>) -> Response {
    match state.feed.load_more(state.source.as_ref()).await {
        Ok(ExtendStatus::Busy) => {
            (StatusCode::CONFLICT, "load already in flight").into_response()
        }
        Ok(status) => {
            if let ExtendStatus::Appended(count) = status {
                tracing::info!("📚 Appended {} posts", count);
            }
            let (posts, has_more) = state.feed.snapshot().await;
            Json(list_response(&posts, has_more)).into_response()
        }
        Err(e) => {
            // The feed keeps its cursor, so the client can retry as-is.
            tracing::error!("Failed to load more posts: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

pub async fn get_post(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let (posts, _) = state.feed.snapshot().await;
    match posts.iter().find(|p| p.id.as_deref() == Some(id.as_str())) {
        Some(post) => Json(post_view(post)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
