use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use super::cookie::{read_session_id, session_cookie};
use crate::listing::load_initial_movies;
use crate::server::AppState;
use crate::session::SharedSession;
use crate::view::PageTemplate;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

/// The caller's session, plus its id when it is new and needs a cookie.
async fn session_for(state: &AppState, headers: &HeaderMap) -> (SharedSession, Option<Uuid>) {
    let cookie_name = &state.config.session.cookie_name;
    let (session, created) = state
        .sessions
        .resolve(read_session_id(headers, cookie_name))
        .await;

    let new_id = if created {
        Some(session.lock().await.id)
    } else {
        None
    };
    (session, new_id)
}

/// The caller's session if its cookie names a live one. Only `GET /` starts
/// new sessions.
async fn existing_session(state: &AppState, headers: &HeaderMap) -> Option<SharedSession> {
    let id = read_session_id(headers, &state.config.session.cookie_name)?;
    state.sessions.get(&id).await
}

fn with_cookie(state: &AppState, response: impl IntoResponse, new_id: Option<Uuid>) -> Response {
    let mut response = response.into_response();
    if let Some(id) = new_id {
        if let Some(value) = session_cookie(&state.config.session.cookie_name, &id) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// `GET /`
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session, new_id) = session_for(&state, &headers).await;

    let needs_listing = {
        let mut s = session.lock().await;
        s.touch();
        s.view.is_idle()
    };

    // The listing is fetched without holding the session lock.
    if needs_listing {
        let watchmode = &state.config.watchmode;
        let movies = load_initial_movies(
            &state.watchmode,
            watchmode.listing_limit,
            &watchmode.listing_types,
        )
        .await;
        session.lock().await.view.show_initial(movies);
    }

    let rendered = {
        let s = session.lock().await;
        PageTemplate::new(&s.view, &s.favorites, &s.theme).render()
    };

    match rendered {
        Ok(html) => with_cookie(&state, Html(html), new_id),
        Err(e) => {
            error!(error = %e, "Failed to render page");
            with_cookie(&state, StatusCode::INTERNAL_SERVER_ERROR, new_id)
        }
    }
}

/// `POST /search`
pub async fn submit_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let Some(session) = existing_session(&state, &headers).await else {
        return Redirect::to("/").into_response();
    };

    let ticket = {
        let mut s = session.lock().await;
        s.touch();
        s.view.submit(&form.query)
    };

    if let Some(ticket) = ticket {
        // The view must leave Searching even if this request is dropped
        // before the provider answers.
        let backend = state.search.clone();
        let task = tokio::spawn(async move {
            let outcome = backend.search(ticket.query()).await;
            session.lock().await.view.complete(ticket, outcome);
        });
        if let Err(e) = task.await {
            error!(error = %e, "Search task failed");
        }
    }

    Redirect::to("/").into_response()
}

/// `POST /favorites/:id`
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(session) = existing_session(&state, &headers).await {
        let mut s = session.lock().await;
        s.touch();
        s.favorites.toggle_favorite(&id);
    }
    Redirect::to("/").into_response()
}

/// `POST /theme`
pub async fn toggle_theme(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session) = existing_session(&state, &headers).await {
        let mut s = session.lock().await;
        s.touch();
        s.theme.toggle_theme();
    }
    Redirect::to("/").into_response()
}
