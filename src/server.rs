use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tmc_events::{
    apply_filter, export_batch, export_event, initial_view, local_today_key, parse_page,
    partition_past_events, select_upcoming, EventCard, Export, Filter, FilterView, Page, PastEvent,
    UPCOMING_LIMIT,
};

use crate::cache::Cache;

/// Where the events page is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    pub fn parse(s: String) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s)
        } else {
            Source::File(s.into())
        }
    }

    fn key(&self) -> String {
        match self {
            Source::Url(url) => url.clone(),
            Source::File(path) => path.display().to_string(),
        }
    }

    async fn fetch(&self) -> Result<String> {
        match self {
            Source::Url(url) => Ok(reqwest::get(url)
                .await?
                .error_for_status()?
                .text()
                .await?),
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

pub struct AppState {
    pub source: Source,
    pub cache: Arc<Cache<String, Page>>,
}

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/events", get(handle_events))
        .route("/events/:index", get(handle_event_download))
        .route("/calendar.ics", get(handle_calendar_download))
        .with_state(state)
}

async fn load_page(state: &AppState) -> Result<Arc<Page>> {
    let key = state.source.key();

    if let Some(page) = state.cache.get(&key) {
        return Ok(page);
    }

    info!("Loading events page from {key}");
    let html = state.source.fetch().await?;
    let page = parse_page(html);

    Ok(Arc::clone(&state.cache).insert(key, page))
}

/// Page state after the expired events were moved out, as the site shows it.
struct Evaluated {
    today: String,
    upcoming: Vec<EventCard>,
    past: Vec<PastEvent>,
    home: Vec<EventCard>,
}

async fn evaluate(state: &AppState) -> Result<Evaluated, Response> {
    let page = load_page(state).await.map_err(|err| {
        error!("{err:#}");
        (StatusCode::BAD_GATEWAY, "Failed to load events page").into_response()
    })?;

    let today = local_today_key();
    let partition = partition_past_events(&page.events, &page.past, &today);

    Ok(Evaluated {
        today,
        upcoming: partition.upcoming,
        past: partition.past,
        home: page.home.clone(),
    })
}

#[derive(Deserialize)]
struct FilterQuery {
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl FilterQuery {
    /// Without `type` the page is shown as loaded, with it as if that
    /// filter button was clicked.
    fn view(&self, cards: &[EventCard]) -> FilterView {
        match self.kind.as_deref() {
            Some(kind) => apply_filter(cards, &Filter::parse(kind)),
            None => initial_view(cards),
        }
    }
}

#[derive(Serialize)]
struct UpcomingView<'a> {
    index: usize,
    visible: bool,
    #[serde(flatten)]
    card: &'a EventCard,
}

#[derive(Serialize)]
struct HomeView<'a> {
    stagger: usize,
    #[serde(flatten)]
    card: &'a EventCard,
}

#[derive(Serialize)]
struct EventsView<'a> {
    today: &'a str,
    upcoming: Vec<UpcomingView<'a>>,
    no_events: bool,
    past: &'a [PastEvent],
    home: Vec<HomeView<'a>>,
}

async fn handle_events(State(state): State<SharedState>, Query(query): Query<FilterQuery>) -> Response {
    let evaluated = match evaluate(&state).await {
        Ok(evaluated) => evaluated,
        Err(response) => return response,
    };

    let view = query.view(&evaluated.upcoming);

    let upcoming = evaluated
        .upcoming
        .iter()
        .zip(&view.visible)
        .enumerate()
        .map(|(index, (card, visible))| UpcomingView {
            index,
            visible: *visible,
            card,
        })
        .collect();

    let home = select_upcoming(&evaluated.home, &evaluated.today, UPCOMING_LIMIT)
        .into_iter()
        .map(|selected| HomeView {
            stagger: selected.stagger,
            card: selected.card,
        })
        .collect();

    Json(EventsView {
        today: &evaluated.today,
        upcoming,
        no_events: view.is_empty(),
        past: &evaluated.past,
        home,
    })
    .into_response()
}

async fn handle_event_download(State(state): State<SharedState>, Path(index): Path<usize>) -> Response {
    let evaluated = match evaluate(&state).await {
        Ok(evaluated) => evaluated,
        Err(response) => return response,
    };

    let Some(card) = evaluated.upcoming.get(index) else {
        return (StatusCode::NOT_FOUND, "No such event").into_response();
    };

    download(export_event(&card.record))
}

async fn handle_calendar_download(
    State(state): State<SharedState>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let evaluated = match evaluate(&state).await {
        Ok(evaluated) => evaluated,
        Err(response) => return response,
    };

    let view = query.view(&evaluated.upcoming);
    let shown = view.shown(&evaluated.upcoming).map(|card| &card.record);

    download(export_batch(shown))
}

fn download(export: Export) -> Response {
    match export {
        Export::Ready(file) => {
            let headers = [
                (header::CONTENT_TYPE, file.mime_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.file_name),
                ),
            ];

            (headers, file.into_bytes()).into_response()
        }
        Export::Notice(notice) => (StatusCode::NOT_FOUND, notice.message()).into_response(),
    }
}
