use actix_files::Files;
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{middleware, web, App, HttpResponse, HttpResponseBuilder, HttpServer, Result};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::config::Settings;
use crate::display::write_roster;
use crate::error::FeedError;
use crate::export::roster_csv_string;
use crate::feed::FeedLoader;
use crate::report::{search_slots, Summary};
use crate::schedule::{assign_slots, Assignment};
use crate::sitemap::{render_robots, render_sitemap, sitemap_entries};

/// Shared per-server state. Holds no roster: every request rebuilds it.
pub struct AppState {
    pub feed: FeedLoader,
    pub site_url: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Marks a response as never cacheable
fn no_store(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder
        .insert_header((header::CACHE_CONTROL, "no-store, max-age=0"))
        .insert_header((header::PRAGMA, "no-cache"));
    builder
}

fn attachment(filename: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename.to_string())],
    }
}

/// Fetches the sheet and runs the assignment
async fn build_assignment(state: &AppState) -> Result<Assignment, FeedError> {
    let rows = state.feed.fetch_rows().await?;
    let assignment = assign_slots(&rows);
    info!(
        rows = rows.len(),
        assigned = assignment.total_assigned(),
        issues = assignment.issues.len(),
        "roster rebuilt"
    );
    Ok(assignment)
}

// All 24 slots
async fn get_slots(state: web::Data<AppState>) -> Result<HttpResponse, FeedError> {
    let assignment = build_assignment(&state).await?;
    Ok(no_store(HttpResponse::Ok()).json(assignment.slots))
}

// Slots with a matching person
async fn search(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, FeedError> {
    let assignment = build_assignment(&state).await?;
    let hits = search_slots(&assignment.slots, query.q.trim());
    Ok(no_store(HttpResponse::Ok()).json(hits))
}

async fn get_summary(state: web::Data<AppState>) -> Result<HttpResponse, FeedError> {
    let assignment = build_assignment(&state).await?;
    Ok(no_store(HttpResponse::Ok()).json(Summary::from_assignment(&assignment)))
}

async fn export_csv(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, FeedError> {
    let assignment = build_assignment(&state).await?;
    let slots = search_slots(&assignment.slots, query.q.trim());
    let body = roster_csv_string(&slots)?;

    Ok(no_store(HttpResponse::Ok())
        .content_type("text/csv; charset=utf-8")
        .insert_header(attachment("prayer_slots.csv"))
        .body(body))
}

async fn export_text(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, FeedError> {
    let assignment = build_assignment(&state).await?;
    let slots = search_slots(&assignment.slots, query.q.trim());

    let mut body = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_roster(&mut body, "Prayer Slots", &slots);

    Ok(no_store(HttpResponse::Ok())
        .content_type("text/plain; charset=utf-8")
        .insert_header(attachment("prayer_slots.txt"))
        .body(body))
}

async fn sitemap_xml(state: web::Data<AppState>) -> HttpResponse {
    let entries = sitemap_entries(&state.site_url, Utc::now());
    HttpResponse::Ok()
        .content_type("application/xml")
        .body(render_sitemap(&entries))
}

async fn robots_txt(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_robots(&state.site_url))
}

// HTML page handler
async fn index() -> HttpResponse {
    let html = include_str!("../templates/index.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

/// Registers every API and page route
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/slots", web::get().to(get_slots))
        .route("/api/slots/search", web::get().to(search))
        .route("/api/summary", web::get().to(get_summary))
        .route("/api/export.csv", web::get().to(export_csv))
        .route("/api/export.txt", web::get().to(export_text))
        .route("/sitemap.xml", web::get().to(sitemap_xml))
        .route("/robots.txt", web::get().to(robots_txt));
}

pub fn app_state(settings: &Settings) -> Result<web::Data<AppState>, FeedError> {
    let feed = FeedLoader::new(&settings.sheet_url, settings.feed_timeout)?;
    Ok(web::Data::new(AppState {
        feed,
        site_url: settings.site_url.clone(),
    }))
}

pub async fn start_server(bind: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let app_state = app_state(&settings)?;
    let static_dir = settings.static_dir.clone();

    info!(bind, port, sheet = %settings.sheet_url, "starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", static_dir.clone()))
            .configure(routes)
    })
    .bind((bind, port))?
    .run()
    .await?;

    Ok(())
}
