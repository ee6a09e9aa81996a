use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{
        CreateServiceRequestRequest, CreateVerificationRequest, Post, PostKind, ServiceRequest,
        VerificationRequest,
    },
    error::{AppError, Result},
    integrations::PortalEvent,
    listing::{DateWindow, ListingConfig, UpcomingWindow, Window, ALL_CATEGORIES},
};

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub normal_page: Option<usize>,
    pub low_page: Option<usize>,
    pub category: Option<String>,
    pub window: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub items: Vec<Post>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

#[derive(Debug, Serialize)]
pub struct ListingView {
    pub kind: PostKind,
    pub showcase: Vec<Post>,
    pub showcase_index: usize,
    pub normal: PageView,
    pub low: PageView,
    pub category: String,
    pub window: &'static str,
}

fn parse_window(kind: PostKind, raw: Option<&str>) -> Result<Option<Window>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let window = match kind {
        PostKind::Event => UpcomingWindow::from_str(raw).map(Window::Upcoming),
        _ => DateWindow::from_str(raw).map(Window::Past),
    };

    window
        .map(Some)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown date window: {}", raw)))
}

async fn listing_view(
    state: &AppState,
    kind: PostKind,
    query: ListingQuery,
) -> Result<ListingView> {
    let window = parse_window(kind, query.window.as_deref())?;
    let showcase_index = state.listing_service.showcase_index(kind).await;

    let view = state
        .listing_service
        .with_listing(kind, move |listing| {
            // The cached listing is shared across requests: every filter and
            // page must be set from this request's params, absent ones
            // included, or one client's view bleeds into the next.
            match query.category {
                Some(category) => listing.set_category(category),
                None => listing.set_category(ALL_CATEGORIES.to_string()),
            }
            match window {
                Some(window) => listing.set_window(window),
                None => listing.set_window(ListingConfig::for_kind(kind).default_window),
            }
            listing.set_normal_page(query.normal_page.unwrap_or(1));
            listing.set_low_page(query.low_page.unwrap_or(1));

            let showcase = listing.showcase().to_vec();
            let showcase_index = if showcase.is_empty() {
                0
            } else {
                showcase_index % showcase.len()
            };

            ListingView {
                kind,
                showcase_index,
                normal: PageView {
                    items: listing.normal_page().to_vec(),
                    page: listing.normal_page_number(),
                    total_pages: listing.normal_total_pages(),
                    total_items: listing.normal_total_items(),
                },
                low: PageView {
                    items: listing.low_page().to_vec(),
                    page: listing.low_page_number(),
                    total_pages: listing.low_total_pages(),
                    total_items: listing.low_total_items(),
                },
                category: listing.category().to_string(),
                window: listing.window().as_str(),
                showcase,
            }
        })
        .await;

    Ok(view)
}

pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    Ok(Json(listing_view(&state, PostKind::News, query).await?))
}

pub async fn list_announcements(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    Ok(Json(
        listing_view(&state, PostKind::Announcement, query).await?,
    ))
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    Ok(Json(listing_view(&state, PostKind::Event, query).await?))
}

pub async fn submit_service_request(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequestRequest>,
) -> Result<(StatusCode, Json<ServiceRequest>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state
        .service_context
        .service_request_repo
        .create(request)
        .await?;

    state
        .service_context
        .integration_manager
        .handle_event(PortalEvent::ServiceRequestSubmitted(created.clone()))
        .await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn submit_verification(
    State(state): State<AppState>,
    Json(request): Json<CreateVerificationRequest>,
) -> Result<(StatusCode, Json<VerificationRequest>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // The linked account must exist before a verification can be filed.
    state
        .service_context
        .user_repo
        .find_by_id(request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let created = state
        .service_context
        .verification_repo
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn rss_feed(State(state): State<AppState>) -> Result<Response> {
    let announcements = state
        .service_context
        .post_repo
        .list_published(PostKind::Announcement)
        .await?;

    let rss = generate_rss_feed(&announcements, &state.settings.server.base_url);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        rss,
    )
        .into_response())
}

pub async fn calendar_feed(State(state): State<AppState>) -> Result<Response> {
    let events = state
        .service_context
        .post_repo
        .list_published(PostKind::Event)
        .await?;

    let ical = generate_ical_feed(&events);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        ical,
    )
        .into_response())
}

fn generate_rss_feed(posts: &[Post], base_url: &str) -> String {
    let mut rss = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>Municipal Announcements</title>
    <link>"#,
    );
    rss.push_str(base_url);
    rss.push_str(
        r#"/public/announcements</link>
    <description>Latest announcements from the municipal government</description>
    <language>en-us</language>
    <lastBuildDate>"#,
    );

    rss.push_str(&Utc::now().to_rfc2822());
    rss.push_str("</lastBuildDate>\n");

    for post in posts.iter().take(20) {
        rss.push_str("    <item>\n");
        rss.push_str(&format!("        <title><![CDATA[{}]]></title>\n", post.title));
        rss.push_str(&format!(
            "        <description><![CDATA[{}]]></description>\n",
            post.content
        ));
        let guid = post
            .uuid
            .map(|u| u.to_string())
            .unwrap_or_else(|| post.id.to_string());
        rss.push_str(&format!(
            "        <guid isPermaLink=\"false\">{}</guid>\n",
            guid
        ));
        rss.push_str(&format!(
            "        <pubDate>{}</pubDate>\n",
            post.created_at.to_rfc2822()
        ));
        rss.push_str("    </item>\n");
    }

    rss.push_str("</channel>\n</rss>");
    rss
}

fn generate_ical_feed(events: &[Post]) -> String {
    let mut ical = String::from("BEGIN:VCALENDAR\r\n");
    ical.push_str("VERSION:2.0\r\n");
    ical.push_str("PRODID:-//Munisipyo//Events//EN\r\n");
    ical.push_str("CALSCALE:GREGORIAN\r\n");
    ical.push_str("METHOD:PUBLISH\r\n");
    ical.push_str("X-WR-CALNAME:Municipal Events\r\n");

    for event in events {
        let Some(date) = event.event_date else {
            continue;
        };

        ical.push_str("BEGIN:VEVENT\r\n");
        let uid = event
            .uuid
            .map(|u| u.to_string())
            .unwrap_or_else(|| event.id.to_string());
        ical.push_str(&format!("UID:{}\r\n", uid));
        ical.push_str(&format!("DTSTART;VALUE=DATE:{}\r\n", date.format("%Y%m%d")));
        ical.push_str(&format!("SUMMARY:{}\r\n", event.title));
        ical.push_str(&format!(
            "DESCRIPTION:{}\r\n",
            event.content.replace('\n', "\\n")
        ));

        if let Some(location) = &event.location {
            ical.push_str(&format!("LOCATION:{}\r\n", location));
        }

        ical.push_str(&format!(
            "CREATED:{}\r\n",
            event.created_at.format("%Y%m%dT%H%M%SZ")
        ));
        ical.push_str("STATUS:CONFIRMED\r\n");
        ical.push_str("END:VEVENT\r\n");
    }

    ical.push_str("END:VCALENDAR\r\n");
    ical
}
