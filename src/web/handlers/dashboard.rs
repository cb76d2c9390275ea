//! Dashboard page: link table plus the create form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use url::form_urlencoded;

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;
use crate::web::handlers::error_page;
use crate::web::view::{
    ClickFilter, DashboardQuery, LinkQuery, LinkRowView, SortField, format_count,
};

/// Column header with a pre-built sort link.
pub struct SortHeader {
    pub label: &'static str,
    pub href: String,
    /// `▲`, `▼` or empty when the table is not sorted by this column.
    pub arrow: &'static str,
}

/// Option of the click filter `<select>`.
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Template for the dashboard home page.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub links: Vec<LinkRowView>,
    pub total_links: usize,
    pub total_clicks: String,
    pub search: String,
    pub sort: &'static str,
    pub dir: &'static str,
    pub filters: Vec<FilterOption>,
    pub headers: Vec<SortHeader>,
    pub form_url: String,
    pub form_code: String,
    /// Validation message from the last submission, empty if none.
    pub error: String,
    /// Short URL of the link just created, empty if none.
    pub created_short_url: String,
}

/// Fields of the create form.
#[derive(Debug, Default, Deserialize)]
pub struct CreateLinkForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub code: String,
}

/// Renders the dashboard.
///
/// # Endpoint
///
/// `GET /?q=&filter=&sort=&dir=`
///
/// Unknown `filter`, `sort` or `dir` values fall back to their defaults.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let created = query
        .created
        .as_deref()
        .filter(|code| is_valid_code(code))
        .map(|code| format!("{}/{code}", state.base_url))
        .unwrap_or_default();

    match render(&state, &query, CreateLinkForm::default(), String::new(), created).await {
        Ok(page) => page.into_response(),
        Err(e) => error_page(&e),
    }
}

/// Handles the create form.
///
/// # Endpoint
///
/// `POST /dashboard/links`
///
/// On success redirects (303) back to the dashboard, which then shows the new
/// short URL. Validation failures and conflicts re-render the dashboard with
/// the message and the submitted values, using the API's status code.
pub async fn create_link_form_handler(
    State(state): State<AppState>,
    Form(form): Form<CreateLinkForm>,
) -> Response {
    let created = state
        .link_service
        .create_link(Some(&form.url), Some(&form.code))
        .await;

    match created {
        Ok(link) => Redirect::to(&format!("/?created={}", link.code)).into_response(),
        Err(e) if e.status_code().is_client_error() => {
            let status = e.status_code();
            let message = e.public_message();
            match render(&state, &DashboardQuery::default(), form, message, String::new()).await {
                Ok(page) => (status, page).into_response(),
                Err(e) => error_page(&e),
            }
        }
        Err(e) => error_page(&e),
    }
}

async fn render(
    state: &AppState,
    query: &DashboardQuery,
    form: CreateLinkForm,
    error: String,
    created_short_url: String,
) -> Result<DashboardTemplate, AppError> {
    let all = state.link_service.list_links().await?;
    let total_links = all.len();
    let total_clicks = format_count(all.iter().map(|l| l.clicks).sum());

    let options = LinkQuery::from(query);
    let now = Utc::now();
    let links = options
        .apply(all)
        .iter()
        .map(|link: &Link| LinkRowView::new(link, &state.base_url, now))
        .collect();

    Ok(DashboardTemplate {
        links,
        total_links,
        total_clicks,
        search: options.search.clone(),
        sort: options.sort.as_str(),
        dir: options.direction.as_str(),
        filters: filter_options(options.filter),
        headers: sort_headers(&options),
        form_url: form.url,
        form_code: form.code,
        error,
        created_short_url,
    })
}

fn filter_options(current: ClickFilter) -> Vec<FilterOption> {
    [
        (ClickFilter::All, "All links"),
        (ClickFilter::High, "High traffic (1000+)"),
        (ClickFilter::Medium, "Medium traffic (100-999)"),
        (ClickFilter::Low, "Low traffic (<100)"),
        (ClickFilter::Recent, "Clicked"),
        (ClickFilter::Never, "Never clicked"),
    ]
    .into_iter()
    .map(|(filter, label)| FilterOption {
        value: filter.as_str(),
        label,
        selected: filter == current,
    })
    .collect()
}

fn sort_headers(options: &LinkQuery) -> Vec<SortHeader> {
    [
        (SortField::Code, "Code"),
        (SortField::Clicks, "Clicks"),
        (SortField::LastClicked, "Last clicked"),
    ]
    .into_iter()
    .map(|(field, label)| {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if !options.search.is_empty() {
            params.append_pair("q", &options.search);
        }
        if options.filter != ClickFilter::All {
            params.append_pair("filter", options.filter.as_str());
        }
        params.append_pair("sort", field.as_str());
        params.append_pair("dir", options.next_direction(field).as_str());

        let arrow = match (field == options.sort, options.direction.as_str()) {
            (false, _) => "",
            (true, "asc") => "▲",
            (true, _) => "▼",
        };

        SortHeader {
            label,
            href: format!("/?{}", params.finish()),
            arrow,
        }
    })
    .collect()
}
