//! Dashboard view model: search, filtering, sorting and display formatting.
//!
//! Everything here is a pure function over the result of
//! [`crate::application::services::LinkService::list_links`]; no extra store
//! queries are involved.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;

use crate::domain::entities::Link;

/// Query string of `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    /// Code of a link created by the previous form submission.
    pub created: Option<String>,
}

/// Click-count buckets offered by the dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickFilter {
    #[default]
    All,
    /// 1000 clicks or more.
    High,
    /// 100 to 999 clicks.
    Medium,
    /// Fewer than 100 clicks.
    Low,
    /// Clicked at least once.
    Recent,
    /// Never clicked.
    Never,
}

impl ClickFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            Some("low") => Self::Low,
            Some("recent") => Self::Recent,
            Some("never") => Self::Never,
            _ => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Recent => "recent",
            Self::Never => "never",
        }
    }

    pub fn matches(self, link: &Link) -> bool {
        match self {
            Self::All => true,
            Self::High => link.clicks >= 1000,
            Self::Medium => (100..1000).contains(&link.clicks),
            Self::Low => link.clicks < 100,
            Self::Recent => link.was_clicked(),
            Self::Never => !link.was_clicked(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Code,
    #[default]
    Clicks,
    LastClicked,
}

impl SortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("code") => Self::Code,
            Some("lastClicked") => Self::LastClicked,
            _ => Self::Clicks,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Clicks => "clicks",
            Self::LastClicked => "lastClicked",
        }
    }

    /// Direction used when the user switches to this column.
    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::Clicks => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    fn compare(self, a: &Link, b: &Link) -> Ordering {
        match self {
            Self::Code => a.code.cmp(&b.code),
            Self::Clicks => a.clicks.cmp(&b.clicks),
            // Never-clicked links sort as if clicked at the epoch.
            Self::LastClicked => a
                .last_clicked
                .map_or(0, |t| t.timestamp_millis())
                .cmp(&b.last_clicked.map_or(0, |t| t.timestamp_millis())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: Option<&str>, field: SortField) -> Self {
        match value {
            Some("asc") => Self::Asc,
            Some("desc") => Self::Desc,
            _ => field.default_direction(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Resolved dashboard options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkQuery {
    pub search: String,
    pub filter: ClickFilter,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl From<&DashboardQuery> for LinkQuery {
    fn from(query: &DashboardQuery) -> Self {
        let sort = SortField::parse(query.sort.as_deref());
        Self {
            search: query.q.as_deref().unwrap_or_default().trim().to_string(),
            filter: ClickFilter::parse(query.filter.as_deref()),
            sort,
            direction: SortDirection::parse(query.dir.as_deref(), sort),
        }
    }
}

impl LinkQuery {
    /// Applies search, filter and sort. The sort is stable, so ties keep the
    /// newest-first order of the input.
    pub fn apply(&self, links: Vec<Link>) -> Vec<Link> {
        let needle = self.search.to_lowercase();

        let mut selected: Vec<Link> = links
            .into_iter()
            .filter(|l| {
                needle.is_empty()
                    || l.code.to_lowercase().contains(&needle)
                    || l.url.to_lowercase().contains(&needle)
            })
            .filter(|l| self.filter.matches(l))
            .collect();

        selected.sort_by(|a, b| {
            let ord = self.sort.compare(a, b);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        selected
    }

    /// Direction a click on `field`'s column header should request.
    pub fn next_direction(&self, field: SortField) -> SortDirection {
        if field == self.sort {
            match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            }
        } else {
            field.default_direction()
        }
    }
}

/// Human-friendly "last clicked" label.
///
/// `Never`, `Just now`, `N min ago`, `N hour(s) ago`, `Yesterday`, then a
/// calendar date such as `Jan 5, 2025`.
pub fn format_last_clicked(last_clicked: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = last_clicked else {
        return "Never".to_string();
    };

    let minutes = (now - ts).num_seconds() as f64 / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if minutes < 1.0 {
        "Just now".to_string()
    } else if minutes < 60.0 {
        format!("{} min ago", minutes.floor() as i64)
    } else if hours < 24.0 {
        let h = hours.floor() as i64;
        format!("{h} hour{} ago", if h > 1 { "s" } else { "" })
    } else if days < 2.0 {
        "Yesterday".to_string()
    } else {
        ts.format("%b %-d, %Y").to_string()
    }
}

/// Formats a counter with thousands separators (`1234567` → `1,234,567`).
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// One table row on the dashboard.
#[derive(Debug, Clone)]
pub struct LinkRowView {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub clicks: String,
    pub last_clicked: String,
    /// Whether the destination may be rendered as a clickable anchor.
    pub linkable: bool,
}

impl LinkRowView {
    pub fn new(link: &Link, base_url: &str, now: DateTime<Utc>) -> Self {
        Self {
            code: link.code.clone(),
            url: link.url.clone(),
            short_url: link.short_url(base_url),
            clicks: format_count(link.clicks),
            last_clicked: format_last_clicked(link.last_clicked, now),
            linkable: is_web_url(&link.url),
        }
    }
}

/// True for `http` and `https` URLs. Other schemes (`javascript:`, `data:`)
/// are shown as text only.
pub fn is_web_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn link(id: i64, code: &str, url: &str, clicks: i64, last: Option<DateTime<Utc>>) -> Link {
        let mut link = Link::new(id, code.to_string(), url.to_string(), Utc::now());
        link.clicks = clicks;
        link.last_clicked = last;
        link
    }

    fn codes(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.code.as_str()).collect()
    }

    fn sample() -> Vec<Link> {
        let t = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();
        vec![
            link(4, "dddd44", "https://docs.rs", 1500, Some(t)),
            link(3, "cccc33", "https://crates.io", 150, Some(t - Duration::days(1))),
            link(2, "bbbb22", "https://Example.com/Page", 5, None),
            link(1, "aaaa11", "https://rust-lang.org", 0, None),
        ]
    }

    #[test]
    fn test_default_query_sorts_by_clicks_desc() {
        let query = LinkQuery::from(&DashboardQuery::default());

        assert_eq!(query.filter, ClickFilter::All);
        assert_eq!(query.sort, SortField::Clicks);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(
            codes(&query.apply(sample())),
            vec!["dddd44", "cccc33", "bbbb22", "aaaa11"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_on_code_and_url() {
        let query = LinkQuery::from(&DashboardQuery {
            q: Some("EXAMPLE".to_string()),
            ..Default::default()
        });
        assert_eq!(codes(&query.apply(sample())), vec!["bbbb22"]);

        let query = LinkQuery::from(&DashboardQuery {
            q: Some("cccc".to_string()),
            ..Default::default()
        });
        assert_eq!(codes(&query.apply(sample())), vec!["cccc33"]);
    }

    #[test]
    fn test_click_filters() {
        let cases = [
            ("high", vec!["dddd44"]),
            ("medium", vec!["cccc33"]),
            ("low", vec!["bbbb22", "aaaa11"]),
            ("recent", vec!["dddd44", "cccc33"]),
            ("never", vec!["bbbb22", "aaaa11"]),
            ("bogus", vec!["dddd44", "cccc33", "bbbb22", "aaaa11"]),
        ];

        for (filter, expected) in cases {
            let query = LinkQuery::from(&DashboardQuery {
                filter: Some(filter.to_string()),
                ..Default::default()
            });
            assert_eq!(codes(&query.apply(sample())), expected, "filter={filter}");
        }
    }

    #[test]
    fn test_sort_by_code_defaults_to_ascending() {
        let query = LinkQuery::from(&DashboardQuery {
            sort: Some("code".to_string()),
            ..Default::default()
        });

        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(
            codes(&query.apply(sample())),
            vec!["aaaa11", "bbbb22", "cccc33", "dddd44"]
        );
    }

    #[test]
    fn test_sort_by_last_clicked_puts_never_first_ascending() {
        let query = LinkQuery::from(&DashboardQuery {
            sort: Some("lastClicked".to_string()),
            dir: Some("asc".to_string()),
            ..Default::default()
        });

        // Ties keep the input order.
        assert_eq!(
            codes(&query.apply(sample())),
            vec!["bbbb22", "aaaa11", "cccc33", "dddd44"]
        );
    }

    #[test]
    fn test_next_direction_toggles_current_column() {
        let query = LinkQuery::from(&DashboardQuery::default());

        assert_eq!(query.next_direction(SortField::Clicks), SortDirection::Asc);
        assert_eq!(query.next_direction(SortField::Code), SortDirection::Asc);
        assert_eq!(
            query.next_direction(SortField::LastClicked),
            SortDirection::Asc
        );
    }

    #[test]
    fn test_format_last_clicked() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        assert_eq!(format_last_clicked(None, now), "Never");
        assert_eq!(
            format_last_clicked(Some(now - Duration::seconds(30)), now),
            "Just now"
        );
        assert_eq!(
            format_last_clicked(Some(now - Duration::minutes(5)), now),
            "5 min ago"
        );
        assert_eq!(
            format_last_clicked(Some(now - Duration::minutes(90)), now),
            "1 hour ago"
        );
        assert_eq!(
            format_last_clicked(Some(now - Duration::hours(5)), now),
            "5 hours ago"
        );
        assert_eq!(
            format_last_clicked(Some(now - Duration::hours(30)), now),
            "Yesterday"
        );
        assert_eq!(
            format_last_clicked(Some(Utc.with_ymd_and_hms(2025, 1, 5, 8, 0, 0).unwrap()), now),
            "Jan 5, 2025"
        );
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_row_view() {
        let now = Utc::now();
        let row = LinkRowView::new(
            &link(1, "aaa111", "https://example.com", 1200, None),
            "https://tiny.link/",
            now,
        );

        assert_eq!(row.short_url, "https://tiny.link/aaa111");
        assert_eq!(row.clicks, "1,200");
        assert_eq!(row.last_clicked, "Never");
        assert!(row.linkable);
    }

    #[test]
    fn test_only_web_urls_are_linkable() {
        assert!(is_web_url("https://example.com"));
        assert!(is_web_url("HTTP://example.com/a"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("mailto:someone@example.com"));
    }
}
