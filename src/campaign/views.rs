//! Server-rendered pages for the campaign dashboard.
//!
//! Each page is assembled from small component functions that take the
//! campaign data directly. User-supplied text is always passed through
//! [`escape`] before it reaches the markup.

use super::{Campaign, CampaignStats, TIMESTAMP_FORMAT};

const DEFAULT_AUDIENCE: &str = "General audience";

const TAILWIND_SCRIPT: &str = r#"<script src="https://cdn.tailwindcss.com"></script>"#;

const CHART_SCRIPT: &str = r#"<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>"#;

const BUTTON_STYLE: &str = r#"<style>
        .btn-primary {
            background: linear-gradient(135deg, #1e90ff, #36b4ff);
            color: white;
            font-weight: 600;
            transition: all 0.3s ease;
        }
        .btn-primary:hover {
            transform: translateY(-2px);
            box-shadow: 0 10px 20px rgba(30, 144, 255, 0.4);
        }
    </style>"#;

const FORM_TOGGLE_SCRIPT: &str = r#"<script>
        function showCreateForm() {
            document.getElementById('createForm').classList.remove('hidden');
        }
        function hideCreateForm() {
            document.getElementById('createForm').classList.add('hidden');
        }
    </script>"#;

const CREATE_CAMPAIGN_FORM: &str = r#"<div id="createForm" class="bg-gray-800 p-6 rounded-lg mb-8 hidden">
            <h2 class="text-xl font-semibold mb-4">Create New Campaign</h2>
            <form action="/create_campaign" method="POST" class="space-y-4">
                <div>
                    <label class="block text-sm font-medium mb-2">Campaign Name</label>
                    <input type="text" name="name" required class="w-full p-3 bg-gray-700 rounded-lg text-white" placeholder="e.g., Summer Promotion">
                </div>
                <div>
                    <label class="block text-sm font-medium mb-2">Podcast Name</label>
                    <input type="text" name="podcast_name" required class="w-full p-3 bg-gray-700 rounded-lg text-white" placeholder="Your podcast name">
                </div>
                <div>
                    <label class="block text-sm font-medium mb-2">RSS Feed URL</label>
                    <input type="url" name="rss_feed" required class="w-full p-3 bg-gray-700 rounded-lg text-white" placeholder="https://...">
                </div>
                <div>
                    <label class="block text-sm font-medium mb-2">Target Audience</label>
                    <input type="text" name="target_audience" class="w-full p-3 bg-gray-700 rounded-lg text-white" placeholder="e.g., Tech professionals, 25-45">
                </div>
                <div>
                    <label class="block text-sm font-medium mb-2">Budget (USD)</label>
                    <input type="number" name="budget" class="w-full p-3 bg-gray-700 rounded-lg text-white" placeholder="1000">
                </div>
                <div class="flex space-x-4">
                    <button type="submit" class="btn-primary px-6 py-3 rounded-lg">Create Campaign</button>
                    <button type="button" onclick="hideCreateForm()" class="bg-gray-600 px-6 py-3 rounded-lg hover:bg-gray-500">Cancel</button>
                </div>
            </form>
        </div>"#;

const NO_CAMPAIGNS: &str =
    r#"<p class="text-gray-400">No campaigns yet. Create your first campaign to get started!</p>"#;

/// The dashboard listing every campaign with the headline metrics.
pub fn render_campaigns_page(stats: &CampaignStats, campaigns: &[Campaign]) -> String {
    let campaign_list = if campaigns.is_empty() {
        NO_CAMPAIGNS.to_string()
    } else {
        campaigns.iter().map(campaign_summary).collect()
    };

    let body = format!(
        r#"<div class="container mx-auto px-4 py-8">
        <div class="flex justify-between items-center mb-6">
            <div>
                <h1 class="text-3xl font-bold text-[#1e90ff]">Campaign Manager</h1>
                <p class="text-gray-300">Manage your podcast campaigns and track performance.</p>
            </div>
            <button onclick="showCreateForm()" class="btn-primary px-6 py-3 rounded-lg">+ Create Campaign</button>
        </div>
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6 mb-8">
            {active}
            {clicks}
            {ctr}
        </div>
        {form}
        <div class="bg-gray-800 p-6 rounded-lg">
            <h2 class="text-xl font-semibold mb-4">Your Campaigns</h2>
            {campaign_list}
        </div>
    </div>
    {script}"#,
        active = headline_tile("bg-blue-600", "Active Campaigns", &stats.active_count.to_string()),
        clicks = headline_tile("bg-green-600", "Total Clicks", &stats.total_clicks.to_string()),
        ctr = headline_tile("bg-purple-600", "Avg. CTR", &format_percent(stats.average_ctr())),
        form = CREATE_CAMPAIGN_FORM,
        campaign_list = campaign_list,
        script = FORM_TOGGLE_SCRIPT,
    );

    layout("Campaign Manager", BUTTON_STYLE, &body)
}

/// The analytics page for a single campaign.
pub fn render_campaign_page(campaign: &Campaign) -> String {
    let name = escape(&campaign.name);

    let body = format!(
        r#"<div class="container mx-auto px-4 py-8">
        <div class="flex justify-between items-center mb-6">
            <div>
                <h1 class="text-3xl font-bold text-[#1e90ff]">{name}</h1>
                <p class="text-gray-300">Campaign Analytics Dashboard</p>
            </div>
            <a href="/" class="bg-gray-600 px-4 py-2 rounded-lg hover:bg-gray-500">&larr; Back to Campaigns</a>
        </div>
        <div class="grid grid-cols-1 md:grid-cols-4 gap-6 mb-8">
            {clicks}
            {status}
            {budget}
            {ctr}
        </div>
        <div class="bg-gray-800 p-6 rounded-lg mb-6">
            <h2 class="text-xl font-semibold mb-4">Campaign Details</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                {podcast}
                {audience}
                <div>
                    <p class="text-gray-400">RSS Feed</p>
                    <p class="text-sm text-blue-300 break-all">{rss_feed}</p>
                </div>
                {created}
            </div>
        </div>
    </div>"#,
        name = name,
        clicks = metric_tile("bg-blue-600", "Total Clicks", "text-2xl", &campaign.clicks.to_string()),
        status = metric_tile("bg-green-600", "Status", "text-xl", &escape(&title_case(&campaign.status))),
        budget = metric_tile("bg-purple-600", "Budget", "text-xl", &format!("${}", budget_amount(campaign.budget))),
        ctr = metric_tile("bg-orange-600", "CTR", "text-xl", &format_percent(campaign.ctr())),
        podcast = detail_field("Podcast Name", &escape(&campaign.podcast_name)),
        audience = detail_field("Target Audience", &escape(audience_label(campaign.target_audience.as_deref()))),
        rss_feed = escape(&campaign.rss_feed),
        created = detail_field("Created", &campaign.created_at.format(TIMESTAMP_FORMAT).to_string()),
    );

    let title = format!("Campaign: {}", name);
    layout(&title, CHART_SCRIPT, &body)
}

fn layout(title: &str, head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    {tailwind}
    {head}
</head>
<body class="bg-gray-900 text-white">
    {body}
</body>
</html>
"#,
        title = title,
        tailwind = TAILWIND_SCRIPT,
        head = head,
        body = body,
    )
}

fn campaign_summary(campaign: &Campaign) -> String {
    format!(
        r#"<div class="bg-gray-800 p-4 rounded-lg mb-4">
                <div class="flex justify-between items-center">
                    <div>
                        <h3 class="text-lg font-semibold"><a href="/campaign/{id}" class="hover:underline">{name}</a></h3>
                        <p class="text-gray-400">{podcast_name}</p>
                        <p class="text-sm text-gray-500">Target: {audience}</p>
                    </div>
                    <div class="text-right">
                        <span class="{color} px-2 py-1 rounded text-sm">{status}</span>
                        <p class="text-gray-400 mt-1">{clicks} clicks</p>
                    </div>
                </div>
            </div>
            "#,
        id = campaign.id,
        name = escape(&campaign.name),
        podcast_name = escape(&campaign.podcast_name),
        audience = escape(audience_label(campaign.target_audience.as_deref())),
        color = status_color(&campaign.status),
        status = escape(&title_case(&campaign.status)),
        clicks = campaign.clicks,
    )
}

fn headline_tile(color: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="{color} p-6 rounded-lg">
                <h3 class="font-semibold text-lg">{label}</h3>
                <p class="text-3xl font-bold">{value}</p>
            </div>"#,
        color = color,
        label = label,
        value = value,
    )
}

fn metric_tile(color: &str, label: &str, size: &str, value: &str) -> String {
    format!(
        r#"<div class="{color} p-6 rounded-lg">
                <h3 class="font-semibold">{label}</h3>
                <p class="{size} font-bold">{value}</p>
            </div>"#,
        color = color,
        label = label,
        size = size,
        value = value,
    )
}

fn detail_field(label: &str, value: &str) -> String {
    format!(
        r#"<div>
                    <p class="text-gray-400">{label}</p>
                    <p class="text-lg">{value}</p>
                </div>"#,
        label = label,
        value = value,
    )
}

/// Badge color for a campaign status. Only the exact strings `active` and
/// `pending` get their own color.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "active" => "bg-green-600",
        "pending" => "bg-yellow-600",
        _ => "bg-red-600",
    }
}

/// Missing and empty audiences both fall back to the default label.
pub fn audience_label(target_audience: Option<&str>) -> &str {
    match target_audience {
        Some(audience) if !audience.is_empty() => audience,
        _ => DEFAULT_AUDIENCE,
    }
}

pub fn budget_amount(budget: Option<i64>) -> i64 {
    budget.unwrap_or(0)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Uppercases the first letter of every run of letters and lowercases the
/// rest, so `"pending review"` becomes `"Pending Review"`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::campaign::CampaignId;

    fn campaign(status: &str, clicks: i64) -> Campaign {
        Campaign {
            id: CampaignId(12),
            name: "Summer Promo".to_string(),
            podcast_name: "Tech Talk".to_string(),
            rss_feed: "https://example.com/feed.xml".to_string(),
            target_audience: None,
            budget: None,
            status: status.to_string(),
            clicks,
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 15)
                .unwrap(),
        }
    }

    #[test]
    fn status_color_has_three_branches() {
        assert_eq!(status_color("active"), "bg-green-600");
        assert_eq!(status_color("pending"), "bg-yellow-600");
        assert_eq!(status_color("paused"), "bg-red-600");
        assert_eq!(status_color("Active"), "bg-red-600");
        assert_eq!(status_color(""), "bg-red-600");
    }

    #[test]
    fn audience_label_defaults_missing_and_empty() {
        assert_eq!(audience_label(None), "General audience");
        assert_eq!(audience_label(Some("")), "General audience");
        assert_eq!(audience_label(Some("Gamers")), "Gamers");
    }

    #[test]
    fn budget_amount_defaults_to_zero() {
        assert_eq!(budget_amount(None), 0);
        assert_eq!(budget_amount(Some(500)), 500);
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("active"), "Active");
        assert_eq!(title_case("PENDING"), "Pending");
        assert_eq!(title_case("on hold"), "On Hold");
        assert_eq!(title_case("re-launch"), "Re-Launch");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x & y")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn empty_list_page_shows_placeholder_and_zero_metrics() {
        let page = render_campaigns_page(&CampaignStats::default(), &[]);

        assert!(page.contains("No campaigns yet. Create your first campaign to get started!"));
        assert!(page.contains(r#"<p class="text-3xl font-bold">0.0%</p>"#));
        assert!(page.contains(r#"<form action="/create_campaign" method="POST""#));
    }

    #[test]
    fn list_page_renders_one_summary_per_campaign() {
        let stats = CampaignStats {
            active_count: 1,
            total_clicks: 30,
        };
        let campaigns = vec![campaign("active", 30), campaign("pending", 0)];

        let page = render_campaigns_page(&stats, &campaigns);

        assert!(!page.contains("No campaigns yet"));
        assert_eq!(page.matches("Target: General audience").count(), 2);
        assert!(page.contains(r#"<span class="bg-green-600 px-2 py-1 rounded text-sm">Active</span>"#));
        assert!(page.contains(r#"<span class="bg-yellow-600 px-2 py-1 rounded text-sm">Pending</span>"#));
        assert!(page.contains("30 clicks"));
        assert!(page.contains(r#"<p class="text-3xl font-bold">3.0%</p>"#));
        assert!(page.contains(r#"href="/campaign/12""#));
    }

    #[test]
    fn list_page_escapes_campaign_text() {
        let mut hostile = campaign("active", 0);
        hostile.name = "<b>Loud</b>".to_string();

        let page = render_campaigns_page(&CampaignStats::default(), &[hostile]);

        assert!(page.contains("&lt;b&gt;Loud&lt;/b&gt;"));
        assert!(!page.contains("<b>Loud</b>"));
    }

    #[test]
    fn detail_page_renders_tiles_and_defaults() {
        let page = render_campaign_page(&campaign("active", 0));

        assert!(page.contains("<title>Campaign: Summer Promo</title>"));
        assert!(page.contains(r#"<p class="text-2xl font-bold">0</p>"#));
        assert!(page.contains(r#"<p class="text-xl font-bold">Active</p>"#));
        assert!(page.contains(r#"<p class="text-xl font-bold">$0</p>"#));
        assert!(page.contains(r#"<p class="text-xl font-bold">0.0%</p>"#));
        assert!(page.contains("General audience"));
        assert!(page.contains("https://example.com/feed.xml"));
        assert!(page.contains("2024-06-01 09:30:15"));
    }

    #[test]
    fn detail_page_shows_budget_and_ctr() {
        let mut promo = campaign("paused", 42);
        promo.budget = Some(1500);
        promo.target_audience = Some("Developers".to_string());

        let page = render_campaign_page(&promo);

        assert!(page.contains(r#"<p class="text-xl font-bold">$1500</p>"#));
        assert!(page.contains(r#"<p class="text-xl font-bold">4.2%</p>"#));
        assert!(page.contains(r#"<p class="text-xl font-bold">Paused</p>"#));
        assert!(page.contains("Developers"));
        assert!(!page.contains("General audience"));
    }
}
