use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

/// Public pages of the site, relative to the site URL
pub const ROUTES: [&str; 3] = ["", "/about", "/contact"];

/// Paths crawlers are asked to stay away from
const DISALLOWED: [&str; 2] = ["/admin/*", "/login/*"];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

pub fn sitemap_entries(site_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = site_url.trim_end_matches('/');
    ROUTES
        .iter()
        .map(|route| SitemapEntry {
            url: format!("{}{}", base, route),
            last_modified: now,
            change_frequency: "weekly",
            priority: 1.0,
        })
        .collect()
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        // Writing into a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            entry.url,
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.change_frequency,
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED {
        robots.push_str(&format!("Disallow: {}\n", path));
    }
    robots.push_str(&format!("\nHost: {}\nSitemap: {}/sitemap.xml\n", base, base));
    robots
}

/// Writes sitemap.xml and robots.txt into `out_dir`
pub fn write_site_files(out_dir: &Path, site_url: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let entries = sitemap_entries(site_url, Utc::now());
    std::fs::write(out_dir.join("sitemap.xml"), render_sitemap(&entries))?;
    std::fs::write(out_dir.join("robots.txt"), render_robots(site_url))?;
    Ok(())
}
