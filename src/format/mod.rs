//! Output formatting for podcasts and reviews (table, JSON, markdown).

use crate::config::OutputFormat;
use crate::itunes::{PodcastSummary, PodcastWithReviews, Review};

/// Formats store results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of podcast summaries.
    pub fn format_podcasts(&self, podcasts: &[PodcastSummary]) -> String {
        if podcasts.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No podcasts found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(podcasts).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_podcasts(podcasts),
            OutputFormat::Markdown => self.markdown_podcasts(podcasts),
        }
    }

    /// Formats a podcast detail together with its reviews.
    pub fn format_podcast(&self, podcast: &PodcastWithReviews) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(podcast).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_podcast(podcast),
            OutputFormat::Markdown => self.markdown_podcast(podcast),
        }
    }

    // Table formatting

    fn table_podcasts(&self, podcasts: &[PodcastSummary]) -> String {
        let id_width = 12;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!("{:<id_width$}  {:<name_width$}  {}", "ID", "Name", "Artist"));
        lines.push(format!("{:-<id_width$}  {:-<name_width$}  {:-<30}", "", "", ""));

        for podcast in podcasts {
            lines.push(format!(
                "{:<id_width$}  {:<name_width$}  {}",
                podcast.id,
                truncate(&podcast.name, name_width),
                podcast.artist
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} podcasts", podcasts.len()));

        lines.join("\n")
    }

    fn table_podcast(&self, podcast: &PodcastWithReviews) -> String {
        let detail = &podcast.detail;
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", detail.id));
        lines.push(format!("Name:     {}", detail.name));
        lines.push(format!("Artist:   {}", detail.artist));
        lines.push(format!("Episodes: {}", detail.episode_count));
        if !detail.genres.is_empty() {
            lines.push(format!("Genres:   {}", detail.genres.join(", ")));
        }
        lines.push(format!("URL:      {}", detail.page_url));
        lines.push(format!("Feed:     {}", detail.feed_url));

        lines.push(String::new());
        if podcast.reviews.is_empty() {
            lines.push("No reviews.".to_string());
        } else {
            lines.push(format!("Reviews ({}):", podcast.reviews.len()));
            for review in &podcast.reviews {
                lines.push(String::new());
                lines.push(format!("  {}  {}", review.stars(), review.title));
                lines.push(format!("  by {} on {}", review.author, published(review)));
                lines.push(format!("  {}", review.content.replace('\n', "\n  ")));
            }
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_podcasts(&self, podcasts: &[PodcastSummary]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Name | Artist |".to_string());
        lines.push("|----|------|--------|".to_string());

        for podcast in podcasts {
            lines.push(format!(
                "| {} | ![]({}) {} | {} |",
                podcast.id,
                podcast.image_url,
                truncate(&podcast.name, 40),
                podcast.artist
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} podcasts found*", podcasts.len()));

        lines.join("\n")
    }

    fn markdown_podcast(&self, podcast: &PodcastWithReviews) -> String {
        let detail = &podcast.detail;
        let mut lines = Vec::new();

        lines.push(format!("## {}", detail.name));
        lines.push(String::new());
        lines.push(format!("- **Artist:** {}", detail.artist));
        lines.push(format!("- **Episodes:** {}", detail.episode_count));
        if !detail.genres.is_empty() {
            lines.push(format!("- **Genres:** {}", detail.genres.join(", ")));
        }
        lines.push(format!("- **URL:** [View in Podcasts]({})", detail.page_url));
        lines.push(format!("- **Feed:** {}", detail.feed_url));

        if !podcast.reviews.is_empty() {
            lines.push(String::new());
            lines.push("### Reviews".to_string());
            for review in &podcast.reviews {
                lines.push(String::new());
                lines.push(format!("**{}** {}", review.title, review.stars()));
                lines.push(format!("*{}, {}*", review.author, published(review)));
                lines.push(String::new());
                lines.push(review.content.clone());
            }
        }

        lines.join("\n")
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn published(review: &Review) -> String {
    review.published_at.format("%Y-%m-%d").to_string()
}
