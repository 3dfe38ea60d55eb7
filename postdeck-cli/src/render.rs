//! Terminal rendering for the calendar view model.
//!
//! Extension traits that turn postdeck-core types into colored terminal
//! output with owo_colors. Padding happens before coloring so ANSI codes
//! never throw off the column math.

use chrono::Datelike;
use owo_colors::OwoColorize;
use postdeck_core::{Phase, Platform, Post, PostStatus, ViewModel};

const CELL_WIDTH: usize = 6;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Platform {
    fn render(&self) -> String {
        let name = self.as_str();
        match self {
            Platform::Linkedin => name.blue().to_string(),
            Platform::Twitter => name.cyan().to_string(),
            Platform::Instagram => name.magenta().to_string(),
            Platform::Facebook => name.bright_blue().to_string(),
            Platform::Web => name.green().to_string(),
        }
    }
}

impl Render for PostStatus {
    fn render(&self) -> String {
        let name = self.as_str();
        match self {
            PostStatus::Pending => name.yellow().to_string(),
            PostStatus::Scheduled => name.green().to_string(),
            PostStatus::Sent => name.dimmed().to_string(),
            PostStatus::Failed | PostStatus::Rejected => name.red().to_string(),
        }
    }
}

impl Render for Post {
    fn render(&self) -> String {
        let time = self.scheduled_at.time().format("%H:%M");
        let id_tag = format!("#{}", self.id);

        format!(
            "  {} {} [{}] ({}) {}",
            time,
            self.title,
            self.platform.render(),
            self.status.render(),
            id_tag.dimmed(),
        )
    }
}

impl Render for ViewModel {
    fn render(&self) -> String {
        let mut lines = vec![self.period.to_string().bold().to_string()];

        let header: String = self
            .cells
            .iter()
            .take(7)
            .map(|c| format!("{:>CELL_WIDTH$}", c.date.format("%a").to_string()))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in self.cells.chunks(7) {
            let row: String = week
                .iter()
                .map(|cell| {
                    let plain = if cell.posts.is_empty() {
                        format!("{:>4}  ", cell.date.day())
                    } else {
                        format!("{:>4}*{}", cell.date.day(), cell.posts.len())
                    };
                    if cell.in_month {
                        plain
                    } else {
                        plain.dimmed().to_string()
                    }
                })
                .collect();
            lines.push(row);
        }

        if self.phase == Phase::Error {
            lines.push(
                "Could not reach the backend; showing previously loaded posts"
                    .red()
                    .to_string(),
            );
        }
        if self.skipped > 0 {
            lines.push(
                format!("({} unreadable post(s) skipped)", self.skipped)
                    .dimmed()
                    .to_string(),
            );
        }

        lines.join("\n")
    }
}

/// Day-grouped listing of the month's posts, below the grid.
pub fn render_schedule(view: &ViewModel) -> String {
    let mut lines = Vec::new();

    for cell in view.cells.iter().filter(|c| c.in_month && !c.posts.is_empty()) {
        lines.push(cell.date.format("%a %b %-d").to_string().bold().to_string());
        for post in &cell.posts {
            lines.push(post.render());
        }
    }

    lines.join("\n")
}
