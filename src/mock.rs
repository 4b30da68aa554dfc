//! Local stand-ins for the account, briefing and assistant services

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use tracing::info;

use crate::constants::auth::{MIN_PASSWORD_LEN, MOCK_USER_NAME};
use crate::constants::config::APP_DIR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Success(User),
    Failure(String),
}

/// Any non-empty email with a long enough password is accepted
pub fn authenticate(email: &str, password: &str, is_signup: bool) -> AuthResult {
    if !email.is_empty() && password.len() >= MIN_PASSWORD_LEN {
        info!(email, is_signup, "Mock authentication succeeded");
        AuthResult::Success(User {
            email: email.to_string(),
            name: MOCK_USER_NAME.to_string(),
        })
    } else {
        AuthResult::Failure("Invalid credentials".to_string())
    }
}

pub struct Briefing {
    pub events: &'static [&'static str],
    pub tasks: &'static [&'static str],
    pub news: &'static [&'static str],
    pub suggestions: &'static [&'static str],
}

pub const BRIEFING: Briefing = Briefing {
    events: &[
        "Team standup at 9:00 AM",
        "Client presentation at 2:00 PM",
        "Project review at 4:30 PM",
    ],
    tasks: &[
        "Complete quarterly report",
        "Review marketing campaign",
        "Update project documentation",
        "Prepare for client meeting",
    ],
    news: &[
        "Industry trends showing positive growth",
        "New technology stack released",
        "Market analysis indicates expansion opportunity",
    ],
    suggestions: &[
        "Consider scheduling follow-up meetings",
        "Review and optimize current workflows",
        "Plan next quarter's objectives",
        "Update team on project milestones",
    ],
};

/// Render the briefing as a Markdown document with unchecked task items
pub fn briefing_markdown(briefing: &Briefing, date: NaiveDate) -> String {
    let mut markdown = String::from("# Daily Briefing\n\n");
    let _ = write!(markdown, "**Date:** {}\n\n", date.format("%A, %B %-d, %Y"));

    let sections: [(&str, &[&str], &str); 4] = [
        ("📅 Today's Events", briefing.events, "- "),
        ("✅ Priority Tasks", briefing.tasks, "- [ ] "),
        ("📰 Top News", briefing.news, "- "),
        ("💡 Suggestions", briefing.suggestions, "- "),
    ];
    for (heading, items, bullet) in sections {
        let _ = write!(markdown, "## {heading}\n\n");
        for item in items {
            let _ = writeln!(markdown, "{bullet}{item}");
        }
        markdown.push('\n');
    }

    markdown
}

pub fn briefing_filename(date: NaiveDate) -> String {
    format!("daily-briefing-{}.md", date.format("%Y-%m-%d"))
}

/// Downloads folder, else the application data directory
pub fn export_dir() -> Result<PathBuf> {
    dirs::download_dir()
        .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
        .ok_or_else(|| anyhow!("No download or data directory for this user"))
}

/// Write the briefing for `date` into `dir`, returning the file path
pub fn export_briefing(briefing: &Briefing, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let path = dir.join(briefing_filename(date));
    fs::write(&path, briefing_markdown(briefing, date))
        .with_context(|| format!("Failed to write briefing to {:?}", path))?;

    info!(path = %path.display(), "Exported daily briefing");
    Ok(path)
}

pub fn chat_reply(_query: &str) -> String {
    "Say what you want.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_accepts_valid_pair() {
        let result = authenticate("a@b.co", "secret1", false);
        assert!(matches!(result, AuthResult::Success(user) if user.email == "a@b.co"));
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_briefing_markdown_layout() {
        let markdown = briefing_markdown(&BRIEFING, sample_date());

        assert!(markdown.starts_with("# Daily Briefing\n\n**Date:** Monday, October 19, 2026\n\n"));
        assert!(markdown.contains("## 📅 Today's Events\n\n- Team standup at 9:00 AM\n"));
        assert!(markdown.contains("## ✅ Priority Tasks\n\n- [ ] Complete quarterly report\n"));
        assert!(markdown.contains("- [ ] Prepare for client meeting\n\n## 📰 Top News"));
        assert!(markdown.ends_with("- Update team on project milestones\n\n"));

        let order: Vec<usize> = ["Events", "Tasks", "News", "Suggestions"]
            .iter()
            .map(|h| markdown.find(h).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_export_briefing_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");

        let path = export_briefing(&BRIEFING, &target, sample_date()).unwrap();
        assert_eq!(path, target.join("daily-briefing-2026-10-19.md"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            briefing_markdown(&BRIEFING, sample_date())
        );
    }

    #[test]
    fn test_authenticate_rejects_short_password() {
        assert_eq!(
            authenticate("a@b.co", "short", true),
            AuthResult::Failure("Invalid credentials".into())
        );
    }
}
