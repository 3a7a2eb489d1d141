//! Email analytics

use std::io::{self, Write};

use mail::AnalyticsState;
use mail::query::format_count;

const BAR_WIDTH: u32 = 20;

pub fn render(out: &mut dyn Write, state: &AnalyticsState) -> io::Result<()> {
    writeln!(out, "Email Analytics")?;
    writeln!(out, "Insights into your email productivity and patterns")?;
    writeln!(out)?;

    let analytics = match state {
        AnalyticsState::NotLoaded => return writeln!(out, "Loading analytics..."),
        AnalyticsState::Failed(err) => {
            return writeln!(out, "Failed to load analytics: {}", err);
        }
        AnalyticsState::Loaded(analytics) => analytics,
    };

    writeln!(out, "{:<20} {}", "Total Emails", format_count(analytics.total_emails))?;
    writeln!(out, "{:<20} {}", "Unread Count", format_count(analytics.unread_count))?;
    writeln!(out, "{:<20} {}", "Today's Emails", format_count(analytics.today_count))?;
    writeln!(out, "{:<20} {}h", "Avg Response Time", analytics.response_time)?;
    writeln!(out, "{:<20} {}%", "Productivity Score", analytics.productivity_score)?;
    writeln!(out)?;
    writeln!(out, "Email Categories")?;
    for (name, percent) in analytics.categories.rows() {
        let filled = (percent.min(100) * BAR_WIDTH / 100) as usize;
        writeln!(
            out,
            "  {:<11} {:>3}% {}",
            name,
            percent,
            "#".repeat(filled)
        )?;
    }
    Ok(())
}
