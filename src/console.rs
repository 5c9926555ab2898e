//! Pretty terminal output for startup.

use colored::Colorize;

use crate::format;
use crate::store::sqlite::KpiSnapshot;

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════════════════════╗".cyan());
    println!("{}", "║                                                           ║".cyan());
    println!("║     {}     ║", "📊 Overthinklytics v0.1.0".bold().white());
    println!("║     {}        ║", "Read-only analytics for the dashboard".dimmed());
    println!("{}", "║                                                           ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_startup(addr: &str) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    println!();
    println!("{}", "Endpoints:".white().bold());
    println!("  {} {}      {}", "GET".green(), "/analytics/kpis/".white(), "Latest KPI snapshot".dimmed());
    println!("  {} {}   {}", "GET".green(), "/analytics/traffic/".white(), "Recent daily traffic".dimmed());
    println!("  {} {}   {}", "GET".green(), "/analytics/signups/".white(), "Latest month by channel".dimmed());
    println!("  {} {}   {}", "GET".green(), "/analytics/revenue/".white(), "Recent daily revenue".dimmed());
    println!("  {} {} {}", "GET".green(), "/analytics/device-share/".white(), "Latest device split".dimmed());
    println!("  {} {}              {}", "GET".green(), "/health/".white(), "Health check".dimmed());
    println!("  {} {}              {}", "GET".green(), "/metrics".white(), "Query counters".dimmed());
    println!();
}

/// One-line summary of the freshest snapshot the producer has written.
pub fn print_store_summary(snapshot: Option<&KpiSnapshot>) {
    match snapshot {
        Some(snap) => {
            println!(
                "{} {} {} {} {} {}",
                "Latest snapshot:".white().bold(),
                format::date_iso(snap.captured_at).cyan(),
                format!("users {}", format::group_thousands(snap.total_users)).dimmed(),
                format!("sessions {}", format::group_thousands(snap.sessions)).dimmed(),
                format!("conversion {}", format::format_percent_display(snap.conversion_pct)).dimmed(),
                format!("revenue {}", format::format_currency_display(snap.revenue_cents)).dimmed(),
            );
        }
        None => {
            println!("{}", "No KPI snapshots yet; producer has not written data.".yellow());
        }
    }
    println!();
}
