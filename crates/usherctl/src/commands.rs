//! Command handlers for usherctl.

use crate::client::UsherdClient;
use anyhow::Result;
use std::io::{self, Write};
use usher_common::status::{DaemonStatus, ProgressReport};
use usher_common::tier::ConfidenceTier;
use usher_common::ui::{self, colors, symbols};
use usher_common::VERSION;

const KEY_WIDTH: usize = 16;

/// Handle status command
pub async fn status() -> Result<()> {
    let mut client = UsherdClient::connect().await?;
    let status = client.status().await?;

    print_status(&status);
    Ok(())
}

fn print_status(status: &DaemonStatus) {
    ui::print_header("usherctl", &status.version);

    ui::print_kv(
        "daemon",
        &format!("running   (pid {})", status.pid),
        KEY_WIDTH,
    );
    ui::print_kv("uptime", &ui::format_duration(status.uptime_secs), KEY_WIDTH);
    ui::print_kv("score", &status.score.to_string(), KEY_WIDTH);
    ui::print_kv_status(
        "tier",
        &status.tier.to_string(),
        tier_color(status.tier),
        KEY_WIDTH,
    );
    ui::print_kv(
        "features",
        &format!(
            "{} unlocked, {} locked",
            status.unlocked_count, status.locked_count
        ),
        KEY_WIDTH,
    );
    ui::print_kv(
        "threshold_mode",
        &format!("{:?}", status.threshold_mode).to_lowercase(),
        KEY_WIDTH,
    );

    if status.last_persist_ok {
        ui::print_kv_status("persistence", "OK", colors::OK, KEY_WIDTH);
    } else {
        ui::print_kv_status(
            "persistence",
            "FAILING (state kept in memory)",
            colors::WARN,
            KEY_WIDTH,
        );
    }

    ui::print_footer();
}

/// Handle record command
pub async fn record(kind: String, count: u32) -> Result<()> {
    let mut client = UsherdClient::connect().await?;
    let result = client.record(&kind, count).await?;

    println!(
        "  {} {} x{}   score {}   tier {}",
        symbols::ARROW, kind, count, result.score, result.tier
    );
    if result.tier_changed {
        println!(
            "  {}{}{} tier up! you are now {}",
            colors::OK,
            symbols::OK,
            colors::RESET,
            result.tier
        );
    }
    Ok(())
}

/// Handle progress command
pub async fn progress() -> Result<()> {
    let mut client = UsherdClient::connect().await?;
    let report = client.progress().await?;

    ui::print_header("usherctl", VERSION);
    ui::print_kv("score", &report.score.to_string(), KEY_WIDTH);
    ui::print_kv_status(
        "tier",
        &report.tier.to_string(),
        tier_color(report.tier),
        KEY_WIDTH,
    );

    match (report.next_tier, report.points_to_next) {
        (Some(next), Some(remaining)) => {
            let fraction = tier_fraction(&report);
            ui::print_kv(
                "next_tier",
                &format!("{}   ({} points to go)", next, remaining),
                KEY_WIDTH,
            );
            ui::print_kv(
                "progress",
                &format!("{} {:.0}%", ui::progress_bar(fraction, 30), fraction * 100.0),
                KEY_WIDTH,
            );
        }
        _ => ui::print_kv("next_tier", "none (top tier reached)", KEY_WIDTH),
    }

    if report.profile.sample_size > 0 {
        ui::print_kv("style", &report.profile.style.to_string(), KEY_WIDTH);
        if let Some(kind) = &report.profile.dominant_kind {
            ui::print_kv("dominant", kind, KEY_WIDTH);
        }
    }

    ui::print_footer();
    Ok(())
}

/// Handle features command
pub async fn features() -> Result<()> {
    let mut client = UsherdClient::connect().await?;
    let list = client.features().await?;

    ui::print_header("usherctl", VERSION);
    ui::print_kv("tier", &list.tier.to_string(), KEY_WIDTH);
    println!();

    for tier in ConfidenceTier::all() {
        println!("  {}{}{}", colors::BOLD, tier, colors::RESET);
        for feature in list.features.iter().filter(|f| f.tier == tier) {
            if feature.unlocked {
                println!(
                    "    {}{}{} {:18} {}",
                    colors::OK,
                    symbols::OK,
                    colors::RESET,
                    feature.name,
                    feature.description
                );
            } else {
                println!(
                    "    {}{} {:18} {}{}",
                    colors::DIM,
                    symbols::LOCKED,
                    feature.name,
                    feature.description,
                    colors::RESET
                );
            }
        }
    }

    ui::print_footer();
    Ok(())
}

/// Handle reset command
pub async fn reset(yes: bool) -> Result<()> {
    if !yes {
        print!("Reset all progress to beginner? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("aborted");
            return Ok(());
        }
    }

    let mut client = UsherdClient::connect().await?;
    client.reset().await?;
    println!(
        "  {}{}{} progress reset to beginner",
        colors::OK,
        symbols::OK,
        colors::RESET
    );
    Ok(())
}

fn tier_color(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::Beginner => colors::DIM,
        ConfidenceTier::Intermediate => colors::HEADER,
        ConfidenceTier::Advanced => colors::OK,
    }
}

/// Fraction of the way from the current tier's floor to the next boundary.
fn tier_fraction(report: &ProgressReport) -> f32 {
    let (floor, ceiling) = match report.tier {
        ConfidenceTier::Beginner => (0, report.thresholds.intermediate_boundary()),
        ConfidenceTier::Intermediate => (
            report.thresholds.intermediate_boundary(),
            report.thresholds.advanced_boundary(),
        ),
        ConfidenceTier::Advanced => return 1.0,
    };
    if ceiling <= floor {
        return 1.0;
    }
    (report.score.saturating_sub(floor)) as f32 / (ceiling - floor) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use usher_common::history::BehaviorProfile;
    use usher_common::scoring::Thresholds;

    fn report(score: u64, tier: ConfidenceTier) -> ProgressReport {
        let thresholds = Thresholds::default();
        ProgressReport {
            score,
            tier,
            next_tier: tier.next(),
            points_to_next: thresholds.points_to_next(score),
            thresholds,
            profile: BehaviorProfile::default(),
        }
    }

    #[test]
    fn test_tier_fraction_beginner() {
        assert_eq!(tier_fraction(&report(0, ConfidenceTier::Beginner)), 0.0);
        assert_eq!(tier_fraction(&report(500, ConfidenceTier::Beginner)), 0.5);
    }

    #[test]
    fn test_tier_fraction_intermediate_spans_to_expert() {
        // Legacy mode: the next boundary is the expert threshold.
        let fraction = tier_fraction(&report(3000, ConfidenceTier::Intermediate));
        assert!((fraction - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_tier_fraction_top_tier_full() {
        assert_eq!(tier_fraction(&report(9999, ConfidenceTier::Advanced)), 1.0);
    }
}
