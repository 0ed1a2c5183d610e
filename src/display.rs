use crate::gui_data::GuiData;
use chrono::Local;
use owo_colors::OwoColorize;
use std::time::Duration;

pub struct Display;

impl Display {
    pub fn banner() {
        println!();
        println!("{}", "╔═══════════════════════════════════════════════════════════════╗".cyan());
        println!("{}  MineSim v0.1.0 - Simulated GPU Mining Dashboard  {}", "║".cyan(), "║".cyan());
        println!("{}  Illustrative numbers only, nothing is hashed  {}", "║".cyan(), "║".cyan());
        println!("{}", "╚═══════════════════════════════════════════════════════════════╝".cyan());
        println!();
    }

    pub fn startup_info(workers: usize, algorithm: &str, seed: Option<u64>) {
        let seed = seed.map_or_else(|| "random".to_string(), |s| s.to_string());
        println!("{} {}", "▶".green(), "Starting MineSim".bold());
        println!("  {} Workers: {}", "├".black(), workers.to_string().yellow());
        println!("  {} Algorithm: {}", "├".black(), algorithm.yellow());
        println!("  {} Seed: {}", "├".black(), seed.yellow());
        println!("  {} Status: {}", "└".black(), Self::status_text(false).blue());
        println!();
    }

    /// One line per tick.
    pub fn tick_line(data: &GuiData) {
        println!(
            "{} {} {} | {} | {} | {} workers | today {} | balance {}",
            Local::now().format("%H:%M:%S").to_string().black(),
            "⛏".yellow(),
            Self::status_text(data.is_active).green(),
            Self::format_hash_rate(data.hash_rate).green().bold(),
            Self::format_power(data.power_usage).yellow(),
            data.active_workers,
            Self::format_btc(data.earnings_today).cyan(),
            Self::format_btc(data.total_balance).cyan(),
        );
    }

    pub fn report(data: &GuiData) {
        println!("{}", Self::format_report(data));
        println!();
    }

    pub fn format_report(data: &GuiData) -> String {
        let mut lines = vec![
            "┌─ Mining Stats ────────────────────────────────────────────────┐".blue().to_string(),
            format!("{} {}", "│".blue(), "Current Performance".bold().underline()),
            format!("{} Status: {}", "│".blue(), Self::status_text(data.is_active)),
            format!("{} Algorithm: {}", "│".blue(), data.algorithm.yellow()),
            format!("{} Hash Rate: {}", "│".blue(), Self::format_hash_rate(data.hash_rate).green().bold()),
            format!("{} Power: {}", "│".blue(), Self::format_power(data.power_usage)),
            format!("{} Earnings Today: {}", "│".blue(), Self::format_btc(data.earnings_today).cyan()),
            format!("{} Total Balance: {}", "│".blue(), Self::format_btc(data.total_balance).cyan()),
            format!(
                "{} Runtime: {}",
                "│".blue(),
                Self::format_duration(Duration::from_secs(data.ticks)).cyan()
            ),
        ];
        for worker in &data.workers {
            lines.push(format!(
                "{}   {} ({}): {} @ {}",
                "│".blue(),
                worker.name,
                worker.gpu,
                Self::format_worker_hash_rate(worker.hash_rate, data.is_active),
                Self::format_temperature(worker.temperature, data.is_active),
            ));
        }
        lines.push("└───────────────────────────────────────────────────────────────┘".blue().to_string());
        lines.join("\n")
    }

    pub fn summary(data: &GuiData) {
        println!("{} {}", "■".red(), "Mining stopped".red().bold());
        println!("  {} Ticks: {}", "├".black(), data.ticks.to_string().yellow());
        println!("  {} Chart samples: {}", "├".black(), data.history.len().to_string().yellow());
        println!("  {} Earnings today: {}", "├".black(), Self::format_btc(data.earnings_today).cyan());
        println!("  {} Total balance: {}", "└".black(), Self::format_btc(data.total_balance).cyan());
    }

    pub fn status_text(active: bool) -> &'static str {
        if active {
            "Mining Active"
        } else {
            "Stopped"
        }
    }

    pub fn format_btc(amount: f64) -> String {
        format!("{:.8} BTC", amount)
    }

    pub fn format_hash_rate(rate: f64) -> String {
        format!("{:.2} MH/s", rate)
    }

    pub fn format_power(watts: f64) -> String {
        format!("{:.0} W", watts)
    }

    pub fn format_worker_hash_rate(rate: f64, active: bool) -> String {
        if active {
            Self::format_hash_rate(rate)
        } else {
            "0 MH/s".to_string()
        }
    }

    pub fn format_temperature(celsius: f64, active: bool) -> String {
        if active {
            format!("{:.0}°C", celsius.round())
        } else {
            "0°C".to_string()
        }
    }

    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }
}
