use colored::*;

pub fn print_header(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(text.len()).bright_cyan());
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.red().bold());
}

pub fn print_info(text: &str) {
    println!("{}", text.blue());
}

/// Human-readable process uptime for the /stats command.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else {
        format!("{}h {}m {}s", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::format_uptime;

    #[test]
    fn test_format_uptime_under_a_day() {
        assert_eq!(format_uptime(0), "0h 0m 0s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
    }

    #[test]
    fn test_format_uptime_with_days() {
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }
}
