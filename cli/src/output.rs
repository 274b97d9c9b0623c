use colored::Colorize;
use validation::ValidationResult;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn subheader(title: &str) {
    println!("{}", title.bold());
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Human-readable rendering of one file's findings.
pub fn validation_result(result: &ValidationResult) {
    subheader(result.config_file());
    for finding in result.errors() {
        match finding.location() {
            Some(location) => error(&format!("{location}: {finding}")),
            None => error(&finding.to_string())
        }
        if let Some(fix) = finding.fix_suggestion() {
            hint(fix);
        }
    }
    for finding in result.warnings() {
        warn(&finding.to_string());
        if let Some(fix) = finding.fix_suggestion() {
            hint(fix);
        }
    }
    if result.is_valid() {
        success(&result.summary());
    }
}
