//! Custom panic hook for structured crash reports.

use super::context::{get_current_context, ScoringContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the crash report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    eprintln!("{}", render_report(&extract_panic_message(info), location(info), &context));
}

fn location(info: &PanicHookInfo<'_>) -> Option<String> {
    info.location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
}

pub(crate) fn render_report(
    message: &str,
    location: Option<String>,
    context: &ScoringContext,
) -> String {
    let mut lines = vec![
        "HOMERISK CRASH REPORT".to_string(),
        format!("  Version:  {}", VERSION),
        format!("  Platform: {}", std::env::consts::OS),
        format!("  Time:     {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        format!("  Panic:    {}", message),
    ];
    if let Some(location) = location {
        lines.push(format!("  Location: {}", location));
    }
    match context.phase {
        Some(phase) => lines.push(format!("  Phase:    {}", phase)),
        None => lines.push("  Phase:    (not set)".to_string()),
    }
    if let Some(system) = &context.current_system {
        lines.push(format!("  System:   {}", system));
    }
    if std::env::var("RUST_BACKTRACE").is_err() {
        lines.push("  Run with RUST_BACKTRACE=1 for a stack trace".to_string());
    }
    lines.join("\n")
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic payload".to_string()
    }
}
