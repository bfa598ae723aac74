use std::{panic::PanicHookInfo, sync::OnceLock};

use color_eyre::{Result, config::PanicHook};
use tracing::error;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and a panic hook that restores the terminal
/// before the report is printed.
pub fn init() -> Result<()> {
    // a second call is a no-op
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(format!(
            "Form Builder crashed. Please report this at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = INIT.set(());
    Ok(())
}

fn on_panic(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    restore_terminal();

    let report = panic_hook.panic_report(info).to_string();
    error!("{}", log_line(&report));

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!();
        let dump = handle_dump(&metadata, info);
        if print_msg(dump, &metadata).is_err() {
            eprintln!("{report}");
        }
    }

    #[cfg(debug_assertions)]
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);

    std::process::exit(libc::EXIT_FAILURE);
}

/// Leave raw mode and the alternate screen so the report lands on a usable shell.
fn restore_terminal() {
    match crate::tui::Tui::new() {
        Ok(mut tui) => {
            if let Err(err) = tui.exit() {
                error!("Unable to restore the terminal: {err:?}");
            }
        }
        Err(err) => error!("Unable to reach the terminal: {err:?}"),
    }
}

/// Panic reports are colored; the log file gets them as plain text.
fn log_line(report: &str) -> String {
    format!("panic: {}", strip_ansi_escapes::strip_str(report))
}
