use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

fn resolve(flags: &GlobalFlags, is_tty: bool, no_color: bool, columns: Option<&str>) -> UiPrefs {
    let table_color =
        is_tty && flags.format == OutputFormat::Table && !flags.quiet && !no_color;
    let progress = is_tty && !flags.quiet && flags.format != OutputFormat::Json;
    let term_width = columns
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn quiet_disables_spinner_and_color() {
        let prefs = resolve(&flags(OutputFormat::Table, true), true, false, None);
        assert!(!prefs.progress);
        assert!(!prefs.table_color);
    }

    #[test]
    fn json_output_never_shows_spinner() {
        let prefs = resolve(&flags(OutputFormat::Json, false), true, false, None);
        assert!(!prefs.progress);
    }

    #[test]
    fn narrow_columns_are_ignored() {
        let prefs = resolve(&flags(OutputFormat::Table, false), false, false, Some("20"));
        assert_eq!(prefs.term_width, None);
        let prefs = resolve(&flags(OutputFormat::Table, false), false, false, Some("120"));
        assert_eq!(prefs.term_width, Some(120));
    }
}
