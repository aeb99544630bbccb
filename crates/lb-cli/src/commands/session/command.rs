use std::path::PathBuf;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  predict                 enter a passenger and predict survival
  history                 list predictions made this session
  export <n> [path]       save prediction #n as CSV
  export-all [path]       save the whole history as CSV
  chart <n> [path]        save the pie chart of prediction #n as SVG
  model                   show the loaded model
  help                    show this help
  quit                    leave the session";

const KNOWN: [&str; 13] = [
    "predict", "p", "history", "h", "export", "export-all", "chart", "model", "help", "?", "quit",
    "exit", "q",
];

/// One line typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Predict,
    History,
    Export { record: usize, path: Option<PathBuf> },
    ExportAll { path: Option<PathBuf> },
    Chart { record: usize, path: Option<PathBuf> },
    Model,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        let name = name.to_ascii_lowercase();
        let command = match (name.as_str(), args.as_slice()) {
            ("predict" | "p", []) => Self::Predict,
            ("history" | "h", []) => Self::History,
            ("export", [record]) => Self::Export {
                record: parse_record(record)?,
                path: None,
            },
            ("export", [record, path]) => Self::Export {
                record: parse_record(record)?,
                path: Some(PathBuf::from(*path)),
            },
            ("export-all", []) => Self::ExportAll { path: None },
            ("export-all", [path]) => Self::ExportAll {
                path: Some(PathBuf::from(*path)),
            },
            ("chart", [record]) => Self::Chart {
                record: parse_record(record)?,
                path: None,
            },
            ("chart", [record, path]) => Self::Chart {
                record: parse_record(record)?,
                path: Some(PathBuf::from(*path)),
            },
            ("model", []) => Self::Model,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            (known, _) if KNOWN.contains(&known) => {
                return Err(format!("wrong arguments for '{name}'. Type 'help' for usage."));
            }
            _ => return Err(format!("unknown command '{name}'. Type 'help' for usage.")),
        };
        Ok(command)
    }
}

fn parse_record(value: &str) -> Result<usize, String> {
    value
        .trim_start_matches('#')
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("'{value}' is not a record number"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("predict", SessionCommand::Predict)]
    #[case("  P ", SessionCommand::Predict)]
    #[case("history", SessionCommand::History)]
    #[case("export 2", SessionCommand::Export { record: 2, path: None })]
    #[case("export #3 out/a.csv", SessionCommand::Export { record: 3, path: Some(PathBuf::from("out/a.csv")) })]
    #[case("export-all", SessionCommand::ExportAll { path: None })]
    #[case("export-all all.csv", SessionCommand::ExportAll { path: Some(PathBuf::from("all.csv")) })]
    #[case("chart 1 pie.svg", SessionCommand::Chart { record: 1, path: Some(PathBuf::from("pie.svg")) })]
    #[case("model", SessionCommand::Model)]
    #[case("?", SessionCommand::Help)]
    #[case("exit", SessionCommand::Quit)]
    fn parses_commands(#[case] line: &str, #[case] expected: SessionCommand) {
        assert_eq!(line.parse::<SessionCommand>(), Ok(expected));
    }

    #[rstest]
    #[case("", "empty command")]
    #[case("fly", "unknown command 'fly'")]
    #[case("export", "wrong arguments for 'export'")]
    #[case("export zero", "'zero' is not a record number")]
    #[case("chart 0", "'0' is not a record number")]
    #[case("history 2", "wrong arguments for 'history'")]
    fn rejects_bad_lines(#[case] line: &str, #[case] message: &str) {
        let err = line.parse::<SessionCommand>().unwrap_err();
        assert!(err.starts_with(message), "{err}");
    }
}
