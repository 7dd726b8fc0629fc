//! Line parsing for `quantdash interactive`.

use core_types::PredictionMode;

pub const HELP: &str = "\
Commands:
  select <symbol>             switch instrument (resets every stage and refreshes)
  targets <monthly> <total>   set investment targets (sent with the next refresh)
  refresh                     re-run the market analysis
  predict [standard|advanced] run the AI forecast (needs a completed analysis)
  backtest                    backtest the forecast model (needs a completed prediction)
  search [query]              list instruments matching a name or symbol
  show                        render the full dashboard
  help                        show this help
  quit                        exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Select(String),
    Targets { monthly: String, total: String },
    Refresh,
    Predict(PredictionMode),
    Backtest,
    Search(String),
    Show,
    Help,
    Quit,
    /// A blank line.
    Nothing,
}

/// Parses one input line. The error is a usage message for the user.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(ConsoleCommand::Nothing),
        "select" | "s" => match rest.split_whitespace().next() {
            Some(symbol) => Ok(ConsoleCommand::Select(symbol.to_string())),
            None => Err("usage: select <symbol>".to_string()),
        },
        "targets" | "t" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next()) {
                (Some(monthly), Some(total)) => Ok(ConsoleCommand::Targets {
                    monthly: monthly.to_string(),
                    total: total.to_string(),
                }),
                _ => Err("usage: targets <monthly> <total>".to_string()),
            }
        }
        "refresh" | "r" => Ok(ConsoleCommand::Refresh),
        "predict" | "p" => {
            if rest.is_empty() {
                Ok(ConsoleCommand::Predict(PredictionMode::Standard))
            } else {
                rest.parse()
                    .map(ConsoleCommand::Predict)
                    .map_err(|_| "usage: predict [standard|advanced]".to_string())
            }
        }
        "backtest" | "b" => Ok(ConsoleCommand::Backtest),
        "search" | "find" => Ok(ConsoleCommand::Search(rest.to_string())),
        "show" => Ok(ConsoleCommand::Show),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        other => Err(format!("unknown command '{}'; type 'help'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_command("select ndq.ax"),
            Ok(ConsoleCommand::Select("ndq.ax".to_string()))
        );
        assert_eq!(
            parse_command("  targets 2500abc 10000 "),
            Ok(ConsoleCommand::Targets {
                monthly: "2500abc".to_string(),
                total: "10000".to_string()
            })
        );
        assert_eq!(
            parse_command("predict lstm"),
            Ok(ConsoleCommand::Predict(PredictionMode::Advanced))
        );
        assert_eq!(
            parse_command("search nasdaq 100"),
            Ok(ConsoleCommand::Search("nasdaq 100".to_string()))
        );
    }

    #[test]
    fn predict_defaults_to_the_standard_model() {
        assert_eq!(
            parse_command("PREDICT"),
            Ok(ConsoleCommand::Predict(PredictionMode::Standard))
        );
    }

    #[test]
    fn blank_lines_and_bad_input() {
        assert_eq!(parse_command("   "), Ok(ConsoleCommand::Nothing));
        assert!(parse_command("select").is_err());
        assert!(parse_command("targets 100").is_err());
        assert!(parse_command("predict arima").is_err());
        assert!(parse_command("launch").unwrap_err().contains("launch"));
    }
}
