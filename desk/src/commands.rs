//! # commands — one line of input → one [`Command`]

use crate::models::AnalysisField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    List,
    Next,
    Prev,
    Select(String),
    Set(AnalysisField, String),
    Save,
    Saved,
    Export,
    Upload,
    /// `None` prints the consent URL; `Some` finishes the handshake
    Login(Option<String>),
    Logout,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  show                         current coin and its draft
  list                         all coins, saved ones marked with *
  next | prev                  move the cursor (stops at either end)
  select <id>                  jump to a coin by id
  set <field> <text...>        edit the draft; field is one of
                               short-notes, short-analysis, long-notes, long-analysis
  save                         store the draft for this coin and move to the next
  saved                        list stored analyses
  export                       download the CSV report into the report directory
  upload                       upload the CSV report to Google Drive
  login [callback-url|token]   sign in to Google (no argument prints the consent URL)
  logout                       forget the stored access token
  help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" | "show" => Command::Show,
            "list" | "ls" => Command::List,
            "next" | "n" => Command::Next,
            "prev" | "p" | "back" => Command::Prev,
            "select" | "go" => {
                if rest.is_empty() {
                    return Err("usage: select <coin-id>".into());
                }
                Command::Select(rest.to_lowercase())
            }
            "set" => {
                let (field, text) = match rest.split_once(char::is_whitespace) {
                    Some((field, text)) => (field, text.trim()),
                    None => (rest, ""),
                };
                let field = AnalysisField::parse(field).ok_or_else(|| {
                    format!(
                        "unknown field '{field}'; use one of: {}",
                        AnalysisField::ALL.map(AnalysisField::command_name).join(", ")
                    )
                })?;
                Command::Set(field, text.to_string())
            }
            "save" => Command::Save,
            "saved" => Command::Saved,
            "export" | "download" => Command::Export,
            "upload" => Command::Upload,
            "login" => Command::Login(Some(rest.to_string()).filter(|r| !r.is_empty())),
            "logout" => Command::Logout,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{other}'; type 'help'")),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(Command::parse("next"), Ok(Command::Next));
        assert_eq!(Command::parse("  P "), Ok(Command::Prev));
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("select ETH"), Ok(Command::Select("eth".into())));
        assert!(Command::parse("select").is_err());
    }

    #[test]
    fn set_keeps_the_whole_text() {
        assert_eq!(
            Command::parse("set short-analysis  sell below 60k, stop 63k "),
            Ok(Command::Set(AnalysisField::ShortAnalysis, "sell below 60k, stop 63k".into()))
        );
        assert_eq!(
            Command::parse("set longPositionNotes"),
            Ok(Command::Set(AnalysisField::LongPositionNotes, String::new()))
        );
        assert!(Command::parse("set mood bullish").unwrap_err().contains("short-notes"));
    }

    #[test]
    fn login_argument_is_optional() {
        assert_eq!(Command::parse("login"), Ok(Command::Login(None)));
        assert_eq!(
            Command::parse("login http://localhost:3000/auth-callback?access_token=t"),
            Ok(Command::Login(Some("http://localhost:3000/auth-callback?access_token=t".into())))
        );
    }

    #[test]
    fn unknown_command() {
        assert!(Command::parse("fly").is_err());
    }
}
