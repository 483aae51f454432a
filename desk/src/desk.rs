//! # desk — the controller
//!
//! [`Desk`] owns every piece of client state (cursor, store, token, backend
//! client) and is the only thing that mutates it. `main` feeds it one
//! [`Command`] at a time.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::api::BackendClient;
use crate::commands::{Command, HELP};
use crate::config::Config;
use crate::cursor::{Cursor, CursorState};
use crate::error::{DeskError, Result};
use crate::models::AnalysisField;
use crate::store::AnalysisStore;
use crate::token::{token_from_callback, TokenStore};

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Desk {
    api:        BackendClient,
    store:      AnalysisStore,
    tokens:     TokenStore,
    cursor:     Cursor,
    report_dir: PathBuf,
}

impl Desk {
    pub fn open(config: &Config) -> Self {
        Self::with_parts(
            BackendClient::new(config.api_url.clone()),
            AnalysisStore::open(config.analyses_path()),
            TokenStore::open(config.token_path()),
            config.report_dir.clone(),
        )
    }

    pub fn with_parts(
        api: BackendClient,
        store: AnalysisStore,
        tokens: TokenStore,
        report_dir: PathBuf,
    ) -> Self {
        Self { api, store, tokens, cursor: Cursor::new(), report_dir }
    }

    /// Fetch the coin list and point the cursor at the first coin. An
    /// unavailable list leaves the desk usable in the `Empty` state.
    pub async fn load_coins(&mut self) {
        let coins = match self.api.fetch_coins().await {
            Ok(coins) => coins,
            Err(e) => {
                error!(error = %e, "could not load coins");
                Vec::new()
            }
        };
        info!(count = coins.len(), saved = self.store.len(), "desk ready");
        self.cursor.initialize(coins, &self.store);
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn store(&self) -> &AnalysisStore {
        &self.store
    }

    pub fn token(&self) -> Option<&str> {
        self.tokens.get()
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        let text = match command {
            Command::Show => self.render_current(),
            Command::List => self.render_list(),
            Command::Next => {
                if !self.cursor.advance(&self.store) {
                    return Ok(Reply::Text("Already at the last coin.".into()));
                }
                self.render_current()
            }
            Command::Prev => {
                if !self.cursor.retreat(&self.store) {
                    return Ok(Reply::Text("Already at the first coin.".into()));
                }
                self.render_current()
            }
            Command::Select(id) => {
                if !self.cursor.select(&id, &self.store) {
                    return Err(DeskError::NotFound(format!("coin '{id}' is not in the list")));
                }
                self.render_current()
            }
            Command::Set(field, value) => {
                if self.cursor.current().is_none() {
                    return Err(DeskError::InvalidInput("no coin selected".into()));
                }
                self.cursor.update_draft(field, value);
                format!("{} updated (unsaved).", field.command_name())
            }
            Command::Save => self.save()?,
            Command::Saved => self.render_saved(),
            Command::Export => {
                let path = self.export_local().await?;
                format!("Report saved to {}", path.display())
            }
            Command::Upload => self.upload().await?,
            Command::Login(arg) => self.login(arg.as_deref()).await?,
            Command::Logout => {
                self.tokens.clear()?;
                "Signed out of Google.".into()
            }
            Command::Help => HELP.into(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    fn save(&mut self) -> Result<String> {
        let Some(saved) = self.cursor.save(&mut self.store)? else {
            return Err(DeskError::InvalidInput("no coin selected".into()));
        };
        let mut text = format!("Saved {}.", saved.coin.name);
        if self.cursor.current().map(|c| c.id.as_str()) == Some(saved.coin.id.as_str()) {
            text.push_str(" That was the last coin.");
        } else {
            text.push('\n');
            text.push_str(&self.render_current());
        }
        Ok(text)
    }

    // ─── Report delivery ──────────────────────────────────────────────────────

    /// Download the CSV and write it into the report directory. Same-day
    /// exports overwrite each other.
    pub async fn export_local(&self) -> Result<PathBuf> {
        if self.store.is_empty() {
            return Err(DeskError::NoData);
        }
        let report = self.api.generate_report(self.store.all()).await?;

        std::fs::create_dir_all(&self.report_dir)?;
        let path = self.report_dir.join(&report.file_name);
        std::fs::write(&path, &report.bytes)?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }

    /// Upload to Drive, or hand out the consent URL when signed out. A token
    /// the backend rejects is discarded.
    pub async fn upload(&mut self) -> Result<String> {
        if self.store.is_empty() {
            return Err(DeskError::NoData);
        }
        let Some(token) = self.tokens.get().map(str::to_string) else {
            let url = self.api.auth_url().await?;
            return Ok(sign_in_instructions(&url));
        };

        match self.api.upload_to_drive(self.store.all(), &token).await {
            Ok(receipt) => Ok(format!("Uploaded to Google Drive as {}", receipt.file_name)),
            Err(DeskError::Unauthorized(msg)) => {
                warn!("Drive rejected the stored token, discarding it");
                self.tokens.clear()?;
                Err(DeskError::Unauthorized(format!("{msg}; sign in again with 'login'")))
            }
            Err(e) => Err(e),
        }
    }

    // ─── Auth ─────────────────────────────────────────────────────────────────

    pub async fn login(&mut self, callback: Option<&str>) -> Result<String> {
        let Some(callback) = callback else {
            let url = self.api.auth_url().await?;
            return Ok(sign_in_instructions(&url));
        };

        let token = token_from_callback(callback)?;
        if !self.api.verify_token(&token).await {
            self.tokens.clear()?;
            return Err(DeskError::Unauthorized("access token is not valid".into()));
        }
        self.tokens.set(token)?;
        Ok("Signed in to Google. 'upload' will now send reports to Drive.".into())
    }

    // ─── Rendering ────────────────────────────────────────────────────────────

    fn render_current(&self) -> String {
        match self.cursor.state() {
            CursorState::Loading => "Loading coins…".into(),
            CursorState::Empty => "No coins available. Check CRYPTO_LIST on the backend.".into(),
            CursorState::Active(_) => {
                let (Some(coin), Some((pos, total))) = (self.cursor.current(), self.cursor.position())
                else {
                    return String::new();
                };
                let mut out = format!("── {} ({}) · coin {pos} of {total} ──", coin.name, coin.id);
                if self.store.get(&coin.id).is_some() {
                    out.push_str(" [saved]");
                }
                for field in AnalysisField::ALL {
                    out.push_str(&format!(
                        "\n  {:<15} {}",
                        field.command_name(),
                        self.cursor.draft().get(field)
                    ));
                }
                out
            }
        }
    }

    fn render_list(&self) -> String {
        if self.cursor.coins().is_empty() {
            return "No coins available.".into();
        }
        let current = self.cursor.index();
        self.cursor
            .coins()
            .iter()
            .enumerate()
            .map(|(i, coin)| {
                let marker = if Some(i) == current { '>' } else { ' ' };
                let saved = if self.store.get(&coin.id).is_some() { '*' } else { ' ' };
                format!("{marker}{saved} {:<8} {}", coin.id, coin.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_saved(&self) -> String {
        if self.store.is_empty() {
            return "Nothing saved yet.".into();
        }
        let mut out = format!("{} saved analyses:", self.store.len());
        for record in self.store.all() {
            out.push_str(&format!(
                "\n  {:<8} short: {} | long: {}",
                record.coin.name, record.short_analysis, record.long_analysis
            ));
        }
        out
    }
}

fn sign_in_instructions(url: &str) -> String {
    format!(
        "Not signed in to Google. Open this URL, approve access, then paste the \
         address you land on:\n  {url}\n  login <pasted-url>"
    )
}
