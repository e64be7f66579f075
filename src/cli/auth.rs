//
//  sonar-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! `sq auth status` checks the resolved credential against the server;
//! `sq auth token` manages user tokens.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::services::user_tokens::{
    GenerateTokenOptions, GeneratedToken, RevokeTokenOptions, SearchTokensOptions, UserToken,
    TOKEN_TYPES,
};
use crate::api::services::users::CurrentUser;
use crate::auth::AuthCredential;
use crate::config::Config;
use crate::output::{format_bool, format_date, print_field, print_header, TableOutput, TableRow};

use super::GlobalOptions;

/// Check credentials and manage user tokens.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// View authentication status
    Status(StatusArgs),

    /// Manage user tokens
    Token(TokenCommand),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the token (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

#[derive(Args, Debug)]
pub struct TokenCommand {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenSubcommand {
    /// Generate a token
    Create(CreateTokenArgs),

    /// Revoke a token
    Revoke(RevokeTokenArgs),

    /// List tokens
    #[command(visible_alias = "ls")]
    List(ListTokensArgs),
}

#[derive(Args, Debug)]
pub struct CreateTokenArgs {
    /// Token name
    pub name: String,

    /// Token type (USER_TOKEN, GLOBAL_ANALYSIS_TOKEN, PROJECT_ANALYSIS_TOKEN)
    #[arg(long = "type", short = 't', value_parser = clap::builder::PossibleValuesParser::new(TOKEN_TYPES.iter().copied()))]
    pub token_type: Option<String>,

    /// Project key, for PROJECT_ANALYSIS_TOKEN
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Expiration date (YYYY-MM-DD)
    #[arg(long)]
    pub expires: Option<String>,

    /// Generate for another user (administrators only)
    #[arg(long)]
    pub login: Option<String>,
}

#[derive(Args, Debug)]
pub struct RevokeTokenArgs {
    /// Token name
    pub name: String,

    /// Revoke a token of another user (administrators only)
    #[arg(long)]
    pub login: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListTokensArgs {
    /// List the tokens of another user (administrators only)
    #[arg(long)]
    pub login: Option<String>,
}

/// Result of `sq auth status`.
#[derive(Debug, Serialize)]
struct AuthStatus {
    url: String,
    host: Option<String>,
    credential: &'static str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<CurrentUser>,
    #[serde(skip)]
    masked_token: Option<String>,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        print_header(self.host.as_deref().unwrap_or(&self.url));
        print_field("Server", &self.url, color);
        print_field("Credential", self.credential, color);
        let status = match (self.valid, color) {
            (true, true) => style("Active").green().to_string(),
            (false, true) => style("Invalid/Expired").red().to_string(),
            (true, false) => "Active".to_string(),
            (false, false) => "Invalid/Expired".to_string(),
        };
        print_field("Status", &status, color);
        if let Some(user) = self.user.as_ref().filter(|u| u.is_logged_in) {
            let login = user.login.as_deref().unwrap_or("-");
            let shown = match &user.name {
                Some(name) => format!("{login} ({name})"),
                None => login.to_string(),
            };
            print_field("Logged in as", &shown, color);
        }
        if let Some(token) = &self.masked_token {
            print_field("Token", token, color);
        }
    }
}

impl TableOutput for GeneratedToken {
    fn print_table(&self, color: bool) {
        print_field("Name", &self.name, color);
        print_field("Login", &self.login, color);
        print_field("Type", self.token_type.as_deref().unwrap_or("-"), color);
        if let Some(project) = &self.project_key {
            print_field("Project", project, color);
        }
        println!();
        println!("{}", self.token);
    }
}

impl TableRow for UserToken {
    const HEADERS: &'static [&'static str] = &["NAME", "TYPE", "PROJECT", "CREATED", "LAST USED", "EXPIRED"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.token_type.clone().unwrap_or_else(|| "-".to_string()),
            self.project
                .as_ref()
                .map(|p| p.key.clone())
                .unwrap_or_else(|| "-".to_string()),
            format_date(self.created_at.as_ref()),
            format_date(self.last_connection_date.as_ref()),
            format_bool(self.is_expired, color),
        ]
    }
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Status(args) => status(args, global).await,
            AuthSubcommand::Token(token) => match &token.command {
                TokenSubcommand::Create(args) => create_token(args, global).await,
                TokenSubcommand::Revoke(args) => revoke_token(args, global).await,
                TokenSubcommand::List(args) => list_tokens(args, global).await,
            },
        }
    }
}

/// Shows authentication status.
async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let connection = global.connection(&config)?;
    let client = connection.client(config.client_options())?;

    let valid = client
        .authentication()
        .validate()
        .await
        .with_context(|| format!("Could not reach {}", connection.url))?
        .into_data()
        .is_some_and(|v| v.valid);

    let user = if valid && !connection.auth.is_anonymous() {
        client.users().current().await?.into_data()
    } else {
        None
    };

    let masked_token = match &connection.auth {
        AuthCredential::Token { token } if args.show_token => Some(mask_token(token)),
        _ => None,
    };

    let report = AuthStatus {
        url: connection.url.clone(),
        host: connection.host.clone(),
        credential: connection.auth.kind(),
        valid,
        user,
        masked_token,
    };
    global.writer().write(&report)?;

    if !valid && !global.json {
        println!();
        println!("Set a token with 'sq config set hosts.<name>.token <token>' or SONAR_TOKEN");
    }
    Ok(())
}

/// Generates a token and prints its secret once.
async fn create_token(args: &CreateTokenArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let options = GenerateTokenOptions {
        name: args.name.clone(),
        login: args.login.clone(),
        token_type: args.token_type.clone(),
        project_key: args.project.clone(),
        expiration_date: args.expires.clone(),
    };

    let token = client
        .user_tokens()
        .generate(&options)
        .await?
        .into_data()
        .context("Server returned no token")?;

    let writer = global.writer();
    writer.write(&token)?;
    writer.write_warning("Copy the token now; it cannot be shown again.");
    Ok(())
}

/// Revokes a token; an unknown name is not an error.
async fn revoke_token(args: &RevokeTokenArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let options = RevokeTokenOptions {
        name: args.name.clone(),
        login: args.login.clone(),
    };
    client.user_tokens().revoke(&options).await?;

    global
        .writer()
        .write_success(&format!("Token '{}' revoked", args.name));
    Ok(())
}

/// Lists tokens.
async fn list_tokens(args: &ListTokensArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let options = SearchTokensOptions {
        login: args.login.clone(),
    };
    let tokens = client
        .user_tokens()
        .search(&options)
        .await?
        .into_data()
        .map(|list| list.user_tokens)
        .unwrap_or_default();

    global.writer().write_list(&tokens, "No tokens found.")
}

/// Keeps the first and last four characters.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("squ_0123456789abcdef"), "squ_...cdef");
        assert_eq!(mask_token("short"), "*****");
    }

    #[test]
    fn test_token_row() {
        let token: UserToken = serde_json::from_str(
            r#"{"name": "ci", "type": "PROJECT_ANALYSIS_TOKEN", "project": {"key": "my-app"}, "isExpired": false}"#,
        )
        .unwrap();
        let row = token.row(false);
        assert_eq!(row.len(), UserToken::HEADERS.len());
        assert_eq!(row[2], "my-app");
        assert_eq!(row[3], "-");
        assert_eq!(row[5], "No");
    }
}
