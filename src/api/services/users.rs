//
//  sonar-cli
//  api/services/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User accounts (`api/users`).
//!
//! Creating and deactivating users requires the "Administer System"
//! permission. `dismiss_notice` acts on the session user.

use chrono::{DateTime, FixedOffset};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::sonar_datetime;
use crate::api::common::{ApiError, ApiResponse, PaginationArgs, Paging};
use crate::api::endpoint::{Endpoint, NoContent};
use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};
use crate::api::SonarClient;

/// Notices a user can dismiss.
pub const NOTICES: &[&str] = &[
    "educationPrinciples",
    "sonarlintAd",
    "issueCleanCodeGuide",
    "qualityGateCaYCConditionsSimplification",
    "overviewZeroNewIssuesSimplification",
    "issueNewIssueStatusAndTransitionGuide",
];

/// Options for `GET api/users/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchUsersOptions {
    /// Partial match on login, name or email.
    pub q: Option<String>,
    /// Filter on active/deactivated accounts.
    pub deactivated: Option<bool>,
    /// Page selection.
    pub pagination: PaginationArgs,
}

impl Endpoint for SearchUsersOptions {
    type Output = UserSearchResult;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/users/search";
    const RULES: &'static [FieldRule] = &[FieldRule::new("q", &[Check::MaxLen(200)])];
    const PAGINATED: bool = true;

    fn params(&self) -> Params {
        Params::new()
            .opt("q", self.q.as_ref())
            .opt("deactivated", self.deactivated)
            .extend(self.pagination.params())
    }
}

/// Options for `POST api/users/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserOptions {
    /// Login.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Password, for local accounts.
    pub password: Option<String>,
    /// `false` for accounts authenticated by an external provider.
    pub local: Option<bool>,
    /// SCM identities mapped to this user.
    pub scm_accounts: Vec<String>,
}

impl Endpoint for CreateUserOptions {
    type Output = UserEnvelope;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/users/create";
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("login", &[Check::Required, Check::MaxLen(100)]),
        FieldRule::new("name", &[Check::Required, Check::MaxLen(200)]),
        FieldRule::new("email", &[Check::MaxLen(100)]),
        FieldRule::new(
            "password",
            &[Check::When {
                sibling: "local",
                equals: "true",
                then: &[Check::Required],
            }],
        ),
    ];

    fn params(&self) -> Params {
        Params::new()
            .set("login", &self.login)
            .set("name", &self.name)
            .opt("email", self.email.as_ref())
            .opt("password", self.password.as_ref())
            .opt("local", self.local)
            .set("scmAccount", &self.scm_accounts[..])
    }
}

/// Options for `POST api/users/deactivate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeactivateUserOptions {
    /// Login.
    pub login: String,
    /// Also remove personal data.
    pub anonymize: Option<bool>,
}

impl Endpoint for DeactivateUserOptions {
    type Output = UserEnvelope;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/users/deactivate";
    const RULES: &'static [FieldRule] = &[FieldRule::new("login", &[Check::Required])];

    fn params(&self) -> Params {
        Params::new()
            .set("login", &self.login)
            .opt("anonymize", self.anonymize)
    }
}

/// Options for `POST api/users/dismiss_notice`.
///
/// Dismissing a notice that is already gone succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DismissNoticeOptions {
    /// One of [`NOTICES`].
    pub notice: String,
}

impl Endpoint for DismissNoticeOptions {
    type Output = NoContent;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "api/users/dismiss_notice";
    const RULES: &'static [FieldRule] = &[FieldRule::new("notice", &[Check::Required, Check::OneOf(NOTICES)])];
    const ABSENT_IS_SUCCESS: bool = true;

    fn params(&self) -> Params {
        Params::new().set("notice", &self.notice)
    }
}

/// `GET api/users/current`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentUserRequest;

impl Endpoint for CurrentUserRequest {
    type Output = CurrentUser;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "api/users/current";

    fn params(&self) -> Params {
        Params::new()
    }
}

/// The account behind the session credential.
///
/// Anonymous sessions answer with `is_logged_in: false` and no login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Whether the credential maps to an account.
    pub is_logged_in: bool,
    /// Login.
    #[serde(default)]
    pub login: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login.
    pub login: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub active: bool,
    /// Whether the account is managed by SonarQube itself.
    #[serde(default)]
    pub local: bool,
    /// Last login.
    #[serde(
        default,
        deserialize_with = "sonar_datetime::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_connection_date: Option<DateTime<FixedOffset>>,
}

/// `{"user": {...}}` wrapper used by create and deactivate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The affected user.
    pub user: User,
}

/// Response of `api/users/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSearchResult {
    /// Position in the full result set.
    pub paging: Paging,
    /// Matching users.
    #[serde(default)]
    pub users: Vec<User>,
}

/// Handle for `api/users`.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    pub(crate) client: &'a SonarClient,
}

impl Users<'_> {
    /// Describes the session user.
    pub async fn current(&self) -> Result<ApiResponse<CurrentUser>, ApiError> {
        self.client.execute::<CurrentUserRequest>(None).await
    }

    /// Searches users; works without options.
    pub async fn search<'o>(
        &self,
        options: impl Into<Option<&'o SearchUsersOptions>>,
    ) -> Result<ApiResponse<UserSearchResult>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Creates a user.
    pub async fn create<'o>(
        &self,
        options: impl Into<Option<&'o CreateUserOptions>>,
    ) -> Result<ApiResponse<UserEnvelope>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Deactivates a user.
    pub async fn deactivate<'o>(
        &self,
        options: impl Into<Option<&'o DeactivateUserOptions>>,
    ) -> Result<ApiResponse<UserEnvelope>, ApiError> {
        self.client.execute(options.into()).await
    }

    /// Hides a notice for the session user.
    pub async fn dismiss_notice<'o>(
        &self,
        options: impl Into<Option<&'o DismissNoticeOptions>>,
    ) -> Result<ApiResponse<NoContent>, ApiError> {
        self.client.execute(options.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoint::prepare;
    use crate::api::validate::ValidationError;

    fn user(login: &str, name: &str) -> CreateUserOptions {
        CreateUserOptions {
            login: login.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_boundaries() {
        assert!(prepare(Some(&user(&"l".repeat(100), &"n".repeat(200)))).is_ok());
        assert_eq!(
            prepare(Some(&user(&"l".repeat(101), "Jane"))).unwrap_err().field(),
            Some("login")
        );
        assert_eq!(
            prepare(Some(&user("jdoe", &"n".repeat(201)))).unwrap_err().field(),
            Some("name")
        );
    }

    #[test]
    fn test_local_user_requires_password() {
        let mut options = user("jdoe", "Jane Doe");
        options.local = Some(true);
        assert!(matches!(
            prepare(Some(&options)),
            Err(ValidationError::RequiredWhen { field: "password", .. })
        ));

        options.local = Some(false);
        assert!(prepare(Some(&options)).is_ok());
    }

    #[test]
    fn test_scm_accounts_sent_as_list() {
        let mut options = user("jdoe", "Jane Doe");
        options.scm_accounts = vec!["jdoe@corp".to_string(), "jane".to_string()];
        let params = prepare(Some(&options)).unwrap();
        assert_eq!(params.get("scmAccount").map(|v| v.render()).as_deref(), Some("jdoe@corp,jane"));
    }

    #[test]
    fn test_notice_enum() {
        let options = DismissNoticeOptions {
            notice: "welcome".to_string(),
        };
        assert!(matches!(
            prepare(Some(&options)),
            Err(ValidationError::InvalidEnum { field: "notice", .. })
        ));
    }

    #[test]
    fn test_anonymous_current_user() {
        let user: CurrentUser = serde_json::from_str(r#"{"isLoggedIn": false}"#).unwrap();
        assert!(!user.is_logged_in);
        assert_eq!(user.login, None);
    }

    #[test]
    fn test_search_page_size_ceiling() {
        let options = SearchUsersOptions {
            pagination: PaginationArgs::with_size(1000),
            ..Default::default()
        };
        assert_eq!(prepare(Some(&options)).unwrap_err().field(), Some("ps"));
    }
}
