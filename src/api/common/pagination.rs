//
//  sonar-cli
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for SonarQube API Requests and Responses
//!
//! SonarQube uses page-number pagination on its search endpoints:
//!
//! | Parameter | Meaning | Constraint |
//! |-----------|---------|------------|
//! | `p` | 1-based page index | `>= 1` |
//! | `ps` | Page size | `1..=`[`MAX_PAGE_SIZE`] |
//!
//! Responses carry a `paging` object describing where the page sits in the
//! full result set.
//!
//! # Example
//!
//! ```rust
//! use sonar_cli::api::common::{PaginationArgs, Paging};
//!
//! let args = PaginationArgs::new(2, 100);
//! let params = args.params();
//! assert_eq!(params.len(), 2);
//!
//! let json = r#"{"pageIndex": 2, "pageSize": 100, "total": 250}"#;
//! let paging: Paging = serde_json::from_str(json).unwrap();
//! assert!(paging.has_next());
//! assert_eq!(paging.next_page(), Some(3));
//! ```
//!
//! # Notes
//!
//! - The server rejects `ps` above 500 on the search endpoints; the same
//!   ceiling is enforced locally so the request is never sent.
//! - Unset fields are not sent, leaving the server default (usually 100).

use serde::{Deserialize, Serialize};

use crate::api::request::Params;
use crate::api::validate::{Check, FieldRule};

/// Largest page size accepted by SonarQube search endpoints.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Rules applied to every paginated operation.
pub const PAGINATION_RULES: &[FieldRule] = &[
    FieldRule::new(
        "p",
        &[Check::Range {
            min: 1,
            max: i64::MAX,
        }],
    ),
    FieldRule::new(
        "ps",
        &[Check::Range {
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        }],
    ),
];

/// Page index and size embedded in search option models.
///
/// # Fields
///
/// | Field | Wire name | Description |
/// |-------|-----------|-------------|
/// | `page` | `p` | 1-based page index |
/// | `page_size` | `ps` | Number of items per page |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationArgs {
    /// 1-based page index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PaginationArgs {
    /// Requests page `page` with `page_size` items.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Requests the first page with `page_size` items.
    pub fn with_size(page_size: u32) -> Self {
        Self {
            page: None,
            page_size: Some(page_size),
        }
    }

    /// Flattens into `p` / `ps` parameters; unset fields are omitted.
    pub fn params(&self) -> Params {
        Params::new()
            .opt("p", self.page)
            .opt("ps", self.page_size)
    }
}

/// Position of a page within a search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// 1-based index of this page.
    #[serde(default)]
    pub page_index: u32,

    /// Requested page size.
    #[serde(default)]
    pub page_size: u32,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
}

impl Paging {
    /// Checks if items remain after this page.
    pub fn has_next(&self) -> bool {
        u64::from(self.page_index) * u64::from(self.page_size) < self.total
    }

    /// Index of the following page, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page_index + 1)
    }
}
