// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL every endpoint path is joined onto.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1/";

/// API version pinned in the `Notion-Version` header.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize round-trips.
pub const NOTION_API_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Placeholders for missing values
// ---------------------------------------------------------------------------

/// Shown for a person whose name the payload omits.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Appended to a comment author's name when it had to be looked up separately.
pub const BOT_AUTHOR_SUFFIX: &str = "(bot)";

/// Shown in place of a null field value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for a card whose title is empty.
pub const UNTITLED_CARD: &str = "No Title";

// ---------------------------------------------------------------------------
// Display layout
// ---------------------------------------------------------------------------

/// Width of the `=` rule framing each displayed record.
pub const RECORD_RULE_WIDTH: usize = 60;

/// Width of the label column in detailed record output.
pub const RECORD_LABEL_WIDTH: usize = 20;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies in logs.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
