//! Page category constants.
//!
//! Every page root declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_order--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity name searchable: copy the id from the
//! DOM inspector and you land in `domain/a001_order/`.

/// List of records rendered as a table.
pub const PAGE_CAT_LIST: &str = "list";

/// System page (login, session handling).
pub const PAGE_CAT_SYSTEM: &str = "system";
