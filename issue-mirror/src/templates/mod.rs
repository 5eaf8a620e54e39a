//! Provenance text rendering using Handlebars.
//!
//! Mirrored issues and comments carry a short footer recording where and
//! when they were originally written, since re-creation loses the original
//! timestamps.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, ProvenanceRenderer, TemplateOverrides};

/// Footer appended to every mirrored issue body.
pub const DEFAULT_ISSUE_FOOTER: &str = "\n\n> This issue was migrated from **{{source}}**. \
The original issue was opened on **{{created_at}}**\
{{#if closed_at}} and closed on **{{closed_at}}**{{/if}}.";

/// Sentence introducing the commit list of a pull request.
pub const DEFAULT_PULL_REQUEST_HEADER: &str =
    " This issue was also converted to a **Pull Request** with these commits:";

/// One line per pull request commit.
pub const DEFAULT_COMMIT_LINE: &str =
    "\n> * {{sha}}: {{message}}{{#if committer}} ({{committer}}){{/if}}";

/// Footer appended to every mirrored comment body.
pub const DEFAULT_COMMENT_FOOTER: &str = "\n\n> Original comment posted on **{{created_at}}**.";
