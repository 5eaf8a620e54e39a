//! Provenance renderer.

use super::{
    TemplateError, DEFAULT_COMMENT_FOOTER, DEFAULT_COMMIT_LINE, DEFAULT_ISSUE_FOOTER,
    DEFAULT_PULL_REQUEST_HEADER,
};
use crate::model::{format_timestamp, Comment, Commit, Issue};
use handlebars::{no_escape, Handlebars};
use serde::Deserialize;
use serde_json::json;

const ISSUE_FOOTER: &str = "issue-footer";
const PULL_REQUEST_HEADER: &str = "pull-request-header";
const COMMIT_LINE: &str = "commit-line";
const COMMENT_FOOTER: &str = "comment-footer";

/// Creates a Handlebars registry suited to markdown output.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Optional replacements for the default provenance templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplateOverrides {
    /// Replaces the issue footer. Variables: `source`, `created_at`,
    /// `closed_at`, `number`, `title`.
    pub issue_footer: Option<String>,

    /// Replaces the comment footer. Variables: `created_at`, `author`.
    pub comment_footer: Option<String>,
}

/// Renders provenance text for issues, commits and comments.
pub struct ProvenanceRenderer {
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for ProvenanceRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvenanceRenderer").finish_non_exhaustive()
    }
}

impl ProvenanceRenderer {
    /// Creates a renderer, replacing the default footers with any given in
    /// `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if an override does not
    /// parse.
    pub fn new(overrides: &TemplateOverrides) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        let templates = [
            (
                ISSUE_FOOTER,
                overrides.issue_footer.as_deref().unwrap_or(DEFAULT_ISSUE_FOOTER),
            ),
            (PULL_REQUEST_HEADER, DEFAULT_PULL_REQUEST_HEADER),
            (COMMIT_LINE, DEFAULT_COMMIT_LINE),
            (
                COMMENT_FOOTER,
                overrides
                    .comment_footer
                    .as_deref()
                    .unwrap_or(DEFAULT_COMMENT_FOOTER),
            ),
        ];

        for (name, template) in templates {
            handlebars
                .register_template_string(name, template)
                .map_err(|source| TemplateError::RegistrationError {
                    name,
                    source: Box::new(source),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders the footer recording the issue's origin and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn issue_footer(&self, source: &str, issue: &Issue) -> Result<String, TemplateError> {
        let data = json!({
            "source": source,
            "number": issue.number,
            "title": issue.title,
            "created_at": format_timestamp(&issue.created_at),
            "closed_at": issue.closed_at.as_ref().map(format_timestamp),
        });
        Ok(self.handlebars.render(ISSUE_FOOTER, &data)?)
    }

    /// Renders the commit list appended to pull request bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn pull_request_commits(&self, commits: &[Commit]) -> Result<String, TemplateError> {
        let mut text = self.handlebars.render(PULL_REQUEST_HEADER, &json!({}))?;
        for commit in commits {
            let data = json!({
                "sha": commit.sha,
                "message": commit.message,
                "committer": commit.committer,
            });
            text.push_str(&self.handlebars.render(COMMIT_LINE, &data)?);
        }
        Ok(text)
    }

    /// Renders the footer recording when a comment was originally posted.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn comment_footer(&self, comment: &Comment) -> Result<String, TemplateError> {
        let data = json!({
            "author": comment.author,
            "created_at": format_timestamp(&comment.created_at),
        });
        Ok(self.handlebars.render(COMMENT_FOOTER, &data)?)
    }
}
