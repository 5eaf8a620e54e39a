//! Conversion from wire payloads into typed records.

use super::wire::{WireComment, WireCommit, WireIssue, WireLabel, WireMilestone, WireUser};
use crate::client::ApiError;
use crate::model::{Comment, Commit, Issue, ItemState, Label, Milestone, GHOST_USERNAME};

fn login_or_ghost(user: Option<WireUser>) -> String {
    user.map_or_else(|| GHOST_USERNAME.to_string(), |user| user.login)
}

fn parse_state(kind: &'static str, state: &str) -> Result<ItemState, ApiError> {
    ItemState::parse(state).ok_or_else(|| ApiError::MalformedRecord {
        kind,
        message: format!("unknown state '{state}'"),
    })
}

pub(crate) fn to_milestone(wire: WireMilestone) -> Result<Milestone, ApiError> {
    Ok(Milestone {
        number: wire.number,
        state: parse_state("milestone", &wire.state)?,
        title: wire.title,
        description: wire.description,
        due_on: wire.due_on,
        creator: login_or_ghost(wire.creator),
    })
}

pub(crate) fn to_label(wire: WireLabel) -> Label {
    Label {
        name: wire.name,
        color: wire.color,
    }
}

pub(crate) fn to_issue(wire: WireIssue) -> Result<Issue, ApiError> {
    // Plain issues either omit `pull_request` or carry it with a null url.
    let pull_request = wire
        .pull_request
        .as_ref()
        .and_then(|reference| reference.url.as_ref())
        .is_some();

    Ok(Issue {
        number: wire.number,
        state: parse_state("issue", &wire.state)?,
        title: wire.title,
        body: wire.body.unwrap_or_default(),
        labels: wire.labels.into_iter().map(|label| label.name).collect(),
        assignee: wire.assignee.map(|user| user.login),
        milestone: wire.milestone.map(|milestone| milestone.number),
        author: login_or_ghost(wire.user),
        closed_by: wire.closed_by.map(|user| user.login),
        created_at: wire.created_at,
        closed_at: wire.closed_at,
        pull_request,
    })
}

pub(crate) fn to_comment(wire: WireComment) -> Comment {
    Comment {
        author: login_or_ghost(wire.user),
        body: wire.body.unwrap_or_default(),
        created_at: wire.created_at,
    }
}

pub(crate) fn to_commit(wire: WireCommit) -> Commit {
    Commit {
        sha: wire.sha,
        message: wire.commit.message,
        committer: wire.committer.map(|user| user.login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn issue_json() -> serde_json::Value {
        json!({
            "number": 42,
            "title": "Crash on start",
            "body": null,
            "labels": [{"name": "bug", "color": "d73a4a"}],
            "assignee": {"login": "alice"},
            "milestone": {"number": 3},
            "user": {"login": "bob"},
            "state": "closed",
            "closed_by": null,
            "created_at": "2021-01-01T00:00:00Z",
            "closed_at": "2021-02-01T00:00:00Z"
        })
    }

    #[test]
    fn converts_plain_issue_without_pull_request_container() {
        let wire: WireIssue = serde_json::from_value(issue_json()).unwrap();
        let issue = to_issue(wire).unwrap();

        assert_eq!(issue.number, 42);
        assert_eq!(issue.body, "");
        assert_eq!(issue.labels, vec!["bug".to_string()]);
        assert_eq!(issue.assignee.as_deref(), Some("alice"));
        assert_eq!(issue.milestone, Some(3));
        assert_eq!(issue.author, "bob");
        assert_eq!(issue.state, ItemState::Closed);
        assert_eq!(issue.closed_by, None);
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn null_pull_request_url_is_a_plain_issue() {
        let mut value = issue_json();
        value["pull_request"] = json!({"url": null});
        let issue = to_issue(serde_json::from_value(value).unwrap()).unwrap();
        assert!(!issue.is_pull_request());

        let mut value = issue_json();
        value["pull_request"] = json!({"url": "https://api.github.com/repos/o/r/pulls/42"});
        let issue = to_issue(serde_json::from_value(value).unwrap()).unwrap();
        assert!(issue.is_pull_request());
    }

    #[test]
    fn missing_users_become_ghost() {
        let mut value = issue_json();
        value["user"] = serde_json::Value::Null;
        let issue = to_issue(serde_json::from_value(value).unwrap()).unwrap();
        assert_eq!(issue.author, GHOST_USERNAME);

        let comment: WireComment = serde_json::from_value(json!({
            "user": null,
            "body": "hello",
            "created_at": "2021-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(to_comment(comment).author, GHOST_USERNAME);
    }

    #[test]
    fn converts_milestone_with_due_date() {
        let wire: WireMilestone = serde_json::from_value(json!({
            "number": 4,
            "title": "v2",
            "description": "Second release",
            "due_on": "2021-03-20T07:00:00Z",
            "state": "closed",
            "creator": null
        }))
        .unwrap();
        let milestone = to_milestone(wire).unwrap();

        assert_eq!(
            milestone.due_on,
            Some(Utc.with_ymd_and_hms(2021, 3, 20, 7, 0, 0).unwrap())
        );
        assert_eq!(milestone.state, ItemState::Closed);
        assert_eq!(milestone.creator, GHOST_USERNAME);
        assert_eq!(milestone.description.as_deref(), Some("Second release"));
    }

    #[test]
    fn rejects_unknown_milestone_state() {
        let wire: WireMilestone = serde_json::from_value(json!({
            "number": 1,
            "title": "v1",
            "state": "archived",
            "creator": {"login": "alice"}
        }))
        .unwrap();

        assert!(matches!(
            to_milestone(wire),
            Err(ApiError::MalformedRecord { kind: "milestone", .. })
        ));
    }

    #[test]
    fn converts_commit_with_and_without_committer() {
        let wire: WireCommit = serde_json::from_value(json!({
            "sha": "abc123",
            "commit": {"message": "Fix it"},
            "committer": {"login": "carol"}
        }))
        .unwrap();
        assert_eq!(to_commit(wire).committer.as_deref(), Some("carol"));

        let wire: WireCommit = serde_json::from_value(json!({
            "sha": "def456",
            "commit": {"message": "Fix it again"},
            "committer": null
        }))
        .unwrap();
        assert_eq!(to_commit(wire).committer, None);
    }
}
