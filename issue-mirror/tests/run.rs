//! Full runs through `Mirror::run`.

mod common;

use common::{closed_issue, comment, issue, Action, FakeService, ADMIN};
use issue_mirror::Operations;

fn everything(selector: &str) -> Operations {
    Operations {
        notifications: true,
        milestones: true,
        labels: true,
        issues: Some(selector.parse().unwrap()),
    }
}

fn populated() -> FakeService {
    FakeService::new()
        .with_milestones(&[1, 3])
        .with_labels(&[("bug", "d73a4a")])
        .with_issue(issue(1, "alice"), vec![comment("bob", "Confirmed", 2)])
        .with_issue(closed_issue(2, "bob", Some("alice")), Vec::new())
}

#[tokio::test]
async fn synchronizers_run_in_fixed_order() {
    let service = populated();
    let mirror = service.mirror(&["alice", "bob"], false);

    let summary = mirror.run(&everything("1-2")).await.unwrap();

    let mut phases: Vec<&str> = service
        .calls()
        .iter()
        .map(|call| match call.action {
            Action::UpdateSubscription { .. } => "notifications",
            Action::CreateMilestone { .. } | Action::DeleteMilestone { .. } => "milestones",
            Action::CreateLabel { .. } => "labels",
            _ => "issues",
        })
        .collect();
    phases.dedup();
    assert_eq!(phases, vec!["notifications", "milestones", "labels", "issues"]);

    assert_eq!(summary.notifications_suppressed, 3);
    assert_eq!(summary.milestones_created, 2);
    assert_eq!(summary.placeholders_materialized, 1);
    assert_eq!(summary.labels_created, 1);
    assert_eq!(summary.issues_migrated, 2);
    assert_eq!(summary.comments_replicated, 1);
    assert_eq!(summary.issues_closed, 1);
    assert_eq!(summary.pacing_waits, mirror.pacer().waits());
    assert!(!summary.has_failures());
}

#[tokio::test]
async fn every_collaborator_ignores_the_mirror() {
    let service = FakeService::new();
    let mirror = service.mirror(&["alice", "bob"], false);
    let operations = Operations {
        notifications: true,
        ..Default::default()
    };

    let summary = mirror.run(&operations).await.unwrap();

    let logins: Vec<String> = service
        .calls()
        .into_iter()
        .filter(|call| call.action == Action::UpdateSubscription { ignored: true })
        .map(|call| call.login)
        .collect();
    assert_eq!(logins, vec![ADMIN, "alice", "bob"]);
    assert_eq!(summary.notifications_suppressed, 3);
    assert_eq!(summary.pacing_waits, 3);
}

#[tokio::test]
async fn missing_milestones_do_not_stop_later_synchronizers() {
    let service = FakeService::new()
        .with_labels(&[("bug", "d73a4a")])
        .with_issue(issue(1, "alice"), Vec::new());
    let mirror = service.mirror(&["alice"], false);
    let operations = Operations {
        notifications: false,
        ..everything("1")
    };

    let summary = mirror.run(&operations).await.unwrap();

    assert!(summary.milestone_failure.is_some());
    assert!(summary.has_failures());
    assert_eq!(summary.labels_created, 1);
    assert_eq!(summary.issues_migrated, 1);
    assert!(service.state().milestones.is_empty());
}

#[tokio::test]
async fn dry_run_of_everything_mutates_nothing() {
    let live = populated();
    let live_mirror = live.mirror(&["alice", "bob"], false);
    let live_summary = live_mirror.run(&everything("1-2")).await.unwrap();

    let dry = populated();
    let dry_mirror = dry.mirror(&["alice", "bob"], true);
    let dry_summary = dry_mirror.run(&everything("1-2")).await.unwrap();

    assert!(dry.calls().is_empty());
    assert_eq!(dry.reads(), live.reads());
    assert!(dry_summary.dry_run);
    assert_eq!(dry_summary.pacing_waits, live_summary.pacing_waits);
    assert_eq!(dry_summary.issues_migrated, live_summary.issues_migrated);
    assert!(dry_summary.issues.iter().all(|outcome| outcome.mirror_number.is_none()));
}

#[tokio::test]
async fn fatal_error_stops_the_run() {
    let service = populated().with_issue(issue(3, "mallory"), Vec::new());
    let mirror = service.mirror(&["alice", "bob"], false);

    let result = mirror.run(&everything("1-3")).await;

    assert!(result.is_err());
    assert_eq!(service.state().issues.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pacing_delay_applies_after_each_write() {
    let service = FakeService::new().with_labels(&[("bug", "d73a4a"), ("docs", "0075ca")]);
    let mirror = {
        use issue_mirror::{Collaborator, IdentityPool, Mirror, MirrorOptions};
        use std::time::Duration;

        let identities =
            IdentityPool::new(ADMIN, [Collaborator::new(ADMIN, service.destination(ADMIN))])
                .unwrap();
        let options = MirrorOptions {
            delay: Duration::from_secs(2),
            ..Default::default()
        };
        Mirror::new(service.source(), identities, options).unwrap()
    };
    let started = tokio::time::Instant::now();

    let operations = Operations {
        labels: true,
        ..Default::default()
    };
    mirror.run(&operations).await.unwrap();

    assert!(started.elapsed() >= std::time::Duration::from_secs(4));
    assert_eq!(mirror.pacer().waits(), 2);
}
