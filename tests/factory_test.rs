//! Status factory with hand-built extended groups

mod common;

use ci_status::status::{
    CommonHelpers, CoreStatus, ExtendedCandidate, StatusDescriptor, StatusFactory, StatusOverride,
};
use ci_status::StatusError;
use common::{TestSubject, TestViewer};

struct DetailsFromPath;

impl CommonHelpers<TestSubject, TestViewer> for DetailsFromPath {
    fn has_details(&self, subject: &TestSubject, _viewer: Option<&TestViewer>) -> bool {
        subject.path.is_some()
    }

    fn details_path(&self, subject: &TestSubject) -> Option<String> {
        subject.path.clone()
    }
}

type Candidate = ExtendedCandidate<TestSubject, TestViewer>;

fn relabel(name: &'static str, label: &'static str) -> Candidate {
    ExtendedCandidate::when(name, |_, _| true, move |_, _, _| StatusOverride::new().label(label))
}

fn never(name: &'static str) -> Candidate {
    ExtendedCandidate::when(
        name,
        |_, _| false,
        |_, _, _| StatusOverride::new().label("unreachable"),
    )
}

fn linked(path: &'static str) -> Candidate {
    ExtendedCandidate::when(
        "linked",
        |_, _| true,
        move |_, _, _| StatusOverride::new().details_path(path),
    )
}

#[test]
fn test_no_groups_decorates_to_core_attributes() {
    let subject = TestSubject::new("success");
    let descriptor = StatusFactory::<TestSubject, TestViewer>::new(&subject, None)
        .fabricate()
        .unwrap();

    assert_eq!(descriptor, StatusDescriptor::core(CoreStatus::Success));
    assert_eq!(descriptor.text(), "passed");
    assert_eq!(descriptor.label(), "passed");
    assert_eq!(descriptor.icon(), "status_success");
    assert_eq!(descriptor.favicon(), "favicon_status_success");
    assert_eq!(descriptor.group(), "success");
    assert!(descriptor.extended().is_empty());
}

#[test]
fn test_label_override_leaves_other_fields_alone() {
    let subject = TestSubject::job("running");
    let descriptor = StatusFactory::new(&subject, None::<&TestViewer>)
        .with_helpers(DetailsFromPath)
        .with_groups(vec![vec![relabel("relabel", "in progress")]])
        .fabricate()
        .unwrap();

    assert_eq!(descriptor.label(), "in progress");
    assert_eq!(descriptor.status_tooltip(), "running");
    assert_eq!(descriptor.icon(), "status_running");
    assert_eq!(descriptor.favicon(), "favicon_status_running");
    assert!(descriptor.has_details());
    assert_eq!(descriptor.details_path(), Some("/acme/widgets/-/jobs/42"));
}

#[test]
fn test_first_match_per_group_and_later_groups_win() {
    let subject = TestSubject::new("failed");
    let factory = StatusFactory::<TestSubject, TestViewer>::new(&subject, None).with_groups(vec![
        vec![never("skipped_first"), relabel("first", "first"), relabel("second", "second")],
        vec![relabel("outer", "outer")],
    ]);

    let names: Vec<&str> = factory
        .extended_statuses()
        .unwrap()
        .iter()
        .map(|candidate| candidate.name())
        .collect();
    assert_eq!(names, vec!["first", "outer"]);

    let descriptor = factory.fabricate().unwrap();
    assert_eq!(descriptor.label(), "outer");
    assert_eq!(descriptor.extended(), &["first", "outer"]);
    assert_eq!(descriptor.badge_tooltip(), "failed");
}

#[test]
fn test_unsaved_subject_defaults_to_created() {
    let subject = TestSubject::default();
    let factory = StatusFactory::<TestSubject, TestViewer>::new(&subject, None);

    assert_eq!(factory.raw_status(), "created");
    assert_eq!(factory.fabricate().unwrap().core_status(), CoreStatus::Created);
}

#[test]
fn test_invalid_status_is_an_error() {
    let subject = TestSubject::new("not_a_real_status");
    let result = StatusFactory::<TestSubject, TestViewer>::new(&subject, None).fabricate();

    assert_eq!(result, Err(StatusError::invalid_status("not_a_real_status")));
}

#[test]
fn test_matcher_error_aborts_fabrication() {
    let subject = TestSubject::new("success");
    let failing = ExtendedCandidate::new(
        "lookup",
        |_: &TestSubject, _: Option<&TestViewer>| {
            Err(StatusError::matcher_failed("lookup", "backend unavailable"))
        },
        |_, _, _| StatusOverride::new(),
    );

    let result = StatusFactory::new(&subject, None::<&TestViewer>)
        .with_groups(vec![vec![failing]])
        .fabricate();

    assert!(matches!(result, Err(StatusError::MatcherFailed { .. })));
}

#[test]
fn test_transient_status_hides_details_path() {
    let subject = TestSubject::job("waiting_for_resource");
    let descriptor = StatusFactory::new(&subject, None::<&TestViewer>)
        .with_helpers(DetailsFromPath)
        .fabricate()
        .unwrap();

    assert!(descriptor.has_details());
    assert_eq!(descriptor.details_path(), None);
}

#[test]
fn test_extended_status_cannot_link_transient_status() {
    for status in ["waiting_for_resource", "waiting_for_callback", "canceling"] {
        let subject = TestSubject::new(status);
        let descriptor = StatusFactory::new(&subject, None::<&TestViewer>)
            .with_groups(vec![vec![linked("/acme/widgets/-/jobs/7")]])
            .fabricate()
            .unwrap();

        assert_eq!(descriptor.details_path(), None, "{status}");
        assert_eq!(descriptor.extended(), &["linked"]);
    }

    let subject = TestSubject::new("running");
    let descriptor = StatusFactory::new(&subject, None::<&TestViewer>)
        .with_groups(vec![vec![linked("/acme/widgets/-/jobs/7")]])
        .fabricate()
        .unwrap();
    assert_eq!(descriptor.details_path(), Some("/acme/widgets/-/jobs/7"));
}

#[test]
fn test_later_group_extends_earlier_tooltip() {
    let subject = TestSubject::new("failed");
    let annotate = |name: &'static str, note: &'static str| -> Candidate {
        ExtendedCandidate::when(name, |_, _| true, move |_, _, wrapped| {
            StatusOverride::new().tooltip(format!("{} ({note})", wrapped.status_tooltip()))
        })
    };
    let descriptor = StatusFactory::<TestSubject, TestViewer>::new(&subject, None)
        .with_groups(vec![
            vec![annotate("flaky", "flaky")],
            vec![annotate("retried", "retried")],
        ])
        .fabricate()
        .unwrap();

    assert_eq!(descriptor.status_tooltip(), "failed (flaky) (retried)");
    assert_eq!(descriptor.label(), "failed");
}

#[test]
fn test_viewer_reaches_matchers() {
    let subject = TestSubject::new("manual");
    let maintainer = TestViewer::maintainer();
    let only_for_viewers = ExtendedCandidate::when(
        "viewer_only",
        |_: &TestSubject, viewer: Option<&TestViewer>| viewer.is_some(),
        |_, _, _| StatusOverride::new().text("yours"),
    );

    let factory =
        StatusFactory::new(&subject, Some(&maintainer)).with_groups(vec![vec![only_for_viewers]]);
    assert_eq!(factory.fabricate().unwrap().text(), "yours");
}
