// tests/reaper_test.rs
mod common;

use common::TestRepo;
use git_reaper::config::default_main_branches;
use git_reaper::git::{short_hash, Git2Repository, Repository};
use git_reaper::reaper::{DeletionOutcome, MergeCandidate, Reaper};
use git_reaper::ReaperError;
use serial_test::serial;
use std::env;

fn open(test_repo: &TestRepo) -> Git2Repository {
    Git2Repository::open_from(test_repo.dir.path()).expect("Could not open test repo")
}

#[test]
fn test_list_branches_sorted_with_tips() {
    let (test_repo, scenario) = TestRepo::scenario();
    let repo = open(&test_repo);

    let branches = repo.list_branches().unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["feature-a", "feature-b", "main", "staging"]);
    assert_eq!(branches[0].tip, scenario.a1);
    assert_eq!(branches[2].tip, scenario.merge);
}

#[test]
fn test_is_ancestor_follows_merge_parents() {
    let (test_repo, s) = TestRepo::scenario();
    let repo = open(&test_repo);

    assert!(repo.is_ancestor(s.a1, s.merge).unwrap());
    assert!(repo.is_ancestor(s.base, s.merge).unwrap());
    assert!(repo.is_ancestor(s.m1, s.merge).unwrap());
    assert!(repo.is_ancestor(s.merge, s.merge).unwrap());
    assert!(!repo.is_ancestor(s.b1, s.merge).unwrap());
    assert!(!repo.is_ancestor(s.merge, s.a1).unwrap());
}

#[test]
fn test_commit_meta() {
    let (test_repo, s) = TestRepo::scenario();
    let repo = open(&test_repo);

    let meta = repo.commit_meta(s.a1).unwrap();
    assert_eq!(meta.author_name, "Bob");
    assert_eq!(meta.short_hash, short_hash(s.a1));
    assert_eq!(meta.short_hash.len(), 8);
}

#[test]
fn test_scenario_plan() {
    let (test_repo, s) = TestRepo::scenario();
    let repo = open(&test_repo);
    let reaper = Reaper::new(&repo, &default_main_branches());

    let plan = reaper.plan().unwrap();
    assert_eq!(plan.main_branch_names(), vec!["main", "staging"]);
    assert_eq!(
        plan.candidates,
        vec![MergeCandidate {
            name: "feature-a".to_string(),
            merged_into: "main".to_string(),
            short_hash: short_hash(s.a1),
            author_name: "Bob".to_string(),
        }]
    );
}

#[test]
fn test_no_main_branch_in_repository() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit("initial commit", "Alice", &[]);
    test_repo.branch("trunk", base);
    test_repo.branch("topic", base);
    let repo = open(&test_repo);

    let reaper = Reaper::new(&repo, &default_main_branches());
    assert!(matches!(
        reaper.discover_main_branches(),
        Err(ReaperError::NoMainBranchFound { .. })
    ));
}

#[test]
fn test_tie_break_uses_configured_order() {
    let (test_repo, s) = TestRepo::scenario();
    test_repo.branch("dev", s.merge);
    test_repo.branch("topic", s.base);
    let repo = open(&test_repo);

    let priority = vec!["dev".to_string(), "main".to_string()];
    let plan = Reaper::new(&repo, &priority).plan().unwrap();
    let topic = plan
        .candidates
        .iter()
        .find(|c| c.name == "topic")
        .expect("topic should be merged");
    assert_eq!(topic.merged_into, "dev");
    assert_eq!(
        plan.candidates.iter().filter(|c| c.name == "topic").count(),
        1
    );
}

#[test]
fn test_confirmed_deletion_with_checked_out_failure() {
    let (test_repo, s) = TestRepo::scenario();
    test_repo.branch("feature-c", s.base);
    test_repo.checkout("feature-c");
    let repo = open(&test_repo);
    let reaper = Reaper::new(&repo, &default_main_branches());

    let plan = reaper.plan().unwrap();
    let names: Vec<&str> = plan.candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["feature-a", "feature-c"]);

    let outcome = reaper
        .confirm_and_delete(&plan.candidates, |count| {
            assert_eq!(count, 2);
            Ok(true)
        })
        .unwrap();

    let DeletionOutcome::Completed(report) = outcome else {
        panic!("expected deletion to run");
    };
    assert_eq!(report.deleted, vec!["feature-a".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].branch, "feature-c");
    assert!(matches!(
        report.failed[0].error,
        ReaperError::DeleteFailure { .. }
    ));

    assert!(!test_repo.branch_exists("feature-a"));
    assert!(test_repo.branch_exists("feature-c"));
    assert!(test_repo.branch_exists("feature-b"));
    assert!(test_repo.branch_exists("main"));
    assert!(test_repo.branch_exists("staging"));
}

#[test]
fn test_cancelled_deletion_leaves_branches() {
    let (test_repo, _) = TestRepo::scenario();
    let repo = open(&test_repo);
    let reaper = Reaper::new(&repo, &default_main_branches());
    let plan = reaper.plan().unwrap();

    let outcome = reaper
        .confirm_and_delete(&plan.candidates, |_| Ok(false))
        .unwrap();

    assert!(matches!(outcome, DeletionOutcome::Cancelled));
    assert!(test_repo.branch_exists("feature-a"));
}

#[test]
fn test_delete_branch_twice_fails() {
    let (test_repo, _) = TestRepo::scenario();
    let repo = open(&test_repo);

    repo.delete_branch("feature-b").unwrap();
    assert!(matches!(
        repo.delete_branch("feature-b"),
        Err(ReaperError::DeleteFailure { .. })
    ));
}

#[test]
#[serial]
fn test_open_from_current_directory() {
    let (test_repo, _) = TestRepo::scenario();
    let nested = test_repo.dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();
    let original_dir = env::current_dir().unwrap();

    env::set_current_dir(&nested).expect("Could not change to temp dir");
    let result = Git2Repository::open();
    env::set_current_dir(original_dir).unwrap();

    let repo = result.expect("open() should discover the parent repository");
    assert_eq!(
        repo.root_path(),
        test_repo.dir.path().canonicalize().unwrap()
    );
}
