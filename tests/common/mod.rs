//! Shared scaffolding for tests that need real git repositories.
#![allow(dead_code)]

use std::path::Path;

use git2::Repository;

/// Initialize a repository with a local identity so commits and annotated
/// tags can be created without global git configuration.
pub fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).expect("init repository");
    {
        let mut config = repo.config().expect("open repo config");
        config.set_str("user.name", "Tester").unwrap();
        config.set_str("user.email", "tester@example.com").unwrap();
    }
    repo
}

/// Stage everything and commit; works for the initial commit too.
pub fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = repo.signature().unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

/// Create an annotated tag on HEAD.
pub fn tag(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    let signature = repo.signature().unwrap();
    repo.tag(name, head.as_object(), &signature, &format!("Tag {}", name), false)
        .unwrap();
}

/// Point HEAD at a branch with the given name, creating it at the current
/// commit. Keeps tests independent of the host's init.defaultBranch.
pub fn checkout_branch(repo: &Repository, name: &str) {
    if repo.find_branch(name, git2::BranchType::Local).is_err() {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.branch(name, &head, false).unwrap();
    }
    repo.set_head(&format!("refs/heads/{}", name)).unwrap();
}
