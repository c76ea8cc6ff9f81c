//! Shared fixtures for trakk-core integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor};

use trakk_core::{Environment, IndexStore, LinePrompter, Prompter, Workspace};
use trakk_git::{GitRepository, VcsPort};
use trakk_test_utils::TestHome;

/// In-memory version control: a fixed dirty set and canned patches.
#[derive(Debug, Default)]
pub struct FakeVcs {
    pub dirty: BTreeSet<String>,
    pub patches: BTreeMap<String, String>,
    pub committed: BTreeSet<String>,
    pub checkouts: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn dirty(refs: &[&str]) -> Self {
        Self {
            dirty: refs.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl VcsPort for FakeVcs {
    fn uncommitted_refs(&self) -> trakk_git::Result<BTreeSet<String>> {
        Ok(self.dirty.clone())
    }

    fn diff_patch(&self, reference: &str) -> trakk_git::Result<String> {
        Ok(self.patches.get(reference).cloned().unwrap_or_default())
    }

    fn checkout(&self, reference: &str) -> trakk_git::Result<bool> {
        self.checkouts.borrow_mut().push(reference.to_string());
        Ok(self.committed.contains(reference))
    }
}

/// Prompter that fails the test when asked anything.
pub struct NoPrompts;

impl Prompter for NoPrompts {
    fn read_answer(&mut self, prompt: &str) -> trakk_core::Result<Option<String>> {
        panic!("unexpected prompt: {prompt}");
    }

    fn reject(&mut self, answer: &str) -> trakk_core::Result<()> {
        panic!("unexpected rejection of {answer:?}");
    }
}

/// Prompter answering from a script, one line per question.
pub fn scripted(answers: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
    LinePrompter::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
}

/// Prompter reading from an input that is already closed.
pub fn closed_input() -> LinePrompter<io::Empty, io::Sink> {
    LinePrompter::new(io::empty(), io::sink())
}

pub fn env(home: &TestHome) -> Environment {
    Environment::new(home.home(), None, home.home())
}

/// Workspace backed by the real repository in `home`.
pub fn git_workspace(home: &TestHome) -> Workspace<GitRepository> {
    Workspace::open(env(home)).unwrap()
}

/// Workspace backed by a fake version control.
pub fn fake_workspace(home: &TestHome, vcs: FakeVcs) -> Workspace<FakeVcs> {
    let env = env(home);
    let index = IndexStore::open(env.index_path()).unwrap();
    Workspace::with_vcs(env, index, vcs)
}

/// Kind letters of `workspace.status()`, in display order.
pub fn kinds<V: VcsPort>(workspace: &Workspace<V>) -> Vec<(char, String)> {
    workspace
        .status()
        .unwrap()
        .iter()
        .map(|s| (s.kind().letter(), s.reference().to_string()))
        .collect()
}
