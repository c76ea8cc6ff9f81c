//! Repair: resolve each divergence back to a consistent state
//!
//! | Kind | Action | Prompt |
//! |---|---|---|
//! | A | none, reported as deferred | no |
//! | B | equal bytes: relink mine over theirs; else mine or theirs wins | on mismatch |
//! | C | index the ref, then link mine into the repository | yes |
//! | D | force-link theirs over mine | no |
//! | E | drop the ref from the index | yes |
//! | F | index the ref | no |
//!
//! Link failures are recorded per ref and the run continues. Index and prompt
//! failures abort the run; repairs already applied stay applied.

use std::path::Path;

use trakk_fs::{Linker, io};

use super::prompt::{Choice, Prompter, choose};
use super::report::{SyncOptions, SyncReport};
use super::status::{RefPaths, RefStatus};
use crate::Result;
use crate::index::IndexStore;

/// Applies repairs for a batch of statuses.
pub struct Repairer<'a, P: Prompter + ?Sized> {
    index: &'a mut IndexStore,
    linker: &'a Linker,
    prompter: &'a mut P,
    options: SyncOptions,
}

impl<'a, P: Prompter + ?Sized> Repairer<'a, P> {
    pub fn new(
        index: &'a mut IndexStore,
        linker: &'a Linker,
        prompter: &'a mut P,
        options: SyncOptions,
    ) -> Self {
        Self {
            index,
            linker,
            prompter,
            options,
        }
    }

    /// Repair `statuses` in order, deferring every A to the end.
    pub fn sync(&mut self, statuses: Vec<RefStatus>) -> Result<SyncReport> {
        let mut report = SyncReport::success();
        let (deferred, actionable): (Vec<_>, Vec<_>) = statuses
            .into_iter()
            .partition(|s| matches!(s, RefStatus::Uncommitted(_)));

        for status in actionable {
            self.repair(status, &mut report)?;
        }

        for status in deferred {
            report.defer(format!(
                "{}: commit it with git to resolve",
                status.display_path().display()
            ));
        }

        tracing::info!(
            actions = report.actions.len(),
            errors = report.errors.len(),
            skipped = report.skipped.len(),
            deferred = report.deferred.len(),
            "Sync finished"
        );
        Ok(report)
    }

    fn repair(&mut self, status: RefStatus, report: &mut SyncReport) -> Result<()> {
        match status {
            RefStatus::InodeMismatch(paths) => self.resolve_conflict(&paths, report),
            RefStatus::MissingInRepository(paths) => self.adopt(&paths, report),
            RefStatus::MissingInSystem(paths) => {
                if self.options.dry_run {
                    report.action(format!(
                        "[dry-run] Would link {} -> {}",
                        paths.theirs.display(),
                        paths.mine.display()
                    ));
                } else {
                    self.force_link(&paths.theirs, &paths.mine, &paths.reference, report);
                }
                Ok(())
            }
            RefStatus::Vanished(paths) => self.forget(&paths, report),
            RefStatus::Untracked { reference, .. } => {
                if self.options.dry_run {
                    report.action(format!("[dry-run] Would add {reference} to the index"));
                } else if self.index.add(&reference)? {
                    tracing::info!(reference = %reference, "Indexed untracked repository file");
                    report.action(format!("Added {reference} to the index"));
                }
                Ok(())
            }
            RefStatus::Uncommitted(_) => Ok(()),
        }
    }

    /// B: pick the surviving content and link it over the other side.
    fn resolve_conflict(&mut self, paths: &RefPaths, report: &mut SyncReport) -> Result<()> {
        let identical = match io::contents_equal(&paths.mine, &paths.theirs) {
            Ok(identical) => identical,
            Err(e) => {
                tracing::warn!(reference = %paths.reference, error = %e, "Could not compare copies");
                report.error(format!("{}: {e}", paths.reference));
                return Ok(());
            }
        };

        if identical {
            if self.options.dry_run {
                report.action(format!(
                    "[dry-run] Would relink {} (identical content)",
                    paths.reference
                ));
            } else {
                self.force_link(&paths.mine, &paths.theirs, &paths.reference, report);
            }
            return Ok(());
        }

        if self.options.dry_run {
            report.skip(format!(
                "{}: content differs, would ask which copy to keep",
                paths.reference
            ));
            return Ok(());
        }

        let question = format!(
            "Unresolvable file conflict for '{}' (exists both in system and repository). Which should I pick?",
            paths.mine.display()
        );
        match choose(
            &mut *self.prompter,
            &question,
            &[Choice::Mine, Choice::Theirs, Choice::Skip],
        )? {
            Choice::Mine => self.force_link(&paths.mine, &paths.theirs, &paths.reference, report),
            Choice::Theirs => self.force_link(&paths.theirs, &paths.mine, &paths.reference, report),
            _ => report.skip(paths.reference.clone()),
        }
        Ok(())
    }

    /// C: confirm, then index first and link second.
    fn adopt(&mut self, paths: &RefPaths, report: &mut SyncReport) -> Result<()> {
        if self.options.dry_run {
            report.skip(format!(
                "{}: would ask to add it to the repository",
                paths.reference
            ));
            return Ok(());
        }

        let question = format!(
            "Ref '{}' exists in system but is not linked to repository. Should I add it?",
            paths.mine.display()
        );
        match choose(
            &mut *self.prompter,
            &question,
            &[Choice::Yes, Choice::No, Choice::Skip],
        )? {
            Choice::Yes => {
                self.index.add(&paths.reference)?;
                match self.linker.link(&paths.mine, &paths.theirs, false) {
                    Ok(()) => {
                        tracing::info!(reference = %paths.reference, "Linked into repository");
                        report.action(format!(
                            "Linked {} -> {}",
                            paths.mine.display(),
                            paths.theirs.display()
                        ));
                    }
                    Err(e) => {
                        tracing::warn!(reference = %paths.reference, error = %e, "Link failed");
                        report.error(format!("{}: {e}", paths.reference));
                    }
                }
            }
            _ => report.skip(paths.reference.clone()),
        }
        Ok(())
    }

    /// E: confirm, then drop the ref from the index.
    fn forget(&mut self, paths: &RefPaths, report: &mut SyncReport) -> Result<()> {
        if self.options.dry_run {
            report.skip(format!(
                "{}: would ask to remove it from the index",
                paths.reference
            ));
            return Ok(());
        }

        let question = format!(
            "Ref '{}' is only present as a name in index (file does not exist in either system or repository). Should I remove it from the index?",
            paths.reference
        );
        match choose(&mut *self.prompter, &question, &[Choice::Yes, Choice::Skip])? {
            Choice::Yes => {
                if self.index.remove(&paths.reference)? {
                    tracing::info!(reference = %paths.reference, "Removed vanished ref");
                    report.action(format!("Removed {} from the index", paths.reference));
                }
            }
            _ => report.skip(paths.reference.clone()),
        }
        Ok(())
    }

    fn force_link(&self, src: &Path, dest: &Path, reference: &str, report: &mut SyncReport) {
        match self.linker.link(src, dest, true) {
            Ok(()) => {
                tracing::info!(reference, src = %src.display(), dest = %dest.display(), "Relinked");
                report.action(format!("Linked {} -> {}", src.display(), dest.display()));
            }
            Err(e) => {
                tracing::warn!(reference, error = %e, "Link failed");
                report.error(format!("{reference}: {e}"));
            }
        }
    }
}
