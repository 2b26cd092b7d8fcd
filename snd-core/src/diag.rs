//! Error collector.
//!
//! Every component reports through a [`Collector`] so the error policy is
//! applied in one place. Under [`ErrorPolicy::Throw`] the first non-warning
//! report comes back as `Err` and is not recorded; under
//! [`ErrorPolicy::Collect`] it is appended and the caller decides whether it
//! is safe to keep going. Warnings are recorded under both policies and never
//! abort.

use std::fmt::Write as _;

use crate::error::{Diagnostic, ErrorKind, Payload, Result, SndError};
use crate::policy::ErrorPolicy;

#[derive(Clone, Debug, Default)]
pub struct Collector {
    policy: ErrorPolicy,
    entries: Vec<Diagnostic>,
}

impl Collector {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub(crate) fn set_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    pub fn report(&mut self, kind: ErrorKind) -> Result<()> {
        self.push(Diagnostic::new(kind))
    }

    pub fn report_value(&mut self, kind: ErrorKind, value: i32) -> Result<()> {
        self.push(Diagnostic::with_value(kind, value))
    }

    pub fn report_sound(&mut self, kind: ErrorKind, group: i32, item: i32) -> Result<()> {
        self.push(Diagnostic::with_sound(kind, group, item))
    }

    /// Report a condition the current operation cannot continue past.
    /// Recorded under `Collect`; the returned error is always propagated.
    pub fn fatal(&mut self, kind: ErrorKind) -> SndError {
        let d = Diagnostic::new(kind);
        if self.policy == ErrorPolicy::Collect {
            self.entries.push(d);
        }
        SndError::Reported(d)
    }

    pub fn push(&mut self, d: Diagnostic) -> Result<()> {
        if self.policy == ErrorPolicy::Throw && !d.kind.is_warning() {
            return Err(SndError::Reported(d));
        }
        self.entries.push(d);
        Ok(())
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Human-readable report, one block per diagnostic.
pub fn render_text(entries: &[Diagnostic]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SND error log");
    let _ = writeln!(out, "errors: {}", entries.len());
    for d in entries {
        let _ = writeln!(out);
        let _ = writeln!(out, "name: {}", d.kind.name());
        let _ = writeln!(out, "message: {}", d.kind.message());
        match (d.kind, d.payload) {
            (
                ErrorKind::WarningDuplicateSoundNumber | ErrorKind::NotFoundSoundNumber,
                Payload::Sound { group, item },
            ) => {
                let _ = writeln!(out, "value: {group}-{item}");
            }
            (ErrorKind::NotFoundSoundIndex, Payload::Value(v)) => {
                let _ = writeln!(out, "value: {v}");
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_keeps_order() {
        let mut c = Collector::new(ErrorPolicy::Collect);
        c.report(ErrorKind::InvalidSndExtension).unwrap();
        c.report_sound(ErrorKind::WarningDuplicateSoundNumber, 1, 2).unwrap();
        c.report_value(ErrorKind::NotFoundSoundIndex, 7).unwrap();
        let kinds: Vec<_> = c.entries().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::InvalidSndExtension,
                ErrorKind::WarningDuplicateSoundNumber,
                ErrorKind::NotFoundSoundIndex
            ]
        );
    }

    #[test]
    fn throw_returns_error_without_recording() {
        let mut c = Collector::new(ErrorPolicy::Throw);
        let err = c.report_sound(ErrorKind::NotFoundSoundNumber, 9, 9).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFoundSoundNumber));
        assert!(c.is_empty());
    }

    #[test]
    fn warnings_never_throw() {
        let mut c = Collector::new(ErrorPolicy::Throw);
        c.report_sound(ErrorKind::WarningDuplicateSoundNumber, 3, 4).unwrap();
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn fatal_records_only_when_collecting() {
        let mut c = Collector::new(ErrorPolicy::Collect);
        let e = c.fatal(ErrorKind::CorruptedSndFile);
        assert_eq!(e.kind(), Some(ErrorKind::CorruptedSndFile));
        assert_eq!(c.count(ErrorKind::CorruptedSndFile), 1);

        let mut t = Collector::new(ErrorPolicy::Throw);
        let _ = t.fatal(ErrorKind::CorruptedSndFile);
        assert!(t.is_empty());
    }

    #[test]
    fn drain_empties() {
        let mut c = Collector::default();
        c.report(ErrorKind::NotFoundSndFile).unwrap();
        assert_eq!(c.drain().len(), 1);
        assert!(c.is_empty());
    }

    #[test]
    fn render_shows_values_only_for_lookup_kinds() {
        let list = vec![
            Diagnostic::with_sound(ErrorKind::WarningDuplicateSoundNumber, 1, 2),
            Diagnostic::with_value(ErrorKind::NotFoundSoundIndex, 42),
            Diagnostic::new(ErrorKind::CorruptedSndFile),
        ];
        let text = render_text(&list);
        assert!(text.contains("errors: 3"));
        assert!(text.contains("name: Warning_DuplicateSoundNumber"));
        assert!(text.contains("value: 1-2"));
        assert!(text.contains("value: 42"));
        assert_eq!(text.matches("value:").count(), 2);
    }
}
