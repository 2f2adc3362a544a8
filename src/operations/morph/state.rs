use crate::error::{MorphError, Result};

/// Lifecycle of a morph.
///
/// `Unprepared → Prepared → Evaluating* → Finished`. `finish` is accepted
/// from `Prepared` as well as `Evaluating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphState {
    #[default]
    Unprepared,
    Prepared,
    Evaluating,
    Finished,
}

impl MorphState {
    pub(crate) fn check_prepare(self) -> Result<()> {
        self.require("prepare", matches!(self, Self::Unprepared))
    }

    pub(crate) fn check_evaluate(self) -> Result<()> {
        let allowed = matches!(self, Self::Prepared | Self::Evaluating);
        self.require("evaluate", allowed)
    }

    pub(crate) fn check_finish(self) -> Result<()> {
        let allowed = matches!(self, Self::Prepared | Self::Evaluating);
        self.require("finish", allowed)
    }

    fn require(self, operation: &'static str, allowed: bool) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(MorphError::InvalidState {
                operation,
                state: self,
            }
            .into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PathmorphError;

    #[test]
    fn transitions() {
        assert!(MorphState::Unprepared.check_prepare().is_ok());
        assert!(MorphState::Prepared.check_prepare().is_err());
        assert!(MorphState::Unprepared.check_evaluate().is_err());
        assert!(MorphState::Prepared.check_evaluate().is_ok());
        assert!(MorphState::Evaluating.check_evaluate().is_ok());
        assert!(MorphState::Prepared.check_finish().is_ok());
        assert!(MorphState::Finished.check_finish().is_err());
        assert!(MorphState::Finished.check_evaluate().is_err());
    }

    #[test]
    fn error_names_operation_and_state() {
        let err = MorphState::Finished.check_finish().unwrap_err();
        assert!(matches!(
            err,
            PathmorphError::Morph(MorphError::InvalidState {
                operation: "finish",
                state: MorphState::Finished,
            })
        ));
        assert_eq!(err.to_string(), "cannot finish while the morph is Finished");
    }
}
