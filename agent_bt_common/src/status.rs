/// The result of ticking a behavior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Status {
    /// The behavior or action succeeded.
    Success,
    /// The behavior or action failed.
    ///
    /// This is a normal decision outcome, not an error.
    Failure,
    /// The behavior or action needs to be ticked again on the next frame.
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// `Success` or `Failure`
    #[inline]
    pub fn is_completed(self) -> bool {
        !self.is_running()
    }

    /// Swaps `Success` and `Failure`. `Running` is left untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
