use crate::report::Response;
use copycat::{CancellationToken, GraphProvider, MatchResult, Outcome, Rejection, Request};

const INTERNAL_ERROR: u16 = 500;
const BAD_REQUEST: u16 = 400;

/// How a unit of work ended, from the host's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishStatus {
    Succeeded,
    Cancelled,
    Rejected(Rejection),
    Failed(String),
}

/// Collects the result of a run and turns its finish status into a [`Response`].
#[derive(Debug, Clone)]
pub struct TaskObserver {
    resource_path: String,
    error_code: String,
    result: Option<MatchResult>,
    response: Option<Response>,
}

impl TaskObserver {
    pub fn new(resource_path: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            error_code: error_code.into(),
            result: None,
            response: None,
        }
    }

    pub fn task_finished(&mut self, outcome: &Outcome) {
        self.result = outcome.result();
    }

    /// Cancelled runs still succeed: they report whatever result was recorded (usually none).
    pub fn all_finished(&mut self, status: FinishStatus) {
        let response = match status {
            FinishStatus::Succeeded | FinishStatus::Cancelled => Response::success(self.result),
            FinishStatus::Rejected(rejection) => Response::failure(
                BAD_REQUEST,
                &self.resource_path,
                &self.error_code,
                rejection.message(),
            ),
            FinishStatus::Failed(message) => Response::failure(
                INTERNAL_ERROR,
                &self.resource_path,
                &self.error_code,
                message,
            ),
        };
        self.response = Some(response);
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn into_response(self) -> Option<Response> {
        self.response
    }
}

/// Runs `request` against `provider` and reports it through `observer`.
pub fn execute<P>(
    provider: &mut P,
    request: &Request,
    cancel: &CancellationToken,
    observer: &mut TaskObserver,
) -> FinishStatus
where
    P: GraphProvider + ?Sized,
{
    let status = match copycat::run(provider, request, cancel) {
        Ok(outcome) => {
            observer.task_finished(&outcome);
            match outcome {
                Outcome::Completed(_) => FinishStatus::Succeeded,
                Outcome::Cancelled => FinishStatus::Cancelled,
                Outcome::Rejected(rejection) => FinishStatus::Rejected(rejection),
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "reconciliation failed");
            FinishStatus::Failed(err.to_string())
        }
    };
    observer.all_finished(status.clone());
    status
}
