//! Announcer commentary for the result screen
//!
//! The request runs in the background. The result screen shows a placeholder
//! until the line arrives; closing the screen cancels the task and any late
//! reply is thrown away.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use game_core::commentary::{announcer_prompt, fallback_line, settle_reply, PLACEHOLDER};
use game_core::MatchResult;
use proto::CommentaryRequest;

use crate::error::ClientError;

pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// External commentary capability
pub trait CommentaryProvider {
    fn fetch(&self, request: CommentaryRequest) -> LocalFuture<Result<String, ClientError>>;
}

pub fn request_for(result: &MatchResult) -> CommentaryRequest {
    CommentaryRequest {
        victory: result.outcome().is_victory(),
        time_elapsed: result.time_elapsed(),
        damage_dealt: result.damage_dealt(),
        final_health: result.final_health(),
        max_combo: result.max_combo(),
        prompt: announcer_prompt(result),
    }
}

/// Background commentary request tied to one result screen
pub struct CommentaryTask {
    cancelled: Rc<Cell<bool>>,
    line: Rc<RefCell<Option<String>>>,
}

impl CommentaryTask {
    /// Start fetching commentary for `result`. `spawn` runs the future on
    /// the caller's executor.
    pub fn start<F>(provider: Rc<dyn CommentaryProvider>, result: &MatchResult, spawn: F) -> Self
    where
        F: FnOnce(LocalFuture<()>),
    {
        let cancelled = Rc::new(Cell::new(false));
        let line = Rc::new(RefCell::new(None));
        let request = request_for(result);
        let outcome = result.outcome();

        let task_cancelled = cancelled.clone();
        let task_line = line.clone();
        spawn(Box::pin(async move {
            let reply = provider.fetch(request).await;
            if task_cancelled.get() {
                log::debug!("Commentary arrived after the result screen closed, dropping it");
                return;
            }
            let text = match reply {
                Ok(text) => settle_reply(&text, outcome),
                Err(e) => {
                    log::warn!("{}", e);
                    fallback_line(outcome).to_string()
                }
            };
            *task_line.borrow_mut() = Some(text);
        }));

        Self { cancelled, line }
    }

    /// The commentary line, or the placeholder while it is on its way
    pub fn text(&self) -> String {
        self.line
            .borrow()
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn line(&self) -> Option<String> {
        self.line.borrow().clone()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }
}

impl Drop for CommentaryTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    /// Commentary supplied by a host page function:
    /// `(requestJson: string) => Promise<string>`
    pub struct JsCommentary {
        function: js_sys::Function,
    }

    impl JsCommentary {
        pub fn new(function: js_sys::Function) -> Self {
            Self { function }
        }
    }

    impl CommentaryProvider for JsCommentary {
        fn fetch(&self, request: CommentaryRequest) -> LocalFuture<Result<String, ClientError>> {
            let function = self.function.clone();
            Box::pin(async move {
                let json = request.to_json()?;
                let value = function
                    .call1(&JsValue::NULL, &JsValue::from_str(&json))
                    .map_err(|e| ClientError::Commentary(format!("{:?}", e)))?;
                let reply = JsFuture::from(js_sys::Promise::resolve(&value))
                    .await
                    .map_err(|e| ClientError::Commentary(format!("{:?}", e)))?;
                reply
                    .as_string()
                    .ok_or_else(|| ClientError::Commentary("reply was not a string".to_string()))
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::JsCommentary;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use game_core::Outcome;

    /// Answers every request with the same reply
    pub(crate) struct CannedProvider {
        pub reply: Result<String, ClientError>,
        pub requests: RefCell<Vec<CommentaryRequest>>,
    }

    impl CannedProvider {
        pub(crate) fn new(reply: Result<String, ClientError>) -> Rc<Self> {
            Rc::new(Self {
                reply,
                requests: RefCell::new(Vec::new()),
            })
        }
    }

    impl CommentaryProvider for CannedProvider {
        fn fetch(&self, request: CommentaryRequest) -> LocalFuture<Result<String, ClientError>> {
            self.requests.borrow_mut().push(request);
            let reply = self.reply.clone();
            Box::pin(async move { reply })
        }
    }

    /// Collects spawned futures so the test decides when they run
    #[derive(Default)]
    pub(crate) struct ManualExecutor {
        pub pending: RefCell<Vec<LocalFuture<()>>>,
    }

    impl ManualExecutor {
        pub(crate) fn spawner(&self) -> impl FnOnce(LocalFuture<()>) + '_ {
            move |fut| self.pending.borrow_mut().push(fut)
        }

        pub(crate) fn run_all(&self) {
            let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
            for fut in pending {
                pollster::block_on(fut);
            }
        }
    }

    fn victory() -> MatchResult {
        MatchResult::new(Outcome::Victory, 33, 900, 72, 5)
    }

    #[test]
    fn test_placeholder_until_reply() {
        let executor = ManualExecutor::default();
        let provider = CannedProvider::new(Ok("Unstoppable!".to_string()));
        let task = CommentaryTask::start(provider.clone(), &victory(), executor.spawner());

        assert_eq!(task.text(), "Analyzing match data...");
        assert_eq!(task.line(), None);

        executor.run_all();
        assert_eq!(task.text(), "Unstoppable!");
        assert_eq!(provider.requests.borrow()[0].time_elapsed, 33);
        assert!(provider.requests.borrow()[0].victory);
    }

    #[test]
    fn test_failure_uses_fallback() {
        let executor = ManualExecutor::default();
        let provider = CannedProvider::new(Err(ClientError::Commentary("503".into())));
        let defeat = MatchResult::new(Outcome::Defeat, 60, 200, 0, 1);
        let task = CommentaryTask::start(provider, &defeat, executor.spawner());

        executor.run_all();
        assert_eq!(task.line().as_deref(), Some("Defeat is just a lesson."));
    }

    #[test]
    fn test_empty_reply_uses_canned_line() {
        let executor = ManualExecutor::default();
        let provider = CannedProvider::new(Ok("   ".to_string()));
        let task = CommentaryTask::start(provider, &victory(), executor.spawner());

        executor.run_all();
        assert_eq!(task.text(), "Outstanding performance!");
    }

    #[test]
    fn test_cancelled_task_discards_reply() {
        let executor = ManualExecutor::default();
        let provider = CannedProvider::new(Ok("Too late".to_string()));
        let task = CommentaryTask::start(provider, &victory(), executor.spawner());
        let line = task.line.clone();

        drop(task);
        executor.run_all();
        assert!(line.borrow().is_none());
    }

    #[test]
    fn test_request_waits_for_executor() {
        let executor = ManualExecutor::default();
        let provider = CannedProvider::new(Ok("Ready".to_string()));
        let task = CommentaryTask::start(provider.clone(), &victory(), executor.spawner());

        // Nothing has run yet, the provider has not even been asked
        assert!(provider.requests.borrow().is_empty());
        assert_eq!(executor.pending.borrow().len(), 1);

        executor.run_all();
        assert_eq!(provider.requests.borrow().len(), 1);
        assert_eq!(task.line().as_deref(), Some("Ready"));
    }

    #[test]
    fn test_request_carries_match_stats() {
        let request = request_for(&victory());
        assert!(request.victory);
        assert_eq!(request.damage_dealt, 900);
        assert_eq!(request.final_health, 72);
        assert_eq!(request.max_combo, 5);
        assert!(request.prompt.contains("PLAYER VICTORY"));
    }
}
