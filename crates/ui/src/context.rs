use std::sync::Arc;

use services::QuizService;

pub trait UiApp: Send + Sync {
    /// The controller the window starts with, bank already resolved.
    fn quiz_service(&self) -> QuizService;
}

#[derive(Clone)]
pub struct AppContext {
    quiz: QuizService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz_service(),
        }
    }

    /// A fresh copy of the startup controller. The UI owns it from then on.
    #[must_use]
    pub fn quiz_service(&self) -> QuizService {
        self.quiz.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
