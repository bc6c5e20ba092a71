use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{QuestionBank, QuizSettings};
use quiz_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{BankSource, QuizService};

use crate::context::{UiApp, build_app_context};
use crate::views::{NoticeBanner, QuizControls, QuizHandle, QuizProvider, QuizView, SettingsView};
use crate::vm::QuizIntent;

struct TestApp {
    quiz: QuizService,
}

impl UiApp for TestApp {
    fn quiz_service(&self) -> QuizService {
        self.quiz.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Settings,
    Controls,
}

#[derive(Clone, Default)]
pub struct HarnessHandles {
    quiz: Rc<RefCell<Option<QuizHandle>>>,
}

impl HarnessHandles {
    fn register(&self, handle: QuizHandle) {
        *self.quiz.borrow_mut() = Some(handle);
    }

    pub fn quiz(&self) -> QuizHandle {
        (*self.quiz.borrow()).expect("quiz handle registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    use_context_provider(|| props.view);

    rsx! {
        QuizProvider {
            HarnessView {}
        }
    }
}

#[component]
fn HarnessView() -> Element {
    let handles = use_context::<HarnessHandles>();
    let handle = use_context::<QuizHandle>();
    use_hook(|| handles.register(handle));

    match use_context::<ViewKind>() {
        ViewKind::Quiz => rsx! {
            NoticeBanner {}
            QuizView {}
        },
        ViewKind::Settings => rsx! { SettingsView {} },
        ViewKind::Controls => rsx! {
            NoticeBanner {}
            QuizControls {}
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: HarnessHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let handle = self.handles.quiz();
        self.dom.in_runtime(|| handle.dispatch(intent));
        drive_dom(&mut self.dom);
    }

    /// Let spawned tasks (the exam countdown) run until they produce work.
    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            self.dom.wait_for_work(),
        )
        .await;
        drive_dom(&mut self.dom);
    }

    /// Run `f` against the live controller.
    pub fn with_quiz<T>(&self, f: impl FnOnce(&QuizService) -> T) -> T {
        let handle = self.handles.quiz();
        self.dom.in_runtime(|| f(&handle.quiz.peek()))
    }

    /// Rendered HTML with the usual text entities decoded.
    pub fn render(&self) -> String {
        decode_entities(&dioxus_ssr::render(&self.dom))
    }
}

fn decode_entities(html: &str) -> String {
    html.replace("&#x2f;", "/")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// In-order sample bank with a fixed clock, so renders are deterministic.
pub fn sample_service() -> QuizService {
    QuizService::new(
        QuestionBank::sample(),
        BankSource::Sample,
        QuizSettings::default()
            .with_randomize_questions(false)
            .with_randomize_options(false),
        fixed_clock(),
        StdRng::seed_from_u64(7),
    )
}

pub fn setup_view_harness(view: ViewKind, quiz: QuizService) -> ViewHarness {
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz }),
            view,
            handles: handles.clone(),
        },
    );
    let mut harness = ViewHarness { dom, handles };
    harness.rebuild();
    harness
}
