#![allow(dead_code)]

use adgen_core::{
    AdGenError, Critique, CritiqueRequest, HexColor, ImageBase64, LayerReviser, Layer, Layout,
    Notifier, PublishResult, Publisher, RenderClient, Result, RevisionRequest, TextAlign,
    TextLayer, Verdict, VisionCritic,
};
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn headline(text: &str) -> Layout {
    Layout::new(vec![Layer::Text(TextLayer {
        text: text.to_string(),
        x: 112,
        y: 96,
        width: 800,
        height: 120,
        font_size: 72,
        color: HexColor::parse("#ffffff").unwrap(),
        align: TextAlign::Center,
    })])
}

pub fn headline_text(layout: &Layout) -> &str {
    match &layout.layers[0] {
        Layer::Text(text) => &text.text,
        other => panic!("unexpected layer {other:?}"),
    }
}

pub fn background() -> ImageBase64 {
    ImageBase64::from_bytes(b"background")
}

/// Renders the headline text as the "image"; optionally fails on one
/// 0-based call.
#[derive(Default)]
pub struct ScriptedRenderer {
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
}

impl ScriptedRenderer {
    pub fn failing_on_call(call: usize) -> Self {
        Self { calls: AtomicUsize::new(0), fail_on_call: Some(call) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RenderClient for ScriptedRenderer {
    async fn render(&self, layout: &Layout, _background: &ImageBase64) -> Result<ImageBase64> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(AdGenError::render(Some(500), "HTTP error! status: 500"));
        }
        Ok(ImageBase64::from_bytes(headline_text(layout).as_bytes()))
    }
}

/// What the critic saw on one call.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub iteration: usize,
    pub headline: String,
    pub rendered: ImageBase64,
    pub has_target: bool,
    pub history_len: usize,
}

impl SeenRequest {
    fn from(request: &CritiqueRequest<'_>) -> Self {
        Self {
            iteration: request.iteration,
            headline: headline_text(request.layout).to_string(),
            rendered: request.rendered.clone(),
            has_target: request.target.is_some(),
            history_len: request.history.len(),
        }
    }
}

/// Pops scripted answers; once exhausted, rejects (binary) or proposes
/// `"critiqued <n>"` headlines (direct).
#[derive(Default)]
pub struct ScriptedCritic {
    verdicts: Mutex<VecDeque<Result<Verdict>>>,
    critiques: Mutex<VecDeque<Result<Critique>>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl ScriptedCritic {
    pub fn with_verdict(self, verdict: Result<Verdict>) -> Self {
        self.verdicts.lock().unwrap().push_back(verdict);
        self
    }

    pub fn with_critique(self, critique: Result<Critique>) -> Self {
        self.critiques.lock().unwrap().push_back(critique);
        self
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionCritic for ScriptedCritic {
    async fn verdict(&self, request: &CritiqueRequest<'_>) -> Result<Verdict> {
        self.seen.lock().unwrap().push(SeenRequest::from(request));
        let next = self.verdicts.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Verdict::negative(format!("needs work {}", request.iteration))))
    }

    async fn critique_and_revise(&self, request: &CritiqueRequest<'_>) -> Result<Critique> {
        self.seen.lock().unwrap().push(SeenRequest::from(request));
        let next = self.critiques.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Ok(Critique {
                fixes: format!("fixes {}", request.iteration),
                layers: headline(&format!("critiqued {}", request.iteration)).layers,
            })
        })
    }
}

/// Records feedback; answers `"revised <n>"` headlines unless told to fail.
#[derive(Default)]
pub struct ScriptedReviser {
    fail: bool,
    feedback: Mutex<Vec<String>>,
}

impl ScriptedReviser {
    pub fn failing() -> Self {
        Self { fail: true, feedback: Mutex::new(Vec::new()) }
    }

    pub fn feedback(&self) -> Vec<String> {
        self.feedback.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.feedback.lock().unwrap().len()
    }
}

#[async_trait]
impl LayerReviser for ScriptedReviser {
    async fn revise(&self, request: &RevisionRequest<'_>) -> Result<Layout> {
        self.feedback.lock().unwrap().push(request.feedback.to_string());
        if self.fail {
            return Err(AdGenError::Llm("structured output rejected: missing field `layers`".into()));
        }
        Ok(headline(&format!("revised {}", request.iteration)))
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    fail: bool,
    published: Mutex<Vec<(Layout, ImageBase64, bool)>>,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self { fail: true, published: Mutex::new(Vec::new()) }
    }

    pub fn published(&self) -> Vec<(Layout, ImageBase64, bool)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(
        &self,
        layout: &Layout,
        background: &ImageBase64,
        finalize: bool,
    ) -> Result<PublishResult> {
        self.published.lock().unwrap().push((layout.clone(), background.clone(), finalize));
        if self.fail {
            return Err(AdGenError::publish(Some(502), "HTTP error! status: 502"));
        }
        Ok(PublishResult::Published(json!({"id": "ad_1"})))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    captions: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { fail: true, captions: Mutex::new(Vec::new()) }
    }

    pub fn captions(&self) -> Vec<String> {
        self.captions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, _image: &ImageBase64, caption: &str) -> Result<()> {
        self.captions.lock().unwrap().push(caption.to_string());
        if self.fail {
            return Err(AdGenError::Notification("channel_not_found".into()));
        }
        Ok(())
    }
}
