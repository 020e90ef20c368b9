use serde::Serialize;

use super::domain::JobPosting;

pub const DEFAULT_STACK_DEPTH: usize = 3;
pub const DEFAULT_SCALE_STEP: f32 = 0.03;
pub const DEFAULT_OFFSET_STEP: f32 = 8.0;

/// One visible card in the stack. Depth 0 is the front card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackCard<'a> {
    pub job: &'a JobPosting,
    pub depth: usize,
    pub scale: f32,
    pub offset_y: f32,
    pub z_index: usize,
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum StackView<'a> {
    /// Nothing left to triage under the current filters.
    Empty,
    Cards(Vec<StackCard<'a>>),
}

impl<'a> StackView<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn front(&self) -> Option<&StackCard<'a>> {
        match self {
            Self::Cards(cards) => cards.first(),
            Self::Empty => None,
        }
    }

    pub fn cards(&self) -> &[StackCard<'a>] {
        match self {
            Self::Cards(cards) => cards,
            Self::Empty => &[],
        }
    }
}

/// Lays out the front of the projected queue as a depth-ordered stack.
///
/// The presenter keeps no copy of the queue. Its only state is how many cards it has
/// advanced past this session; the front card is always the first entry of the current
/// projection, which already excludes decided jobs.
#[derive(Debug, Clone)]
pub struct StackPresenter {
    depth: usize,
    scale_step: f32,
    offset_step: f32,
    advanced: usize,
}

impl StackPresenter {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            scale_step: DEFAULT_SCALE_STEP,
            offset_step: DEFAULT_OFFSET_STEP,
            advanced: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn advanced(&self) -> usize {
        self.advanced
    }

    pub fn front<'a>(&self, queue: &[&'a JobPosting]) -> Option<&'a JobPosting> {
        queue.first().copied()
    }

    pub fn present<'a>(&self, queue: &[&'a JobPosting]) -> StackView<'a> {
        let visible = queue.len().min(self.depth);
        if visible == 0 {
            return StackView::Empty;
        }

        let cards = queue
            .iter()
            .copied()
            .take(visible)
            .enumerate()
            .map(|(depth, job)| StackCard {
                job,
                depth,
                scale: 1.0 - depth as f32 * self.scale_step,
                offset_y: depth as f32 * self.offset_step,
                z_index: visible - depth,
                interactive: depth == 0,
            })
            .collect();

        StackView::Cards(cards)
    }

    /// Note that the front card was committed. The queue itself is not touched.
    pub fn advance(&mut self) {
        self.advanced += 1;
    }
}

impl Default for StackPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_DEPTH)
    }
}
