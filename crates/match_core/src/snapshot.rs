use anyhow::Result;

/// One match card as captured from the rendered page.
///
/// Every field is already-rendered text; the extractor never touches markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardNode {
    /// Text of the card's `<time>` element, if it has one. Hour and minute are
    /// often rendered on separate lines (`"19\n00"`).
    pub time: Option<String>,
    /// Labelled participant spans in document order, separator (`VS`) included.
    pub participants: Vec<String>,
    /// Nearest section header above the card; normally the match day.
    pub header: Option<String>,
    /// Accent boxes that may hold a `N - N` score.
    pub score_slots: Vec<String>,
    /// Footer lines that may hold `Best of N`.
    pub footer_notes: Vec<String>,
}

/// Immutable capture of the card list visible at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub cards: Vec<CardNode>,
}

impl PageSnapshot {
    pub fn new(cards: Vec<CardNode>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Navigation side of the page: reveals a tab, then hands out snapshots of it.
///
/// Implementations must only return from `show_*` once content is rendered.
pub trait PageSource {
    fn show_upcoming(&mut self) -> Result<()>;

    /// `Ok(false)` when the page has no control for completed matches.
    fn show_completed(&mut self) -> Result<bool>;

    fn snapshot(&mut self) -> Result<PageSnapshot>;
}
