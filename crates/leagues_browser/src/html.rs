//! Rendered leagues.gg HTML → `PageSnapshot`.
//!
//! Layout (competition page):
//!   <h4>5 MARCH 2025</h4>
//!   <div class="rounded-3xl border-2 ...">
//!     <time><span>19</span><span>00</span></time>
//!     <span class="font-semibold">Team A</span> <span class="font-semibold">VS</span> ...
//!     <div class="bg-accent ...">2 - 1</div>
//!     <div class="backdrop-brightness-70"><p class="text-right">Best of 3</p></div>
//!   </div>

use match_core::{CardNode, PageSnapshot};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector {css:?}: {e:?}"))
}

static CARD: LazyLock<Selector> = LazyLock::new(|| selector("div[class*='rounded-3xl'][class*='border-2']"));
static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time"));
static TEAM: LazyLock<Selector> = LazyLock::new(|| selector("span.font-semibold"));
static SCORE: LazyLock<Selector> = LazyLock::new(|| selector("div[class*='bg-accent']"));
static FOOTER: LazyLock<Selector> =
    LazyLock::new(|| selector("div[class*='backdrop-brightness-70'] p[class*='text-right']"));

/// `<time>` renders its hour and minute spans on separate lines; keep one line per text node.
pub fn rendered_lines(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline text: child text nodes concatenated, whitespace runs collapsed to one space.
pub fn rendered_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn card_node(card: ElementRef<'_>, header: Option<&str>) -> CardNode {
    CardNode {
        time: card.select(&TIME).next().map(rendered_lines),
        participants: card.select(&TEAM).map(rendered_text).collect(),
        header: header.map(str::to_string),
        score_slots: card.select(&SCORE).map(rendered_text).collect(),
        footer_notes: card.select(&FOOTER).map(rendered_text).collect(),
    }
}

/// Walks the document in order so each card gets the last `<h4>` above it.
pub fn parse_snapshot(html: &str) -> PageSnapshot {
    let document = Html::parse_document(html);
    let mut header: Option<String> = None;
    let mut cards = Vec::new();

    for el in document.root_element().descendants().filter_map(ElementRef::wrap) {
        if el.value().name() == "h4" {
            header = Some(rendered_text(el));
        } else if CARD.matches(&el) {
            cards.push(card_node(el, header.as_deref()));
        }
    }

    PageSnapshot::new(cards)
}
