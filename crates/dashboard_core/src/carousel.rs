//! Marketing card carousel.

use shared::protocol::MarketingItem;
use tracing::debug;

use crate::Navigator;

/// Cyclic index over a fixed list of items.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub position: usize,
    pub active: bool,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// Arrows and indicators only make sense with something to move between.
    pub fn shows_controls(&self) -> bool {
        self.items.len() > 1
    }

    pub fn move_forward(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.items.len();
    }

    pub fn move_backward(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = (self.index + self.items.len() - 1) % self.items.len();
    }

    /// Jumps to `index`. Out-of-range positions are ignored and return false.
    pub fn set_index(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "ignoring out-of-range carousel index");
            return false;
        }
        self.index = index;
        true
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        if !self.shows_controls() {
            return Vec::new();
        }
        (0..self.items.len())
            .map(|position| Indicator {
                position,
                active: position == self.index,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingCardView {
    pub image_url: String,
    pub heading: String,
    pub content: String,
    pub button_text: String,
    pub show_arrows: bool,
    pub indicators: Vec<Indicator>,
}

impl Carousel<MarketingItem> {
    /// `image_url` resolves an image name to a fetchable URL; `to_html` renders
    /// the card body, which the CMS stores as markup source.
    pub fn card_view(
        &self,
        image_url: impl Fn(&str) -> String,
        to_html: impl Fn(&str) -> String,
    ) -> Option<MarketingCardView> {
        let item = self.current()?;
        Some(MarketingCardView {
            image_url: image_url(&item.image_name),
            heading: item.heading.clone(),
            content: to_html(&item.content),
            button_text: item.button_text.clone(),
            show_arrows: self.shows_controls(),
            indicators: self.indicators(),
        })
    }

    /// Follows the current card's call-to-action.
    pub fn redirect(&self, navigator: &dyn Navigator) {
        if let Some(item) = self.current() {
            navigator.navigate(&item.button_url);
        }
    }
}
