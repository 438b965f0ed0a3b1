//! Where every invoice line lands on the page
//!
//! Positions are fixed: a title, four customer lines, one line per cart
//! item, a gap, three totals, a wider gap and a centred thank-you. All text
//! is right-aligned against the same margin except the thank-you.

use dukkan_core::{
    order::Invoice,
    traits::{FontRef, TextShaper},
    types::{Align, Page, TextLine},
    StoreConfig,
};

/// Vertical distance between stacked lines
pub const LINE_HEIGHT: f32 = 20.0;
/// Distance from the right page edge to the end of right-aligned text
pub const RIGHT_MARGIN: f32 = 40.0;

pub const TITLE_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 12.0;
pub const THANKS_SIZE: f32 = 14.0;

/// Baseline offsets measured down from the top edge
pub const TITLE_OFFSET: f32 = 50.0;
pub const CUSTOMER_OFFSET: f32 = 100.0;
pub const ITEMS_OFFSET: f32 = 200.0;

/// Formats an amount the way it is printed: no grouping, no forced decimals
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}

/// Folds newlines and repeated whitespace so multi-line input draws on one line
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The logical-order strings of an invoice, before shaping
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceText {
    pub title: String,
    pub customer: [String; 4],
    pub items: Vec<String>,
    pub totals: [String; 3],
    pub thanks: String,
}

impl InvoiceText {
    pub fn new(invoice: &Invoice, config: &StoreConfig) -> Self {
        let currency = &config.currency_label;
        let store = &config.store_name;
        let customer = &invoice.customer;
        let money = |amount: f64| format!("{} {}", format_amount(amount), currency);

        let (title_mark, thanks_mark) = if config.decorate {
            ("🧾 ", " 🎉")
        } else {
            ("", "")
        };

        Self {
            title: format!("{}متجر {} — فاتورة شراء", title_mark, store),
            customer: [
                format!("الاسم: {}", single_line(&customer.full_name)),
                format!("الهاتف: {}", single_line(&customer.phone)),
                format!("العنوان: {}", single_line(&customer.address)),
                format!("التاريخ: {}", invoice.display_timestamp()),
            ],
            items: invoice
                .lines
                .iter()
                .map(|line| {
                    format!(
                        "{} × {} = {}",
                        single_line(&line.product_name),
                        line.quantity,
                        money(line.line_total())
                    )
                })
                .collect(),
            totals: [
                format!("الإجمالي: {}", money(invoice.totals.subtotal)),
                format!("الخصم: {}", money(invoice.totals.discount)),
                format!("المطلوب دفعه: {}", money(invoice.totals.payable)),
            ],
            thanks: format!("شكراً لتسوقكم من {}{}", store, thanks_mark),
        }
    }
}

/// Shapes, measures and places text on a page
pub struct PageBuilder<'a> {
    shaper: &'a dyn TextShaper,
    font: &'a dyn FontRef,
    page: Page,
    unmapped: usize,
}

impl<'a> PageBuilder<'a> {
    pub fn new(shaper: &'a dyn TextShaper, font: &'a dyn FontRef, page: Page) -> Self {
        Self {
            shaper,
            font,
            page,
            unmapped: 0,
        }
    }

    pub fn width(&self) -> f32 {
        self.page.width
    }

    pub fn height(&self) -> f32 {
        self.page.height
    }

    /// Shapes `text` and anchors it at (`anchor_x`, `y`)
    pub fn draw(&mut self, text: &str, size: f32, anchor_x: f32, y: f32, align: Align) {
        let shaped = self.shaper.shape(text);
        let glyphs: Vec<u32> = shaped
            .chars()
            .map(|ch| {
                self.font.glyph_id(ch).unwrap_or_else(|| {
                    self.unmapped += 1;
                    0
                })
            })
            .collect();
        let width = glyphs
            .iter()
            .map(|gid| self.font.advance_width(*gid))
            .sum::<f32>()
            / 1000.0
            * size;

        let x = match align {
            Align::Left => anchor_x,
            Align::Center => anchor_x - width / 2.0,
            Align::Right => anchor_x - width,
        };

        self.page.lines.push(TextLine {
            text: shaped,
            glyphs,
            size,
            x,
            y,
            width,
        });
    }

    pub fn finish(self) -> Page {
        if self.unmapped > 0 {
            log::debug!(
                "{} characters have no glyph in the font and draw as .notdef",
                self.unmapped
            );
        }
        self.page
    }
}

/// Lays out a complete invoice on one A4 page
pub fn layout_invoice(
    invoice: &Invoice,
    config: &StoreConfig,
    shaper: &dyn TextShaper,
    font: &dyn FontRef,
) -> Page {
    let text = InvoiceText::new(invoice, config);
    let mut page = PageBuilder::new(
        shaper,
        font,
        Page::a4(format!("Invoice {}", invoice.id)),
    );
    let top = page.height();
    let right = page.width() - RIGHT_MARGIN;

    page.draw(&text.title, TITLE_SIZE, right, top - TITLE_OFFSET, Align::Right);

    let mut y = top - CUSTOMER_OFFSET;
    for line in &text.customer {
        page.draw(line, BODY_SIZE, right, y, Align::Right);
        y -= LINE_HEIGHT;
    }

    let mut y = top - ITEMS_OFFSET;
    for line in &text.items {
        page.draw(line, BODY_SIZE, right, y, Align::Right);
        y -= LINE_HEIGHT;
    }

    y -= LINE_HEIGHT;
    for (index, line) in text.totals.iter().enumerate() {
        if index > 0 {
            y -= LINE_HEIGHT;
        }
        page.draw(line, BODY_SIZE, right, y, Align::Right);
    }

    y -= 2.0 * LINE_HEIGHT;
    let center = page.width() / 2.0;
    page.draw(&text.thanks, THANKS_SIZE, center, y, Align::Center);

    let page = page.finish();
    log::debug!("Invoice {} laid out in {} lines", invoice.id, page.lines.len());
    page
}
