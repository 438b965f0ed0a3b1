//! Invoices written to disk and read back

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use dukkan::{
    error::FontLoadError,
    extract_text,
    order::{CartLine, Customer, DiscountPolicy},
    page_count,
    traits::{FontRef, TextShaper},
    ArabicShaper, DukkanError, InvoiceRenderer, InvoiceStore, StoreConfig, Storefront,
};

/// Every BMP character is its own glyph
struct MockFont;

impl FontRef for MockFont {
    fn data(&self) -> &[u8] {
        b"mock font program"
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        let code = ch as u32;
        (code <= 0xFFFF).then_some(code)
    }

    fn advance_width(&self, _glyph_id: u32) -> f32 {
        550.0
    }
}

/// Draws ASCII only
struct LatinFont;

impl FontRef for LatinFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        ch.is_ascii().then_some(ch as u32)
    }

    fn advance_width(&self, _glyph_id: u32) -> f32 {
        500.0
    }
}

fn output_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "dukkan-invoices-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn renderer(dir: &PathBuf) -> InvoiceRenderer {
    let config = StoreConfig {
        output_dir: dir.clone(),
        ..StoreConfig::default()
    };
    InvoiceRenderer::new(Arc::new(MockFont), config).unwrap()
}

fn customer() -> Customer {
    Customer::new("عمر", "01012345678", "القاهرة")
}

#[test]
fn checkout_writes_a_readable_invoice() {
    let dir = output_dir();
    let mut store = Storefront::new(renderer(&dir));
    store.add_line(CartLine::new("قميص", 300.0, 1)).unwrap();
    store.add_line(CartLine::new("حذاء", 250.0, 1)).unwrap();

    let totals = store.totals();
    assert_eq!(totals.discount, 55.0);
    assert_eq!(totals.payable, 495.0);

    let path = store.checkout(&customer()).unwrap();
    assert!(path.starts_with(&dir));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("invoice_") && name.ends_with(".pdf"));
    // invoice_YYYYMMDD_HHMMSS.pdf
    assert_eq!(name.len(), "invoice_20240309_140509.pdf".len());

    let bytes = fs::read(&path).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(page_count(&bytes).unwrap(), 1);

    let shaper = ArabicShaper::default();
    let lines = extract_text(&bytes).unwrap();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[1], shaper.shape("الاسم: عمر"));
    assert_eq!(lines[2], shaper.shape("الهاتف: 01012345678"));
    assert_eq!(lines[3], shaper.shape("العنوان: القاهرة"));
    assert_eq!(lines[5], shaper.shape("قميص × 1 = 300 ج.م"));
    assert_eq!(lines[9], shaper.shape("المطلوب دفعه: 495 ج.م"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn output_directory_is_created() {
    let dir = output_dir().join("nested");
    assert!(!dir.exists());
    let path = renderer(&dir)
        .save_invoice(
            &customer(),
            &[CartLine::new("A", 10.0, 2)],
            &DiscountPolicy::default().apply(20.0),
        )
        .unwrap();
    assert!(path.is_file());
    assert!(!path.with_extension("pdf.part").exists());
    fs::remove_dir_all(dir.parent().unwrap()).unwrap();
}

#[test]
fn same_forced_second_reuses_the_path() {
    let dir = output_dir();
    let renderer = renderer(&dir);
    let at = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap();
    let lines = [CartLine::new("A", 10.0, 1)];
    let totals = DiscountPolicy::default().apply(10.0);

    let first = renderer.render_at(at, &customer(), &lines, &totals).unwrap();
    let second = renderer.render_at(at, &customer(), &lines, &totals).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, dir.join("invoice_20240309_140509.pdf"));

    let later = renderer
        .render_at(at + chrono::Duration::seconds(1), &customer(), &lines, &totals)
        .unwrap();
    assert_ne!(first, later);
    assert_eq!(InvoiceStore::new(&dir).list().unwrap().len(), 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn live_clock_never_overwrites() {
    let dir = output_dir();
    let renderer = renderer(&dir);
    let lines = [CartLine::new("A", 10.0, 1)];
    let totals = DiscountPolicy::default().apply(10.0);

    let paths: Vec<PathBuf> = (0..3)
        .map(|_| renderer.save_invoice(&customer(), &lines, &totals).unwrap())
        .collect();
    assert_ne!(paths[0], paths[1]);
    assert_ne!(paths[1], paths[2]);
    assert_eq!(InvoiceStore::new(&dir).list().unwrap().len(), 3);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn printed_totals_are_taken_as_given() {
    let dir = output_dir();
    let renderer = renderer(&dir);
    let odd = DiscountPolicy::new(0.0, 0.0).apply(1.0);
    let path = renderer
        .save_invoice(&customer(), &[CartLine::new("A", 999.0, 1)], &odd)
        .unwrap();
    let lines = extract_text(&fs::read(&path).unwrap()).unwrap();
    assert!(lines.contains(&ArabicShaper::default().shape("الإجمالي: 1 ج.م")));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn font_without_arabic_is_refused() {
    let err = InvoiceRenderer::new(Arc::new(LatinFont), StoreConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DukkanError::FontLoad(FontLoadError::MissingGlyphs { .. })
    ));
}

#[test]
fn renders_with_a_system_font() {
    let font = match dukkan::discover_rtl_font() {
        Ok(font) => font,
        Err(_) => {
            eprintln!("Skipping test: no Arabic-capable system font");
            return;
        },
    };
    let dir = output_dir();
    let config = StoreConfig {
        output_dir: dir.clone(),
        ..StoreConfig::default()
    };
    let renderer = InvoiceRenderer::new(font, config).unwrap();
    let path = renderer
        .save_invoice(
            &customer(),
            &[CartLine::new("قميص", 300.0, 2)],
            &DiscountPolicy::default().apply(600.0),
        )
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(page_count(&bytes).unwrap(), 1);
    assert_eq!(extract_text(&bytes).unwrap().len(), 10);
    fs::remove_dir_all(&dir).unwrap();
}
