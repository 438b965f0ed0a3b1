//! Invoice ids that stay unique within one process

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;

use dukkan_core::order::InvoiceId;

/// Hands out second-resolution ids, numbering repeats within the same second
///
/// The first invoice of a second gets the bare timestamp id. Later ones in
/// that second get `_1`, `_2` and so on, so a fast double click cannot
/// overwrite the previous file.
#[derive(Debug, Default)]
pub struct InvoiceIdGenerator {
    last: Mutex<Option<(InvoiceId, u32)>>,
}

impl InvoiceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for an invoice generated at `now`
    pub fn next(&self, now: &NaiveDateTime) -> InvoiceId {
        let second = InvoiceId::from_timestamp(now);
        let mut last = self.last.lock();
        let sequence = match last.as_ref() {
            Some((previous, sequence)) if *previous == second => sequence + 1,
            _ => 0,
        };
        *last = Some((second, sequence));
        let id = InvoiceId::with_sequence(now, sequence);
        log::debug!("Issued invoice id {}", id);
        id
    }

    /// Id for an invoice generated right now, in local time
    pub fn next_now(&self) -> (InvoiceId, NaiveDateTime) {
        let now = Local::now().naive_local();
        (self.next(&now), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, second)
            .unwrap()
    }

    #[test]
    fn first_id_of_a_second_is_bare() {
        let ids = InvoiceIdGenerator::new();
        assert_eq!(ids.next(&at(9)).as_str(), "20240309_140509");
    }

    #[test]
    fn repeats_in_one_second_are_numbered() {
        let ids = InvoiceIdGenerator::new();
        let first = ids.next(&at(9));
        let second = ids.next(&at(9));
        let third = ids.next(&at(9));
        assert_eq!(second.as_str(), "20240309_140509_1");
        assert_eq!(third.as_str(), "20240309_140509_2");
        assert_ne!(first, second);
    }

    #[test]
    fn new_second_resets_the_counter() {
        let ids = InvoiceIdGenerator::new();
        ids.next(&at(9));
        ids.next(&at(9));
        assert_eq!(ids.next(&at(10)).as_str(), "20240309_140510");
    }

    #[test]
    fn shared_across_threads() {
        let ids = std::sync::Arc::new(InvoiceIdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || ids.next(&at(9)))
            })
            .collect();
        let mut seen: Vec<InvoiceId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
