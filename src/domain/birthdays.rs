//! Upcoming-birthday window.

use chrono::{Datelike, NaiveDate};

use crate::domain::entities::Contact;

/// Largest window accepted by [`upcoming_birthdays`].
pub const MAX_WINDOW_DAYS: u32 = 31;

/// Next celebration of `birthday` on or after `today`.
///
/// Returns the date and whether it is a Mar 1 substitute for Feb 29.
fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> Option<(NaiveDate, bool)> {
    for year in [today.year(), today.year() + 1] {
        let (date, substitute) = match NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        {
            Some(d) => (d, false),
            // Feb 29 in a non-leap year
            None => (NaiveDate::from_ymd_opt(year, 3, 1)?, true),
        };
        if date >= today {
            return Some((date, substitute));
        }
    }
    None
}

/// Selects contacts whose birthday falls within `[today, today + days)`.
///
/// Results are ordered by days until the birthday. Within a day, Feb 29
/// birthdays celebrated on Mar 1 come first; otherwise input order is kept.
pub fn upcoming_birthdays(contacts: Vec<Contact>, today: NaiveDate, days: u32) -> Vec<Contact> {
    let mut upcoming: Vec<(i64, bool, Contact)> = contacts
        .into_iter()
        .filter_map(|contact| {
            let (date, substitute) = next_occurrence(contact.birthday, today)?;
            let delta = (date - today).num_days();
            (delta < i64::from(days)).then_some((delta, substitute, contact))
        })
        .collect();

    upcoming.sort_by_key(|(delta, substitute, _)| (*delta, !*substitute));
    upcoming.into_iter().map(|(_, _, c)| c).collect()
}
