//! pt-BR presentation helpers shared by front ends.
//!
//! # Responsibility
//! - Format dates and summary lines the way the agenda screens show them.
//! - Derive avatar initials/colors and calendar badges from names.
//!
//! # Invariants
//! - Output depends only on arguments; no clock or storage access.

use crate::calendar::builder::DayDetailEntry;
use crate::calendar::date_math::{days_until, next_occurrence};
use crate::model::record::BirthdayRecord;
use crate::query::Upcoming;
use chrono::{Datelike, NaiveDate};

const MONTH_NAMES_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const AVATAR_FALLBACK_NAME: &str = "x";

/// Lowercase pt-BR month name for a 1-based month.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES_PT_BR.get(index).copied()
}

/// `15 de junho`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{:02} de {}",
        date.day(),
        month_name(date.month()).unwrap_or_default()
    )
}

/// `15/06/1990`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Calendar header, e.g. `junho de 2024`.
pub fn month_title(year: i32, month: u32) -> String {
    format!("{} de {year}", month_name(month).unwrap_or("?"))
}

/// Uppercased first character of the name, or a space for blank names.
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map_or_else(|| " ".to_string(), |first| first.to_uppercase().collect())
}

/// Stable `#RRGGBB` color derived from the name.
///
/// Uses the 32-bit rolling hash `hash = unit + (hash << 5) - hash` over UTF-16
/// code units, so colors match what earlier versions of the app rendered.
pub fn avatar_color(name: &str) -> String {
    let source = if name.is_empty() {
        AVATAR_FALLBACK_NAME
    } else {
        name
    };
    let hash = source.encode_utf16().fold(0_i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    format!("#{:06X}", hash & 0x00FF_FFFF)
}

/// First space-separated word of the name, shown inside calendar cells.
pub fn badge_label(name: &str) -> &str {
    name.split(' ').next().unwrap_or_default()
}

/// List row subtitle: `15 de junho • Em 3 dia(s)`.
pub fn list_meta_line(record: &BirthdayRecord, today: NaiveDate) -> String {
    let days = days_until(next_occurrence(record.birthdate, today), today);
    format!("{} • Em {days} dia(s)", format_long_date(record.birthdate))
}

/// Summary line for the next upcoming birthday.
pub fn upcoming_line(upcoming: &Upcoming) -> String {
    format!(
        "Próximo: {} - em {} dia(s) ({})",
        upcoming.record.name,
        upcoming.days_until,
        format_long_date(upcoming.record.birthdate)
    )
}

/// Banner text for today's birthdays; `None` when nobody has one.
pub fn today_alert(records: &[BirthdayRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let names = records
        .iter()
        .map(|record| record.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("Hoje é aniversário de {names}!"))
}

/// Text shown when a calendar day is selected.
pub fn day_detail_line(year: i32, month: u32, day: u32, entries: &[DayDetailEntry]) -> String {
    if entries.is_empty() {
        return format!("Nenhum aniversariante em {day}/{month}/{year}.");
    }
    let people = entries
        .iter()
        .map(|entry| format!("{} ({})", entry.name, format_short_date(entry.birthdate)))
        .collect::<Vec<_>>()
        .join(" - ");
    format!("{day}/{month}/{year}: {people}")
}

#[cfg(test)]
mod tests {
    use super::{
        avatar_color, avatar_initial, badge_label, day_detail_line, format_long_date,
        format_short_date, list_meta_line, month_name, month_title, today_alert, upcoming_line,
    };
    use crate::calendar::builder::DayDetailEntry;
    use crate::model::record::{BirthdayRecord, RecordDraft};
    use crate::query::next_upcoming;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn record(name: &str, birthdate: &str) -> BirthdayRecord {
        let draft = RecordDraft::new(name, "x@example.com", "", birthdate);
        BirthdayRecord::from_draft(Uuid::now_v7(), &draft).expect("valid record")
    }

    #[test]
    fn month_names_cover_valid_range_only() {
        assert_eq!(month_name(1), Some("janeiro"));
        assert_eq!(month_name(3), Some("março"));
        assert_eq!(month_name(12), Some("dezembro"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn formats_dates_in_pt_br() {
        assert_eq!(format_long_date(date(1990, 6, 5)), "05 de junho");
        assert_eq!(format_short_date(date(1990, 6, 5)), "05/06/1990");
        assert_eq!(month_title(2024, 3), "março de 2024");
    }

    #[test]
    fn avatar_helpers_match_rolling_hash() {
        assert_eq!(avatar_initial("ana"), "A");
        assert_eq!(avatar_initial(""), " ");
        assert_eq!(avatar_color("a"), "#000061");
        assert_eq!(avatar_color("ab"), "#000C21");
        assert_eq!(avatar_color(""), avatar_color("x"));
        assert_eq!(avatar_color("Ana Souza"), avatar_color("Ana Souza"));
    }

    #[test]
    fn badge_uses_first_name() {
        assert_eq!(badge_label("Ana Souza"), "Ana");
        assert_eq!(badge_label("Eva"), "Eva");
    }

    #[test]
    fn summary_lines() {
        let ana = record("Ana", "1990-06-15");
        assert_eq!(
            list_meta_line(&ana, date(2024, 6, 12)),
            "15 de junho • Em 3 dia(s)"
        );

        let upcoming = next_upcoming(&[ana.clone()], date(2024, 6, 12)).expect("upcoming");
        assert_eq!(
            upcoming_line(&upcoming),
            "Próximo: Ana - em 3 dia(s) (15 de junho)"
        );

        let eva = record("Eva", "1999-06-15");
        assert_eq!(
            today_alert(&[ana, eva]).as_deref(),
            Some("Hoje é aniversário de Ana, Eva!")
        );
        assert!(today_alert(&[]).is_none());
    }

    #[test]
    fn day_detail_line_lists_people_or_says_none() {
        assert_eq!(
            day_detail_line(2024, 6, 16, &[]),
            "Nenhum aniversariante em 16/6/2024."
        );
        let entries = vec![DayDetailEntry {
            name: "Ana".to_string(),
            birthdate: date(1990, 6, 15),
        }];
        assert_eq!(
            day_detail_line(2024, 6, 15, &entries),
            "15/6/2024: Ana (15/06/1990)"
        );
    }
}
