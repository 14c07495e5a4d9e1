//! Sectioning result sets by day or by year.

use crate::content::{AnnotatedPost, MiscNote, PostDate};
use chrono::NaiveDate;
use serde::Serialize;

/// Anything carrying a publish date.
pub trait Dated {
    fn date(&self) -> &PostDate;
}

impl Dated for AnnotatedPost {
    fn date(&self) -> &PostDate {
        &self.date
    }
}

impl Dated for MiscNote {
    fn date(&self) -> &PostDate {
        &self.date
    }
}

/// Items sharing one calendar date.
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup<T> {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(skip)]
    pub day: NaiveDate,
    pub items: Vec<T>,
}

/// Items published in one year.
#[derive(Debug, Clone, Serialize)]
pub struct YearSection<T> {
    pub year: i32,
    pub items: Vec<T>,
}

/// Group by the written date portion, in order of first appearance.
///
/// Input order is preserved inside each group. Feed it a newest-first list to
/// get newest-first day sections.
pub fn group_by_day<T: Dated + Clone>(items: &[T]) -> Vec<DayGroup<T>> {
    let mut groups: Vec<DayGroup<T>> = Vec::new();

    for item in items {
        let day = item.date().day();
        match groups.iter_mut().find(|group| group.day == day) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(DayGroup {
                date: item.date().ymd(),
                day,
                items: vec![item.clone()],
            }),
        }
    }

    groups
}

/// Group by year: years descending, items newest first inside each year.
pub fn group_by_year<T: Dated + Clone>(items: &[T]) -> Vec<YearSection<T>> {
    let mut sections: Vec<YearSection<T>> = Vec::new();

    for item in items {
        let year = item.date().year();
        match sections.iter_mut().find(|section| section.year == year) {
            Some(section) => section.items.push(item.clone()),
            None => sections.push(YearSection {
                year,
                items: vec![item.clone()],
            }),
        }
    }

    sections.sort_by(|a, b| b.year.cmp(&a.year));
    for section in &mut sections {
        section.items.sort_by(|a, b| b.date().cmp(a.date()));
    }
    sections
}
