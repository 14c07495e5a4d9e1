//! Command output, as colored text or as JSON.
//!
//! Results go to stdout. Text rendering is split from printing so the layout
//! can be checked without a terminal.

use crate::{
    content::{AnnotatedPost, MiscNote, TagCount},
    data::to_json,
    display::{CloudTag, DayGroup, TagWeight, Window, YearSection, excerpt, group_by_day},
    query::Neighbors,
};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Prints command results in the format chosen on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn tags(&self, tags: &[TagCount]) {
        self.emit(tags, || render_tags(tags));
    }

    pub fn cloud(&self, tags: &[CloudTag]) {
        self.emit(tags, || render_cloud(tags));
    }

    /// Posts under a heading. With a window, only the visible part is shown.
    pub fn posts(&self, heading: &str, posts: &[AnnotatedPost], window: Option<Window>) {
        let visible = window.map_or(posts, |w| w.visible(posts));
        self.emit(visible, || render_posts(heading, posts, window));
    }

    pub fn entry(&self, post: &AnnotatedPost) {
        self.emit(post, || {
            let mut out = String::new();
            render_post_line(&mut out, post);
            out
        });
    }

    pub fn post(&self, neighbors: &Neighbors) {
        self.emit(neighbors, || render_post(neighbors));
    }

    pub fn years(&self, sections: &[YearSection<AnnotatedPost>]) {
        self.emit(sections, || render_years(sections));
    }

    /// The visible part of a newest-first feed, grouped by day.
    pub fn misc(&self, feed: &[MiscNote], window: Window, excerpt_len: usize) {
        let days = group_by_day(window.visible(feed));
        self.emit(&days, || render_misc(&days, window, excerpt_len));
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) {
        if self.json {
            println!("{}", to_json(value, "null"));
        } else {
            print!("{}", text());
        }
    }
}

// ============================================================================
// Text Rendering
// ============================================================================

fn render_tags(tags: &[TagCount]) -> String {
    if tags.is_empty() {
        return format!("{}\n", "no tags".dimmed());
    }

    let width = tags
        .iter()
        .map(|tag| tag.name.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for tag in tags {
        let pad = width - tag.name.chars().count();
        writeln!(out, "{}{} {}", tag.name.bold(), " ".repeat(pad), tag.count).ok();
    }
    out
}

fn render_cloud(tags: &[CloudTag]) -> String {
    let words: Vec<String> = tags
        .iter()
        .map(|tag| {
            let label = format!("{}({})", tag.name, tag.count);
            match tag.weight {
                TagWeight::Xl => label.bright_yellow().bold().to_string(),
                TagWeight::L => label.bold().to_string(),
                TagWeight::M => label,
                TagWeight::S => label.dimmed().to_string(),
            }
        })
        .collect();
    format!("{}\n", words.join("  "))
}

fn render_post_line(out: &mut String, post: &AnnotatedPost) {
    writeln!(
        out,
        "{}  {:<12} {}",
        post.date.ymd().dimmed(),
        format!("[{}]", post.kind.name()).cyan(),
        post.title.bold()
    )
    .ok();
    if !post.subtitle.is_empty() {
        writeln!(out, "            {}", post.subtitle).ok();
    }
    writeln!(
        out,
        "            {}  {}",
        post.href.underline(),
        post.tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
            .dimmed()
    )
    .ok();
}

fn render_posts(heading: &str, posts: &[AnnotatedPost], window: Option<Window>) -> String {
    let mut out = String::new();
    writeln!(out, "{} {}", heading.bold(), format!("({})", posts.len()).dimmed()).ok();

    if posts.is_empty() {
        writeln!(out, "{}", "no posts".dimmed()).ok();
        return out;
    }

    let visible = window.map_or(posts, |w| w.visible(posts));
    for post in visible {
        render_post_line(&mut out, post);
    }

    if let Some(window) = window.filter(Window::has_more) {
        writeln!(
            out,
            "{}",
            format!("showing {} of {}", window.shown(), window.total()).dimmed()
        )
        .ok();
    }
    out
}

fn render_post(neighbors: &Neighbors) -> String {
    let mut out = String::new();
    render_post_line(&mut out, &neighbors.post);

    for (label, post) in [("newer", &neighbors.newer), ("older", &neighbors.older)] {
        if let Some(post) = post {
            writeln!(out, "  {label}: {} {}", post.title, post.href.dimmed()).ok();
        }
    }
    out
}

fn render_years(sections: &[YearSection<AnnotatedPost>]) -> String {
    let mut out = String::new();
    for section in sections {
        writeln!(out, "{}", section.year.to_string().bold().yellow()).ok();
        for post in &section.items {
            render_post_line(&mut out, post);
        }
    }
    out
}

fn render_misc(days: &[DayGroup<MiscNote>], window: Window, excerpt_len: usize) -> String {
    let mut out = String::new();
    if days.is_empty() {
        writeln!(out, "{}", "no notes".dimmed()).ok();
        return out;
    }

    for day in days {
        writeln!(out, "{}", day.date.bold()).ok();
        for note in &day.items {
            writeln!(
                out,
                "  {} {}",
                format!("{}:", note.author).cyan(),
                excerpt(&note.content, excerpt_len)
            )
            .ok();
        }
    }

    if window.has_more() {
        writeln!(
            out,
            "{}",
            format!("showing {} of {}", window.shown(), window.total()).dimmed()
        )
        .ok();
    }
    out
}
