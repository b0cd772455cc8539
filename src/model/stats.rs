//! Usage statistics
//!
//! Derived on demand from the suggestion book; nothing here is persisted.

use chrono::{DateTime, Local};
use std::collections::HashMap;

use super::suggestions::SuggestionBook;

/// How many suggestions the "most used" list shows
pub const TOP_SUGGESTIONS: usize = 5;

/// Draws summed over the suggestions of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUsage {
    pub name: String,
    pub emoji: String,
    pub color: u32,
    pub count: u64,
    /// Share of all categorized draws, 0-100
    pub percentage: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Sorted by count, highest first
    pub category_usage: Vec<CategoryUsage>,
    /// Most drawn suggestions with their counts
    pub top_suggestions: Vec<(String, u32)>,
    /// Sum of every draw count
    pub total_usage: u64,
    /// Number of suggestions currently on the list
    pub suggestion_count: usize,
    /// Epoch millis of the last draw, 0 = never
    pub last_usage: i64,
}

impl Stats {
    pub fn compute(book: &SuggestionBook) -> Self {
        // Grouped by category name, like the table shows them
        let mut by_name: HashMap<String, CategoryUsage> = HashMap::new();
        for (suggestion, &count) in book.counts() {
            if count == 0 {
                continue;
            }
            if let Some(category) = book.category_for_suggestion(suggestion) {
                let entry = by_name
                    .entry(category.name.clone())
                    .or_insert_with(|| CategoryUsage {
                        name: category.name.clone(),
                        emoji: category.emoji.clone(),
                        color: category.color,
                        count: 0,
                        percentage: 0.0,
                    });
                entry.count += count as u64;
            }
        }

        let categorized: u64 = by_name.values().map(|u| u.count).sum();
        let mut category_usage: Vec<CategoryUsage> = by_name
            .into_values()
            .map(|mut usage| {
                usage.percentage = if categorized > 0 {
                    usage.count as f32 / categorized as f32 * 100.0
                } else {
                    0.0
                };
                usage
            })
            .collect();
        category_usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        let mut top_suggestions: Vec<(String, u32)> = book
            .counts()
            .iter()
            .filter(|(_, c)| **c > 0)
            .map(|(s, &c)| (s.clone(), c))
            .collect();
        top_suggestions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_suggestions.truncate(TOP_SUGGESTIONS);

        Self {
            category_usage,
            top_suggestions,
            total_usage: book.total_draws(),
            suggestion_count: book.len(),
            last_usage: book.last_usage(),
        }
    }

    pub fn last_usage_text(&self) -> String {
        format_last_usage(self.last_usage)
    }
}

/// Local date of an epoch-millis timestamp, or "Never used" for 0
pub fn format_last_usage(millis: i64) -> String {
    if millis <= 0 {
        return "Never used".to_string();
    }
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "Never used".to_string(),
    }
}

/// "12.5%"
pub fn format_percentage(percentage: f32) -> String {
    format!("{:.1}%", percentage)
}
