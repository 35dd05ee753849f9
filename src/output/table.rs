//! Terminal table rendering for computed statistics
//!
//! Renderers are read-only consumers of `ProfileStatistics`; empty facets
//! get an explicit "no data" line instead of an empty table.

use crate::core::{AuditCount, ProfileStatistics};
use crate::utils::Timezone;

use super::format::{create_styled_table, format_amount, format_xp, header_cell, right_cell};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) timezone: Timezone,
}

fn print_record_summary(stats: &ProfileStatistics) {
    if stats.skipped_records > 0 {
        eprintln!(
            "Processed {} records ({} malformed, skipped)",
            stats.valid_records, stats.skipped_records
        );
    } else {
        eprintln!("Processed {} records", stats.valid_records);
    }
}

pub(crate) fn print_summary(stats: &ProfileStatistics, options: TableOptions) {
    if let Some(user) = &stats.user {
        let login = user.login.as_deref().unwrap_or("unknown");
        match user.id {
            Some(id) => println!("User: {login} (#{id})"),
            None => println!("User: {login}"),
        }
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Statistic", options.use_color),
        header_cell("Value", options.use_color),
    ]);
    table.add_row(vec!["Total XP".into(), format_xp(stats.total_xp)]);
    table.add_row(vec![
        "Audits done".into(),
        format!(
            "{} ({})",
            stats.audits.done.count,
            format_xp(stats.audits.done.amount)
        ),
    ]);
    table.add_row(vec![
        "Audits received".into(),
        format!(
            "{} ({})",
            stats.audits.received.count,
            format_xp(stats.audits.received.amount)
        ),
    ]);
    table.add_row(vec!["Audit ratio".into(), stats.audits.ratio.to_string()]);
    table.add_row(vec!["Open audits".into(), stats.open_audits.to_string()]);
    table.add_row(vec![
        "Average grade".into(),
        stats
            .average_grade
            .map(|g| format!("{g:.2}"))
            .unwrap_or_else(|| "N/A".to_string()),
    ]);
    table.add_row(vec![
        "Top skill".into(),
        stats
            .top_skills
            .first()
            .map(|s| format!("{} ({})", s.name, format_amount(s.amount)))
            .unwrap_or_else(|| "N/A".to_string()),
    ]);
    println!("{table}");

    print_record_summary(stats);
}

pub(crate) fn print_xp(stats: &ProfileStatistics, options: TableOptions) {
    if stats.xp_timeline.is_empty() {
        println!("No XP data available.");
        return;
    }

    let mut categories = create_styled_table();
    categories.set_header(vec![
        header_cell("Category", options.use_color),
        header_cell("XP", options.use_color),
    ]);
    for (name, amount) in &stats.xp_by_category {
        categories.add_row(vec![name.clone().into(), right_cell(&format_xp(*amount))]);
    }
    categories.add_row(vec![
        "total".into(),
        right_cell(&format_xp(stats.total_xp)),
    ]);
    println!("{categories}");

    let mut timeline = create_styled_table();
    timeline.set_header(vec![
        header_cell("Date", options.use_color),
        header_cell("Cumulative XP", options.use_color),
    ]);
    for point in &stats.xp_timeline {
        timeline.add_row(vec![
            options.timezone.format_minute(point.at).into(),
            right_cell(&format_xp(point.cumulative_xp)),
        ]);
    }
    println!("{timeline}");

    print_record_summary(stats);
}

pub(crate) fn print_audits(stats: &ProfileStatistics, options: TableOptions) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Direction", options.use_color),
        header_cell("Count", options.use_color),
        header_cell("Amount", options.use_color),
    ]);
    table.add_row(vec![
        "Done".into(),
        right_cell(&stats.audits.done.count.to_string()),
        right_cell(&format_xp(stats.audits.done.amount)),
    ]);
    table.add_row(vec![
        "Received".into(),
        right_cell(&stats.audits.received.count.to_string()),
        right_cell(&format_xp(stats.audits.received.amount)),
    ]);
    println!("{table}");
    println!("Audit ratio: {}", stats.audits.ratio);
    if matches!(stats.audits.done.count, AuditCount::NotAvailable) {
        println!("(counts not available from user-total amounts)");
    }
    if stats.open_audits > 0 {
        println!("Open audits: {}", stats.open_audits);
    }
}

pub(crate) fn print_skills(stats: &ProfileStatistics, options: TableOptions) {
    if stats.top_skills.is_empty() {
        println!("No skills data available.");
        return;
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", options.use_color),
        header_cell("Skill", options.use_color),
        header_cell("Amount", options.use_color),
    ]);
    for (rank, skill) in stats.top_skills.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string().into(),
            skill.name.clone().into(),
            right_cell(&format_amount(skill.amount)),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_progress(stats: &ProfileStatistics, options: TableOptions) {
    if stats.grade_timeline.is_empty() {
        println!("No graded progress available.");
        return;
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", options.use_color),
        header_cell("Grade", options.use_color),
    ]);
    for point in &stats.grade_timeline {
        table.add_row(vec![
            options.timezone.format_day(point.at).into(),
            right_cell(&format_amount(point.grade)),
        ]);
    }
    println!("{table}");
    if let Some(average) = stats.average_grade {
        println!("Average grade: {average:.2}");
    }
}
